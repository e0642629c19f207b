use std::{
    collections::{HashMap, VecDeque},
    time::{Duration, Instant},
};

use winit::{
    event::{ElementState, Event, KeyEvent, Modifiers, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::{Key, KeyCode, KeyLocation, ModifiersKeyState, NamedKey, PhysicalKey},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::WindowId,
};

use super::{
    codes::{self, keycode, kmod, scancode},
    MouseState, NativeEvent, NativeQueue, QueueError, RawKeyboardEvent, RawMouseButtonEvent,
    RawMouseMotionEvent, RawMouseWheelEvent,
};

/// Two presses of the same button closer than this count as one multi-click
const MULTI_CLICK_DELAY: Duration = Duration::from_millis(500);

/// Pixel scroll deltas are turned into wheel notches of this many pixels
const PIXELS_PER_NOTCH: f64 = 20.0;

/// Native queue over a winit event loop.
///
/// Windows must be registered to get a native window identifier;
/// events for unregistered windows never enter the queue.
pub struct WinitQueue {
    event_loop: EventLoop<()>,
    translator: Translator,
}
impl WinitQueue {
    pub fn new() -> eyre::Result<Self> {
        use eyre::WrapErr;

        let event_loop = EventLoop::new().wrap_err("creating the native event loop")?;
        Ok(Self {
            event_loop,
            translator: Translator::new(),
        })
    }

    /// What windows are built against
    pub fn target(&self) -> &EventLoopWindowTarget<()> {
        &self.event_loop
    }

    /// Starts routing events of `window` into the queue, under the returned identifier
    pub fn register(&mut self, window: WindowId) -> u32 {
        let translator = &mut self.translator;
        translator.next_id += 1;
        let id = translator.next_id;
        translator.windows.insert(window, id);
        log::debug!("registered window {id}");
        id
    }

    pub fn unregister(&mut self, window: WindowId) {
        if let Some(id) = self.translator.windows.remove(&window) {
            self.translator.cursors.remove(&id);
            log::debug!("unregistered window {id}");
        }
    }

    fn pump(&mut self, timeout: Option<Duration>) -> PumpStatus {
        let Self {
            event_loop,
            translator,
        } = self;

        event_loop.pump_events(timeout, |event, target| {
            target.set_control_flow(ControlFlow::Wait);
            translator.translate(event);
        })
    }
}

impl NativeQueue for WinitQueue {
    fn poll(&mut self) -> Option<NativeEvent> {
        if self.translator.pending.is_empty() {
            if let PumpStatus::Exit(code) = self.pump(Some(Duration::ZERO)) {
                log::warn!("native event loop exited with code {code}");
            }
        }
        self.translator.pending.pop_front()
    }

    fn wait(&mut self, timeout: Option<Duration>) -> Result<Option<NativeEvent>, QueueError> {
        let deadline = timeout.map(|timeout| Instant::now() + timeout);

        loop {
            if let Some(event) = self.translator.pending.pop_front() {
                return Ok(Some(event));
            }

            let remaining = deadline.map(|deadline| deadline.saturating_duration_since(Instant::now()));
            if let PumpStatus::Exit(code) = self.pump(remaining) {
                if self.translator.pending.is_empty() {
                    return Err(QueueError::Closed(code));
                }
            }

            if self.translator.pending.is_empty()
                && deadline.is_some_and(|deadline| Instant::now() >= deadline)
            {
                return Ok(None);
            }
        }
    }

    fn key_down(&mut self, code: u32) -> bool {
        self.pump(Some(Duration::ZERO));
        self.translator
            .keys
            .get(code as usize)
            .copied()
            .unwrap_or(false)
    }

    fn mouse_state(&mut self) -> MouseState {
        self.pump(Some(Duration::ZERO));
        self.translator.mouse
    }
}

struct Click {
    button: u8,
    at: Instant,
    count: u8,
}

/// Turns winit events into native records and keeps the input state
struct Translator {
    started: Instant,
    next_id: u32,
    windows: HashMap<WindowId, u32>,
    pending: VecDeque<NativeEvent>,

    keys: Vec<bool>,
    /// Held modifier keys and active locks, as [`kmod`] bits
    modifiers: u16,
    mouse: MouseState,
    cursors: HashMap<u32, (i32, i32)>,
    last_click: Option<Click>,
}
impl Translator {
    fn new() -> Self {
        Self {
            started: Instant::now(),
            next_id: 0,
            windows: HashMap::new(),
            pending: VecDeque::new(),
            keys: vec![false; scancode::COUNT],
            modifiers: 0,
            mouse: MouseState::default(),
            cursors: HashMap::new(),
            last_click: None,
        }
    }

    fn push(&mut self, mut event: NativeEvent) {
        event.timestamp = self.started.elapsed().as_millis() as u32;
        self.pending.push_back(event);
    }

    fn translate(&mut self, event: Event<()>) {
        match event {
            Event::WindowEvent { window_id, event } => {
                if let Some(&id) = self.windows.get(&window_id) {
                    self.translate_window_event(id, event);
                }
            }
            Event::LoopExiting => self.push(NativeEvent::quit()),
            _ => (),
        }
    }

    fn translate_window_event(&mut self, id: u32, event: WindowEvent) {
        use codes::window;

        match event {
            WindowEvent::Resized(size) => self.push(NativeEvent::window(
                id,
                window::RESIZED,
                size.width as i32,
                size.height as i32,
            )),
            WindowEvent::Moved(position) => {
                self.push(NativeEvent::window(id, window::MOVED, position.x, position.y))
            }
            WindowEvent::CloseRequested => {
                self.push(NativeEvent::window(id, window::CLOSE, 0, 0));
                // Closing the last window asks the application to quit
                if self.windows.len() == 1 {
                    self.push(NativeEvent::quit());
                }
            }
            WindowEvent::Focused(true) => {
                self.push(NativeEvent::window(id, window::FOCUS_GAINED, 0, 0))
            }
            WindowEvent::Focused(false) => {
                self.push(NativeEvent::window(id, window::FOCUS_LOST, 0, 0))
            }
            WindowEvent::CursorEntered { .. } => {
                self.push(NativeEvent::window(id, window::ENTER, 0, 0))
            }
            WindowEvent::CursorLeft { .. } => {
                self.push(NativeEvent::window(id, window::LEAVE, 0, 0))
            }
            WindowEvent::Occluded(true) => self.push(NativeEvent::window(id, window::HIDDEN, 0, 0)),
            WindowEvent::Occluded(false) => self.push(NativeEvent::window(id, window::SHOWN, 0, 0)),
            WindowEvent::RedrawRequested => {
                self.push(NativeEvent::window(id, window::EXPOSED, 0, 0))
            }
            WindowEvent::ModifiersChanged(modifiers) => self.sync_modifiers(&modifiers),
            WindowEvent::KeyboardInput { event, .. } => self.translate_key(id, event),
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as i32, position.y as i32);
                let (last_x, last_y) = self.cursors.insert(id, (x, y)).unwrap_or((x, y));
                self.mouse.x = x;
                self.mouse.y = y;
                self.push(NativeEvent::mouse_motion(
                    id,
                    RawMouseMotionEvent {
                        state: self.mouse.buttons,
                        x,
                        y,
                        xrel: x - last_x,
                        yrel: y - last_y,
                    },
                ));
            }
            WindowEvent::MouseInput { state, button, .. } => self.translate_button(id, state, button),
            WindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (x.round() as i32, y.round() as i32),
                    MouseScrollDelta::PixelDelta(pixels) => (
                        (pixels.x / PIXELS_PER_NOTCH).round() as i32,
                        (pixels.y / PIXELS_PER_NOTCH).round() as i32,
                    ),
                };
                self.push(NativeEvent::mouse_wheel(
                    id,
                    RawMouseWheelEvent {
                        x,
                        y,
                        direction: codes::wheel::NORMAL,
                    },
                ));
            }
            _ => (),
        }
    }

    fn translate_key(&mut self, id: u32, event: KeyEvent) {
        let pressed = event.state == ElementState::Pressed;

        let code = match event.physical_key {
            PhysicalKey::Code(code) => scancode_of(code),
            PhysicalKey::Unidentified(_) => None,
        };
        let modifier_bit = code.map(modifier_bit_of).unwrap_or(0)
            | match event.logical_key {
                Key::Named(NamedKey::AltGraph) => kmod::MODE,
                _ => 0,
            };

        if pressed {
            self.modifiers |= modifier_bit;
        } else {
            self.modifiers &= !modifier_bit;
        }
        if pressed && !event.repeat {
            match code {
                Some(scancode::CAPSLOCK) => self.modifiers ^= kmod::CAPS,
                Some(scancode::NUMLOCKCLEAR) => self.modifiers ^= kmod::NUM,
                _ => (),
            }
        }
        if let Some(slot) = code.and_then(|code| self.keys.get_mut(code as usize)) {
            *slot = pressed;
        }

        // Keys unknown both ways still go through; decoding rejects them
        let keycode = keycode_of(&event.logical_key, event.location, code);
        let code = code.unwrap_or(0);
        self.push(NativeEvent::keyboard(
            id,
            if pressed { codes::KEYDOWN } else { codes::KEYUP },
            RawKeyboardEvent {
                state: if pressed { codes::PRESSED } else { codes::RELEASED },
                repeat: event.repeat as u8,
                scancode: code,
                keycode,
                modifiers: self.modifiers,
            },
        ));
    }

    /// Only clears bits here; sides are known from the key events themselves
    fn sync_modifiers(&mut self, modifiers: &Modifiers) {
        let state = modifiers.state();
        let pairs = [
            (
                state.shift_key(),
                modifiers.lshift_state(),
                modifiers.rshift_state(),
                kmod::LSHIFT,
                kmod::RSHIFT,
            ),
            (
                state.control_key(),
                modifiers.lcontrol_state(),
                modifiers.rcontrol_state(),
                kmod::LCTRL,
                kmod::RCTRL,
            ),
            (
                state.alt_key(),
                modifiers.lalt_state(),
                modifiers.ralt_state(),
                kmod::LALT,
                kmod::RALT,
            ),
            (
                state.super_key(),
                modifiers.lsuper_state(),
                modifiers.rsuper_state(),
                kmod::LGUI,
                kmod::RGUI,
            ),
        ];

        for (active, left, right, left_bit, right_bit) in pairs {
            if !active {
                self.modifiers &= !(left_bit | right_bit);
                continue;
            }
            if left == ModifiersKeyState::Pressed {
                self.modifiers |= left_bit;
            }
            if right == ModifiersKeyState::Pressed {
                self.modifiers |= right_bit;
            }
            if self.modifiers & (left_bit | right_bit) == 0 {
                self.modifiers |= left_bit;
            }
        }
    }

    fn translate_button(&mut self, id: u32, state: ElementState, button: MouseButton) {
        let code = match button {
            MouseButton::Left => codes::button::LEFT,
            MouseButton::Middle => codes::button::MIDDLE,
            MouseButton::Right => codes::button::RIGHT,
            MouseButton::Back => codes::button::X1,
            MouseButton::Forward => codes::button::X2,
            MouseButton::Other(_) => 0,
        };
        let pressed = state == ElementState::Pressed;

        let clicks = if pressed {
            let now = Instant::now();
            let count = match &self.last_click {
                Some(last) if last.button == code && now - last.at < MULTI_CLICK_DELAY => {
                    last.count.saturating_add(1)
                }
                _ => 1,
            };
            self.last_click = Some(Click {
                button: code,
                at: now,
                count,
            });
            count
        } else {
            match &self.last_click {
                Some(last) if last.button == code => last.count,
                _ => 1,
            }
        };

        if let Some(mask) = codes::button::mask(code) {
            if pressed {
                self.mouse.buttons |= mask;
            } else {
                self.mouse.buttons &= !mask;
            }
        }

        self.push(NativeEvent::mouse_button(
            id,
            if pressed {
                codes::MOUSEBUTTONDOWN
            } else {
                codes::MOUSEBUTTONUP
            },
            RawMouseButtonEvent {
                button: code,
                state: if pressed { codes::PRESSED } else { codes::RELEASED },
                clicks,
                x: self.mouse.x,
                y: self.mouse.y,
            },
        ));
    }
}

fn modifier_bit_of(code: u32) -> u16 {
    match code {
        scancode::LSHIFT => kmod::LSHIFT,
        scancode::RSHIFT => kmod::RSHIFT,
        scancode::LCTRL => kmod::LCTRL,
        scancode::RCTRL => kmod::RCTRL,
        scancode::LALT => kmod::LALT,
        scancode::RALT => kmod::RALT,
        scancode::LGUI => kmod::LGUI,
        scancode::RGUI => kmod::RGUI,
        _ => 0,
    }
}

/// What the key means on the current layout, falling back to its physical position.
///
/// Keypad keys and side-specific modifiers always go by position, as do characters
/// that aren't one of our keys (shifted symbols, accented letters).
fn keycode_of(logical: &Key, location: KeyLocation, physical: Option<u32>) -> i32 {
    let by_position = physical.map_or(0, keycode::for_scancode);
    if location == KeyLocation::Numpad {
        return by_position;
    }

    let by_meaning = match logical {
        Key::Character(text) => character_keycode(text),
        Key::Named(named) => named_scancode(*named).map(keycode::for_scancode),
        _ => None,
    };
    by_meaning.unwrap_or(by_position)
}

/// Lowercase code point of a single character we have a key for
fn character_keycode(text: &str) -> Option<i32> {
    let mut chars = text.chars();
    let (Some(character), None) = (chars.next(), chars.next()) else {
        return None;
    };
    let mut lower = character.to_lowercase();
    let (Some(lower), None) = (lower.next(), lower.next()) else {
        return None;
    };

    let code = lower as i32;
    crate::input::Key::from_keycode(code).map(|_| code)
}

fn named_scancode(key: NamedKey) -> Option<u32> {
    const FUNCTION_KEYS: [NamedKey; 12] = [
        NamedKey::F1,
        NamedKey::F2,
        NamedKey::F3,
        NamedKey::F4,
        NamedKey::F5,
        NamedKey::F6,
        NamedKey::F7,
        NamedKey::F8,
        NamedKey::F9,
        NamedKey::F10,
        NamedKey::F11,
        NamedKey::F12,
    ];
    if let Some(index) = FUNCTION_KEYS.iter().position(|&function| function == key) {
        return Some(scancode::F1 + index as u32);
    }

    Some(match key {
        NamedKey::Enter => scancode::RETURN,
        NamedKey::Escape => scancode::ESCAPE,
        NamedKey::Backspace => scancode::BACKSPACE,
        NamedKey::Tab => scancode::TAB,
        NamedKey::Space => scancode::SPACE,
        NamedKey::CapsLock => scancode::CAPSLOCK,
        NamedKey::PrintScreen => scancode::PRINTSCREEN,
        NamedKey::ScrollLock => scancode::SCROLLLOCK,
        NamedKey::Pause => scancode::PAUSE,
        NamedKey::Insert => scancode::INSERT,
        NamedKey::Home => scancode::HOME,
        NamedKey::PageUp => scancode::PAGEUP,
        NamedKey::Delete => scancode::DELETE,
        NamedKey::End => scancode::END,
        NamedKey::PageDown => scancode::PAGEDOWN,
        NamedKey::ArrowRight => scancode::RIGHT,
        NamedKey::ArrowLeft => scancode::LEFT,
        NamedKey::ArrowDown => scancode::DOWN,
        NamedKey::ArrowUp => scancode::UP,
        NamedKey::NumLock => scancode::NUMLOCKCLEAR,
        NamedKey::ContextMenu => scancode::APPLICATION,
        // Shift, Control, Alt and Super don't say which side they are on
        _ => return None,
    })
}

fn scancode_of(code: KeyCode) -> Option<u32> {
    let letters = [
        KeyCode::KeyA,
        KeyCode::KeyB,
        KeyCode::KeyC,
        KeyCode::KeyD,
        KeyCode::KeyE,
        KeyCode::KeyF,
        KeyCode::KeyG,
        KeyCode::KeyH,
        KeyCode::KeyI,
        KeyCode::KeyJ,
        KeyCode::KeyK,
        KeyCode::KeyL,
        KeyCode::KeyM,
        KeyCode::KeyN,
        KeyCode::KeyO,
        KeyCode::KeyP,
        KeyCode::KeyQ,
        KeyCode::KeyR,
        KeyCode::KeyS,
        KeyCode::KeyT,
        KeyCode::KeyU,
        KeyCode::KeyV,
        KeyCode::KeyW,
        KeyCode::KeyX,
        KeyCode::KeyY,
        KeyCode::KeyZ,
    ];
    if let Some(offset) = letters.iter().position(|&letter| letter == code) {
        return Some(scancode::A + offset as u32);
    }

    let digits = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ];
    if let Some(offset) = digits.iter().position(|&digit| digit == code) {
        return Some(scancode::N1 + offset as u32);
    }

    let keypad = [
        KeyCode::Numpad1,
        KeyCode::Numpad2,
        KeyCode::Numpad3,
        KeyCode::Numpad4,
        KeyCode::Numpad5,
        KeyCode::Numpad6,
        KeyCode::Numpad7,
        KeyCode::Numpad8,
        KeyCode::Numpad9,
    ];
    if let Some(offset) = keypad.iter().position(|&digit| digit == code) {
        return Some(scancode::KP_1 + offset as u32);
    }

    let functions = [
        KeyCode::F1,
        KeyCode::F2,
        KeyCode::F3,
        KeyCode::F4,
        KeyCode::F5,
        KeyCode::F6,
        KeyCode::F7,
        KeyCode::F8,
        KeyCode::F9,
        KeyCode::F10,
        KeyCode::F11,
        KeyCode::F12,
    ];
    if let Some(offset) = functions.iter().position(|&function| function == code) {
        return Some(scancode::F1 + offset as u32);
    }

    Some(match code {
        KeyCode::Digit0 => scancode::N0,
        KeyCode::Numpad0 => scancode::KP_0,
        KeyCode::Enter => scancode::RETURN,
        KeyCode::Escape => scancode::ESCAPE,
        KeyCode::Backspace => scancode::BACKSPACE,
        KeyCode::Tab => scancode::TAB,
        KeyCode::Space => scancode::SPACE,
        KeyCode::Minus => scancode::MINUS,
        KeyCode::Equal => scancode::EQUALS,
        KeyCode::BracketLeft => scancode::LEFTBRACKET,
        KeyCode::BracketRight => scancode::RIGHTBRACKET,
        KeyCode::Backslash => scancode::BACKSLASH,
        KeyCode::Semicolon => scancode::SEMICOLON,
        KeyCode::Quote => scancode::APOSTROPHE,
        KeyCode::Backquote => scancode::GRAVE,
        KeyCode::Comma => scancode::COMMA,
        KeyCode::Period => scancode::PERIOD,
        KeyCode::Slash => scancode::SLASH,
        KeyCode::CapsLock => scancode::CAPSLOCK,
        KeyCode::PrintScreen => scancode::PRINTSCREEN,
        KeyCode::ScrollLock => scancode::SCROLLLOCK,
        KeyCode::Pause => scancode::PAUSE,
        KeyCode::Insert => scancode::INSERT,
        KeyCode::Home => scancode::HOME,
        KeyCode::PageUp => scancode::PAGEUP,
        KeyCode::Delete => scancode::DELETE,
        KeyCode::End => scancode::END,
        KeyCode::PageDown => scancode::PAGEDOWN,
        KeyCode::ArrowRight => scancode::RIGHT,
        KeyCode::ArrowLeft => scancode::LEFT,
        KeyCode::ArrowDown => scancode::DOWN,
        KeyCode::ArrowUp => scancode::UP,
        KeyCode::NumLock => scancode::NUMLOCKCLEAR,
        KeyCode::NumpadDivide => scancode::KP_DIVIDE,
        KeyCode::NumpadMultiply => scancode::KP_MULTIPLY,
        KeyCode::NumpadSubtract => scancode::KP_MINUS,
        KeyCode::NumpadAdd => scancode::KP_PLUS,
        KeyCode::NumpadEnter => scancode::KP_ENTER,
        KeyCode::NumpadDecimal => scancode::KP_PERIOD,
        KeyCode::ContextMenu => scancode::APPLICATION,
        KeyCode::ControlLeft => scancode::LCTRL,
        KeyCode::ShiftLeft => scancode::LSHIFT,
        KeyCode::AltLeft => scancode::LALT,
        KeyCode::SuperLeft => scancode::LGUI,
        KeyCode::ControlRight => scancode::RCTRL,
        KeyCode::ShiftRight => scancode::RSHIFT,
        KeyCode::AltRight => scancode::RALT,
        KeyCode::SuperRight => scancode::RGUI,
        _ => return None,
    })
}
