use std::{cell::RefCell, rc::Rc};

use ikmedia::{
    event::*,
    geometry::{Positioni, Sizei},
    input::{Button, Key, Keyboard, Mouse},
    native::{
        codes::{self, kmod, keycode, scancode},
        NativeEvent, RawKeyboardEvent, RawMouseButtonEvent, RawMouseMotionEvent, ScriptedQueue,
        SharedQueue,
    },
};

fn scripted() -> (Rc<RefCell<ScriptedQueue>>, SharedQueue) {
    let scripted = Rc::new(RefCell::new(ScriptedQueue::new()));
    let queue: SharedQueue = scripted.clone();
    (scripted, queue)
}

fn key_down(window_id: u32, code: u32, modifiers: u16) -> NativeEvent {
    NativeEvent::keyboard(
        window_id,
        codes::KEYDOWN,
        RawKeyboardEvent {
            state: codes::PRESSED,
            repeat: 0,
            scancode: code,
            keycode: keycode::for_scancode(code),
            modifiers,
        },
    )
}

fn motion(window_id: u32, x: i32, y: i32) -> NativeEvent {
    NativeEvent::mouse_motion(
        window_id,
        RawMouseMotionEvent {
            x,
            y,
            ..Default::default()
        },
    )
}

#[derive(Default)]
struct Recorder {
    calls: Vec<&'static str>,
}
impl EventHandler for Recorder {
    fn handle_quit(&mut self, _: &QuitEvent) {
        self.calls.push("quit");
    }
    fn handle_window(&mut self, _: &WindowEvent) {
        self.calls.push("window");
    }
    fn handle_keyboard(&mut self, _: &KeyboardEvent) {
        self.calls.push("keyboard");
    }
    fn handle_mouse_motion(&mut self, _: &MouseMotionEvent) {
        self.calls.push("mouse motion");
    }
    fn handle_mouse_button(&mut self, _: &MouseButtonEvent) {
        self.calls.push("mouse button");
    }
    fn handle_mouse_wheel(&mut self, _: &MouseWheelEvent) {
        self.calls.push("mouse wheel");
    }
}

#[test]
fn keyboard_only_pump_drops_motion_but_not_quit() {
    const KEYBOARD: EventSupport = EventSupport::from_categories(&[EventCategory::Keyboard]);
    let (scripted, queue) = scripted();
    let pump = EventPump::new(queue, 1, KEYBOARD);

    scripted.borrow_mut().push(motion(1, 3, 4));
    scripted.borrow_mut().push(key_down(1, scancode::SPACE, 0));
    scripted.borrow_mut().push(NativeEvent::quit());

    assert!(!pump.poll().is_present());
    assert_eq!(pump.poll().category(), Some(EventCategory::Keyboard));
    assert_eq!(pump.poll().category(), Some(EventCategory::Quit));
    assert!(!pump.poll().is_present());
}

#[test]
fn events_reach_only_the_pump_of_their_window() {
    let (scripted, queue) = scripted();
    let first = EventPump::new(queue.clone(), 1, EventSupport::ALL);
    let second = EventPump::new(queue, 2, EventSupport::ALL);

    scripted.borrow_mut().push(key_down(2, scancode::A, 0));
    assert!(!first.poll().is_present());

    scripted.borrow_mut().push(key_down(2, scancode::A, 0));
    let event = second.poll();
    match event.kind() {
        Some(EventKind::Keyboard(keyboard)) => assert_eq!(keyboard.key(), Key::A),
        other => panic!("expected a keyboard event, got {other:?}"),
    }
}

#[test]
fn both_shift_keys_decode_in_order() {
    let (scripted, queue) = scripted();
    let pump = EventPump::new(queue, 1, EventSupport::ALL);
    scripted
        .borrow_mut()
        .push(key_down(1, scancode::A, kmod::LSHIFT | kmod::RSHIFT));
    scripted.borrow_mut().push(key_down(1, scancode::A, kmod::LCTRL));

    let Some(EventKind::Keyboard(shifted)) = pump.poll().into_kind() else {
        panic!("expected a keyboard event");
    };
    assert_eq!(
        shifted.modifiers(),
        [Modifier::LeftShift, Modifier::RightShift, Modifier::AnyShift]
    );

    let Some(EventKind::Keyboard(unshifted)) = pump.poll().into_kind() else {
        panic!("expected a keyboard event");
    };
    assert!(!unshifted.has_modifier(Modifier::LeftShift));
    assert!(!unshifted.has_modifier(Modifier::RightShift));
    assert!(!unshifted.has_modifier(Modifier::AnyShift));
    assert!(unshifted.has_modifier(Modifier::AnyCtrl));
}

#[test]
fn window_sub_events_fill_in_only_their_payload() {
    let (scripted, queue) = scripted();
    let pump = EventPump::new(queue, 1, EventSupport::ALL);
    scripted
        .borrow_mut()
        .push(NativeEvent::window(1, codes::window::MOVED, 10, 20));
    scripted
        .borrow_mut()
        .push(NativeEvent::window(1, codes::window::RESIZED, 640, 480));
    scripted
        .borrow_mut()
        .push(NativeEvent::window(1, codes::window::FOCUS_GAINED, 1, 1));

    let mut windows = std::iter::from_fn(|| match pump.poll().into_kind() {
        Some(EventKind::Window(window)) => Some(window),
        _ => None,
    });

    let moved = windows.next().expect("moved");
    assert_eq!(moved.kind(), WindowEventKind::Moved);
    assert_eq!(moved.moved_to_position(), Some(Positioni::new(10, 20)));
    assert_eq!(moved.resized_to_size(), None);

    let resized = windows.next().expect("resized");
    assert_eq!(resized.moved_to_position(), None);
    assert_eq!(resized.resized_to_size(), Some(Sizei::new(640, 480)));

    let focused = windows.next().expect("focus gained");
    assert_eq!(focused.moved_to_position(), None);
    assert_eq!(focused.resized_to_size(), None);
}

#[test]
fn unknown_records_come_out_empty() {
    let (scripted, queue) = scripted();
    let pump = EventPump::new(queue, 1, EventSupport::ALL);

    let mut unknown = NativeEvent::quit();
    unknown.kind = 0xdead;
    unknown.window_id = 1;
    scripted.borrow_mut().push(unknown);
    scripted
        .borrow_mut()
        .push(NativeEvent::window(1, 99, 0, 0));
    let mut bad_key = key_down(1, scancode::A, 0);
    if let ikmedia::native::NativePayload::Keyboard(raw) = &mut bad_key.payload {
        raw.keycode = -5;
    }
    scripted.borrow_mut().push(bad_key);

    assert!(!pump.poll().is_present());
    assert!(!pump.poll().is_present());
    assert!(!pump.poll().is_present());
    assert!(scripted.borrow().is_empty());
}

#[test]
fn empty_event_calls_nothing() {
    let mut recorder = Recorder::default();
    Event::empty().play(&mut recorder);
    assert!(recorder.calls.is_empty());
}

#[test]
fn each_event_calls_its_own_callback() {
    let (scripted, queue) = scripted();
    let pump = EventPump::new(queue, 1, EventSupport::ALL);
    {
        let mut scripted = scripted.borrow_mut();
        scripted.push(NativeEvent::quit());
        scripted.push(NativeEvent::window(1, codes::window::SHOWN, 0, 0));
        scripted.push(key_down(1, scancode::ESCAPE, 0));
        scripted.push(motion(1, 1, 1));
        scripted.push(NativeEvent::mouse_button(
            1,
            codes::MOUSEBUTTONDOWN,
            RawMouseButtonEvent {
                button: codes::button::LEFT,
                state: codes::PRESSED,
                clicks: 2,
                x: 1,
                y: 1,
            },
        ));
    }

    let mut recorder = Recorder::default();
    while !scripted.borrow().is_empty() {
        pump.poll().play(&mut recorder);
    }
    assert_eq!(
        recorder.calls,
        ["quit", "window", "keyboard", "mouse motion", "mouse button"]
    );
}

#[test]
fn input_state_follows_the_queue() {
    let (scripted, queue) = scripted();
    let pump = EventPump::new(queue.clone(), 1, EventSupport::NONE);
    {
        let mut scripted = scripted.borrow_mut();
        scripted.push(key_down(1, scancode::A, 0));
        scripted.push(motion(1, 42, 24));
        scripted.push(NativeEvent::mouse_button(
            1,
            codes::MOUSEBUTTONDOWN,
            RawMouseButtonEvent {
                button: codes::button::RIGHT,
                state: codes::PRESSED,
                clicks: 1,
                x: 42,
                y: 24,
            },
        ));
    }
    while !scripted.borrow().is_empty() {
        pump.poll();
    }

    assert!(Keyboard::is_key_pressed(&queue, Key::A));
    assert!(!Keyboard::is_key_pressed(&queue, Key::B));
    assert!(Mouse::is_button_pressed(&queue, Button::Right));
    assert!(!Mouse::is_button_pressed(&queue, Button::Left));
    assert_eq!(Mouse::position(&queue), Positioni::new(42, 24));
}
