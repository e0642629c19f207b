//! Native event records and the queue they come out of.
//!
//! Everything in here is "raw": integer codes straight from the platform shim,
//! with no guarantee that any of them is meaningful. Turning records into typed
//! events is the job of [`crate::event`].

pub mod codes;
mod scripted;
mod winit_queue;

pub use self::scripted::ScriptedQueue;
pub use self::winit_queue::WinitQueue;

use std::{cell::RefCell, rc::Rc, time::Duration};

/// One record of the native event queue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeEvent {
    /// Event type discriminant, one of the event type codes in [`codes`]
    pub kind: u32,
    /// Identifier of the window the event is addressed to; `0` when it is addressed to none
    pub window_id: u32,
    /// Milliseconds since the queue was created
    pub timestamp: u32,
    pub payload: NativePayload,
}
impl NativeEvent {
    pub fn new(kind: u32, window_id: u32, payload: NativePayload) -> Self {
        Self {
            kind,
            window_id,
            timestamp: 0,
            payload,
        }
    }

    pub fn quit() -> Self {
        Self::new(codes::QUIT, 0, NativePayload::None)
    }
    pub fn window(window_id: u32, event: u8, data1: i32, data2: i32) -> Self {
        Self::new(
            codes::WINDOWEVENT,
            window_id,
            NativePayload::Window(RawWindowEvent {
                event,
                data1,
                data2,
            }),
        )
    }
    pub fn keyboard(window_id: u32, kind: u32, raw: RawKeyboardEvent) -> Self {
        Self::new(kind, window_id, NativePayload::Keyboard(raw))
    }
    pub fn mouse_motion(window_id: u32, raw: RawMouseMotionEvent) -> Self {
        Self::new(codes::MOUSEMOTION, window_id, NativePayload::MouseMotion(raw))
    }
    pub fn mouse_button(window_id: u32, kind: u32, raw: RawMouseButtonEvent) -> Self {
        Self::new(kind, window_id, NativePayload::MouseButton(raw))
    }
    pub fn mouse_wheel(window_id: u32, raw: RawMouseWheelEvent) -> Self {
        Self::new(codes::MOUSEWHEEL, window_id, NativePayload::MouseWheel(raw))
    }
}

/// Type-specific part of a [`NativeEvent`].
/// Nothing forces it to agree with the record's `kind`; decoding checks that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NativePayload {
    None,
    Window(RawWindowEvent),
    Keyboard(RawKeyboardEvent),
    MouseMotion(RawMouseMotionEvent),
    MouseButton(RawMouseButtonEvent),
    MouseWheel(RawMouseWheelEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawWindowEvent {
    /// Window sub-event code, see [`codes::window`]
    pub event: u8,
    pub data1: i32,
    pub data2: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawKeyboardEvent {
    pub state: u8,
    /// Non-zero for key repeats
    pub repeat: u8,
    pub scancode: u32,
    pub keycode: i32,
    /// Modifier bits, see [`codes::kmod`]
    pub modifiers: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawMouseMotionEvent {
    /// Button state mask at the time of the motion
    pub state: u32,
    pub x: i32,
    pub y: i32,
    pub xrel: i32,
    pub yrel: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawMouseButtonEvent {
    pub button: u8,
    pub state: u8,
    pub clicks: u8,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawMouseWheelEvent {
    pub x: i32,
    pub y: i32,
    /// See [`codes::wheel`]
    pub direction: u32,
}

/// Snapshot of the mouse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseState {
    /// Pressed buttons, see [`codes::button::mask`]
    pub buttons: u32,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("waiting for an event failed: {0}")]
    WaitFailed(String),

    #[error("the native event loop exited with code {0}")]
    Closed(i32),
}

/// The platform's event queue, plus the input state it keeps up to date
pub trait NativeQueue {
    /// Takes the next pending record, if any. Never blocks.
    fn poll(&mut self) -> Option<NativeEvent>;

    /// Blocks until a record is available.
    ///
    /// With a timeout, `Ok(None)` means the timeout elapsed first.
    /// Without one, this only returns `Ok(Some(_))` or an error.
    fn wait(&mut self, timeout: Option<Duration>) -> Result<Option<NativeEvent>, QueueError>;

    /// `true` if the key at this scan code is currently held down
    fn key_down(&mut self, scancode: u32) -> bool;

    fn mouse_state(&mut self) -> MouseState;
}

/// The process-wide queue, shared by every window and pump on the event thread
pub type SharedQueue = Rc<RefCell<dyn NativeQueue>>;

/// Wraps a queue so it can be handed to windows and pumps
pub fn share<Q: NativeQueue + 'static>(queue: Q) -> SharedQueue {
    Rc::new(RefCell::new(queue))
}
