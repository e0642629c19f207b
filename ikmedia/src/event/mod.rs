//! Typed input and window events.
//!
//! Native records are decoded into one of six event kinds by an [`EventPump`],
//! wrapped in an [`Event`], and handed to application code through an [`EventHandler`].
//!
//! ```no_run
//! # use ikmedia::event::*;
//! struct Game {
//!     running: bool,
//! }
//! impl EventHandler for Game {
//!     fn handle_quit(&mut self, _: &QuitEvent) {
//!         self.running = false;
//!     }
//! }
//!
//! # fn run(pump: &EventPump, game: &mut Game) {
//! while game.running {
//!     pump.poll().play(game);
//! }
//! # }
//! ```

mod keyboard;
mod mouse;
mod pump;
mod quit;
mod support;
mod window;

pub use self::keyboard::{KeyDirection, KeyState, KeyboardEvent, Modifier};
pub use self::mouse::{
    ButtonState, MouseButtonEvent, MouseMotionEvent, MouseWheelEvent, WheelDirection,
};
pub use self::pump::EventPump;
pub use self::quit::QuitEvent;
pub use self::support::EventSupport;
pub use self::window::{WindowEvent, WindowEventKind};

/// Broad kind of an event; every category but [`EventCategory::Quit`] can be switched off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Quit,
    Window,
    Keyboard,
    MouseMotion,
    MouseButton,
    MouseWheel,
}

/// A native record carried a code we have no mapping for
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unrecognized {what} code {code:#x}")]
    UnrecognizedEnumerant { what: &'static str, code: i64 },
}
impl DecodeError {
    pub(crate) fn unrecognized(what: &'static str, code: impl Into<i64>) -> Self {
        Self::UnrecognizedEnumerant {
            what,
            code: code.into(),
        }
    }
}

/// Application side of event dispatch: one callback per category.
///
/// Every callback does nothing by default, so handlers only spell out what they care about.
pub trait EventHandler {
    fn handle_quit(&mut self, _event: &QuitEvent) {}
    fn handle_window(&mut self, _event: &WindowEvent) {}
    fn handle_keyboard(&mut self, _event: &KeyboardEvent) {}
    fn handle_mouse_motion(&mut self, _event: &MouseMotionEvent) {}
    fn handle_mouse_button(&mut self, _event: &MouseButtonEvent) {}
    fn handle_mouse_wheel(&mut self, _event: &MouseWheelEvent) {}
}

/// One decoded event, of any category
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Quit(QuitEvent),
    Window(WindowEvent),
    Keyboard(KeyboardEvent),
    MouseMotion(MouseMotionEvent),
    MouseButton(MouseButtonEvent),
    MouseWheel(MouseWheelEvent),
}
impl EventKind {
    pub fn category(&self) -> EventCategory {
        match self {
            Self::Quit(_) => EventCategory::Quit,
            Self::Window(_) => EventCategory::Window,
            Self::Keyboard(_) => EventCategory::Keyboard,
            Self::MouseMotion(_) => EventCategory::MouseMotion,
            Self::MouseButton(_) => EventCategory::MouseButton,
            Self::MouseWheel(_) => EventCategory::MouseWheel,
        }
    }

    /// Calls the one handler callback matching this event
    pub fn play<H: EventHandler + ?Sized>(&self, handler: &mut H) {
        match self {
            Self::Quit(event) => handler.handle_quit(event),
            Self::Window(event) => handler.handle_window(event),
            Self::Keyboard(event) => handler.handle_keyboard(event),
            Self::MouseMotion(event) => handler.handle_mouse_motion(event),
            Self::MouseButton(event) => handler.handle_mouse_button(event),
            Self::MouseWheel(event) => handler.handle_mouse_wheel(event),
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($event:ty)),* $(,)?) => {
        $(
            impl From<$event> for EventKind {
                fn from(event: $event) -> Self {
                    Self::$variant(event)
                }
            }
            impl From<$event> for Event {
                fn from(event: $event) -> Self {
                    Self::new(EventKind::$variant(event))
                }
            }
        )*
    };
}
impl_from_variant!(
    Quit(QuitEvent),
    Window(WindowEvent),
    Keyboard(KeyboardEvent),
    MouseMotion(MouseMotionEvent),
    MouseButton(MouseButtonEvent),
    MouseWheel(MouseWheelEvent),
);

/// Holds zero or one event. Playing an empty one does nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Event(Option<EventKind>);
impl Event {
    pub const fn empty() -> Self {
        Self(None)
    }

    pub const fn new(kind: EventKind) -> Self {
        Self(Some(kind))
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn kind(&self) -> Option<&EventKind> {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> Option<EventKind> {
        self.0
    }

    pub fn category(&self) -> Option<EventCategory> {
        self.0.as_ref().map(EventKind::category)
    }

    pub fn play<H: EventHandler + ?Sized>(&self, handler: &mut H) {
        if let Some(kind) = &self.0 {
            kind.play(handler);
        }
    }
}
impl From<EventKind> for Event {
    fn from(kind: EventKind) -> Self {
        Self::new(kind)
    }
}
impl From<Option<EventKind>> for Event {
    fn from(kind: Option<EventKind>) -> Self {
        Self(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        quit: usize,
        window: usize,
        other: usize,
    }
    impl EventHandler for Counter {
        fn handle_quit(&mut self, _: &QuitEvent) {
            self.quit += 1;
        }
        fn handle_window(&mut self, _: &WindowEvent) {
            self.window += 1;
        }
        fn handle_keyboard(&mut self, _: &KeyboardEvent) {
            self.other += 1;
        }
        fn handle_mouse_motion(&mut self, _: &MouseMotionEvent) {
            self.other += 1;
        }
    }

    #[test]
    fn play_calls_exactly_one_callback() {
        let mut counter = Counter::default();
        Event::from(QuitEvent).play(&mut counter);

        assert_eq!(counter.quit, 1);
        assert_eq!(counter.window, 0);
        assert_eq!(counter.other, 0);
    }

    #[test]
    fn empty_event_is_inert() {
        let mut counter = Counter::default();
        let event = Event::empty();
        event.play(&mut counter);

        assert!(!event.is_present());
        assert_eq!(event.category(), None);
        assert_eq!((counter.quit, counter.window, counter.other), (0, 0, 0));
    }

    #[test]
    fn handlers_work_behind_trait_objects() {
        let mut counter = Counter::default();
        let handler: &mut dyn EventHandler = &mut counter;
        Event::from(QuitEvent).play(handler);

        assert_eq!(counter.quit, 1);
    }
}
