//! Direct queries of the keyboard and mouse state, outside of the event flow.

mod keyboard;
mod mouse;

pub use self::keyboard::{Key, Keyboard};
pub use self::mouse::{Button, Mouse};
