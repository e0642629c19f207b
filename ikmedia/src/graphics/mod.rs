//! Fonts, and text rendered with them.

mod font;
mod text;

pub use self::font::{Font, FontError};
pub use self::text::{RenderMode, Text};
