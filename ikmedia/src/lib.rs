//! A typed multimedia layer: windows, software rendering, fonts, input events and audio.
//!
//! Native events come out of a queue ([`native`]), get decoded per window by an
//! [`event::EventPump`] and reach application code through an [`event::EventHandler`].
//! Drawing happens on a CPU canvas that [`window::Window::display`] presents.

/// Sound effects, music and the channels they play on
pub mod audio;

/// Typed events, their pump and handler
pub mod event;

/// Positions, sizes, rectangles and colors
pub mod geometry;

/// Fonts and text
pub mod graphics;

/// Keyboard and mouse state queries
pub mod input;

/// Native event records and queues
pub mod native;

/// Canvas, renderer and drawables
pub mod render;

/// Windows and their shared context
pub mod window;
