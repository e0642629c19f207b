//! Plain value types used everywhere else: positions, sizes, rectangles and colors.

mod color;
mod position;
mod rect;
mod size;

pub use color::Color;
pub use position::{Position, Positiond, Positionf, Positioni, Positionl, Positionu};
pub use rect::{Rect, Rectd, Rectf, Recti, Rectl, Rectu};
pub use size::{Size, Sizef, Sizei, Sizel, Sizeu};

use std::ops::{Add, Div, Mul, Sub};

/// Numeric types the value types can be built from
pub trait Scalar:
    Copy
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
}
impl<T> Scalar for T where
    T: Copy
        + PartialOrd
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
{
}

/// Coordinates that drawables accept.
/// Only integer and single precision float coordinates can be drawn.
pub trait Coordinate: Scalar + Default + std::fmt::Debug {
    fn to_f32(self) -> f32;
    fn from_f32(value: f32) -> Self;
}
impl Coordinate for i32 {
    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }
    #[inline]
    fn from_f32(value: f32) -> Self {
        value as i32
    }
}
impl Coordinate for f32 {
    #[inline]
    fn to_f32(self) -> f32 {
        self
    }
    #[inline]
    fn from_f32(value: f32) -> Self {
        value
    }
}
