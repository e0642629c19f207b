use std::ops::{Add, Div, Mul, Sub};

use super::Scalar;

/// A 2D position; from the top left of the window when used for drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position<T> {
    pub x: T,
    pub y: T,
}
impl<T> Position<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}
impl<T: Copy> Position<T> {
    pub fn x(&self) -> T {
        self.x
    }
    pub fn y(&self) -> T {
        self.y
    }
}

impl<T: Scalar> Add for Position<T> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}
impl<T: Scalar> Sub for Position<T> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}
impl<T: Scalar> Mul for Position<T> {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }
}
impl<T: Scalar> Div for Position<T> {
    type Output = Self;
    fn div(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }
}

pub type Positioni = Position<i32>;
pub type Positionu = Position<u32>;
pub type Positionl = Position<i64>;
pub type Positionf = Position<f32>;
pub type Positiond = Position<f64>;
