use std::ops::{Add, Div, Mul, Sub};

use super::Scalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}
impl<T> Size<T> {
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }
}
impl<T: Copy> Size<T> {
    pub fn width(&self) -> T {
        self.width
    }
    pub fn height(&self) -> T {
        self.height
    }
}

impl<T: Scalar> Add for Size<T> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.width + other.width, self.height + other.height)
    }
}
impl<T: Scalar> Sub for Size<T> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.width - other.width, self.height - other.height)
    }
}
impl<T: Scalar> Mul for Size<T> {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self::new(self.width * other.width, self.height * other.height)
    }
}
impl<T: Scalar> Div for Size<T> {
    type Output = Self;
    fn div(self, other: Self) -> Self {
        Self::new(self.width / other.width, self.height / other.height)
    }
}

pub type Sizei = Size<i32>;
pub type Sizeu = Size<u32>;
pub type Sizel = Size<i64>;
pub type Sizef = Size<f32>;
