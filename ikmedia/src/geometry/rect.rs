use super::{Position, Scalar, Size};

/// Axis-aligned rectangle, stored as its top left corner and its size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect<T> {
    position: Position<T>,
    size: Size<T>,
}
impl<T: Copy> Rect<T> {
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Self {
            position: Position::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub const fn from_parts(position: Position<T>, size: Size<T>) -> Self {
        Self { position, size }
    }

    pub fn position(&self) -> Position<T> {
        self.position
    }
    pub fn size(&self) -> Size<T> {
        self.size
    }
    pub fn x(&self) -> T {
        self.position.x
    }
    pub fn y(&self) -> T {
        self.position.y
    }
    pub fn width(&self) -> T {
        self.size.width
    }
    pub fn height(&self) -> T {
        self.size.height
    }

    /// Same size, new position
    pub fn with_position(self, position: Position<T>) -> Self {
        Self::from_parts(position, self.size)
    }
    /// Same position, new size
    pub fn with_size(self, size: Size<T>) -> Self {
        Self::from_parts(self.position, size)
    }
}

impl<T: Scalar> Rect<T> {
    /// `true` if the position is inside the rectangle; far edges count as inside
    pub fn contains(&self, position: Position<T>) -> bool {
        position.x >= self.x()
            && position.x <= self.x() + self.width()
            && position.y >= self.y()
            && position.y <= self.y() + self.height()
    }

    /// `true` if both rectangles overlap on a non-empty area.
    /// Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect<T>) -> bool {
        let max_left = partial_max(self.x(), other.x());
        let min_right = partial_min(self.x() + self.width(), other.x() + other.width());
        if max_left >= min_right {
            return false;
        }

        let max_top = partial_max(self.y(), other.y());
        let min_bottom = partial_min(self.y() + self.height(), other.y() + other.height());
        max_top < min_bottom
    }
}

fn partial_max<T: PartialOrd>(a: T, b: T) -> T {
    if a >= b {
        a
    } else {
        b
    }
}
fn partial_min<T: PartialOrd>(a: T, b: T) -> T {
    if a <= b {
        a
    } else {
        b
    }
}

pub type Recti = Rect<i32>;
pub type Rectu = Rect<u32>;
pub type Rectl = Rect<i64>;
pub type Rectf = Rect<f32>;
pub type Rectd = Rect<f64>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Positioni, Sizei};

    #[test]
    fn with_position_and_with_size_are_independent() {
        let rect = Recti::new(1, 2, 30, 40);

        let moved = rect.with_position(Positioni::new(-5, 9));
        assert_eq!(moved.size(), rect.size());
        assert_eq!(moved.position(), Positioni::new(-5, 9));

        let resized = rect.with_size(Sizei::new(7, 8));
        assert_eq!(resized.position(), rect.position());
        assert_eq!(resized.size(), Sizei::new(7, 8));
    }

    #[test]
    fn contains_includes_far_edges() {
        let rect = Recti::new(0, 0, 10, 10);
        assert!(rect.contains(Positioni::new(0, 0)));
        assert!(rect.contains(Positioni::new(10, 10)));
        assert!(!rect.contains(Positioni::new(11, 5)));
        assert!(!rect.contains(Positioni::new(-1, 5)));
    }

    #[test]
    fn touching_rectangles_do_not_intersect() {
        let a = Rectf::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rectf::new(10.0, 0.0, 5.0, 5.0);
        let overlapping = Rectf::new(9.5, 9.5, 5.0, 5.0);

        assert!(!a.intersects(&touching));
        assert!(a.intersects(&overlapping));
        assert!(overlapping.intersects(&a));
    }
}
