//! Plain colored shapes, in integer (the default) or float coordinates.

use super::{position_f, rect_f, Canvas, Drawable};
use crate::geometry::{Color, Coordinate, Position, Rect, Size};

/// A single pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<T = i32> {
    position: Position<T>,
    color: Color,
}
impl<T: Coordinate> Point<T> {
    pub fn new(position: Position<T>, color: Color) -> Self {
        Self { position, color }
    }

    pub fn move_by(&mut self, delta: Position<T>) {
        self.position = self.position + delta;
    }

    pub fn position(&self) -> Position<T> {
        self.position
    }
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_position(&mut self, position: Position<T>) {
        self.position = position;
    }
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}
impl<T: Coordinate> Drawable for Point<T> {
    fn draw(&self, canvas: &mut Canvas) {
        canvas.set_draw_color(self.color);
        canvas.draw_point(position_f(self.position));
    }
}

/// Segment between two positions, both included
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line<T = i32> {
    from: Position<T>,
    to: Position<T>,
    color: Color,
}
impl<T: Coordinate> Line<T> {
    pub fn new(from: Position<T>, to: Position<T>, color: Color) -> Self {
        Self { from, to, color }
    }

    pub fn move_by(&mut self, delta: Position<T>) {
        self.from = self.from + delta;
        self.to = self.to + delta;
    }

    pub fn position1(&self) -> Position<T> {
        self.from
    }
    pub fn position2(&self) -> Position<T> {
        self.to
    }
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_position1(&mut self, position: Position<T>) {
        self.from = position;
    }
    pub fn set_position2(&mut self, position: Position<T>) {
        self.to = position;
    }
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}
impl<T: Coordinate> Drawable for Line<T> {
    fn draw(&self, canvas: &mut Canvas) {
        canvas.set_draw_color(self.color);
        canvas.draw_line(position_f(self.from), position_f(self.to));
    }
}

/// Outline and filled rectangles only differ in how they draw
macro_rules! rectangle {
    ($(#[$doc:meta])* $name:ident, $draw:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name<T = i32> {
            rect: Rect<T>,
            color: Color,
        }
        impl<T: Coordinate> $name<T> {
            pub fn new(rect: Rect<T>, color: Color) -> Self {
                Self { rect, color }
            }

            pub fn from_parts(position: Position<T>, size: Size<T>, color: Color) -> Self {
                Self::new(Rect::from_parts(position, size), color)
            }

            pub fn move_by(&mut self, delta: Position<T>) {
                self.rect = self.rect.with_position(self.rect.position() + delta);
            }

            /// Multiplies both dimensions by `factor`, keeping the top left corner
            pub fn scale(&mut self, factor: T) {
                let size = self.rect.size();
                self.rect = self
                    .rect
                    .with_size(Size::new(size.width * factor, size.height * factor));
            }

            pub fn rect(&self) -> Rect<T> {
                self.rect
            }
            pub fn position(&self) -> Position<T> {
                self.rect.position()
            }
            pub fn size(&self) -> Size<T> {
                self.rect.size()
            }
            pub fn color(&self) -> Color {
                self.color
            }

            pub fn set_position(&mut self, position: Position<T>) {
                self.rect = self.rect.with_position(position);
            }
            pub fn set_size(&mut self, size: Size<T>) {
                self.rect = self.rect.with_size(size);
            }
            pub fn set_color(&mut self, color: Color) {
                self.color = color;
            }
        }
        impl<T: Coordinate> Drawable for $name<T> {
            fn draw(&self, canvas: &mut Canvas) {
                canvas.set_draw_color(self.color);
                canvas.$draw(rect_f(self.rect));
            }
        }
    };
}
rectangle!(
    /// Rectangle outline, one pixel wide
    Rectangle,
    draw_rect
);
rectangle!(FillRectangle, fill_rect);

/// Common part of the array shapes: a list of items sharing one color.
///
/// Indexing methods panic when `index` is out of bounds, like [`Vec`] does.
macro_rules! array {
    ($(#[$doc:meta])* $name:ident, $item:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name<T = i32> {
            items: Vec<$item<T>>,
            color: Color,
        }
        impl<T: Coordinate> $name<T> {
            pub fn new(color: Color) -> Self {
                Self::from_vec(Vec::new(), color)
            }

            pub fn from_vec(items: Vec<$item<T>>, color: Color) -> Self {
                Self { items, color }
            }

            pub fn push(&mut self, item: $item<T>) {
                self.items.push(item);
            }
            pub fn pop(&mut self) -> Option<$item<T>> {
                self.items.pop()
            }
            pub fn remove(&mut self, index: usize) -> $item<T> {
                self.items.remove(index)
            }

            pub fn get(&self, index: usize) -> Option<$item<T>> {
                self.items.get(index).copied()
            }
            pub fn set(&mut self, index: usize, item: $item<T>) {
                self.items[index] = item;
            }

            pub fn len(&self) -> usize {
                self.items.len()
            }
            pub fn is_empty(&self) -> bool {
                self.items.is_empty()
            }
            pub fn items(&self) -> &[$item<T>] {
                &self.items
            }

            pub fn color(&self) -> Color {
                self.color
            }
            pub fn set_color(&mut self, color: Color) {
                self.color = color;
            }
        }
    };
}

array!(
    /// Many pixels of the same color
    PointArray,
    Position
);
impl<T: Coordinate> Drawable for PointArray<T> {
    fn draw(&self, canvas: &mut Canvas) {
        canvas.set_draw_color(self.color);
        for &position in &self.items {
            canvas.draw_point(position_f(position));
        }
    }
}

array!(
    /// Polyline through every position, in order
    LineArray,
    Position
);
impl<T: Coordinate> Drawable for LineArray<T> {
    fn draw(&self, canvas: &mut Canvas) {
        canvas.set_draw_color(self.color);
        for pair in self.items.windows(2) {
            canvas.draw_line(position_f(pair[0]), position_f(pair[1]));
        }
    }
}

/// Per-rectangle editing for the rectangle arrays
macro_rules! rectangle_array {
    ($(#[$doc:meta])* $name:ident, $draw:ident) => {
        array!($(#[$doc])* $name, Rect);

        impl<T: Coordinate> $name<T> {
            pub fn move_by(&mut self, index: usize, delta: Position<T>) {
                let rect = self.items[index];
                self.items[index] = rect.with_position(rect.position() + delta);
            }

            pub fn scale(&mut self, index: usize, factor: T) {
                let rect = self.items[index];
                let size = rect.size();
                self.items[index] =
                    rect.with_size(Size::new(size.width * factor, size.height * factor));
            }

            pub fn set_position(&mut self, index: usize, position: Position<T>) {
                self.items[index] = self.items[index].with_position(position);
            }

            pub fn set_size(&mut self, index: usize, size: Size<T>) {
                self.items[index] = self.items[index].with_size(size);
            }
        }
        impl<T: Coordinate> Drawable for $name<T> {
            fn draw(&self, canvas: &mut Canvas) {
                canvas.set_draw_color(self.color);
                for &rect in &self.items {
                    canvas.$draw(rect_f(rect));
                }
            }
        }
    };
}
rectangle_array!(
    /// Many rectangle outlines of the same color
    RectangleArray,
    draw_rect
);
rectangle_array!(
    /// Many filled rectangles of the same color
    FillRectangleArray,
    fill_rect
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Positionf, Positioni, Recti, Sizeu};

    fn lit(canvas: &Canvas) -> usize {
        canvas.pixels().iter().filter(|&&value| value != 0).count()
    }

    #[test]
    fn point_moves_and_draws() {
        let mut canvas = Canvas::new(Sizeu::new(4, 4));
        let mut point = Point::new(Positioni::new(1, 1), Color::RED);
        point.move_by(Positioni::new(1, 2));
        point.draw(&mut canvas);

        assert_eq!(point.position(), Positioni::new(2, 3));
        assert_eq!(canvas.pixel(Positioni::new(2, 3)), Some(Color::RED));
    }

    #[test]
    fn float_rectangle_scales() {
        let mut rectangle = FillRectangle::<f32>::from_parts(
            Positionf::new(0.5, 0.5),
            crate::geometry::Sizef::new(2.0, 1.0),
            Color::BLUE,
        );
        rectangle.scale(2.0);
        assert_eq!(rectangle.size(), crate::geometry::Sizef::new(4.0, 2.0));
        assert_eq!(rectangle.position(), Positionf::new(0.5, 0.5));
    }

    #[test]
    fn line_array_draws_a_polyline() {
        let mut canvas = Canvas::new(Sizeu::new(5, 5));
        let lines = LineArray::from_vec(
            vec![
                Positioni::new(0, 0),
                Positioni::new(4, 0),
                Positioni::new(4, 4),
            ],
            Color::WHITE,
        );
        lines.draw(&mut canvas);
        // Shared corner counts once
        assert_eq!(lit(&canvas), 9);
    }

    #[test]
    fn array_editing() {
        let mut rects = FillRectangleArray::new(Color::GREEN);
        rects.push(Recti::new(0, 0, 1, 1));
        rects.push(Recti::new(2, 2, 1, 1));
        rects.move_by(0, Positioni::new(1, 0));
        rects.scale(1, 2);

        assert_eq!(rects.get(0), Some(Recti::new(1, 0, 1, 1)));
        assert_eq!(rects.get(1), Some(Recti::new(2, 2, 2, 2)));
        assert_eq!(rects.remove(0), Recti::new(1, 0, 1, 1));
        assert_eq!(rects.len(), 1);
        assert_eq!(rects.pop(), Some(Recti::new(2, 2, 2, 2)));
        assert!(rects.is_empty());
    }

    #[test]
    fn rectangle_array_fills_each_rect() {
        let mut canvas = Canvas::new(Sizeu::new(6, 6));
        FillRectangleArray::from_vec(
            vec![Recti::new(0, 0, 2, 2), Recti::new(3, 3, 3, 1)],
            Color::WHITE,
        )
        .draw(&mut canvas);
        assert_eq!(lit(&canvas), 7);
    }
}
