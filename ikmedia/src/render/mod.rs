//! Software rendering: everything is drawn into a [`Canvas`], which the window presents.

mod canvas;
mod renderer;
mod shapes;
mod sprite;
mod texture;

pub use self::canvas::{Canvas, CopyOptions, Flip};
pub use self::renderer::{Renderer, RendererOptions};
pub use self::shapes::{
    FillRectangle, FillRectangleArray, Line, LineArray, Point, PointArray, Rectangle,
    RectangleArray,
};
pub use self::sprite::Sprite;
pub use self::texture::Texture;

use crate::geometry::{Coordinate, Position, Positionf, Rect, Rectf};

/// Anything that knows how to put itself on a canvas
pub trait Drawable {
    fn draw(&self, canvas: &mut Canvas);
}

impl<D: Drawable + ?Sized> Drawable for &D {
    fn draw(&self, canvas: &mut Canvas) {
        (**self).draw(canvas)
    }
}

#[inline]
pub(crate) fn position_f<T: Coordinate>(position: Position<T>) -> Positionf {
    Positionf::new(position.x.to_f32(), position.y.to_f32())
}

#[inline]
pub(crate) fn rect_f<T: Coordinate>(rect: Rect<T>) -> Rectf {
    Rectf::new(
        rect.x().to_f32(),
        rect.y().to_f32(),
        rect.width().to_f32(),
        rect.height().to_f32(),
    )
}
