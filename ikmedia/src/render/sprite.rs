use super::{position_f, rect_f, Canvas, CopyOptions, Drawable, Flip, Texture};
use crate::geometry::{Coordinate, Position, Rect, Recti, Size, Sizef};

/// A texture, or part of one, placed on screen.
///
/// The sprite only borrows its texture, so the texture has to outlive it.
#[derive(Debug, Clone)]
pub struct Sprite<'t, T = i32> {
    texture: &'t Texture,
    rect: Rect<T>,
    texture_rect: Option<Recti>,
    scale: Sizef,
    rotation: f64,
    center: Option<Position<T>>,
    flip: Flip,
}
impl<'t, T: Coordinate> Sprite<'t, T> {
    /// Sprite showing all of `texture`, at its natural size
    pub fn new(texture: &'t Texture, position: Position<T>) -> Self {
        let size = texture.size();
        Self {
            texture,
            rect: Rect::from_parts(
                position,
                Size::new(T::from_f32(size.width as f32), T::from_f32(size.height as f32)),
            ),
            texture_rect: None,
            scale: Sizef::new(1.0, 1.0),
            rotation: 0.0,
            center: None,
            flip: Flip::None,
        }
    }

    /// Sprite showing the `texture_rect` part of `texture`
    pub fn with_texture_rect(texture: &'t Texture, position: Position<T>, texture_rect: Recti) -> Self {
        let mut sprite = Self::new(texture, position);
        sprite.set_texture_rect(texture_rect);
        sprite
    }

    pub fn move_by(&mut self, delta: Position<T>) {
        self.rect = self.rect.with_position(self.rect.position() + delta);
    }

    /// Multiplies the current scale by `delta`
    pub fn scale(&mut self, delta: Sizef) {
        let size = self.rect.size();
        self.rect = self.rect.with_size(Size::new(
            T::from_f32(size.width.to_f32() * delta.width),
            T::from_f32(size.height.to_f32() * delta.height),
        ));
        self.scale = self.scale * delta;
    }

    /// Adds `delta` degrees of clockwise rotation
    pub fn rotate(&mut self, delta: f64) {
        self.rotation += delta;
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    /// Rotation center, relative to the sprite's top left corner
    pub fn set_center(&mut self, center: Position<T>) {
        self.center = Some(center);
    }

    /// Rotates around the middle of the sprite again
    pub fn reset_center(&mut self) {
        self.center = None;
    }

    pub fn set_flip(&mut self, flip: Flip) {
        self.flip = flip;
    }

    /// Shows only `rect` of the texture; the sprite takes its size, times the current scale
    pub fn set_texture_rect(&mut self, rect: Recti) {
        self.texture_rect = Some(rect);
        self.fit(Size::new(rect.width(), rect.height()));
    }

    /// Shows the whole texture again
    pub fn reset_texture_rect(&mut self) {
        self.texture_rect = None;
        self.fit(self.texture.size());
    }

    fn fit(&mut self, size: Size<i32>) {
        self.rect = self.rect.with_size(Size::new(
            T::from_f32(size.width as f32 * self.scale.width),
            T::from_f32(size.height as f32 * self.scale.height),
        ));
    }

    pub fn set_position(&mut self, position: Position<T>) {
        self.rect = self.rect.with_position(position);
    }

    pub fn texture(&self) -> &'t Texture {
        self.texture
    }
    pub fn texture_rect(&self) -> Option<Recti> {
        self.texture_rect
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
    pub fn rotation(&self) -> f64 {
        self.rotation
    }
    pub fn flip(&self) -> Flip {
        self.flip
    }
}
impl<T: Coordinate> Drawable for Sprite<'_, T> {
    fn draw(&self, canvas: &mut Canvas) {
        canvas.copy(
            self.texture,
            &CopyOptions {
                source: self.texture_rect,
                destination: Some(rect_f(self.rect)),
                angle: self.rotation,
                center: self.center.map(position_f),
                flip: self.flip,
            },
        );
    }
}
