use super::Font;
use crate::{
    geometry::{Color, Coordinate, Position, Rect, Size, Sizef, Sizei},
    render::{position_f, rect_f, Canvas, CopyOptions, Drawable, Flip, Texture},
};

/// How glyph coverage turns into pixels, when there is no background color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum RenderMode {
    /// No anti-aliasing: a pixel is either fully covered or not at all
    Solid,
    /// Coverage becomes alpha
    #[default]
    Blended,
}

/// A string rendered with a font.
///
/// The text borrows its font, so the font has to outlive it. The rendered texture is
/// kept around and refreshed whenever the content or the style changes; the text's
/// size follows the texture's, times the current scale.
#[derive(Debug)]
pub struct Text<'f, T = i32> {
    font: &'f Font,
    content: String,
    color: Color,
    background: Option<Color>,
    mode: RenderMode,

    texture: Texture,
    rect: Rect<T>,
    scale: Sizef,
    rotation: f64,
    center: Option<Position<T>>,
    flip: Flip,
}
impl<'f, T: Coordinate> Text<'f, T> {
    /// Anti-aliased text on a transparent background
    pub fn new(font: &'f Font, content: impl Into<String>, position: Position<T>, color: Color) -> Self {
        Self::with_mode(font, content, position, color, RenderMode::Blended)
    }

    pub fn with_mode(
        font: &'f Font,
        content: impl Into<String>,
        position: Position<T>,
        color: Color,
        mode: RenderMode,
    ) -> Self {
        Self::build(font, content.into(), position, color, None, mode)
    }

    /// Anti-aliased text on an opaque `background`
    pub fn shaded(
        font: &'f Font,
        content: impl Into<String>,
        position: Position<T>,
        color: Color,
        background: Color,
    ) -> Self {
        Self::build(
            font,
            content.into(),
            position,
            color,
            Some(background),
            RenderMode::Solid,
        )
    }

    /// Text given as Latin-1 bytes
    pub fn from_latin1(font: &'f Font, content: &[u8], position: Position<T>, color: Color) -> Self {
        Self::new(font, latin1_to_string(content), position, color)
    }

    /// Text given as UTF-16 code units; fails on unpaired surrogates
    pub fn from_utf16(
        font: &'f Font,
        content: &[u16],
        position: Position<T>,
        color: Color,
    ) -> eyre::Result<Self> {
        let content = String::from_utf16(content)?;
        Ok(Self::new(font, content, position, color))
    }

    fn build(
        font: &'f Font,
        content: String,
        position: Position<T>,
        color: Color,
        background: Option<Color>,
        mode: RenderMode,
    ) -> Self {
        let texture = rasterize(font, &content, color, background, mode);
        let mut text = Self {
            font,
            content,
            color,
            background,
            mode,
            rect: Rect::from_parts(position, Default::default()),
            texture,
            scale: Sizef::new(1.0, 1.0),
            rotation: 0.0,
            center: None,
            flip: Flip::None,
        };
        text.fit();
        text
    }

    /// Renders the texture again from the current content and style
    pub fn refresh(&mut self) {
        self.texture = rasterize(
            self.font,
            &self.content,
            self.color,
            self.background,
            self.mode,
        );
        self.fit();
    }

    fn fit(&mut self) {
        let size = self.texture.size();
        self.rect = self.rect.with_size(Size::new(
            T::from_f32(size.width as f32 * self.scale.width),
            T::from_f32(size.height as f32 * self.scale.height),
        ));
    }

    pub fn set_text(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.refresh();
    }

    pub fn set_text_latin1(&mut self, content: &[u8]) {
        self.set_text(latin1_to_string(content));
    }

    pub fn set_text_utf16(&mut self, content: &[u16]) -> eyre::Result<()> {
        let content = String::from_utf16(content)?;
        self.set_text(content);
        Ok(())
    }

    pub fn set_font(&mut self, font: &'f Font) {
        self.font = font;
        self.refresh();
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.refresh();
    }

    /// Switches to shaded rendering on `background`
    pub fn set_background_color(&mut self, background: Color) {
        self.background = Some(background);
        self.refresh();
    }

    /// Back to the render mode the text was created with
    pub fn remove_background_color(&mut self) {
        self.background = None;
        self.refresh();
    }

    /// Multiplies the current scale by `delta`
    pub fn scale(&mut self, delta: Sizef) {
        self.scale = self.scale * delta;
        self.fit();
    }

    pub fn rotate(&mut self, delta: f64) {
        self.rotation += delta;
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    pub fn set_center(&mut self, center: Position<T>) {
        self.center = Some(center);
    }

    pub fn reset_center(&mut self) {
        self.center = None;
    }

    pub fn set_flip(&mut self, flip: Flip) {
        self.flip = flip;
    }

    pub fn move_by(&mut self, delta: Position<T>) {
        self.rect = self.rect.with_position(self.rect.position() + delta);
    }

    pub fn set_position(&mut self, position: Position<T>) {
        self.rect = self.rect.with_position(position);
    }

    pub fn text(&self) -> &str {
        &self.content
    }
    pub fn font(&self) -> &'f Font {
        self.font
    }
    pub fn color(&self) -> Color {
        self.color
    }
    pub fn background_color(&self) -> Option<Color> {
        self.background
    }
    pub fn render_mode(&self) -> RenderMode {
        self.mode
    }
    pub fn texture(&self) -> &Texture {
        &self.texture
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
}
impl<T: Coordinate> Drawable for Text<'_, T> {
    fn draw(&self, canvas: &mut Canvas) {
        canvas.copy(
            &self.texture,
            &CopyOptions {
                source: None,
                destination: Some(rect_f(self.rect)),
                angle: self.rotation,
                center: self.center.map(position_f),
                flip: self.flip,
            },
        );
    }
}

/// Latin-1 maps one to one onto the first 256 code points
fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| char::from(byte)).collect()
}

/// Lays `content` out on one line and renders it into a texture.
///
/// Glyph bitmaps are placed relative to the baseline: `ymin` is how far the bottom of
/// the bitmap sits above it, so the top is `baseline - (height + ymin)`.
fn rasterize(
    font: &Font,
    content: &str,
    color: Color,
    background: Option<Color>,
    mode: RenderMode,
) -> Texture {
    let line = font.line_metrics();
    let baseline = line.ascent.ceil() as i32;
    let height = (line.ascent - line.descent).ceil().max(1.0) as i32;

    let mut pen = 0.0f32;
    let mut glyphs = Vec::with_capacity(content.len());
    for character in content.chars() {
        let (metrics, bitmap) = font.rasterize(character);
        let left = (pen + metrics.xmin as f32).round() as i32;
        let top = baseline - (metrics.height as i32 + metrics.ymin);
        glyphs.push((left, top, metrics.width, bitmap));
        pen += metrics.advance_width;
    }
    let width = glyphs
        .iter()
        .map(|(left, _, glyph_width, _)| left + *glyph_width as i32)
        .fold(pen.ceil() as i32, i32::max)
        .max(0);

    let blank = background.unwrap_or(Color::rgba(color.r, color.g, color.b, 0));
    let mut pixels = vec![blank; width as usize * height as usize];

    for (left, top, glyph_width, bitmap) in glyphs {
        if glyph_width == 0 {
            continue;
        }
        for (i, &coverage) in bitmap.iter().enumerate() {
            let x = left + (i % glyph_width) as i32;
            let y = top + (i / glyph_width) as i32;
            if coverage == 0 || x < 0 || y < 0 || x >= width || y >= height {
                continue;
            }

            let pixel = &mut pixels[y as usize * width as usize + x as usize];
            *pixel = match (background, mode) {
                (Some(background), _) => shade(background, color, coverage),
                (None, RenderMode::Solid) if coverage >= 128 => color,
                (None, RenderMode::Solid) => *pixel,
                (None, RenderMode::Blended) => {
                    let alpha = (color.a as u32 * coverage as u32 / 255) as u8;
                    Color::rgba(color.r, color.g, color.b, alpha.max(pixel.a))
                }
            };
        }
    }

    Texture::new(pixels, Sizei::new(width, height))
}

/// Interpolates from `background` to `foreground` by glyph coverage
fn shade(background: Color, foreground: Color, coverage: u8) -> Color {
    let lerp = |from: u8, to: u8| -> u8 {
        let coverage = coverage as u32;
        ((from as u32 * (255 - coverage) + to as u32 * coverage) / 255) as u8
    };
    Color::rgba(
        lerp(background.r, foreground.r),
        lerp(background.g, foreground.g),
        lerp(background.b, foreground.b),
        background.a,
    )
}
