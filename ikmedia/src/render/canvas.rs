use palette::{LinSrgb, Mix, Srgb};

use super::Texture;
use crate::geometry::{Color, Positionf, Positioni, Rectf, Recti, Sizeu};

/// Mirroring applied when copying a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}
impl Flip {
    pub fn horizontal(self) -> bool {
        matches!(self, Self::Horizontal | Self::Both)
    }
    pub fn vertical(self) -> bool {
        matches!(self, Self::Vertical | Self::Both)
    }
}

/// How a texture is copied onto a canvas
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CopyOptions {
    /// Part of the texture to copy; all of it when `None`
    pub source: Option<Recti>,
    /// Where the copy lands, relative to the viewport; the whole viewport when `None`
    pub destination: Option<Rectf>,
    /// Clockwise rotation, in degrees
    pub angle: f64,
    /// Rotation center, relative to the destination; its middle when `None`
    pub center: Option<Positionf>,
    pub flip: Flip,
}

/// The frame buffer, plus the drawing state that goes with it.
///
/// Pixels are stored as `0RGB` words, the layout `softbuffer` presents.
/// Every drawing coordinate is relative to the viewport, and drawing is clipped to it.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
    draw_color: Color,
    viewport: Option<Recti>,
}

/// Drawable area in buffer coordinates, right and bottom excluded
#[derive(Clone, Copy)]
struct Clip {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl Canvas {
    pub fn new(size: Sizeu) -> Self {
        Self {
            pixels: vec![0; size.width as usize * size.height as usize],
            width: size.width,
            height: size.height,
            draw_color: Color::WHITE,
            viewport: None,
        }
    }

    pub fn size(&self) -> Sizeu {
        Sizeu::new(self.width, self.height)
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Color at `position` in buffer coordinates, ignoring the viewport
    pub fn pixel(&self, position: Positioni) -> Option<Color> {
        self.index(position.x, position.y)
            .map(|index| Color::from_0rgb(self.pixels[index]))
    }

    /// Reallocates the buffer; contents are lost
    pub fn resize(&mut self, size: Sizeu) {
        if size == self.size() {
            return;
        }
        self.width = size.width;
        self.height = size.height;
        self.pixels = vec![0; size.width as usize * size.height as usize];
    }

    pub fn draw_color(&self) -> Color {
        self.draw_color
    }

    pub fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    /// Current viewport, the whole buffer when none is set
    pub fn viewport(&self) -> Recti {
        self.viewport
            .unwrap_or_else(|| Recti::new(0, 0, self.width as i32, self.height as i32))
    }

    pub fn set_viewport(&mut self, viewport: Option<Recti>) {
        self.viewport = viewport;
    }

    /// Fills the whole buffer with the draw color, viewport or not
    pub fn clear(&mut self) {
        let value = self.draw_color.to_0rgb();
        self.pixels.fill(value);
    }

    pub fn draw_point(&mut self, position: Positionf) {
        let color = self.draw_color;
        let clip = self.clip();
        let (x, y) = self.to_buffer(position);
        if clip.contains(x, y) {
            self.plot(&clip, x as i32, y as i32, color);
        }
    }

    pub fn draw_line(&mut self, from: Positionf, to: Positionf) {
        let from = self.to_buffer(from);
        let to = self.to_buffer(to);
        self.line(from, to);
    }

    /// Outline of `rect`, one pixel wide, inside its bounds
    pub fn draw_rect(&mut self, rect: Rectf) {
        let (left, top) = self.to_buffer(rect.position());
        let (right, bottom) = self.to_buffer(Positionf::new(
            rect.x() + rect.width(),
            rect.y() + rect.height(),
        ));
        let (right, bottom) = (right - 1, bottom - 1);
        if right < left || bottom < top {
            return;
        }

        self.line((left, top), (right, top));
        self.line((left, bottom), (right, bottom));
        self.line((left, top), (left, bottom));
        self.line((right, top), (right, bottom));
    }

    pub fn fill_rect(&mut self, rect: Rectf) {
        let color = self.draw_color;
        let clip = self.clip();

        let (left, top) = self.to_buffer(rect.position());
        let (right, bottom) = self.to_buffer(Positionf::new(
            rect.x() + rect.width(),
            rect.y() + rect.height(),
        ));
        let horizontal = clip.left as i64..=clip.right as i64;
        let vertical = clip.top as i64..=clip.bottom as i64;
        let left = left.clamp(*horizontal.start(), *horizontal.end()) as i32;
        let right = right.clamp(*horizontal.start(), *horizontal.end()) as i32;
        let top = top.clamp(*vertical.start(), *vertical.end()) as i32;
        let bottom = bottom.clamp(*vertical.start(), *vertical.end()) as i32;

        for y in top..bottom {
            for x in left..right {
                self.plot(&clip, x, y, color);
            }
        }
    }

    /// Copies (part of) a texture, scaled to the destination with nearest-neighbour sampling.
    ///
    /// The texture's color and alpha modulation apply; translucent texels are blended
    /// over what is already there.
    pub fn copy(&mut self, texture: &Texture, options: &CopyOptions) {
        let texture_size = texture.size();
        let full = Recti::new(0, 0, texture_size.width, texture_size.height);
        let Some(source) = options.source.map_or(Some(full), |source| clip_rect(source, full)) else {
            return;
        };
        if source.width() <= 0 || source.height() <= 0 {
            return;
        }

        let viewport = self.viewport();
        let destination = options.destination.unwrap_or_else(|| {
            Rectf::new(0.0, 0.0, viewport.width() as f32, viewport.height() as f32)
        });
        let (width, height) = (destination.width(), destination.height());
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        let center = options
            .center
            .unwrap_or_else(|| Positionf::new(width / 2.0, height / 2.0));
        let pivot_x = viewport.x() as f32 + destination.x() + center.x;
        let pivot_y = viewport.y() as f32 + destination.y() + center.y;

        let radians = options.angle.to_radians() as f32;
        let (sin, cos) = radians.sin_cos();

        // Bounding box of the rotated destination, in buffer coordinates
        let corners = [
            (-center.x, -center.y),
            (width - center.x, -center.y),
            (-center.x, height - center.y),
            (width - center.x, height - center.y),
        ]
        .map(|(x, y)| (pivot_x + x * cos - y * sin, pivot_y + x * sin + y * cos));
        let min_x = corners.iter().map(|c| c.0).fold(f32::INFINITY, f32::min);
        let max_x = corners.iter().map(|c| c.0).fold(f32::NEG_INFINITY, f32::max);
        let min_y = corners.iter().map(|c| c.1).fold(f32::INFINITY, f32::min);
        let max_y = corners.iter().map(|c| c.1).fold(f32::NEG_INFINITY, f32::max);

        let clip = self.clip();
        let left = (min_x.floor() as i32).max(clip.left);
        let right = (max_x.ceil() as i32).min(clip.right);
        let top = (min_y.floor() as i32).max(clip.top);
        let bottom = (max_y.ceil() as i32).min(clip.bottom);

        let modulation = texture.color_modulation();
        let alpha_modulation = texture.alpha_blending() as u32;
        let scale_x = source.width() as f32 / width;
        let scale_y = source.height() as f32 / height;

        for y in top..bottom {
            for x in left..right {
                // Back into the unrotated destination, sampling at the pixel center
                let dx = x as f32 + 0.5 - pivot_x;
                let dy = y as f32 + 0.5 - pivot_y;
                let u = dx * cos + dy * sin + center.x;
                let v = -dx * sin + dy * cos + center.y;
                if u < 0.0 || v < 0.0 || u >= width || v >= height {
                    continue;
                }

                let mut tx = ((u * scale_x) as i32).min(source.width() - 1);
                let mut ty = ((v * scale_y) as i32).min(source.height() - 1);
                if options.flip.horizontal() {
                    tx = source.width() - 1 - tx;
                }
                if options.flip.vertical() {
                    ty = source.height() - 1 - ty;
                }

                let texel = texture.texel(source.x() + tx, source.y() + ty);
                let color = Color::rgba(
                    modulate(texel.r, modulation.r),
                    modulate(texel.g, modulation.g),
                    modulate(texel.b, modulation.b),
                    (texel.a as u32 * alpha_modulation / 255) as u8,
                );
                self.plot(&clip, x, y, color);
            }
        }
    }

    /// Copies the whole buffer out, as RGBA colors
    pub(crate) fn colors(&self) -> Vec<Color> {
        self.pixels.iter().map(|&value| Color::from_0rgb(value)).collect()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        (x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    fn clip(&self) -> Clip {
        let viewport = self.viewport();
        Clip {
            left: viewport.x().max(0),
            top: viewport.y().max(0),
            right: viewport
                .x()
                .saturating_add(viewport.width())
                .min(self.width as i32),
            bottom: viewport
                .y()
                .saturating_add(viewport.height())
                .min(self.height as i32),
        }
    }

    /// Blends `color` into the pixel at buffer coordinates `(x, y)`, if it is inside `clip`
    fn plot(&mut self, clip: &Clip, x: i32, y: i32, color: Color) {
        if x < clip.left || x >= clip.right || y < clip.top || y >= clip.bottom {
            return;
        }
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = blend(self.pixels[index], color);
        }
    }

    /// Viewport coordinates to buffer coordinates, widened so nothing overflows
    fn to_buffer(&self, position: Positionf) -> (i64, i64) {
        let origin = self.viewport().position();
        (
            (position.x.floor() as i64).saturating_add(origin.x as i64),
            (position.y.floor() as i64).saturating_add(origin.y as i64),
        )
    }

    /// Bresenham in buffer coordinates, both ends included.
    /// Only the part of the segment inside the clip is stepped through.
    fn line(&mut self, from: (i64, i64), to: (i64, i64)) {
        let color = self.draw_color;
        let clip = self.clip();
        let Some(((mut x0, mut y0), (x1, y1))) = clip_segment(&clip, from, to) else {
            return;
        };

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let step_x = if x0 < x1 { 1 } else { -1 };
        let step_y = if y0 < y1 { 1 } else { -1 };
        let mut error = dx + dy;

        loop {
            self.plot(&clip, x0 as i32, y0 as i32, color);
            if x0 == x1 && y0 == y1 {
                break;
            }

            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                x0 += step_x;
            }
            if doubled <= dx {
                error += dx;
                y0 += step_y;
            }
        }
    }
}

impl Clip {
    fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.left as i64
            && x < self.right as i64
            && y >= self.top as i64
            && y < self.bottom as i64
    }
}

/// Liang-Barsky: the part of the segment over pixels inside `clip`, ends rounded to pixels
fn clip_segment(
    clip: &Clip,
    from: (i64, i64),
    to: (i64, i64),
) -> Option<((i64, i64), (i64, i64))> {
    if clip.is_empty() {
        return None;
    }

    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let (dx, dy) = (to.0 as f64 - x0, to.1 as f64 - y0);
    let (left, right) = (clip.left as f64, (clip.right - 1) as f64);
    let (top, bottom) = (clip.top as f64, (clip.bottom - 1) as f64);

    let mut enter = 0.0_f64;
    let mut exit = 1.0_f64;
    for (p, q) in [
        (-dx, x0 - left),
        (dx, right - x0),
        (-dy, y0 - top),
        (dy, bottom - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            enter = enter.max(q / p);
        } else {
            exit = exit.min(q / p);
        }
    }
    if enter > exit {
        return None;
    }

    let at = |t: f64| {
        (
            ((x0 + t * dx).round() as i64).clamp(clip.left as i64, clip.right as i64 - 1),
            ((y0 + t * dy).round() as i64).clamp(clip.top as i64, clip.bottom as i64 - 1),
        )
    };
    Some((at(enter), at(exit)))
}

fn modulate(channel: u8, modulation: u8) -> u8 {
    (channel as u32 * modulation as u32 / 255) as u8
}

fn clip_rect(rect: Recti, bounds: Recti) -> Option<Recti> {
    let left = rect.x().max(bounds.x());
    let top = rect.y().max(bounds.y());
    let right = (rect.x() + rect.width()).min(bounds.x() + bounds.width());
    let bottom = (rect.y() + rect.height()).min(bounds.y() + bounds.height());
    (right > left && bottom > top).then(|| Recti::new(left, top, right - left, bottom - top))
}

/// Source-over blending, done in linear light
fn blend(below: u32, above: Color) -> u32 {
    match above.a {
        255 => above.to_0rgb(),
        0 => below,
        alpha => {
            let below = Color::from_0rgb(below);
            let below: LinSrgb<f32> = Srgb::new(below.r, below.g, below.b).into_linear();
            let above_linear: LinSrgb<f32> = Srgb::new(above.r, above.g, above.b).into_linear();

            let mixed: Srgb<u8> = Srgb::from_linear(below.mix(above_linear, alpha as f32 / 255.0));
            Color::rgb(mixed.red, mixed.green, mixed.blue).to_0rgb()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(width: u32, height: u32) -> Canvas {
        Canvas::new(Sizeu::new(width, height))
    }

    fn lit(canvas: &Canvas) -> usize {
        canvas.pixels().iter().filter(|&&value| value != 0).count()
    }

    #[test]
    fn clear_ignores_the_viewport() {
        let mut canvas = canvas(4, 4);
        canvas.set_viewport(Some(Recti::new(1, 1, 2, 2)));
        canvas.set_draw_color(Color::RED);
        canvas.clear();
        assert!(canvas.pixels().iter().all(|&value| value == 0xff0000));
    }

    #[test]
    fn horizontal_line_includes_both_ends() {
        let mut canvas = canvas(10, 3);
        canvas.draw_line(Positionf::new(2.0, 1.0), Positionf::new(6.0, 1.0));
        assert_eq!(lit(&canvas), 5);
        assert_eq!(canvas.pixel(Positioni::new(2, 1)), Some(Color::WHITE));
        assert_eq!(canvas.pixel(Positioni::new(6, 1)), Some(Color::WHITE));
    }

    #[test]
    fn diagonal_line_steps_once_per_row() {
        let mut canvas = canvas(5, 5);
        canvas.draw_line(Positionf::new(0.0, 0.0), Positionf::new(4.0, 4.0));
        for i in 0..5 {
            assert_eq!(canvas.pixel(Positioni::new(i, i)), Some(Color::WHITE));
        }
        assert_eq!(lit(&canvas), 5);
    }

    #[test]
    fn endless_line_is_cut_to_the_canvas() {
        let mut canvas = canvas(4, 4);
        canvas.draw_line(Positionf::new(0.0, 0.0), Positionf::new(i32::MAX as f32, 0.0));
        assert_eq!(lit(&canvas), 4);

        let mut canvas = self::canvas(4, 4);
        canvas.draw_line(Positionf::new(-1e9, 2.0), Positionf::new(1e9, 2.0));
        assert_eq!(lit(&canvas), 4);
        assert_eq!(canvas.pixel(Positioni::new(0, 2)), Some(Color::WHITE));
        assert_eq!(canvas.pixel(Positioni::new(3, 2)), Some(Color::WHITE));
    }

    #[test]
    fn line_outside_the_canvas_draws_nothing() {
        let mut canvas = canvas(4, 4);
        canvas.draw_line(Positionf::new(-10.0, -5.0), Positionf::new(20.0, -1.0));
        canvas.draw_line(Positionf::new(f32::MAX, 0.0), Positionf::new(f32::MAX, 3.0));
        assert_eq!(lit(&canvas), 0);
    }

    #[test]
    fn long_diagonal_keeps_its_slope_once_clipped() {
        let mut canvas = canvas(5, 5);
        canvas.draw_line(Positionf::new(-1000.0, -1000.0), Positionf::new(1000.0, 1000.0));
        for i in 0..5 {
            assert_eq!(canvas.pixel(Positioni::new(i, i)), Some(Color::WHITE));
        }
        assert_eq!(lit(&canvas), 5);
    }

    #[test]
    fn huge_shapes_are_clipped_without_overflow() {
        let mut canvas = canvas(3, 3);
        canvas.set_viewport(Some(Recti::new(1, 1, i32::MAX, i32::MAX)));
        canvas.fill_rect(Rectf::new(-1e12, -1e12, 2e12, 2e12));
        assert_eq!(lit(&canvas), 4);

        canvas.set_draw_color(Color::RED);
        canvas.draw_rect(Rectf::new(0.0, 0.0, 1e12, 1e12));
        assert_eq!(canvas.pixel(Positioni::new(2, 1)), Some(Color::RED));
        assert_eq!(canvas.pixel(Positioni::new(0, 0)), Some(Color::BLACK));
    }

    #[test]
    fn outline_stays_inside_the_rect() {
        let mut canvas = canvas(6, 6);
        canvas.draw_rect(Rectf::new(1.0, 1.0, 4.0, 3.0));
        // 4 + 4 + 1 + 1
        assert_eq!(lit(&canvas), 10);
        assert_eq!(canvas.pixel(Positioni::new(4, 3)), Some(Color::WHITE));
        assert_eq!(canvas.pixel(Positioni::new(5, 4)), Some(Color::BLACK));
    }

    #[test]
    fn drawing_is_offset_and_clipped_by_the_viewport() {
        let mut canvas = canvas(8, 8);
        canvas.set_viewport(Some(Recti::new(2, 2, 3, 3)));
        canvas.fill_rect(Rectf::new(-5.0, -5.0, 100.0, 100.0));
        assert_eq!(lit(&canvas), 9);

        canvas.set_draw_color(Color::BLUE);
        canvas.draw_point(Positionf::new(0.0, 0.0));
        assert_eq!(canvas.pixel(Positioni::new(2, 2)), Some(Color::BLUE));
    }

    #[test]
    fn half_transparent_red_over_black() {
        let mut canvas = canvas(1, 1);
        canvas.set_draw_color(Color::rgba(255, 0, 0, 128));
        canvas.draw_point(Positionf::new(0.0, 0.0));

        let pixel = canvas.pixel(Positioni::new(0, 0)).unwrap_or_default();
        // Linear light mixing lands well above the naive half
        assert!(pixel.r > 128, "{pixel:?}");
        assert_eq!((pixel.g, pixel.b), (0, 0));
    }

    #[test]
    fn resize_reallocates() {
        let mut canvas = canvas(2, 2);
        canvas.resize(Sizeu::new(3, 5));
        assert_eq!(canvas.pixels().len(), 15);
        assert_eq!(canvas.viewport(), Recti::new(0, 0, 3, 5));
    }
}
