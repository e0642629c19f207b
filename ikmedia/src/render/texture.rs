use std::{cell::Cell, path::Path};

use eyre::WrapErr;
use image::{DynamicImage, RgbaImage};

use crate::geometry::{Color, Sizei};

/// Decoded image, ready to be copied onto a canvas.
///
/// Color and alpha modulation go through `&self`, since sprites and texts only
/// hold shared references to their texture.
#[derive(Debug, Clone)]
pub struct Texture {
    pixels: Vec<Color>,
    size: Sizei,
    color_modulation: Cell<Color>,
    alpha: Cell<u8>,
}
impl Texture {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .wrap_err_with(|| format!("loading texture from {}", path.display()))?;
        Ok(Self::from_image(image))
    }

    /// Loads an image where every pixel of color `key` becomes transparent
    pub fn from_file_with_color_key(path: impl AsRef<Path>, key: Color) -> eyre::Result<Self> {
        let mut texture = Self::from_file(path)?;
        texture.apply_color_key(key);
        Ok(texture)
    }

    /// Decodes an image file already in memory, guessing its format
    pub fn from_memory(bytes: &[u8]) -> eyre::Result<Self> {
        let image = image::load_from_memory(bytes).wrap_err("decoding texture from memory")?;
        Ok(Self::from_image(image))
    }

    pub fn from_image(image: DynamicImage) -> Self {
        Self::from_rgba(image.into_rgba8())
    }

    pub fn from_rgba(image: RgbaImage) -> Self {
        let size = Sizei::new(image.width() as i32, image.height() as i32);
        let pixels = image
            .pixels()
            .map(|pixel| {
                let [r, g, b, a] = pixel.0;
                Color::rgba(r, g, b, a)
            })
            .collect();

        Self::new(pixels, size)
    }

    /// Row-major pixels; there must be exactly `width * height` of them
    pub fn from_pixels(size: Sizei, pixels: Vec<Color>) -> eyre::Result<Self> {
        eyre::ensure!(
            size.width >= 0 && size.height >= 0,
            "texture size {size:?} is negative"
        );
        eyre::ensure!(
            pixels.len() == size.width as usize * size.height as usize,
            "{} pixels don't fill a {}x{} texture",
            pixels.len(),
            size.width,
            size.height
        );
        Ok(Self::new(pixels, size))
    }

    /// `pixels` must already be `width * height` long
    pub(crate) fn new(pixels: Vec<Color>, size: Sizei) -> Self {
        Self {
            pixels,
            size,
            color_modulation: Cell::new(Color::WHITE),
            alpha: Cell::new(u8::MAX),
        }
    }

    fn apply_color_key(&mut self, key: Color) {
        for pixel in &mut self.pixels {
            if (pixel.r, pixel.g, pixel.b) == (key.r, key.g, key.b) {
                pixel.a = 0;
            }
        }
    }

    pub fn size(&self) -> Sizei {
        self.size
    }

    /// Multiplies every texel by `color` when copied; alpha is left alone
    pub fn set_color_modulation(&self, color: Color) {
        self.color_modulation.set(Color::rgb(color.r, color.g, color.b));
    }

    pub fn color_modulation(&self) -> Color {
        self.color_modulation.get()
    }

    /// Multiplies every texel's alpha by `alpha / 255` when copied
    pub fn set_alpha_blending(&self, alpha: u8) {
        self.alpha.set(alpha);
    }

    pub fn alpha_blending(&self) -> u8 {
        self.alpha.get()
    }

    /// Texel at `(x, y)`; transparent outside of the texture
    pub(crate) fn texel(&self, x: i32, y: i32) -> Color {
        if x < 0 || y < 0 || x >= self.size.width || y >= self.size.height {
            return Color::TRANSPARENT;
        }
        self.pixels[y as usize * self.size.width as usize + x as usize]
    }
}
