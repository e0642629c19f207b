use std::{fmt::Display, path::Path};

use eyre::WrapErr;
use fontdue::{Font as FontData, FontSettings, LineMetrics, Metrics};

/// Simple wrapper for the `&'static str` returned by `fontdue`;
/// we need something that implements `Error` for `eyre`
#[derive(Debug)]
pub struct FontError(&'static str);
impl Display for FontError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FontError: {}", self.0)
    }
}
impl std::error::Error for FontError {}

/// A typeface at one point size
pub struct Font {
    data: FontData,
    pt_size: u32,
}
impl Font {
    pub fn from_file(path: impl AsRef<Path>, pt_size: u32) -> eyre::Result<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).wrap_err_with(|| format!("loading font from {}", path.display()))?;
        Self::from_bytes(&bytes, pt_size)
            .wrap_err_with(|| format!("loading font from {}", path.display()))
    }

    pub fn from_bytes(bytes: &[u8], pt_size: u32) -> eyre::Result<Self> {
        let settings = FontSettings {
            scale: pt_size as f32,
            ..FontSettings::default()
        };
        let data = FontData::from_bytes(bytes, settings)
            .map_err(FontError)
            .wrap_err("processing font")?;

        log::debug!("loaded font at {pt_size}pt");
        Ok(Self { data, pt_size })
    }

    pub fn pt_size(&self) -> u32 {
        self.pt_size
    }

    /// Pixel size glyphs are rasterized at; one point is one pixel
    pub(crate) fn px(&self) -> f32 {
        self.pt_size as f32
    }

    /// Vertical metrics of a line, falling back to the em box when the font has none
    pub(crate) fn line_metrics(&self) -> LineMetrics {
        let px = self.px();
        self.data
            .horizontal_line_metrics(px)
            .unwrap_or(LineMetrics {
                ascent: px,
                descent: 0.0,
                line_gap: 0.0,
                new_line_size: px,
            })
    }

    pub(crate) fn rasterize(&self, character: char) -> (Metrics, Vec<u8>) {
        self.data.rasterize(character, self.px())
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("glyphs", &self.data.glyph_count())
            .field("pt_size", &self.pt_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_not_a_font() {
        let error = Font::from_bytes(b"definitely not a font", 12)
            .err()
            .map(|error| format!("{error:#}"));
        assert!(error.is_some_and(|message| message.starts_with("processing font: FontError")));
    }

    #[test]
    fn loads_from_file_with_its_size() -> eyre::Result<()> {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fonts/Cantarell-Regular.ttf");
        let font = Font::from_file(path, 18)?;
        assert_eq!(font.pt_size(), 18);
        assert_eq!(font.px(), 18.0);
        assert!(font.line_metrics().ascent > 0.0);
        Ok(())
    }

    #[test]
    fn missing_file_reports_the_path() {
        let error = Font::from_file("no/such/font.ttf", 12)
            .err()
            .map(|error| error.to_string());
        assert_eq!(error.as_deref(), Some("loading font from no/such/font.ttf"));
    }
}
