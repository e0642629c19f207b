use palette::Srgba;

/// 8-bit RGBA color, in sRGB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}
impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Packs the color for the framebuffer, which ignores alpha
    #[inline]
    pub const fn to_0rgb(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    #[inline]
    pub const fn from_0rgb(value: u32) -> Self {
        Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}
impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Saturates at 255 on each channel
impl std::ops::Add for Color {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::rgba(
            self.r.saturating_add(other.r),
            self.g.saturating_add(other.g),
            self.b.saturating_add(other.b),
            self.a.saturating_add(other.a),
        )
    }
}
/// Saturates at 0 on each channel
impl std::ops::Sub for Color {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::rgba(
            self.r.saturating_sub(other.r),
            self.g.saturating_sub(other.g),
            self.b.saturating_sub(other.b),
            self.a.saturating_sub(other.a),
        )
    }
}

impl From<Color> for Srgba<u8> {
    fn from(value: Color) -> Self {
        Srgba::new(value.r, value.g, value.b, value.a)
    }
}
impl From<Srgba<u8>> for Color {
    fn from(value: Srgba<u8>) -> Self {
        Self::rgba(value.red, value.green, value.blue, value.alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_and_subtraction_saturate() {
        let a = Color::rgba(200, 10, 100, 255);
        let b = Color::rgba(100, 20, 100, 1);

        assert_eq!(a + b, Color::rgba(255, 30, 200, 255));
        assert_eq!(a - b, Color::rgba(100, 0, 0, 254));
    }

    #[test]
    fn packs_into_0rgb() {
        let color = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(color.to_0rgb(), 0x123456);
        assert_eq!(Color::from_0rgb(0xff123456), color);
    }

    #[test]
    fn converts_through_palette() {
        let color = Color::rgba(1, 2, 3, 4);
        let srgba: Srgba<u8> = color.into();
        assert_eq!(Color::from(srgba), color);
    }
}
