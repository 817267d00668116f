/// Display-encoded (sRGB) RGB color.
///
/// Invariant:
/// - components are straight (not premultiplied) and nominally in `[0, 1]`.
///
/// Materials carry colors the way designers pick them; conversion to linear
/// happens once, when a material writes its GPU arguments.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ColorRgb {
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn grayscale(v: f64) -> Self {
        Self { r: v, g: v, b: v }
    }

    #[inline]
    pub const fn black() -> Self {
        Self::grayscale(0.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::grayscale(1.0)
    }

    /// Creates a color from sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Converts display-encoded components to linear light.
    pub fn srgb_to_linear(self) -> Self {
        Self::new(
            srgb_channel_to_linear(self.r),
            srgb_channel_to_linear(self.g),
            srgb_channel_to_linear(self.b),
        )
    }

    /// Converts linear components back to display encoding.
    pub fn linear_to_srgb(self) -> Self {
        Self::new(
            linear_channel_to_srgb(self.r),
            linear_channel_to_srgb(self.g),
            linear_channel_to_srgb(self.b),
        )
    }

    /// Packs the color as `[f32; 3]` without any conversion.
    #[inline]
    pub fn to_f32_array(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}

pub fn srgb_channel_to_linear(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

pub fn linear_channel_to_srgb(v: f64) -> f64 {
    if v <= 0.0031308 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}
