use crate::foundation::error::{WaymarkError, WaymarkResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Logical output surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels, > 0.
    pub width: u32,
    /// Height in pixels, > 0.
    pub height: u32,
}

impl Viewport {
    /// Construct a viewport, rejecting zero-sized dimensions.
    pub fn new(width: u32, height: u32) -> WaymarkResult<Self> {
        if width == 0 || height == 0 {
            return Err(WaymarkError::validation("viewport must be > 0 on each axis"));
        }
        Ok(Self { width, height })
    }

    /// Width as `f64` for world-space math.
    pub fn width_f(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64` for world-space math.
    pub fn height_f(self) -> f64 {
        f64::from(self.height)
    }
}

/// Opaque sRGB color packed as `0xRRGGBB`.
///
/// The display list is authored against design-token hex values; alpha is
/// carried separately by the paint styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Pure white.
    pub const WHITE: Rgb = Rgb(0xFFFFFF);
    /// Pure black.
    pub const BLACK: Rgb = Rgb(0x000000);

    /// Red channel.
    pub fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Green channel.
    pub fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue channel.
    pub fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Scale each channel by `1 + tint`, clamped to [0, 255].
    pub fn tint(self, tr: f64, tg: f64, tb: f64) -> Rgb {
        fn scale(c: u8, t: f64) -> u32 {
            (f64::from(c) * (1.0 + t)).round().clamp(0.0, 255.0) as u32
        }
        Rgb((scale(self.r(), tr) << 16) | (scale(self.g(), tg) << 8) | scale(self.b(), tb))
    }

    /// Straight-alpha RGBA8 with the given alpha in [0, 1].
    pub fn with_alpha(self, alpha: f32) -> [u8; 4] {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        [self.r(), self.g(), self.b(), a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
