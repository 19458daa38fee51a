//! RGBA color used by sprite buffers.

/// RGBA color with f64 components (0.0 to 1.0 range).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Create a new color with alpha = 1.0.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a new color with alpha.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self::rgba(0.0, 0.0, 0.0, 0.0)
    }

    /// Opaque color from an 8-bit tint.
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        let [r, g, b] = rgb.map(|c| c as f64 / 255.0);
        Self::rgb(r, g, b)
    }

    /// Tint a coverage value: `(i*r, i*g, i*b, i*alpha)`, with `i` clamped to [0, 1].
    pub fn from_intensity(intensity: f64, tint: [u8; 3], alpha: f64) -> Self {
        let i = if intensity.is_nan() {
            0.0
        } else {
            intensity.clamp(0.0, 1.0)
        };
        let c = Self::from_rgb8(tint);
        Self::rgba(i * c.r, i * c.g, i * c.b, i * alpha.clamp(0.0, 1.0))
    }

    /// Channels as an `[r, g, b, a]` array.
    pub fn channels(&self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Quantize to 8-bit RGBA, clamping out-of-range channels.
    pub fn to_rgba8(&self) -> [u8; 4] {
        self.channels()
            .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Whether every channel lies in [0, 1].
    pub fn is_normalized(&self) -> bool {
        self.channels().iter().all(|v| (0.0..=1.0).contains(v))
    }
}
