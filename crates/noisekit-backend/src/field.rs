//! Pixel buffers handed between pipeline stages.
//!
//! [`Field`] holds one `f64` channel (noise), [`RgbaField`] holds [`Color`]
//! pixels (sprites). Both are row-major and implement [`FrameBuffer`], the
//! seam used by atlas packing and the seamless preview.

use crate::color::Color;

/// Operations shared by every buffer type.
pub trait FrameBuffer: Clone + Send + Sized {
    /// Pixel type.
    type Pixel: Copy + Default + Send;

    /// Create a buffer with every pixel set to `Pixel::default()`.
    fn blank(width: u32, height: u32) -> Self;

    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Row-major pixel data.
    fn pixels(&self) -> &[Self::Pixel];

    /// Mutable row-major pixel data.
    fn pixels_mut(&mut self) -> &mut [Self::Pixel];

    /// Row-major index of `(x, y)`, computed in `usize`.
    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width() as usize + x as usize
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    fn get(&self, x: u32, y: u32) -> Self::Pixel {
        self.pixels()[self.index(x, y)]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    fn set(&mut self, x: u32, y: u32, value: Self::Pixel) {
        let idx = self.index(x, y);
        self.pixels_mut()[idx] = value;
    }

    /// Copy `src` into this buffer with its top-left corner at `(x0, y0)`.
    ///
    /// Pixels falling outside this buffer are dropped.
    fn blit(&mut self, src: &Self, x0: u32, y0: u32) {
        let w = src.width().min(self.width().saturating_sub(x0));
        let h = src.height().min(self.height().saturating_sub(y0));
        for y in 0..h {
            for x in 0..w {
                self.set(x0 + x, y0 + y, src.get(x, y));
            }
        }
    }

    /// Whether two buffers have identical dimensions.
    fn same_size(&self, other: &Self) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }
}

/// Single-channel buffer, values nominally in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major values.
    pub data: Vec<f64>,
}

impl Field {
    /// Create a field filled with `value`.
    pub fn new(width: u32, height: u32, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; (width as usize) * (height as usize)],
        }
    }

    /// Create a field from row-major data.
    ///
    /// Returns `None` when the data length does not match the size.
    pub fn from_data(width: u32, height: u32, data: Vec<f64>) -> Option<Self> {
        if data.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Smallest and largest value, or `None` for an empty field.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut iter = self.data.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Apply `f` to every value, producing a new field.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Field {
        Field {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Convert to 8-bit grayscale bytes.
    pub fn to_gray8(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }
}

impl FrameBuffer for Field {
    type Pixel = f64;

    fn blank(width: u32, height: u32) -> Self {
        Self::new(width, height, 0.0)
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixels(&self) -> &[f64] {
        &self.data
    }

    fn pixels_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }
}

/// RGBA buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaField {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major pixels.
    pub data: Vec<Color>,
}

impl RgbaField {
    /// Create a buffer filled with a color.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            data: vec![fill; (width as usize) * (height as usize)],
        }
    }

    /// Tint a coverage field with one color and alpha.
    pub fn from_intensity(intensity: &Field, tint: [u8; 3], alpha: f64) -> Self {
        Self {
            width: intensity.width,
            height: intensity.height,
            data: intensity
                .data
                .iter()
                .map(|&i| Color::from_intensity(i, tint, alpha))
                .collect(),
        }
    }

    /// Convert to 8-bit RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for color in &self.data {
            bytes.extend_from_slice(&color.to_rgba8());
        }
        bytes
    }
}

impl FrameBuffer for RgbaField {
    type Pixel = Color;

    fn blank(width: u32, height: u32) -> Self {
        Self::new(width, height, Color::transparent())
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixels(&self) -> &[Color] {
        &self.data
    }

    fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.data
    }
}
