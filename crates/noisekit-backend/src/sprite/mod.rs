//! Procedural sprite rasterizer.
//!
//! Every shape is evaluated per pixel into an intensity [`Field`] centered
//! on the canvas, with lengths measured relative to `min(width, height)`.
//! The color step then turns intensity into premultiplied RGBA:
//! `(i*r, i*g, i*b, i*alpha)` with `i` clamped to [0, 1].

pub mod filter;
mod procedural;
mod shapes;

use noisekit_spec::validation::common::validate_resolution;
use noisekit_spec::{SpriteParameters, SpriteShape};
use tracing::debug;

use crate::cancel::{complete_or_return, CancelToken, Outcome};
use crate::field::{Field, RgbaField};
use crate::generate::GenerateError;

/// Pixel grid the shapes are evaluated over.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Canvas {
    pub width: u32,
    pub height: u32,
    pub cx: f64,
    pub cy: f64,
    /// `min(width, height)`, the unit for relative extents.
    pub min: f64,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cx: width as f64 / 2.0,
            cy: height as f64 / 2.0,
            min: width.min(height) as f64,
        }
    }

    /// Pixel position relative to the canvas center.
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> (f64, f64) {
        (x as f64 - self.cx, y as f64 - self.cy)
    }

    /// Distance from the canvas center.
    #[inline]
    pub fn dist(&self, x: u32, y: u32) -> f64 {
        let (dx, dy) = self.offset(x, y);
        dx.hypot(dy)
    }

    /// Distance from the center to a corner.
    pub fn half_diagonal(&self) -> f64 {
        self.cx.hypot(self.cy)
    }

    /// Evaluates `shade` at every pixel, checking the token once per row.
    pub fn rasterize(
        &self,
        token: &CancelToken,
        mut shade: impl FnMut(u32, u32) -> f64,
    ) -> Outcome<Field> {
        let mut field = Field::new(self.width, self.height, 0.0);
        let stride = self.width as usize;
        for y in 0..self.height {
            if token.is_cancelled() {
                return Outcome::Cancelled;
            }
            let row = y as usize * stride;
            for x in 0..self.width {
                field.data[row + x as usize] = shade(x, y);
            }
        }
        Outcome::Complete(field)
    }
}

/// Soft edge: 1 inside (`dist <= 0`), fading to 0 at `dist = softness`.
///
/// A softness of 0 gives a hard edge.
#[inline]
pub(crate) fn edge(dist: f64, softness: f64) -> f64 {
    if softness > 0.0 {
        (1.0 - dist / softness).clamp(0.0, 1.0)
    } else if dist <= 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Soft step up: 0 below `dist = 0`, rising to 1 at `dist = softness`.
#[inline]
pub(crate) fn rise(dist: f64, softness: f64) -> f64 {
    if softness > 0.0 {
        (dist / softness).clamp(0.0, 1.0)
    } else if dist >= 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Linear fade `1 - clamp(dist / extent)`; zero when the extent is empty.
#[inline]
pub(crate) fn fade(dist: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        1.0 - (dist / extent).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Rotates `(dx, dy)` by `radians`.
#[inline]
pub(crate) fn rotate(dx: f64, dy: f64, radians: f64) -> (f64, f64) {
    let (s, c) = radians.sin_cos();
    (dx * c - dy * s, dx * s + dy * c)
}

/// Rasterizes a sprite's intensity channel, before the color step.
pub fn rasterize_intensity(
    params: &SpriteParameters,
    width: u32,
    height: u32,
    token: &CancelToken,
) -> Result<Outcome<Field>, GenerateError> {
    validate_resolution(width, height)?;
    params.validate()?;

    let canvas = Canvas::new(width, height);
    Ok(match params.shape {
        SpriteShape::Circle => shapes::circle(params, &canvas, token),
        SpriteShape::Square => shapes::square(params, &canvas, token),
        SpriteShape::Line => shapes::line(params, &canvas, token),
        SpriteShape::NGon => shapes::ngon(params, &canvas, token),
        SpriteShape::Star => shapes::star(params, &canvas, token),
        SpriteShape::Glow => shapes::glow(params, &canvas, token),
        SpriteShape::Sparkle => shapes::sparkle(params, &canvas, token),
        SpriteShape::Gradient => shapes::gradient(params, &canvas, token),
        SpriteShape::Ring => shapes::ring(params, &canvas, token),
        SpriteShape::Cross => shapes::cross(params, &canvas, token),
        SpriteShape::Flame => procedural::flame(params, &canvas, token),
        SpriteShape::Noise => procedural::value_noise(params, &canvas, token),
        SpriteShape::Lightning => procedural::lightning(params, &canvas, token),
        SpriteShape::Smoke => procedural::smoke(params, &canvas, token),
    })
}

/// Rasterizes a sprite into an RGBA buffer of exactly `width x height`.
///
/// # Example
/// ```
/// use noisekit_backend::{generate_sprite, CancelToken, FrameBuffer};
/// use noisekit_spec::{SpriteParameters, SpriteShape};
///
/// let params = SpriteParameters::for_shape(SpriteShape::Circle);
/// let sprite = generate_sprite(&params, 64, 64, &CancelToken::new())
///     .unwrap()
///     .complete()
///     .unwrap();
/// assert_eq!(sprite.get(32, 32).a, 1.0);
/// assert_eq!(sprite.get(0, 0).a, 0.0);
/// ```
pub fn generate_sprite(
    params: &SpriteParameters,
    width: u32,
    height: u32,
    token: &CancelToken,
) -> Result<Outcome<RgbaField>, GenerateError> {
    debug!(shape = %params.shape, width, height, seed = params.seed, "rasterizing sprite");

    let intensity = complete_or_return!(rasterize_intensity(params, width, height, token)?);
    Ok(Outcome::Complete(RgbaField::from_intensity(
        &intensity,
        params.color,
        params.alpha,
    )))
}

#[cfg(test)]
mod tests;
