//! Seamless tiling and the center-seams preview.
//!
//! [`tile`] blends each border strip with the mirrored pixels from the
//! opposite side of the same axis. The foreign weight follows a cosine ramp
//! from 0.5 at the border to 0 at the strip edge, so the two borders of an
//! axis converge to the same value while the interior stays untouched. Both
//! axes are combined bilinearly over four samples, which keeps corners from
//! being blended twice.

use std::f64::consts::PI;

use noisekit_spec::TilingSpec;
use tracing::debug;

use crate::field::{Field, FrameBuffer};
use crate::generate::GenerateError;

/// Width of the blended strip for one axis.
///
/// `max(2, floor(dim * blend_width))`, capped at `dim / 2`.
pub fn strip_width(dim: u32, blend_width: f64) -> u32 {
    let strip = ((dim as f64) * blend_width).floor() as u32;
    strip.max(2).min(dim / 2)
}

/// Foreign-sample weight for index `i` along an axis of length `dim`.
fn foreign_weight(i: u32, dim: u32, strip: u32) -> f64 {
    if strip == 0 {
        return 0.0;
    }
    let d = i.min(dim - 1 - i);
    if d >= strip {
        return 0.0;
    }
    0.5 * (1.0 + (PI * d as f64 / strip as f64).cos()) * 0.5
}

/// Makes a field tile seamlessly on both axes.
///
/// `blend_width` is the strip width as a fraction of each dimension and
/// must lie in (0, 0.5].
///
/// # Example
/// ```
/// use noisekit_backend::{tile, Field, FrameBuffer};
///
/// let mut field = Field::new(8, 8, 0.0);
/// field.set(0, 3, 1.0);
/// let tiled = tile(&field, 0.25).unwrap();
/// assert_eq!(tiled.get(0, 3), tiled.get(7, 3));
/// ```
pub fn tile(field: &Field, blend_width: f64) -> Result<Field, GenerateError> {
    TilingSpec::new(blend_width).validate()?;

    let (w, h) = (field.width, field.height);
    let strip_x = strip_width(w, blend_width);
    let strip_y = strip_width(h, blend_width);
    debug!(width = w, height = h, strip_x, strip_y, "tiling field");

    let wx: Vec<f64> = (0..w).map(|x| foreign_weight(x, w, strip_x)).collect();
    let wy: Vec<f64> = (0..h).map(|y| foreign_weight(y, h, strip_y)).collect();

    let mut out = field.clone();
    for y in 0..h {
        let my = h - 1 - y;
        let fy = wy[y as usize];
        for x in 0..w {
            let fx = wx[x as usize];
            if fx == 0.0 && fy == 0.0 {
                continue;
            }
            let mx = w - 1 - x;
            // Pair each sample with its mirror first so both borders sum
            // the same terms in the same order.
            let near = (1.0 - fx) * field.get(x, y) + fx * field.get(mx, y);
            let far = (1.0 - fx) * field.get(x, my) + fx * field.get(mx, my);
            out.set(x, y, (1.0 - fy) * near + fy * far);
        }
    }

    Ok(out)
}

/// Largest absolute difference across the wrap boundary on either axis.
///
/// Compares column 0 with column `W-1` and row 0 with row `H-1`.
pub fn seam_error(field: &Field) -> f64 {
    let (w, h) = (field.width, field.height);
    if w == 0 || h == 0 {
        return 0.0;
    }
    let horizontal = (0..h).map(|y| (field.get(0, y) - field.get(w - 1, y)).abs());
    let vertical = (0..w).map(|x| (field.get(x, 0) - field.get(x, h - 1)).abs());
    horizontal.chain(vertical).fold(0.0, f64::max)
}

/// Circularly shifts a buffer by half its size on both axes.
///
/// A display transform that moves the wrap boundary to the middle of the
/// image; it returns a new buffer and never changes the input.
pub fn center_seams<F: FrameBuffer>(buffer: &F) -> F {
    let (w, h) = (buffer.width(), buffer.height());
    let mut out = F::blank(w, h);
    for y in 0..h {
        let sy = (y + h / 2) % h;
        for x in 0..w {
            let sx = (x + w / 2) % w;
            out.set(x, y, buffer.get(sx, sy));
        }
    }
    out
}
