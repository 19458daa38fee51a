//! Image filters used by sprite post-processing.

use crate::field::Field;

/// Kernel radius in standard deviations.
const TRUNCATE: f64 = 4.0;

/// Mirror an index into `0..len` with half-sample symmetry (`d c b a | a b c d | d c b a`).
#[inline]
fn reflect(i: i64, len: usize) -> usize {
    let len = len as i64;
    let period = 2 * len;
    let m = i.rem_euclid(period);
    (if m < len { m } else { period - 1 - m }) as usize
}

/// Normalized 1D kernel, truncated at `TRUNCATE` sigmas and at `max_radius`.
fn gaussian_kernel(sigma: f64, max_radius: i64) -> Vec<f64> {
    let radius = ((TRUNCATE * sigma + 0.5).min(max_radius as f64) as i64).max(0);
    let weights: Vec<f64> = (-radius..=radius)
        .map(|k| (-0.5 * (k as f64 / sigma).powi(2)).exp())
        .collect();
    let sum: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / sum).collect()
}

/// Separable gaussian blur with reflected edges.
///
/// `sigma <= 0` returns an unchanged copy. The kernel never reaches past
/// the larger image dimension, so cost stays bounded for any sigma.
pub fn gaussian_blur(input: &Field, sigma: f64) -> Field {
    if sigma.is_nan() || sigma <= 0.0 || input.data.is_empty() {
        return input.clone();
    }

    let kernel = gaussian_kernel(sigma, input.width.max(input.height) as i64);
    let radius = (kernel.len() / 2) as i64;
    let w = input.width as usize;
    let h = input.height as usize;

    // Horizontal pass
    let mut tmp = vec![0.0; input.data.len()];
    for y in 0..h {
        let row = &input.data[y * w..(y + 1) * w];
        for x in 0..w {
            tmp[y * w + x] = kernel
                .iter()
                .enumerate()
                .map(|(k, weight)| weight * row[reflect(x as i64 + k as i64 - radius, w)])
                .sum();
        }
    }

    // Vertical pass
    let mut data = vec![0.0; input.data.len()];
    for y in 0..h {
        for x in 0..w {
            data[y * w + x] = kernel
                .iter()
                .enumerate()
                .map(|(k, weight)| weight * tmp[reflect(y as i64 + k as i64 - radius, h) * w + x])
                .sum();
        }
    }

    Field {
        width: input.width,
        height: input.height,
        data,
    }
}

/// Maps output index `i` onto the input axis with corner alignment.
#[inline]
fn align(i: u32, out_len: u32, in_len: u32) -> (usize, usize, f64) {
    if out_len <= 1 || in_len <= 1 {
        return (0, 0, 0.0);
    }
    let pos = i as f64 * (in_len - 1) as f64 / (out_len - 1) as f64;
    let i0 = (pos.floor() as usize).min(in_len as usize - 1);
    let i1 = (i0 + 1).min(in_len as usize - 1);
    (i0, i1, pos - i0 as f64)
}

/// Value of `grid` bilinearly stretched to `width x height`, at output pixel `(x, y)`.
///
/// Output pixel `i` samples input position `i * (in - 1) / (out - 1)`, so
/// the corner values are preserved.
pub fn upsample_at(grid: &Field, x: u32, y: u32, width: u32, height: u32) -> f64 {
    if grid.data.is_empty() {
        return 0.0;
    }
    let iw = grid.width as usize;
    let (x0, x1, tx) = align(x, width, grid.width);
    let (y0, y1, ty) = align(y, height, grid.height);
    let top = grid.data[y0 * iw + x0] * (1.0 - tx) + grid.data[y0 * iw + x1] * tx;
    let bottom = grid.data[y1 * iw + x0] * (1.0 - tx) + grid.data[y1 * iw + x1] * tx;
    top * (1.0 - ty) + bottom * ty
}
