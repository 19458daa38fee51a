//! Two-layer blending.

use noisekit_spec::{BlendMode, BlendSpec};

use crate::field::{Field, FrameBuffer};
use crate::generate::GenerateError;

/// Applies the blend operator to one pixel pair, before mix weighting.
///
/// Overlay takes the multiply branch strictly below 0.5; a base of exactly
/// 0.5 takes the screen branch, and both branches give `b` there.
#[inline]
pub fn blend_op(mode: BlendMode, a: f64, b: f64) -> f64 {
    match mode {
        BlendMode::Mix => b,
        BlendMode::Add => a + b,
        BlendMode::Multiply => a * b,
        BlendMode::Screen => 1.0 - (1.0 - a) * (1.0 - b),
        BlendMode::Overlay => {
            if a < 0.5 {
                2.0 * a * b
            } else {
                1.0 - 2.0 * (1.0 - a) * (1.0 - b)
            }
        }
        BlendMode::Min => a.min(b),
        BlendMode::Max => a.max(b),
    }
}

/// Blends layer `b` over layer `a`.
///
/// Each pixel is `clamp(a * (1 - w) + op(a, b) * w)` where `w` is the mix
/// weight, so `w = 0` returns `a` and `w = 1` returns the pure operator
/// result exactly. For `Mix` this is plain linear interpolation.
///
/// # Example
/// ```
/// use noisekit_backend::{blend, Field};
/// use noisekit_spec::{BlendMode, BlendSpec};
///
/// let a = Field::new(2, 2, 0.5);
/// let b = Field::new(2, 2, 0.25);
/// let out = blend(&a, &b, &BlendSpec::new(BlendMode::Multiply, 1.0)).unwrap();
/// assert_eq!(out.data, vec![0.125; 4]);
/// ```
pub fn blend(a: &Field, b: &Field, spec: &BlendSpec) -> Result<Field, GenerateError> {
    spec.validate()?;
    if !a.same_size(b) {
        return Err(GenerateError::mismatch(a, b));
    }

    let w = spec.mix_weight;
    let data = a
        .data
        .iter()
        .zip(&b.data)
        .map(|(&va, &vb)| (va * (1.0 - w) + blend_op(spec.mode, va, vb) * w).clamp(0.0, 1.0))
        .collect();

    Ok(Field {
        width: a.width,
        height: a.height,
        data,
    })
}
