//! Noise generation primitives.
//!
//! Base gradient noises ([`PerlinNoise`], [`SimplexNoise`]) sample a seeded
//! 3D lattice. Fractal combinators in [`fractal`] stack octaves of a base
//! noise, and [`ScalarSampler`] maps a [`NoiseParameters`] record onto the
//! right combination.
//!
//! [`NoiseParameters`]: noisekit_spec::NoiseParameters

pub mod fractal;
mod perlin;
mod sampler;
mod simplex;

pub use fractal::{DomainWarp, Fbm, Ridged, Turbulence};
pub use perlin::PerlinNoise;
pub use sampler::ScalarSampler;
pub use simplex::SimplexNoise;

/// Trait for 3D noise generators.
pub trait Noise3D {
    /// Sample the noise at a 3D coordinate.
    ///
    /// Base noises return roughly [-1, 1]; fractal combinators return the
    /// raw, unnormalized octave sum.
    fn sample(&self, x: f64, y: f64, z: f64) -> f64;
}

/// Quintic fade curve.
#[inline]
pub fn quintic(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Linear interpolation.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Gradient dot product for 3D lattice noise (12 cube-edge directions).
#[inline]
pub(crate) fn grad3(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 != 0 { -u } else { u }) + (if h & 2 != 0 { -v } else { v })
}

/// Reduce a floored coordinate to its lattice cell modulo the table size.
///
/// The reduction happens in float space, so coordinates beyond the `i64`
/// range still land in `0..256` and neighbor offsets cannot overflow.
#[inline]
pub(crate) fn lattice(floored: f64) -> i64 {
    let cell = floored.rem_euclid(256.0);
    if cell.is_finite() {
        cell as i64
    } else {
        0
    }
}

/// Wrap a lattice coordinate into the permutation table.
#[inline]
pub(crate) fn wrap(i: i64) -> usize {
    (i & 255) as usize
}
