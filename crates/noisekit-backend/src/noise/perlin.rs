//! 3D Perlin noise.

use super::{grad3, lattice, lerp, quintic, wrap, Noise3D};
use crate::rng::DeterministicRng;

/// Seeded 3D Perlin gradient noise.
#[derive(Clone)]
pub struct PerlinNoise {
    perm: [u8; 512],
}

impl PerlinNoise {
    /// Create a new Perlin noise generator with the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            perm: DeterministicRng::new(seed).permutation_table(),
        }
    }

    #[inline]
    fn hash(&self, x: i64, y: i64, z: i64) -> u8 {
        let a = self.perm[wrap(x)] as usize + wrap(y);
        let b = self.perm[a] as usize + wrap(z);
        self.perm[b]
    }
}

impl Noise3D for PerlinNoise {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return 0.0;
        }
        let (xf, yf, zf) = (x.floor(), y.floor(), z.floor());
        let (x0, y0, z0) = (lattice(xf), lattice(yf), lattice(zf));
        let (fx, fy, fz) = (x - xf, y - yf, z - zf);

        let u = quintic(fx);
        let v = quintic(fy);
        let w = quintic(fz);

        let g = |dx: i64, dy: i64, dz: i64| {
            grad3(
                self.hash(x0 + dx, y0 + dy, z0 + dz),
                fx - dx as f64,
                fy - dy as f64,
                fz - dz as f64,
            )
        };

        let near = lerp(
            lerp(g(0, 0, 0), g(1, 0, 0), u),
            lerp(g(0, 1, 0), g(1, 1, 0), u),
            v,
        );
        let far = lerp(
            lerp(g(0, 0, 1), g(1, 0, 1), u),
            lerp(g(0, 1, 1), g(1, 1, 1), u),
            v,
        );
        lerp(near, far, w)
    }
}
