//! 3D simplex noise, adapted from Stefan Gustavson's reference
//! implementation for a seeded permutation table.

use super::{grad3, lattice, wrap, Noise3D};
use crate::rng::DeterministicRng;

/// Seeded 3D simplex noise with output in [-1, 1].
#[derive(Clone)]
pub struct SimplexNoise {
    perm: [u8; 512],
}

impl SimplexNoise {
    /// Skewing factor for 3D.
    const F3: f64 = 1.0 / 3.0;
    /// Unskewing factor for 3D.
    const G3: f64 = 1.0 / 6.0;
    /// Brings the corner sum into [-1, 1].
    const SCALE: f64 = 32.0;

    /// Create a new simplex noise generator with the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            perm: DeterministicRng::new(seed).permutation_table(),
        }
    }

    #[inline]
    fn hash(&self, i: i64, j: i64, k: i64) -> u8 {
        let a = self.perm[wrap(i)] as usize + wrap(j);
        let b = self.perm[a] as usize + wrap(k);
        self.perm[b]
    }

    #[inline]
    fn corner(hash: u8, x: f64, y: f64, z: f64) -> f64 {
        let t = 0.6 - x * x - y * y - z * z;
        if t < 0.0 {
            0.0
        } else {
            let t2 = t * t;
            t2 * t2 * grad3(hash, x, y, z)
        }
    }
}

impl Noise3D for SimplexNoise {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        // Skew the input space to find the containing simplex cell
        let s = (x + y + z) * Self::F3;
        let (fi, fj, fk) = ((x + s).floor(), (y + s).floor(), (z + s).floor());
        let (i, j, k) = (lattice(fi), lattice(fj), lattice(fk));

        let t = (fi + fj + fk) * Self::G3;
        let x0 = x - (fi - t);
        let y0 = y - (fj - t);
        let z0 = z - (fk - t);

        let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0)
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1)
            } else {
                (0, 0, 1, 1, 0, 1)
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1)
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1)
        } else {
            (0, 1, 0, 1, 1, 0)
        };

        let g = Self::G3;
        let x1 = x0 - i1 as f64 + g;
        let y1 = y0 - j1 as f64 + g;
        let z1 = z0 - k1 as f64 + g;
        let x2 = x0 - i2 as f64 + 2.0 * g;
        let y2 = y0 - j2 as f64 + 2.0 * g;
        let z2 = z0 - k2 as f64 + 2.0 * g;
        let x3 = x0 - 1.0 + 3.0 * g;
        let y3 = y0 - 1.0 + 3.0 * g;
        let z3 = z0 - 1.0 + 3.0 * g;

        let n0 = Self::corner(self.hash(i, j, k), x0, y0, z0);
        let n1 = Self::corner(self.hash(i + i1, j + j1, k + k1), x1, y1, z1);
        let n2 = Self::corner(self.hash(i + i2, j + j2, k + k2), x2, y2, z2);
        let n3 = Self::corner(self.hash(i + 1, j + 1, k + 1), x3, y3, z3);

        let n = Self::SCALE * (n0 + n1 + n2 + n3);
        if n.is_nan() {
            // Coordinates past f64 precision lose their cell position
            0.0
        } else {
            n.clamp(-1.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplex_deterministic() {
        let noise1 = SimplexNoise::new(42);
        let noise2 = SimplexNoise::new(42);

        for i in 0..100 {
            let x = i as f64 * 0.1;
            let y = i as f64 * 0.13;
            assert_eq!(noise1.sample(x, y, 0.3), noise2.sample(x, y, 0.3));
        }
    }

    #[test]
    fn test_simplex_bounded() {
        let noise = SimplexNoise::new(9);
        for i in 0..150 {
            for j in 0..150 {
                let v = noise.sample(i as f64 * 0.05, j as f64 * 0.07, -1.25);
                assert!((-1.0..=1.0).contains(&v), "out of range: {}", v);
            }
        }
    }

    #[test]
    fn test_simplex_varies_along_z() {
        let noise = SimplexNoise::new(1);
        let differs = (0..20).any(|i| {
            let z = i as f64 * 0.2;
            noise.sample(0.4, 0.7, z) != noise.sample(0.4, 0.7, z + 0.5)
        });
        assert!(differs);
    }

    #[test]
    fn test_extreme_coordinates_stay_bounded() {
        let noise = SimplexNoise::new(42);
        for x in [1e19, -1e19, 9.3e18, 1e300, -1e300, f64::MAX] {
            let v = noise.sample(x, 0.0, 0.0);
            assert!((-1.0..=1.0).contains(&v), "sample({}) = {}", x, v);
            let v = noise.sample(x, x, x);
            assert!((-1.0..=1.0).contains(&v), "sample({0}, {0}, {0}) = {1}", x, v);
        }
    }
}
