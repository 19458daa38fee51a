//! Enum dispatch from [`NoiseParameters`] to a concrete noise.

use noisekit_spec::{NoiseParameters, NoiseType};

use super::{DomainWarp, Fbm, Noise3D, PerlinNoise, Ridged, SimplexNoise, Turbulence};

/// One noise algorithm, built from a parameter record.
#[derive(Clone)]
enum Algorithm {
    Perlin(PerlinNoise),
    Simplex(SimplexNoise),
    Fbm(Fbm<PerlinNoise>),
    Turbulence(Turbulence<SimplexNoise>),
    Ridged(Ridged<SimplexNoise>),
    DomainWarp(DomainWarp<SimplexNoise, SimplexNoise>),
}

/// Samples a [`NoiseParameters`] record at pixel or sample-space coordinates.
///
/// Pixel `(px, py)` maps to sample space as
/// `(px / scale + offset_x, py / scale + offset_y, offset_z)`.
#[derive(Clone)]
pub struct ScalarSampler {
    algorithm: Algorithm,
    scale: f64,
    offset: (f64, f64, f64),
}

impl ScalarSampler {
    /// Builds the sampler, seeding every permutation table from `params.seed`.
    ///
    /// The domain-warp displacement noise uses `seed + 1` so it is
    /// decorrelated from the base.
    pub fn new(params: &NoiseParameters) -> Self {
        let seed = params.seed;
        let algorithm = match params.noise_type {
            NoiseType::Perlin => Algorithm::Perlin(PerlinNoise::new(seed)),
            NoiseType::Simplex => Algorithm::Simplex(SimplexNoise::new(seed)),
            NoiseType::Fbm => Algorithm::Fbm(
                Fbm::new(PerlinNoise::new(seed))
                    .with_octaves(params.octaves)
                    .with_persistence(params.persistence)
                    .with_lacunarity(params.lacunarity),
            ),
            NoiseType::Turbulence => Algorithm::Turbulence(
                Turbulence::new(SimplexNoise::new(seed))
                    .with_octaves(params.octaves)
                    .with_persistence(params.persistence)
                    .with_lacunarity(params.lacunarity),
            ),
            NoiseType::Ridged => Algorithm::Ridged(
                Ridged::new(SimplexNoise::new(seed))
                    .with_octaves(params.octaves)
                    .with_persistence(params.persistence)
                    .with_lacunarity(params.lacunarity)
                    .with_power(params.power),
            ),
            // Warp strength is in pixels; the combinator works in sample units.
            NoiseType::DomainWarp => Algorithm::DomainWarp(DomainWarp::new(
                SimplexNoise::new(seed),
                SimplexNoise::new(seed.wrapping_add(1)),
                params.warp_strength / params.scale,
            )),
        };

        Self {
            algorithm,
            scale: params.scale,
            offset: (params.offset_x, params.offset_y, params.offset_z),
        }
    }

    /// Samples the raw noise at pixel `(px, py)`.
    #[inline]
    pub fn sample_pixel(&self, px: f64, py: f64) -> f64 {
        let (ox, oy, oz) = self.offset;
        self.sample(px / self.scale + ox, py / self.scale + oy, oz)
    }
}

impl Noise3D for ScalarSampler {
    #[inline]
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        match &self.algorithm {
            Algorithm::Perlin(n) => n.sample(x, y, z),
            Algorithm::Simplex(n) => n.sample(x, y, z),
            Algorithm::Fbm(n) => n.sample(x, y, z),
            Algorithm::Turbulence(n) => n.sample(x, y, z),
            Algorithm::Ridged(n) => n.sample(x, y, z),
            Algorithm::DomainWarp(n) => n.sample(x, y, z),
        }
    }
}
