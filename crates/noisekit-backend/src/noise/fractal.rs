//! Fractal combinators over a base noise.
//!
//! All combinators return the raw octave sum. Bringing it into [0, 1] is
//! the field generator's job, because the achievable range depends on the
//! octave settings.

use super::Noise3D;

/// Octave settings shared by the fractal combinators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Octaves {
    /// Number of octaves to combine.
    pub count: u32,
    /// Amplitude multiplier per octave.
    pub persistence: f64,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
}

impl Default for Octaves {
    fn default() -> Self {
        Self {
            count: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

impl Octaves {
    /// Sum `f(amplitude, frequency)` over the octaves.
    #[inline]
    fn fold(&self, mut f: impl FnMut(f64, f64) -> f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        for _ in 0..self.count.max(1) {
            total += f(amplitude, frequency);
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }
        total
    }
}

macro_rules! octave_builders {
    () => {
        /// Set the number of octaves.
        pub fn with_octaves(mut self, octaves: u32) -> Self {
            self.octaves.count = octaves.max(1);
            self
        }

        /// Set the persistence (amplitude multiplier per octave).
        pub fn with_persistence(mut self, persistence: f64) -> Self {
            self.octaves.persistence = persistence;
            self
        }

        /// Set the lacunarity (frequency multiplier per octave).
        pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
            self.octaves.lacunarity = lacunarity;
            self
        }
    };
}

/// Fractal Brownian motion: signed sum of octaves.
#[derive(Clone)]
pub struct Fbm<N: Noise3D> {
    noise: N,
    octaves: Octaves,
}

impl<N: Noise3D> Fbm<N> {
    /// Create a new FBM generator with 4 octaves, 0.5 persistence, 2.0 lacunarity.
    pub fn new(noise: N) -> Self {
        Self {
            noise,
            octaves: Octaves::default(),
        }
    }

    octave_builders!();
}

impl<N: Noise3D> Noise3D for Fbm<N> {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.octaves
            .fold(|amp, freq| amp * self.noise.sample(x * freq, y * freq, z * freq))
    }
}

/// Turbulence: sum of absolute octave values.
#[derive(Clone)]
pub struct Turbulence<N: Noise3D> {
    noise: N,
    octaves: Octaves,
}

impl<N: Noise3D> Turbulence<N> {
    /// Create a new turbulence generator with default octave settings.
    pub fn new(noise: N) -> Self {
        Self {
            noise,
            octaves: Octaves::default(),
        }
    }

    octave_builders!();
}

impl<N: Noise3D> Noise3D for Turbulence<N> {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.octaves
            .fold(|amp, freq| amp * self.noise.sample(x * freq, y * freq, z * freq).abs())
    }
}

/// Ridged multifractal: `Σ amp * (1 - |n|)^power`.
///
/// `1 - |n|` is clamped to [0, 1] before the power so base noises that
/// overshoot [-1, 1] never feed a negative number into `powf`.
#[derive(Clone)]
pub struct Ridged<N: Noise3D> {
    noise: N,
    octaves: Octaves,
    power: f64,
}

impl<N: Noise3D> Ridged<N> {
    /// Create a new ridged generator with default octave settings and power 2.
    pub fn new(noise: N) -> Self {
        Self {
            noise,
            octaves: Octaves::default(),
            power: 2.0,
        }
    }

    octave_builders!();

    /// Set the ridge sharpening exponent.
    pub fn with_power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }
}

impl<N: Noise3D> Noise3D for Ridged<N> {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.octaves.fold(|amp, freq| {
            let n = self.noise.sample(x * freq, y * freq, z * freq);
            amp * (1.0 - n.abs()).clamp(0.0, 1.0).powf(self.power)
        })
    }
}

/// Domain warp: samples `base` at a coordinate displaced by `warp`.
///
/// The displacement is `strength * (warp(p), warp(p + (5.2, 1.3, 0)))`,
/// expressed in sample units.
#[derive(Clone)]
pub struct DomainWarp<B: Noise3D, W: Noise3D> {
    base: B,
    warp: W,
    strength: f64,
}

impl<B: Noise3D, W: Noise3D> DomainWarp<B, W> {
    /// Offset between the two warp lookups, decorrelating the axes.
    const AXIS_OFFSET: (f64, f64) = (5.2, 1.3);

    /// Create a domain warp with the given displacement strength.
    pub fn new(base: B, warp: W, strength: f64) -> Self {
        Self {
            base,
            warp,
            strength,
        }
    }
}

impl<B: Noise3D, W: Noise3D> Noise3D for DomainWarp<B, W> {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let (ox, oy) = Self::AXIS_OFFSET;
        let wx = self.strength * self.warp.sample(x, y, z);
        let wy = self.strength * self.warp.sample(x + ox, y + oy, z);
        self.base.sample(x + wx, y + wy, z)
    }
}
