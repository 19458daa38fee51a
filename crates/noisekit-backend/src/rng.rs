//! Deterministic RNG wrapper using PCG32.
//!
//! Every random draw in the crate (permutation tables, sprite jitter, the
//! random animation style) goes through an explicit [`DeterministicRng`]
//! built from a seed, never through a shared or thread-local generator.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Wrapper around PCG32 for deterministic random number generation.
#[derive(Clone)]
pub struct DeterministicRng {
    inner: Pcg32,
}

impl DeterministicRng {
    /// Create a new RNG from a 32-bit seed.
    ///
    /// The seed is expanded to 64 bits by duplicating its bits.
    pub fn new(seed: u32) -> Self {
        let seed64 = (seed as u64) | ((seed as u64) << 32);
        Self {
            inner: Pcg32::seed_from_u64(seed64),
        }
    }

    /// Derive a seed for one animation frame using BLAKE3.
    ///
    /// Frames get independent streams so they can be rendered in any order.
    pub fn derive_frame_seed(base_seed: u32, frame_index: u32) -> u32 {
        Self::derive(base_seed, &frame_index.to_le_bytes())
    }

    /// Derive a seed for a named sub-stream (e.g. `"branch"`) using BLAKE3.
    pub fn derive_stream_seed(base_seed: u32, stream: &str) -> u32 {
        Self::derive(base_seed, stream.as_bytes())
    }

    fn derive(base_seed: u32, salt: &[u8]) -> u32 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&base_seed.to_le_bytes());
        hasher.update(salt);
        let hash = hasher.finalize();
        let b = hash.as_bytes();
        u32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    /// Generate a random f64 in the range [0.0, 1.0).
    #[inline]
    pub fn gen_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Generate a random value in the given range.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.inner.gen_range(range)
    }

    /// Generate a random f64 in the range [-1.0, 1.0).
    #[inline]
    pub fn gen_signed_f64(&mut self) -> f64 {
        self.gen_f64() * 2.0 - 1.0
    }

    /// Build a doubled 256-entry permutation table by Fisher-Yates shuffle.
    pub fn permutation_table(&mut self) -> [u8; 512] {
        let mut perm = [0u8; 512];
        let mut source: Vec<u8> = (0..=255).collect();

        for i in (1..256).rev() {
            let j = self.gen_range(0..=i);
            source.swap(i, j);
        }

        perm[..256].copy_from_slice(&source);
        perm[256..].copy_from_slice(&source);
        perm
    }
}
