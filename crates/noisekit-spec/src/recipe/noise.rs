//! Noise texture recipe types.
//!
//! A [`NoiseRecipe`] describes the full two-layer compositor: layer A,
//! an optional layer B, how the two are blended, and whether each layer is
//! made seamless before blending.

use serde::{Deserialize, Serialize};

use super::animation::{Layer, NoiseParam};
use super::blend::BlendSpec;
use crate::error::{ConfigurationError, ValidationErrors};
use crate::validation::common::{
    validate_count, validate_finite, validate_non_negative, validate_positive, validate_range,
};

/// Maximum number of octaves accepted for fractal noise types.
pub const MAX_OCTAVES: u32 = 16;

/// Largest per-octave frequency multiplier.
///
/// Keeps `lacunarity^(MAX_OCTAVES - 1)` far from `f64` overflow.
pub const MAX_LACUNARITY: f64 = 8.0;

/// Noise algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseType {
    /// Single-octave 3D gradient noise.
    Perlin,
    /// Single-octave 3D simplex noise.
    Simplex,
    /// Fractal Brownian motion over Perlin noise.
    Fbm,
    /// Fractal sum of absolute simplex noise.
    Turbulence,
    /// Ridged multifractal over simplex noise.
    Ridged,
    /// Simplex noise sampled through a noise-displaced coordinate space.
    DomainWarp,
}

impl NoiseType {
    /// All noise types, in display order.
    pub const ALL: [NoiseType; 6] = [
        NoiseType::Perlin,
        NoiseType::Simplex,
        NoiseType::Fbm,
        NoiseType::Turbulence,
        NoiseType::Ridged,
        NoiseType::DomainWarp,
    ];

    /// Returns the noise type as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoiseType::Perlin => "perlin",
            NoiseType::Simplex => "simplex",
            NoiseType::Fbm => "fbm",
            NoiseType::Turbulence => "turbulence",
            NoiseType::Ridged => "ridged",
            NoiseType::DomainWarp => "domain_warp",
        }
    }

    /// Parses a noise type from its string form.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Whether raw samples already lie in [-1, 1] without octave accumulation.
    ///
    /// Bounded types are mapped with `(n + 1) / 2`; every other type is
    /// rescaled from its observed min/max.
    pub fn is_bounded(&self) -> bool {
        matches!(self, NoiseType::Simplex | NoiseType::DomainWarp)
    }
}

impl std::fmt::Display for NoiseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for generating one noise layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoiseParameters {
    /// Noise algorithm.
    pub noise_type: NoiseType,

    /// Frequency divisor in pixels (larger values give broader features).
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Number of octaves for fractal types.
    #[serde(default = "default_octaves")]
    pub octaves: u32,

    /// Amplitude multiplier per octave.
    #[serde(default = "default_persistence")]
    pub persistence: f64,

    /// Frequency multiplier per octave.
    #[serde(default = "default_lacunarity")]
    pub lacunarity: f64,

    /// Seed for the permutation tables.
    #[serde(default = "default_seed")]
    pub seed: u32,

    /// Sample-space translation along X.
    #[serde(default)]
    pub offset_x: f64,

    /// Sample-space translation along Y.
    #[serde(default)]
    pub offset_y: f64,

    /// Sample-space translation along Z (the usual animation axis).
    #[serde(default)]
    pub offset_z: f64,

    /// Ridge sharpening exponent (Ridged only).
    #[serde(default = "default_power")]
    pub power: f64,

    /// Displacement in pixels applied before sampling (DomainWarp only).
    #[serde(default = "default_warp_strength")]
    pub warp_strength: f64,

    /// Output `1 - v` after normalization.
    #[serde(default)]
    pub invert: bool,
}

fn default_scale() -> f64 {
    100.0
}

fn default_octaves() -> u32 {
    4
}

fn default_persistence() -> f64 {
    0.5
}

fn default_lacunarity() -> f64 {
    2.0
}

fn default_seed() -> u32 {
    42
}

fn default_power() -> f64 {
    2.0
}

fn default_warp_strength() -> f64 {
    50.0
}

impl NoiseParameters {
    /// Creates parameters for the given noise type with default settings.
    pub fn new(noise_type: NoiseType) -> Self {
        Self {
            noise_type,
            scale: default_scale(),
            octaves: default_octaves(),
            persistence: default_persistence(),
            lacunarity: default_lacunarity(),
            seed: default_seed(),
            offset_x: 0.0,
            offset_y: 0.0,
            offset_z: 0.0,
            power: default_power(),
            warp_strength: default_warp_strength(),
            invert: false,
        }
    }

    /// Sets the scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the number of octaves.
    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    /// Sets the persistence.
    pub fn with_persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    /// Sets the lacunarity.
    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Sets all three offsets.
    pub fn with_offset(mut self, x: f64, y: f64, z: f64) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self.offset_z = z;
        self
    }

    /// Sets the ridge power.
    pub fn with_power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    /// Sets the domain warp strength.
    pub fn with_warp_strength(mut self, warp_strength: f64) -> Self {
        self.warp_strength = warp_strength;
        self
    }

    /// Sets the invert flag.
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Reads a numeric parameter.
    pub fn param(&self, param: NoiseParam) -> f64 {
        match param {
            NoiseParam::Scale => self.scale,
            NoiseParam::Octaves => self.octaves as f64,
            NoiseParam::Persistence => self.persistence,
            NoiseParam::Lacunarity => self.lacunarity,
            NoiseParam::OffsetX => self.offset_x,
            NoiseParam::OffsetY => self.offset_y,
            NoiseParam::OffsetZ => self.offset_z,
            NoiseParam::Power => self.power,
            NoiseParam::WarpStrength => self.warp_strength,
        }
    }

    /// Writes a numeric parameter. `octaves` is rounded and saturates at zero.
    pub fn set_param(&mut self, param: NoiseParam, value: f64) {
        match param {
            NoiseParam::Scale => self.scale = value,
            NoiseParam::Octaves => self.octaves = value.round().max(0.0) as u32,
            NoiseParam::Persistence => self.persistence = value,
            NoiseParam::Lacunarity => self.lacunarity = value,
            NoiseParam::OffsetX => self.offset_x = value,
            NoiseParam::OffsetY => self.offset_y = value,
            NoiseParam::OffsetZ => self.offset_z = value,
            NoiseParam::Power => self.power = value,
            NoiseParam::WarpStrength => self.warp_strength = value,
        }
    }

    /// Checks every parameter invariant, collecting all failures.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut check = |result: Result<(), ConfigurationError>| {
            if let Err(e) = result {
                errors.push(e);
            }
        };

        check(validate_positive("scale", self.scale));
        check(validate_count("octaves", self.octaves, 1, MAX_OCTAVES));
        check(validate_positive("persistence", self.persistence).and_then(|_| {
            if self.persistence > 1.0 {
                Err(ConfigurationError::new(
                    "persistence",
                    format!("must be in (0, 1], got {}", self.persistence),
                ))
            } else {
                Ok(())
            }
        }));
        check(validate_range("lacunarity", self.lacunarity, 1.0, MAX_LACUNARITY));
        check(validate_finite("offset_x", self.offset_x));
        check(validate_finite("offset_y", self.offset_y));
        check(validate_finite("offset_z", self.offset_z));
        check(validate_positive("power", self.power));
        check(validate_non_negative("warp_strength", self.warp_strength));

        errors.into_result()
    }
}

/// Seamless tiling settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TilingSpec {
    /// Width of the blended border strip as a fraction of each dimension.
    #[serde(default = "default_blend_width")]
    pub blend_width: f64,
}

fn default_blend_width() -> f64 {
    0.15
}

impl Default for TilingSpec {
    fn default() -> Self {
        Self {
            blend_width: default_blend_width(),
        }
    }
}

impl TilingSpec {
    /// Creates tiling settings with the given blend width.
    pub fn new(blend_width: f64) -> Self {
        Self { blend_width }
    }

    /// Checks that the blend width lies in (0, 0.5].
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate_finite("blend_width", self.blend_width)?;
        if self.blend_width <= 0.0 || self.blend_width > 0.5 {
            return Err(ConfigurationError::new(
                "blend_width",
                format!("must be in (0, 0.5], got {}", self.blend_width),
            ));
        }
        Ok(())
    }
}

/// Parameters for the two-layer noise compositor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoiseRecipe {
    /// Base layer.
    pub layer_a: NoiseParameters,

    /// Optional second layer blended over the base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_b: Option<NoiseParameters>,

    /// How layer B is combined with layer A.
    #[serde(default)]
    pub blend: BlendSpec,

    /// Seamless tiling applied to each layer before blending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiling: Option<TilingSpec>,
}

impl NoiseRecipe {
    /// Creates a single-layer recipe.
    pub fn single(layer: NoiseParameters) -> Self {
        Self {
            layer_a: layer,
            layer_b: None,
            blend: BlendSpec::default(),
            tiling: None,
        }
    }

    /// Adds a second layer with the given blend.
    pub fn with_layer_b(mut self, layer: NoiseParameters, blend: BlendSpec) -> Self {
        self.layer_b = Some(layer);
        self.blend = blend;
        self
    }

    /// Enables seamless tiling.
    pub fn with_tiling(mut self, tiling: TilingSpec) -> Self {
        self.tiling = Some(tiling);
        self
    }

    /// Mutable access to one layer; `None` for layer B when it is absent.
    pub fn layer_mut(&mut self, layer: Layer) -> Option<&mut NoiseParameters> {
        match layer {
            Layer::A => Some(&mut self.layer_a),
            Layer::B => self.layer_b.as_mut(),
        }
    }

    /// Iterates over the active layers (A, then B if present).
    pub fn layers(&self) -> impl Iterator<Item = &NoiseParameters> {
        std::iter::once(&self.layer_a).chain(self.layer_b.as_ref())
    }

    /// Checks every layer, the blend, and the tiling settings.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = self.layer_a.validate() {
            errors.extend_nested("layer_a", e);
        }
        if let Some(layer_b) = &self.layer_b {
            if let Err(e) = layer_b.validate() {
                errors.extend_nested("layer_b", e);
            }
        }
        if let Err(e) = self.blend.validate() {
            errors.push(e.nested("blend"));
        }
        if let Some(tiling) = &self.tiling {
            if let Err(e) = tiling.validate() {
                errors.push(e.nested("tiling"));
            }
        }

        errors.into_result()
    }
}
