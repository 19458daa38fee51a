//! Layer blend settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::validation::common::validate_unit_interval;

/// Arithmetic used to combine two layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Linear interpolation from A to B.
    #[default]
    Mix,
    /// Sum, clamped to 1.
    Add,
    /// Product.
    Multiply,
    /// Inverted product of inverses.
    Screen,
    /// Multiply below 0.5, screen at or above.
    Overlay,
    /// Elementwise minimum.
    Min,
    /// Elementwise maximum.
    Max,
}

impl BlendMode {
    /// All blend modes, in display order.
    pub const ALL: [BlendMode; 7] = [
        BlendMode::Mix,
        BlendMode::Add,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::Min,
        BlendMode::Max,
    ];

    /// Returns the blend mode as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlendMode::Mix => "mix",
            BlendMode::Add => "add",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::Min => "min",
            BlendMode::Max => "max",
        }
    }
}

/// Blend mode plus mix weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlendSpec {
    /// Blend arithmetic.
    #[serde(default)]
    pub mode: BlendMode,

    /// Interpolation from layer A toward the blended result.
    #[serde(default = "default_mix_weight")]
    pub mix_weight: f64,
}

fn default_mix_weight() -> f64 {
    0.5
}

impl Default for BlendSpec {
    fn default() -> Self {
        Self {
            mode: BlendMode::default(),
            mix_weight: default_mix_weight(),
        }
    }
}

impl BlendSpec {
    /// Creates a blend spec.
    pub fn new(mode: BlendMode, mix_weight: f64) -> Self {
        Self { mode, mix_weight }
    }

    /// Checks that the mix weight is in [0, 1].
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate_unit_interval("mix_weight", self.mix_weight)
    }
}
