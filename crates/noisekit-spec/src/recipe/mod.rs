//! Recipe types for the two generators.
//!
//! A recipe is the parameter record for one frame: a layered noise texture
//! or a procedural sprite. Animation settings live alongside, not inside,
//! the recipe.

pub mod animation;
pub mod blend;
pub mod noise;
pub mod sprite;

pub use animation::*;
pub use blend::*;
pub use noise::*;
pub use sprite::*;

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;

/// Recipe kind identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeKind {
    /// Layered noise texture (grayscale).
    Noise,
    /// Procedural sprite (RGBA).
    Sprite,
}

impl RecipeKind {
    /// Returns the recipe kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeKind::Noise => "noise",
            RecipeKind::Sprite => "sprite",
        }
    }
}

impl std::fmt::Display for RecipeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for one frame of either generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "snake_case")]
pub enum Recipe {
    Noise(NoiseRecipe),
    Sprite(SpriteParameters),
}

impl Recipe {
    /// Returns the kind of this recipe.
    pub fn kind(&self) -> RecipeKind {
        match self {
            Recipe::Noise(_) => RecipeKind::Noise,
            Recipe::Sprite(_) => RecipeKind::Sprite,
        }
    }

    /// Validates the underlying parameters.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Recipe::Noise(recipe) => recipe.validate(),
            Recipe::Sprite(params) => params.validate(),
        }
    }
}

impl From<NoiseRecipe> for Recipe {
    fn from(recipe: NoiseRecipe) -> Self {
        Recipe::Noise(recipe)
    }
}

impl From<SpriteParameters> for Recipe {
    fn from(params: SpriteParameters) -> Self {
        Recipe::Sprite(params)
    }
}
