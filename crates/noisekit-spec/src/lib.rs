//! noisekit parameter records
//!
//! This crate defines the parameter records consumed by the noisekit
//! generators, the JSON job documents that carry them, and their validation.
//!
//! # Example
//!
//! ```
//! use noisekit_spec::{AnimationSpec, Job, NoiseParameters, NoiseRecipe, NoiseType, TilingSpec};
//! use noisekit_spec::validation::validate_job;
//!
//! let recipe = NoiseRecipe::single(NoiseParameters::new(NoiseType::Perlin).with_seed(7))
//!     .with_tiling(TilingSpec::default());
//! let job = Job::new("perlin_loop", [128, 128], recipe.into())
//!     .with_animation(AnimationSpec::z_drift(16, 0.0, 0.05));
//!
//! assert!(validate_job(&job).is_ok());
//! ```
//!
//! # Modules
//!
//! - [`error`]: `ConfigurationError` and friends
//! - [`recipe`]: noise, blend, sprite, and animation records
//! - [`job`]: job documents
//! - [`validation`]: document-level validation and shared range checks

pub mod error;
pub mod job;
pub mod recipe;
pub mod validation;

pub use error::{ConfigurationError, JobError, ValidationErrors};
pub use job::Job;
pub use recipe::{
    AnimationSpec, AnimationTrack, AtlasLayout, BlendMode, BlendSpec, ColorTrack, Composition,
    Curve, GradientKind, Layer, NoiseParam, NoiseParameters, NoiseRecipe, NoiseType, ParamTarget,
    Recipe, RecipeKind, SpriteParam, SpriteParameters, SpriteShape, Style, TilingSpec,
    MAX_BLUR, MAX_FRAME_COUNT, MAX_LACUNARITY, MAX_OCTAVES,
};
