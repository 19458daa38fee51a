//! Job and recipe validation.
//!
//! Every check runs before any generation work; failures name the offending
//! field as a dotted path.

pub mod common;

use crate::error::{ConfigurationError, ValidationErrors};
use crate::job::Job;
use crate::recipe::{AnimationSpec, Composition, Layer, ParamTarget, Recipe};

/// Longest accepted job name.
const MAX_NAME_LEN: usize = 128;

/// Validates a whole job document, collecting every failure.
///
/// # Example
/// ```
/// use noisekit_spec::{Job, SpriteParameters, SpriteShape};
/// use noisekit_spec::validation::validate_job;
///
/// let job = Job::new("spark", [64, 64], SpriteParameters::for_shape(SpriteShape::Sparkle).into());
/// assert!(validate_job(&job).is_ok());
///
/// let bad = Job::new("spark", [0, 64], SpriteParameters::for_shape(SpriteShape::Sparkle).into());
/// assert_eq!(validate_job(&bad).unwrap_err().errors[0].field, "resolution");
/// ```
pub fn validate_job(job: &Job) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Err(e) = validate_name(&job.name) {
        errors.push(e);
    }
    if let Err(e) = common::validate_resolution(job.width(), job.height()) {
        errors.push(e);
    }
    if let Err(e) = job.recipe.validate() {
        errors.extend_nested("recipe", e);
    }
    if let Some(animation) = &job.animation {
        if let Err(e) = validate_animation(&job.recipe, animation) {
            errors.extend_nested("animation", e);
        } else if animation.composition == Composition::Atlas
            && common::validate_resolution(job.width(), job.height()).is_ok()
        {
            if let Err(e) = animation.atlas_size(job.width(), job.height()) {
                errors.push(e.nested("animation"));
            }
        }
    }

    errors.into_result()
}

/// Validates an animation against the recipe it animates.
///
/// Besides the animation's own invariants, every track must target a
/// parameter that exists on the recipe: noise tracks on noise recipes (layer
/// B only when present), sprite tracks and color tracks on sprites.
pub fn validate_animation(recipe: &Recipe, animation: &AnimationSpec) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Err(e) = animation.validate() {
        errors.errors.extend(e.errors);
    }

    for (i, track) in animation.tracks.iter().enumerate() {
        if let Err(e) = validate_target(recipe, &track.target) {
            errors.push(e.nested(&format!("tracks[{}]", i)));
        }
    }

    if animation.color.is_some() && !matches!(recipe, Recipe::Sprite(_)) {
        errors.push(ConfigurationError::new(
            "color",
            format!("color tracks apply to sprites, not {} recipes", recipe.kind()),
        ));
    }

    errors.into_result()
}

/// Checks that a track target exists on the recipe.
pub fn validate_target(recipe: &Recipe, target: &ParamTarget) -> Result<(), ConfigurationError> {
    match (recipe, target) {
        (Recipe::Noise(noise), ParamTarget::Noise { layer: Layer::B, .. })
            if noise.layer_b.is_none() =>
        {
            Err(ConfigurationError::new(
                "target",
                "targets layer b, but the recipe has no layer_b",
            ))
        }
        (Recipe::Noise(_), ParamTarget::Noise { .. } | ParamTarget::MixWeight) => Ok(()),
        (Recipe::Sprite(_), ParamTarget::Sprite(_)) => Ok(()),
        (recipe, target) => Err(ConfigurationError::new(
            "target",
            format!(
                "{} target does not apply to {} recipes",
                if target.is_noise() { "noise" } else { "sprite" },
                recipe.kind()
            ),
        )),
    }
}

/// Checks that a job name is usable as a file stem.
fn validate_name(name: &str) -> Result<(), ConfigurationError> {
    if name.is_empty() {
        return Err(ConfigurationError::new("name", "must not be empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ConfigurationError::new(
            "name",
            format!("must be at most {} bytes, got {}", MAX_NAME_LEN, name.len()),
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ConfigurationError::new(
            "name",
            format!(
                "may only contain ASCII letters, digits, '_' and '-', got {:?}",
                name
            ),
        ));
    }
    Ok(())
}
