//! Template command implementation
//!
//! Prints a default job document for a noise type or sprite shape, ready to
//! edit and pass to `generate`.

use anyhow::{bail, Result};
use noisekit_spec::{
    AnimationSpec, AnimationTrack, Job, NoiseParameters, NoiseRecipe, NoiseType, ParamTarget,
    SpriteParam, SpriteParameters, SpriteShape,
};
use std::process::ExitCode;

const NOISE_RESOLUTION: [u32; 2] = [256, 256];
const SPRITE_RESOLUTION: [u32; 2] = [64, 64];

/// What the template is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Noise(NoiseType),
    Sprite(SpriteShape),
}

impl TemplateKind {
    /// Resolves the `--noise` / `--sprite` arguments.
    pub fn from_args(noise: Option<&str>, sprite: Option<&str>) -> Result<Self> {
        match (noise, sprite) {
            (Some(name), None) => match NoiseType::parse(name) {
                Some(t) => Ok(TemplateKind::Noise(t)),
                None => bail!(
                    "unknown noise type: {} (expected one of: {})",
                    name,
                    NoiseType::ALL.map(|t| t.as_str()).join(", ")
                ),
            },
            (None, Some(name)) => match SpriteShape::parse(name) {
                Some(s) => Ok(TemplateKind::Sprite(s)),
                None => bail!(
                    "unknown sprite shape: {} (expected one of: {})",
                    name,
                    SpriteShape::ALL.map(|s| s.as_str()).join(", ")
                ),
            },
            _ => bail!("exactly one of --noise or --sprite is required"),
        }
    }
}

/// Builds the default job for a template kind.
///
/// With `frames`, noise templates drift along Z and sprite templates spin
/// once around their center.
pub fn template_job(kind: TemplateKind, frames: Option<u32>) -> Job {
    match kind {
        TemplateKind::Noise(noise_type) => {
            let job = Job::new(
                format!("{}_noise", noise_type.as_str()),
                NOISE_RESOLUTION,
                NoiseRecipe::single(NoiseParameters::new(noise_type)).into(),
            );
            match frames {
                Some(n) => job.with_animation(AnimationSpec::z_drift(n, 0.0, 0.05)),
                None => job,
            }
        }
        TemplateKind::Sprite(shape) => {
            let job = Job::new(
                format!("{}_sprite", shape.as_str()),
                SPRITE_RESOLUTION,
                SpriteParameters::for_shape(shape).into(),
            );
            match frames {
                Some(n) => job.with_animation(AnimationSpec::new(n).with_track(
                    AnimationTrack::new(ParamTarget::Sprite(SpriteParam::Rotation), 0.0, 360.0),
                )),
                None => job,
            }
        }
    }
}

/// Run the template command
///
/// # Returns
/// Exit code: 0 on success
pub fn run(noise: Option<&str>, sprite: Option<&str>, frames: Option<u32>) -> Result<ExitCode> {
    let kind = TemplateKind::from_args(noise, sprite)?;
    let job = template_job(kind, frames);
    println!("{}", job.to_json_pretty()?);
    Ok(ExitCode::SUCCESS)
}
