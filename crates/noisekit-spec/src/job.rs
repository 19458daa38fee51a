//! Job documents: one generation request as a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::JobError;
use crate::recipe::{AnimationSpec, Recipe};
use crate::validation::validate_job;

/// One generation or export request.
///
/// # Example
/// ```
/// use noisekit_spec::{Job, NoiseParameters, NoiseRecipe, NoiseType};
///
/// let job = Job::new(
///     "clouds",
///     [256, 256],
///     NoiseRecipe::single(NoiseParameters::new(NoiseType::Fbm)).into(),
/// );
/// let json = job.to_json_pretty().unwrap();
/// assert_eq!(Job::from_json(&json).unwrap(), job);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    /// Base name for output files.
    pub name: String,

    /// Output size as `[width, height]` in pixels.
    pub resolution: [u32; 2],

    /// What to generate.
    pub recipe: Recipe,

    /// Optional animation; absent means a single frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationSpec>,

    /// Shift the output by half its size so residual seams show in the middle.
    #[serde(default)]
    pub seamless_preview: bool,
}

impl Job {
    /// Creates a single-frame job.
    pub fn new(name: impl Into<String>, resolution: [u32; 2], recipe: Recipe) -> Self {
        Self {
            name: name.into(),
            resolution,
            recipe,
            animation: None,
            seamless_preview: false,
        }
    }

    /// Adds an animation.
    pub fn with_animation(mut self, animation: AnimationSpec) -> Self {
        self.animation = Some(animation);
        self
    }

    /// Enables the seamless preview transform.
    pub fn with_seamless_preview(mut self, enabled: bool) -> Self {
        self.seamless_preview = enabled;
        self
    }

    /// Output width in pixels.
    pub fn width(&self) -> u32 {
        self.resolution[0]
    }

    /// Output height in pixels.
    pub fn height(&self) -> u32 {
        self.resolution[1]
    }

    /// Parses a job from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the job to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the job to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Reads, parses, and validates a job file.
    pub fn load(path: &Path) -> Result<Self, JobError> {
        let json = std::fs::read_to_string(path)?;
        let job = Self::from_json(&json)?;
        validate_job(&job)?;
        Ok(job)
    }
}
