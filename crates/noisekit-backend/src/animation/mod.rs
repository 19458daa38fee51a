//! Animation sequencer.
//!
//! Drives parameter tracks across a frame count and renders every frame
//! through the single-frame generators. Frames depend only on their index,
//! the template and the [`AnimationSpec`], so [`render_frame`] may be called
//! out of order or from several threads with identical results.
//!
//! # Example
//! ```
//! use noisekit_backend::{animate, Animation, CancelToken};
//! use noisekit_spec::{AnimationSpec, NoiseParameters, NoiseRecipe, NoiseType};
//!
//! let recipe = NoiseRecipe::single(NoiseParameters::new(NoiseType::Perlin).with_scale(8.0));
//! let spec = AnimationSpec::z_drift(4, 0.0, 0.25);
//! let atlas = match animate(&recipe, &spec, 16, 16, &CancelToken::new())
//!     .unwrap()
//!     .complete()
//!     .unwrap()
//! {
//!     Animation::Atlas(atlas) => atlas,
//!     Animation::Sequence(_) => unreachable!(),
//! };
//! assert_eq!((atlas.rows, atlas.cols), (2, 2));
//! assert_eq!((atlas.buffer.width, atlas.buffer.height), (32, 32));
//! ```

mod atlas;
mod curve;

pub use atlas::Atlas;
pub use curve::{color_value, ease, frame_fraction, track_value};

use noisekit_spec::validation::common::validate_resolution;
use noisekit_spec::{
    AnimationSpec, Composition, ConfigurationError, NoiseRecipe, ParamTarget, SpriteParameters,
    ValidationErrors,
};
use tracing::{debug, trace};

use crate::cancel::{complete_or_return, CancelToken, Outcome};
use crate::field::{Field, FrameBuffer, RgbaField};
use crate::generate::{generate_recipe, GenerateError};
use crate::sprite::generate_sprite;

/// A parameter record that animation tracks can drive.
pub trait Animatable: Clone {
    /// Buffer produced for one frame.
    type Buffer: FrameBuffer;

    /// Writes `value` into the parameter bound to `target`.
    fn apply(&mut self, target: &ParamTarget, value: f64) -> Result<(), ConfigurationError>;

    /// Writes an animated tint.
    fn apply_color(&mut self, _color: [u8; 3]) -> Result<(), ConfigurationError> {
        Err(ConfigurationError::new(
            "color",
            "color tracks apply to sprites only",
        ))
    }

    /// Checks the parameter invariants for one frame.
    fn validate(&self) -> Result<(), ValidationErrors>;

    /// Renders one frame.
    fn render(
        &self,
        width: u32,
        height: u32,
        token: &CancelToken,
    ) -> Result<Outcome<Self::Buffer>, GenerateError>;
}

fn wrong_kind(target: &ParamTarget, kind: &str) -> ConfigurationError {
    ConfigurationError::new(
        "target",
        format!(
            "{} target does not apply to {} recipes",
            if target.is_noise() { "noise" } else { "sprite" },
            kind
        ),
    )
}

impl Animatable for NoiseRecipe {
    type Buffer = Field;

    fn apply(&mut self, target: &ParamTarget, value: f64) -> Result<(), ConfigurationError> {
        match *target {
            ParamTarget::Noise { layer, param } => {
                let params = self.layer_mut(layer).ok_or_else(|| {
                    ConfigurationError::new(
                        "target",
                        "targets layer b, but the recipe has no layer_b",
                    )
                })?;
                params.set_param(param, value);
            }
            ParamTarget::MixWeight => self.blend.mix_weight = value,
            ParamTarget::Sprite(_) => return Err(wrong_kind(target, "noise")),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        NoiseRecipe::validate(self)
    }

    fn render(
        &self,
        width: u32,
        height: u32,
        token: &CancelToken,
    ) -> Result<Outcome<Field>, GenerateError> {
        generate_recipe(self, width, height, token)
    }
}

impl Animatable for SpriteParameters {
    type Buffer = RgbaField;

    fn apply(&mut self, target: &ParamTarget, value: f64) -> Result<(), ConfigurationError> {
        match *target {
            ParamTarget::Sprite(param) => {
                self.set_param(param, value);
                Ok(())
            }
            _ => Err(wrong_kind(target, "sprite")),
        }
    }

    fn apply_color(&mut self, color: [u8; 3]) -> Result<(), ConfigurationError> {
        self.color = color;
        Ok(())
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        SpriteParameters::validate(self)
    }

    fn render(
        &self,
        width: u32,
        height: u32,
        token: &CancelToken,
    ) -> Result<Outcome<RgbaField>, GenerateError> {
        generate_sprite(self, width, height, token)
    }
}

/// Animation output.
#[derive(Debug, Clone, PartialEq)]
pub enum Animation<F> {
    /// Frames in index order.
    Sequence(Vec<F>),
    /// Frames packed into one grid buffer.
    Atlas(Atlas<F>),
}

impl<F> Animation<F> {
    /// Number of frames rendered.
    pub fn frame_count(&self) -> u32 {
        match self {
            Animation::Sequence(frames) => frames.len() as u32,
            Animation::Atlas(atlas) => atlas.frame_count,
        }
    }

    /// Converts every buffer, keeping the layout.
    pub fn map<G>(self, mut f: impl FnMut(F) -> G) -> Animation<G> {
        match self {
            Animation::Sequence(frames) => Animation::Sequence(frames.into_iter().map(f).collect()),
            Animation::Atlas(atlas) => Animation::Atlas(atlas.map(&mut f)),
        }
    }
}

/// Parameters for frame `index`: the template with every track applied.
pub fn frame_parameters<A: Animatable>(
    template: &A,
    spec: &AnimationSpec,
    index: u32,
) -> Result<A, ConfigurationError> {
    let mut params = template.clone();
    for (i, track) in spec.tracks.iter().enumerate() {
        params
            .apply(&track.target, track_value(track, spec, index))
            .map_err(|e| e.nested(&format!("tracks[{}]", i)))?;
    }
    if let Some(color) = &spec.color {
        params.apply_color(color_value(color, spec, index))?;
    }
    Ok(params)
}

/// Renders frame `index` on its own.
pub fn render_frame<A: Animatable>(
    template: &A,
    spec: &AnimationSpec,
    index: u32,
    width: u32,
    height: u32,
    token: &CancelToken,
) -> Result<Outcome<A::Buffer>, GenerateError> {
    spec.validate()?;
    if index >= spec.frame_count {
        return Err(ConfigurationError::new(
            "index",
            format!(
                "must be below frame_count {}, got {}",
                spec.frame_count, index
            ),
        )
        .into());
    }
    let params = frame_parameters(template, spec, index)?;
    trace!(frame = index, "rendering frame");
    params.render(width, height, token)
}

/// Renders every frame and composes them per `spec.composition`.
pub fn animate<A: Animatable>(
    template: &A,
    spec: &AnimationSpec,
    width: u32,
    height: u32,
    token: &CancelToken,
) -> Result<Outcome<Animation<A::Buffer>>, GenerateError> {
    animate_with_progress(template, spec, width, height, token, |_, _| {})
}

/// Like [`animate`], reporting `(completed, total)` after each frame.
///
/// Every frame's parameters are resolved and validated before the first
/// frame renders, so a bad track or layout fails without wasted work. The
/// token is checked between frames and inside each frame.
pub fn animate_with_progress<A: Animatable>(
    template: &A,
    spec: &AnimationSpec,
    width: u32,
    height: u32,
    token: &CancelToken,
    mut progress: impl FnMut(u32, u32),
) -> Result<Outcome<Animation<A::Buffer>>, GenerateError> {
    spec.validate()?;
    validate_resolution(width, height)?;
    let grid = match spec.composition {
        Composition::Atlas => {
            spec.atlas_size(width, height)?;
            Some(spec.grid()?)
        }
        Composition::Sequence => None,
    };

    let total = spec.frame_count;
    let mut frame_params = Vec::with_capacity(total as usize);
    for index in 0..total {
        let params = frame_parameters(template, spec, index)?;
        if let Err(errors) = params.validate() {
            let mut nested = ValidationErrors::new();
            nested.extend_nested(&format!("frames[{}]", index), errors);
            return Err(nested.into());
        }
        frame_params.push(params);
    }

    debug!(
        frames = total,
        composition = ?spec.composition,
        width,
        height,
        "animating"
    );

    let mut frames = Vec::with_capacity(total as usize);
    for (index, params) in frame_params.iter().enumerate() {
        if token.is_cancelled() {
            debug!(frame = index, "animation cancelled");
            return Ok(Outcome::Cancelled);
        }
        trace!(frame = index, "rendering frame");
        frames.push(complete_or_return!(params.render(width, height, token)?));
        progress(index as u32 + 1, total);
    }

    Ok(Outcome::Complete(match grid {
        Some((rows, cols)) => Animation::Atlas(Atlas::pack(&frames, rows, cols)?),
        None => Animation::Sequence(frames),
    }))
}

#[cfg(test)]
mod tests;
