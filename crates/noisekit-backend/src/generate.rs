//! Single-frame generation entry points.
//!
//! The noise path runs Sample -> Normalize -> Tile -> Blend; the sprite path
//! runs Sample -> Rasterize. Every call validates its parameters first and
//! allocates fresh output buffers.

use noisekit_spec::validation::common::validate_resolution;
use noisekit_spec::{ConfigurationError, NoiseParameters, NoiseRecipe, NoiseType, Recipe, ValidationErrors};
use thiserror::Error;
use tracing::debug;

use crate::blend::blend;
use crate::cancel::{complete_or_return, CancelToken, Outcome};
use crate::field::{Field, FrameBuffer, RgbaField};
use crate::noise::ScalarSampler;
use crate::sprite::generate_sprite;
use crate::tiling::tile;

/// Errors from generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A single invalid parameter.
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    /// One or more invalid parameters in a record.
    #[error("invalid configuration: {}", format_errors(.0))]
    Validation(#[from] ValidationErrors),

    /// Two buffers that must match in size do not.
    #[error("dimension mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },
}

fn format_errors(errors: &ValidationErrors) -> String {
    errors
        .errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl GenerateError {
    pub(crate) fn mismatch<F: FrameBuffer>(a: &F, b: &F) -> Self {
        GenerateError::DimensionMismatch {
            left_width: a.width(),
            left_height: a.height(),
            right_width: b.width(),
            right_height: b.height(),
        }
    }
}

/// One generated frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Noise output.
    Gray(Field),
    /// Sprite output.
    Rgba(RgbaField),
}

impl Frame {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        match self {
            Frame::Gray(f) => f.width,
            Frame::Rgba(f) => f.width,
        }
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        match self {
            Frame::Gray(f) => f.height,
            Frame::Rgba(f) => f.height,
        }
    }
}

/// Generates one frame for either recipe kind.
pub fn generate(
    recipe: &Recipe,
    width: u32,
    height: u32,
    token: &CancelToken,
) -> Result<Outcome<Frame>, GenerateError> {
    Ok(match recipe {
        Recipe::Noise(noise) => generate_recipe(noise, width, height, token)?.map(Frame::Gray),
        Recipe::Sprite(sprite) => generate_sprite(sprite, width, height, token)?.map(Frame::Rgba),
    })
}

/// Samples one noise layer over a `width x height` grid and normalizes it to [0, 1].
///
/// Accumulating types (Perlin, FBM, Turbulence, Ridged) are rescaled from
/// their observed min/max; bounded types (Simplex, DomainWarp) map
/// `(n + 1) / 2`. A constant raw field becomes 0.5 everywhere. `invert` is
/// applied last. The token is checked once per row.
pub fn generate_noise(
    params: &NoiseParameters,
    width: u32,
    height: u32,
    token: &CancelToken,
) -> Result<Outcome<Field>, GenerateError> {
    validate_resolution(width, height)?;
    params.validate()?;

    debug!(
        noise_type = %params.noise_type,
        width,
        height,
        seed = params.seed,
        "sampling noise layer"
    );

    let sampler = ScalarSampler::new(params);
    let mut raw = Field::new(width, height, 0.0);
    for y in 0..height {
        if token.is_cancelled() {
            debug!(row = y, "noise sampling cancelled");
            return Ok(Outcome::Cancelled);
        }
        let row = (y as usize) * (width as usize);
        for x in 0..width {
            raw.data[row + x as usize] = sampler.sample_pixel(x as f64, y as f64);
        }
    }

    let field = normalize(&raw, params.noise_type);
    Ok(Outcome::Complete(if params.invert {
        field.map(|v| 1.0 - v)
    } else {
        field
    }))
}

/// Maps raw samples into [0, 1] according to the noise type.
pub fn normalize(raw: &Field, noise_type: NoiseType) -> Field {
    if noise_type.is_bounded() {
        return raw.map(|n| ((n + 1.0) * 0.5).clamp(0.0, 1.0));
    }

    match raw.min_max() {
        Some((min, max)) if max > min => {
            let range = max - min;
            raw.map(|v| ((v - min) / range).clamp(0.0, 1.0))
        }
        _ => {
            debug!(%noise_type, "constant raw field, substituting 0.5");
            raw.map(|_| 0.5)
        }
    }
}

/// Runs the layered noise pipeline: layer A, optional tiling, optional
/// layer B (tiled the same way), then the blend.
pub fn generate_recipe(
    recipe: &NoiseRecipe,
    width: u32,
    height: u32,
    token: &CancelToken,
) -> Result<Outcome<Field>, GenerateError> {
    recipe.validate()?;

    let layer_a = complete_or_return!(generate_noise(&recipe.layer_a, width, height, token)?);
    let layer_a = match &recipe.tiling {
        Some(tiling) => tile(&layer_a, tiling.blend_width)?,
        None => layer_a,
    };

    let Some(layer_b_params) = &recipe.layer_b else {
        return Ok(Outcome::Complete(layer_a));
    };

    if token.is_cancelled() {
        return Ok(Outcome::Cancelled);
    }

    let layer_b = complete_or_return!(generate_noise(layer_b_params, width, height, token)?);
    let layer_b = match &recipe.tiling {
        Some(tiling) => tile(&layer_b, tiling.blend_width)?,
        None => layer_b,
    };

    if token.is_cancelled() {
        return Ok(Outcome::Cancelled);
    }

    debug!(mode = recipe.blend.mode.as_str(), weight = recipe.blend.mix_weight, "blending layers");
    Ok(Outcome::Complete(blend(&layer_a, &layer_b, &recipe.blend)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use noisekit_spec::{BlendMode, BlendSpec, SpriteParameters, SpriteShape, TilingSpec};

    fn token() -> CancelToken {
        CancelToken::new()
    }

    #[test]
    fn test_normalize_rescales_accumulating_types() {
        let raw = Field::from_data(3, 1, vec![-2.0, 0.0, 2.0]).unwrap();
        let n = normalize(&raw, NoiseType::Fbm);
        assert_eq!(n.data, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_normalize_maps_bounded_types() {
        let raw = Field::from_data(3, 1, vec![-1.0, 0.0, 0.5]).unwrap();
        let n = normalize(&raw, NoiseType::Simplex);
        assert_eq!(n.data, vec![0.0, 0.5, 0.75]);
    }

    #[test]
    fn test_constant_field_becomes_half() {
        let raw = Field::new(4, 4, 3.25);
        let n = normalize(&raw, NoiseType::Ridged);
        assert!(n.data.iter().all(|&v| v == 0.5));
    }

    #[test]
    fn test_single_pixel_is_half() {
        let params = NoiseParameters::new(NoiseType::Perlin);
        let field = generate_noise(&params, 1, 1, &token()).unwrap().complete().unwrap();
        assert_eq!(field.data, vec![0.5]);
    }

    #[test]
    fn test_invert() {
        let params = NoiseParameters::new(NoiseType::Fbm).with_seed(5);
        let plain = generate_noise(&params, 16, 16, &token()).unwrap().complete().unwrap();
        let inverted = generate_noise(&params.clone().with_invert(true), 16, 16, &token())
            .unwrap()
            .complete()
            .unwrap();
        for (a, b) in plain.data.iter().zip(&inverted.data) {
            assert!((a + b - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_invalid_scale_is_configuration_error() {
        let params = NoiseParameters::new(NoiseType::Perlin).with_scale(0.0);
        let err = generate_noise(&params, 8, 8, &token()).unwrap_err();
        match err {
            GenerateError::Validation(errors) => assert_eq!(errors.errors[0].field, "scale"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let params = NoiseParameters::new(NoiseType::Perlin);
        assert!(matches!(
            generate_noise(&params, 0, 8, &token()),
            Err(GenerateError::Configuration(_))
        ));
    }

    #[test]
    fn test_cancelled_before_start() {
        let t = token();
        t.cancel();
        let params = NoiseParameters::new(NoiseType::Turbulence);
        assert!(generate_noise(&params, 64, 64, &t).unwrap().is_cancelled());
    }

    #[test]
    fn test_recipe_with_mix_zero_equals_layer_a() {
        let a = NoiseParameters::new(NoiseType::Perlin).with_seed(1);
        let recipe = NoiseRecipe::single(a.clone()).with_layer_b(
            NoiseParameters::new(NoiseType::Ridged).with_seed(2),
            BlendSpec::new(BlendMode::Mix, 0.0),
        );
        let blended = generate_recipe(&recipe, 32, 32, &token()).unwrap().complete().unwrap();
        let only_a = generate_noise(&a, 32, 32, &token()).unwrap().complete().unwrap();
        assert_eq!(blended, only_a);
    }

    #[test]
    fn test_recipe_tiling_applies() {
        let recipe = NoiseRecipe::single(NoiseParameters::new(NoiseType::Fbm).with_scale(20.0))
            .with_tiling(TilingSpec::new(0.2));
        let field = generate_recipe(&recipe, 40, 30, &token()).unwrap().complete().unwrap();
        for y in 0..30 {
            assert!((field.get(0, y) - field.get(39, y)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_generate_dispatches_by_kind() {
        let noise: Recipe = NoiseRecipe::single(NoiseParameters::new(NoiseType::Simplex)).into();
        let sprite: Recipe = SpriteParameters::for_shape(SpriteShape::Circle).into();
        assert!(matches!(
            generate(&noise, 8, 8, &token()).unwrap(),
            Outcome::Complete(Frame::Gray(_))
        ));
        let frame = generate(&sprite, 8, 6, &token()).unwrap().complete().unwrap();
        assert!(matches!(frame, Frame::Rgba(_)));
        assert_eq!((frame.width(), frame.height()), (8, 6));
    }
}
