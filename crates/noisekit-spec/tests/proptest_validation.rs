//! Property-based tests for parameter validation and job documents.
//!
//! Validation must never panic, must agree with the documented ranges, and
//! every valid document must survive a JSON round trip unchanged.

use proptest::prelude::*;

use noisekit_spec::validation::common::{
    validate_positive, validate_resolution, validate_unit_interval, MAX_DIMENSION,
};
use noisekit_spec::validation::validate_job;
use noisekit_spec::{
    AnimationSpec, AtlasLayout, Job, NoiseParameters, NoiseRecipe, NoiseType, SpriteParameters,
    SpriteShape,
};

fn any_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        Just(0.0),
        Just(-0.0),
        Just(1.0),
        any::<f64>(),
        -2.0f64..2.0,
    ]
}

proptest! {
    #[test]
    fn unit_interval_matches_definition(v in any_f64()) {
        let expected = v.is_finite() && (0.0..=1.0).contains(&v);
        prop_assert_eq!(validate_unit_interval("alpha", v).is_ok(), expected);
    }

    #[test]
    fn positive_matches_definition(v in any_f64()) {
        prop_assert_eq!(validate_positive("scale", v).is_ok(), v.is_finite() && v > 0.0);
    }

    #[test]
    fn resolution_bounds(w in 0u32..=MAX_DIMENSION + 8, h in 0u32..=MAX_DIMENSION + 8) {
        let expected = w >= 1 && h >= 1 && w <= MAX_DIMENSION && h <= MAX_DIMENSION;
        prop_assert_eq!(validate_resolution(w, h).is_ok(), expected);
    }

    /// Noise validation never panics and reports the scale field by name.
    #[test]
    fn noise_scale_errors_name_the_field(scale in any_f64()) {
        let params = NoiseParameters::new(NoiseType::Fbm).with_scale(scale);
        match params.validate() {
            Ok(()) => prop_assert!(scale.is_finite() && scale > 0.0),
            Err(errors) => prop_assert_eq!(errors.errors[0].field.as_str(), "scale"),
        }
    }

    /// Valid noise jobs round-trip through JSON. Values are dyadic so the
    /// text form is exact.
    #[test]
    fn noise_job_round_trips(
        type_index in 0usize..NoiseType::ALL.len(),
        scale_eighths in 4u32..4000,
        octaves in 1u32..=16,
        seed in any::<u32>(),
        w in 1u32..=512,
        h in 1u32..=512,
        frames in 1u32..=32,
    ) {
        let recipe = NoiseRecipe::single(
            NoiseParameters::new(NoiseType::ALL[type_index])
                .with_scale(f64::from(scale_eighths) / 8.0)
                .with_octaves(octaves)
                .with_seed(seed),
        );
        let job = Job::new("round_trip", [w, h], recipe.into())
            .with_animation(AnimationSpec::z_drift(frames, 0.0, 0.25));
        prop_assert!(validate_job(&job).is_ok());
        let json = job.to_json().unwrap();
        prop_assert_eq!(Job::from_json(&json).unwrap(), job);
    }

    /// Sprite documents with only a shape pick up that shape's defaults.
    #[test]
    fn sprite_defaults_follow_shape(shape_index in 0usize..SpriteShape::ALL.len()) {
        let shape = SpriteShape::ALL[shape_index];
        let json = format!(r#"{{"shape": "{}"}}"#, shape.as_str());
        let parsed: SpriteParameters = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, SpriteParameters::for_shape(shape));
    }

    /// A manual grid is accepted exactly when it holds every frame.
    #[test]
    fn manual_layout_capacity(rows in 1u32..8, cols in 1u32..8, frames in 1u32..80) {
        let spec = AnimationSpec::new(frames).with_layout(AtlasLayout::Manual { rows, cols });
        prop_assert_eq!(spec.grid().is_ok(), rows * cols >= frames);
    }
}
