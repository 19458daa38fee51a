//! Integration tests for noise field generation.
//!
//! Covers determinism, the [0, 1] normalization range for every noise type
//! under randomized parameters, and seed/offset sensitivity.

use noisekit_backend::{generate, generate_noise, CancelToken, Field, Frame};
use noisekit_spec::{NoiseParameters, NoiseRecipe, NoiseType, Recipe, MAX_LACUNARITY, MAX_OCTAVES};
use proptest::prelude::*;

fn noise(params: &NoiseParameters, width: u32, height: u32) -> Field {
    generate_noise(params, width, height, &CancelToken::new())
        .expect("valid parameters")
        .complete()
        .expect("not cancelled")
}

// ============================================================================
// Determinism Tests
// ============================================================================

/// The reference Perlin scenario: identical arrays on repeated calls.
#[test]
fn test_perlin_reference_determinism() {
    let params = NoiseParameters::new(NoiseType::Perlin)
        .with_scale(100.0)
        .with_octaves(4)
        .with_persistence(0.5)
        .with_lacunarity(2.0)
        .with_seed(42)
        .with_offset(0.0, 0.0, 0.0);

    let a = noise(&params, 256, 256);
    let b = noise(&params, 256, 256);
    assert_eq!(a.data.len(), 256 * 256);
    assert_eq!(a, b, "Perlin field should be bit-identical across calls");
}

/// Every noise type is deterministic through the generic entry point.
#[test]
fn test_generate_is_deterministic_for_all_types() {
    for noise_type in NoiseType::ALL {
        let recipe: Recipe =
            NoiseRecipe::single(NoiseParameters::new(noise_type).with_scale(24.0).with_seed(7))
                .into();
        let first = generate(&recipe, 32, 24, &CancelToken::new()).unwrap();
        let second = generate(&recipe, 32, 24, &CancelToken::new()).unwrap();
        assert_eq!(first, second, "{} should be deterministic", noise_type);
        match first.complete() {
            Some(Frame::Gray(field)) => assert_eq!((field.width, field.height), (32, 24)),
            other => panic!("expected a gray frame for {}, got {:?}", noise_type, other),
        }
    }
}

/// Different seeds give different fields.
#[test]
fn test_seed_changes_output() {
    for noise_type in NoiseType::ALL {
        let base = NoiseParameters::new(noise_type).with_scale(16.0);
        let a = noise(&base.clone().with_seed(1), 24, 24);
        let b = noise(&base.with_seed(2), 24, 24);
        assert_ne!(a, b, "{} should depend on the seed", noise_type);
    }
}

/// Moving along Z changes the field (the animation axis).
#[test]
fn test_offset_z_changes_output() {
    let base = NoiseParameters::new(NoiseType::Fbm).with_scale(16.0);
    let a = noise(&base.clone().with_offset(0.0, 0.0, 0.0), 24, 24);
    let b = noise(&base.with_offset(0.0, 0.0, 0.37), 24, 24);
    assert_ne!(a, b);
}

/// Offsetting X by one scale unit equals shifting the sample grid.
#[test]
fn test_offset_x_shifts_samples() {
    let base = NoiseParameters::new(NoiseType::Simplex).with_scale(10.0);
    let shifted = noise(&base.clone().with_offset(0.5, 0.0, 0.0), 40, 4);
    let plain = noise(&base, 40, 4);
    // 0.5 in sample space is 5 pixels at scale 10
    for y in 0..4 {
        for x in 0..35 {
            let a = shifted.data[(y * 40 + x) as usize];
            let b = plain.data[(y * 40 + x + 5) as usize];
            assert!((a - b).abs() < 1e-9, "mismatch at ({}, {})", x, y);
        }
    }
}

/// Offsets far outside the `i64` range still sample a lattice cell.
#[test]
fn test_extreme_offsets_generate_unit_range() {
    for noise_type in NoiseType::ALL {
        for offset in [1e19, -1e19, 1e300, -f64::MAX] {
            let params = NoiseParameters::new(noise_type)
                .with_scale(10.0)
                .with_offset(offset, offset, offset);
            assert!(params.validate().is_ok());
            let field = noise(&params, 8, 8);
            assert!(
                field.data.iter().all(|v| (0.0..=1.0).contains(v)),
                "{} at offset {}",
                noise_type,
                offset
            );
        }
    }
}

/// Sixteen octaves at the largest lacunarity keep every value finite.
#[test]
fn test_max_lacunarity_all_octaves() {
    for noise_type in [NoiseType::Fbm, NoiseType::Turbulence, NoiseType::Ridged] {
        let params = NoiseParameters::new(noise_type)
            .with_octaves(MAX_OCTAVES)
            .with_lacunarity(MAX_LACUNARITY)
            .with_scale(1e-3);
        let field = noise(&params, 8, 8);
        assert!(field.data.iter().all(|v| (0.0..=1.0).contains(v)), "{}", noise_type);
    }
}

// ============================================================================
// Normalization Tests
// ============================================================================

/// Accumulating types are stretched to the full [0, 1] range.
#[test]
fn test_accumulating_types_span_unit_range() {
    for noise_type in [
        NoiseType::Perlin,
        NoiseType::Fbm,
        NoiseType::Turbulence,
        NoiseType::Ridged,
    ] {
        let field = noise(&NoiseParameters::new(noise_type).with_scale(12.0), 48, 48);
        let (min, max) = field.min_max().unwrap();
        assert!(min.abs() < 1e-12, "{} min {}", noise_type, min);
        assert!((max - 1.0).abs() < 1e-12, "{} max {}", noise_type, max);
    }
}

/// A single pixel has no range to stretch and becomes 0.5.
#[test]
fn test_single_pixel_field_is_flat() {
    let field = noise(&NoiseParameters::new(NoiseType::Fbm), 1, 1);
    assert_eq!(field.data, vec![0.5]);
}

/// Invert mirrors the normalized values.
#[test]
fn test_invert() {
    let base = NoiseParameters::new(NoiseType::Ridged).with_scale(20.0);
    let plain = noise(&base.clone(), 16, 16);
    let inverted = noise(&base.with_invert(true), 16, 16);
    for (a, b) in plain.data.iter().zip(&inverted.data) {
        assert!((a + b - 1.0).abs() < 1e-12);
    }
}

fn noise_type_strategy() -> impl Strategy<Value = NoiseType> {
    prop::sample::select(NoiseType::ALL.to_vec())
}

fn scale_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => 0.5f64..400.0,
        1 => 1e-3f64..0.5,
        1 => 1e3f64..1e9,
        1 => Just(f64::MIN_POSITIVE),
    ]
}

fn offset_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => -1000.0f64..1000.0,
        1 => -1e19f64..1e19,
        1 => prop::sample::select(vec![1e300, -1e300, f64::MAX, -f64::MAX]),
    ]
}

fn params_strategy(noise_type: NoiseType) -> impl Strategy<Value = NoiseParameters> {
    (
        scale_strategy(),
        1u32..=MAX_OCTAVES,
        prop_oneof![0.05f64..=1.0, Just(f64::MIN_POSITIVE), Just(1.0)],
        prop_oneof![1.0f64..=MAX_LACUNARITY, Just(MAX_LACUNARITY)],
        any::<u32>(),
        (offset_strategy(), offset_strategy(), offset_strategy()),
        (
            prop_oneof![0.1f64..5.0, 1e-6f64..0.1, 5.0f64..1e6],
            prop_oneof![0.0f64..200.0, 200.0f64..1e6],
            any::<bool>(),
        ),
    )
        .prop_map(
            move |(scale, octaves, persistence, lacunarity, seed, offset, extra)| {
                let (power, warp, invert) = extra;
                NoiseParameters::new(noise_type)
                    .with_scale(scale)
                    .with_octaves(octaves)
                    .with_persistence(persistence)
                    .with_lacunarity(lacunarity)
                    .with_seed(seed)
                    .with_offset(offset.0, offset.1, offset.2)
                    .with_power(power)
                    .with_warp_strength(warp)
                    .with_invert(invert)
            },
        )
}

fn any_params() -> impl Strategy<Value = NoiseParameters> {
    noise_type_strategy().prop_flat_map(params_strategy)
}

fn assert_unit_range(field: &Field) -> Result<(), TestCaseError> {
    for &v in &field.data {
        prop_assert!(v.is_finite(), "non-finite value {}", v);
        prop_assert!((0.0..=1.0).contains(&v), "value {} out of [0, 1]", v);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn perlin_stays_in_unit_range(params in params_strategy(NoiseType::Perlin)) {
        assert_unit_range(&noise(&params, 16, 16))?;
    }

    #[test]
    fn simplex_stays_in_unit_range(params in params_strategy(NoiseType::Simplex)) {
        assert_unit_range(&noise(&params, 16, 16))?;
    }

    #[test]
    fn fbm_stays_in_unit_range(params in params_strategy(NoiseType::Fbm)) {
        assert_unit_range(&noise(&params, 16, 16))?;
    }

    #[test]
    fn turbulence_stays_in_unit_range(params in params_strategy(NoiseType::Turbulence)) {
        assert_unit_range(&noise(&params, 16, 16))?;
    }

    #[test]
    fn ridged_stays_in_unit_range(params in params_strategy(NoiseType::Ridged)) {
        assert_unit_range(&noise(&params, 16, 16))?;
    }

    #[test]
    fn domain_warp_stays_in_unit_range(params in params_strategy(NoiseType::DomainWarp)) {
        assert_unit_range(&noise(&params, 16, 16))?;
    }

    /// Parameters that pass validation never fail generation.
    #[test]
    fn valid_parameters_always_generate(params in any_params()) {
        prop_assert!(params.validate().is_ok());
        let result = generate_noise(&params, 7, 5, &CancelToken::new());
        prop_assert!(result.is_ok());
    }
}
