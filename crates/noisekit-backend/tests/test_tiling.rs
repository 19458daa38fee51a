//! Integration tests for seamless tiling and the center-seams preview.

use noisekit_backend::{
    center_seams, generate_noise, generate_recipe, seam_error, tile, CancelToken, Field,
    FrameBuffer,
};
use noisekit_spec::{BlendMode, BlendSpec, NoiseParameters, NoiseRecipe, NoiseType, TilingSpec};
use proptest::prelude::*;

const EPSILON: f64 = 1e-3;

fn noise(params: &NoiseParameters, width: u32, height: u32) -> Field {
    generate_noise(params, width, height, &CancelToken::new())
        .unwrap()
        .complete()
        .unwrap()
}

/// The reference scenario: tiling the 256x256 Perlin field removes the seam.
#[test]
fn test_reference_perlin_tiling_reduces_seam() {
    let params = NoiseParameters::new(NoiseType::Perlin)
        .with_scale(100.0)
        .with_seed(42);
    let raw = noise(&params, 256, 256);
    let tiled = tile(&raw, 0.15).unwrap();

    let before = seam_error(&raw);
    let after = seam_error(&tiled);
    assert!(after < EPSILON, "seam after tiling: {}", after);
    assert!(after < before, "tiling should reduce the seam ({} -> {})", before, after);
}

/// The recipe pipeline tiles both layers before blending, so the blend is
/// seamless too.
#[test]
fn test_recipe_tiles_before_blending() {
    let recipe = NoiseRecipe::single(NoiseParameters::new(NoiseType::Fbm).with_scale(20.0))
        .with_layer_b(
            NoiseParameters::new(NoiseType::Ridged).with_scale(9.0),
            BlendSpec::new(BlendMode::Overlay, 0.7),
        )
        .with_tiling(TilingSpec::new(0.2));
    let field = generate_recipe(&recipe, 64, 48, &CancelToken::new())
        .unwrap()
        .complete()
        .unwrap();
    assert!(seam_error(&field) < EPSILON);
}

/// Pixels outside both strips keep their values.
#[test]
fn test_interior_is_untouched() {
    let raw = noise(&NoiseParameters::new(NoiseType::Simplex).with_scale(7.0), 40, 30);
    let tiled = tile(&raw, 0.1).unwrap();
    // strips are 4 columns and 3 rows wide
    for y in 3..27 {
        for x in 4..36 {
            assert_eq!(tiled.get(x, y), raw.get(x, y), "changed at ({}, {})", x, y);
        }
    }
}

/// Tiling never leaves [0, 1].
#[test]
fn test_tiling_preserves_range() {
    let raw = noise(&NoiseParameters::new(NoiseType::Turbulence).with_scale(5.0), 33, 17);
    let tiled = tile(&raw, 0.5).unwrap();
    assert!(tiled.data.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn test_invalid_blend_width_is_rejected() {
    let field = Field::new(8, 8, 0.5);
    for width in [0.0, -0.1, 0.51, f64::NAN] {
        assert!(tile(&field, width).is_err(), "blend_width {} accepted", width);
    }
}

/// Center-seams twice on an even-sized buffer is the identity.
#[test]
fn test_center_seams_round_trip() {
    let raw = noise(&NoiseParameters::new(NoiseType::Perlin).with_scale(6.0), 16, 10);
    let shifted = center_seams(&raw);
    assert_ne!(shifted, raw);
    assert_eq!(shifted.get(0, 0), raw.get(8, 5));
    assert_eq!(center_seams(&shifted), raw);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Both axes wrap continuously for randomized noise and strip widths.
    #[test]
    fn tiled_fields_wrap_seamlessly(
        noise_index in 0usize..NoiseType::ALL.len(),
        scale in 2.0f64..120.0,
        seed in any::<u32>(),
        width in 4u32..72,
        height in 4u32..72,
        blend_width in 0.01f64..=0.5,
    ) {
        let params = NoiseParameters::new(NoiseType::ALL[noise_index])
            .with_scale(scale)
            .with_seed(seed);
        let tiled = tile(&noise(&params, width, height), blend_width).unwrap();
        for y in 0..height {
            prop_assert!((tiled.get(0, y) - tiled.get(width - 1, y)).abs() < EPSILON);
        }
        for x in 0..width {
            prop_assert!((tiled.get(x, 0) - tiled.get(x, height - 1)).abs() < EPSILON);
        }
    }
}
