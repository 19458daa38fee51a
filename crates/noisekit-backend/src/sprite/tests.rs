use noisekit_spec::{GradientKind, SpriteParam, SpriteParameters, SpriteShape};

use super::*;
use crate::field::FrameBuffer;

fn token() -> CancelToken {
    CancelToken::new()
}

fn intensity(params: &SpriteParameters, w: u32, h: u32) -> Field {
    rasterize_intensity(params, w, h, &token())
        .unwrap()
        .complete()
        .unwrap()
}

fn shape(shape: SpriteShape) -> SpriteParameters {
    SpriteParameters::for_shape(shape)
}

#[test]
fn test_every_shape_has_requested_size_and_valid_channels() {
    for s in SpriteShape::ALL {
        let sprite = generate_sprite(&shape(s), 48, 32, &token())
            .unwrap()
            .complete()
            .unwrap();
        assert_eq!((sprite.width(), sprite.height()), (48, 32), "{}", s);
        assert!(
            sprite.pixels().iter().all(|c| c.is_normalized()),
            "{} produced out-of-range channels",
            s
        );
    }
}

#[test]
fn test_every_shape_draws_something() {
    for s in SpriteShape::ALL {
        let field = intensity(&shape(s), 64, 64);
        let max = field.data.iter().copied().fold(0.0, f64::max);
        assert!(max > 0.0, "{} is blank", s);
    }
}

#[test]
fn test_seeded_shapes_are_deterministic() {
    for s in SpriteShape::ALL.into_iter().filter(|s| s.is_seeded()) {
        let params = shape(s).with_seed(1234);
        assert_eq!(intensity(&params, 40, 40), intensity(&params, 40, 40), "{}", s);
    }
}

#[test]
fn test_seed_changes_seeded_shapes() {
    for s in SpriteShape::ALL.into_iter().filter(|s| s.is_seeded()) {
        let a = intensity(&shape(s).with_seed(1), 40, 40);
        let b = intensity(&shape(s).with_seed(2), 40, 40);
        assert_ne!(a, b, "{}", s);
    }
}

#[test]
fn test_circle_center_and_corner() {
    let field = intensity(&shape(SpriteShape::Circle), 64, 64);
    assert_eq!(field.get(32, 32), 1.0);
    assert_eq!(field.get(0, 0), 0.0);
}

#[test]
fn test_hard_edge_without_softness() {
    let params = shape(SpriteShape::Circle).with_softness(0.0);
    let field = intensity(&params, 64, 64);
    assert!(field.data.iter().all(|&v| v == 0.0 || v == 1.0));
    // radius 0.4 * 64 / 2 = 12.8 pixels
    assert_eq!(field.get(32 + 12, 32), 1.0);
    assert_eq!(field.get(32 + 13, 32), 0.0);
}

#[test]
fn test_gradient_darkens_toward_edge() {
    let params = shape(SpriteShape::Circle).with_gradient(true);
    let field = intensity(&params, 64, 64);
    assert_eq!(field.get(32, 32), 1.0);
    assert!(field.get(38, 32) < 1.0);
    assert!(field.get(38, 32) > field.get(42, 32));
}

#[test]
fn test_ring_is_hollow() {
    let field = intensity(&shape(SpriteShape::Ring), 100, 100);
    assert_eq!(field.get(50, 50), 0.0);
    // past the inner feather (12.5px + 5px), inside the outer radius (20px)
    assert_eq!(field.get(50 + 18, 50), 1.0);
    assert_eq!(field.get(0, 0), 0.0);
}

#[test]
fn test_square_rotation() {
    let plain = intensity(&shape(SpriteShape::Square).with_softness(0.0), 64, 64);
    let rotated = intensity(
        &shape(SpriteShape::Square)
            .with_softness(0.0)
            .with_param(SpriteParam::Rotation, 45.0),
        64,
        64,
    );
    // half size 19.2px: the corner region is inside only when unrotated
    assert_eq!(plain.get(32 + 17, 32 + 17), 1.0);
    assert_eq!(rotated.get(32 + 17, 32 + 17), 0.0);
}

#[test]
fn test_line_length_falloff() {
    let params = shape(SpriteShape::Line).with_param(SpriteParam::Length, 0.2);
    let field = intensity(&params, 64, 64);
    assert_eq!(field.get(32, 32), 1.0);
    assert_eq!(field.get(63, 32), 0.0);
}

#[test]
fn test_linear_gradient_direction() {
    let mut params = shape(SpriteShape::Gradient);
    params.gradient_kind = GradientKind::Linear;
    let field = intensity(&params, 32, 32);
    assert!(field.get(31, 16) > field.get(16, 16));
    assert!(field.get(16, 16) > field.get(0, 16));
    assert!((field.get(16, 16) - 0.5).abs() < 1e-12);
}

#[test]
fn test_flame_rises_from_bottom() {
    let params = shape(SpriteShape::Flame).with_param(SpriteParam::Turbulence, 0.0);
    let field = intensity(&params, 64, 64);
    assert!(field.get(32, 60) > field.get(32, 20));
    assert!(field.get(32, 60) > field.get(2, 60));
}

#[test]
fn test_noise_threshold_zeroes_low_values() {
    let params = shape(SpriteShape::Noise).with_param(SpriteParam::Threshold, 0.6);
    let field = intensity(&params, 48, 48);
    assert!(field.data.iter().all(|&v| v == 0.0 || v > 0.6));
}

#[test]
fn test_color_step_premultiplies_tint_and_alpha() {
    let params = shape(SpriteShape::Circle)
        .with_color([255, 0, 128])
        .with_alpha(0.5);
    let sprite = generate_sprite(&params, 32, 32, &token())
        .unwrap()
        .complete()
        .unwrap();
    let center = sprite.get(16, 16);
    assert_eq!(center.r, 1.0);
    assert_eq!(center.g, 0.0);
    assert!((center.b - 128.0 / 255.0).abs() < 1e-12);
    assert_eq!(center.a, 0.5);
}

#[test]
fn test_invalid_parameters_rejected() {
    let params = shape(SpriteShape::Star).with_param(SpriteParam::Points, 2.0);
    match generate_sprite(&params, 16, 16, &token()) {
        Err(GenerateError::Validation(errors)) => assert_eq!(errors.errors[0].field, "points"),
        other => panic!("expected validation error, got {:?}", other),
    }
    let negative = shape(SpriteShape::Circle).with_softness(-0.1);
    assert!(generate_sprite(&negative, 16, 16, &token()).is_err());
}

#[test]
fn test_zero_resolution_rejected() {
    assert!(generate_sprite(&shape(SpriteShape::Glow), 0, 16, &token()).is_err());
}

#[test]
fn test_cancelled_returns_no_buffer() {
    let t = token();
    t.cancel();
    for s in SpriteShape::ALL {
        assert!(generate_sprite(&shape(s), 32, 32, &t).unwrap().is_cancelled(), "{}", s);
    }
}

#[test]
fn test_edge_helpers() {
    assert_eq!(edge(-1.0, 0.5), 1.0);
    assert_eq!(edge(0.25, 0.5), 0.5);
    assert_eq!(edge(0.0, 0.0), 1.0);
    assert_eq!(edge(0.1, 0.0), 0.0);
    assert_eq!(rise(0.25, 0.5), 0.5);
    assert_eq!(rise(-0.1, 0.0), 0.0);
    assert_eq!(fade(1.0, 0.0), 0.0);
    assert_eq!(fade(1.0, 4.0), 0.75);
}
