use noisekit_spec::{
    AnimationTrack, AtlasLayout, BlendMode, BlendSpec, Curve, Layer, NoiseParam, NoiseParameters,
    NoiseType, SpriteParam, SpriteShape, Style,
};

use super::*;
use crate::generate::generate_noise;

fn token() -> CancelToken {
    CancelToken::new()
}

fn noise_recipe() -> NoiseRecipe {
    NoiseRecipe::single(NoiseParameters::new(NoiseType::Fbm).with_scale(12.0).with_seed(9))
}

fn sequence<F: Clone>(animation: Animation<F>) -> Vec<F> {
    match animation {
        Animation::Sequence(frames) => frames,
        Animation::Atlas(_) => panic!("expected a sequence"),
    }
}

#[test]
fn test_endpoints_match_start_and_end_values() {
    let recipe = noise_recipe();
    let spec = AnimationSpec::new(4)
        .with_track(AnimationTrack::new(ParamTarget::offset_z(), 0.5, 2.0))
        .with_composition(Composition::Sequence);
    let frames = sequence(animate(&recipe, &spec, 16, 16, &token()).unwrap().complete().unwrap());
    assert_eq!(frames.len(), 4);

    let at = |z: f64| {
        generate_noise(&recipe.layer_a.clone().with_offset(0.0, 0.0, z), 16, 16, &token())
            .unwrap()
            .complete()
            .unwrap()
    };
    assert_eq!(frames[0], at(0.5));
    assert_eq!(frames[3], at(2.0));
}

#[test]
fn test_render_frame_matches_animate() {
    let recipe = noise_recipe();
    let spec = AnimationSpec::z_drift(5, 0.0, 0.3)
        .with_style(Style::PingPong)
        .with_composition(Composition::Sequence);
    let frames = sequence(animate(&recipe, &spec, 12, 12, &token()).unwrap().complete().unwrap());
    for index in (0..5).rev() {
        let single = render_frame(&recipe, &spec, index, 12, 12, &token())
            .unwrap()
            .complete()
            .unwrap();
        assert_eq!(single, frames[index as usize]);
    }
    // ping-pong returns to the first frame
    assert_eq!(frames[0], frames[4]);
}

#[test]
fn test_render_frame_rejects_out_of_range_index() {
    let spec = AnimationSpec::new(3);
    assert!(matches!(
        render_frame(&noise_recipe(), &spec, 3, 8, 8, &token()),
        Err(GenerateError::Configuration(_))
    ));
}

#[test]
fn test_auto_atlas_packing() {
    let sprite = SpriteParameters::for_shape(SpriteShape::Circle);
    let spec = AnimationSpec::new(5).with_track(AnimationTrack::new(
        ParamTarget::Sprite(SpriteParam::Radius),
        0.1,
        0.9,
    ));
    let atlas = match animate(&sprite, &spec, 10, 8, &token()).unwrap().complete().unwrap() {
        Animation::Atlas(atlas) => atlas,
        Animation::Sequence(_) => panic!("expected an atlas"),
    };
    assert_eq!((atlas.rows, atlas.cols), (2, 3));
    assert_eq!((atlas.cell_width, atlas.cell_height), (10, 8));
    assert_eq!((atlas.buffer.width, atlas.buffer.height), (30, 16));
    assert_eq!(atlas.frame_count, 5);

    let last = render_frame(&sprite, &spec, 4, 10, 8, &token())
        .unwrap()
        .complete()
        .unwrap();
    assert_eq!(atlas.frame(4), Some(last));
    // the sixth cell stays empty
    let (x0, y0) = atlas.cell_origin(5);
    assert_eq!(atlas.buffer.get(x0 + 5, y0 + 4), Default::default());
}

#[test]
fn test_row_and_column_layouts() {
    let sprite = SpriteParameters::for_shape(SpriteShape::Glow);
    for (layout, grid) in [
        (AtlasLayout::RowOnly, (1, 3)),
        (AtlasLayout::ColumnOnly, (3, 1)),
        (AtlasLayout::Manual { rows: 2, cols: 2 }, (2, 2)),
    ] {
        let spec = AnimationSpec::new(3).with_layout(layout);
        match animate(&sprite, &spec, 4, 4, &token()).unwrap().complete().unwrap() {
            Animation::Atlas(atlas) => assert_eq!((atlas.rows, atlas.cols), grid),
            Animation::Sequence(_) => panic!("expected an atlas"),
        }
    }
}

#[test]
fn test_small_manual_layout_fails_before_rendering() {
    let spec = AnimationSpec::new(5).with_layout(AtlasLayout::Manual { rows: 2, cols: 2 });
    let mut calls = 0;
    let result = animate_with_progress(&noise_recipe(), &spec, 8, 8, &token(), |_, _| calls += 1);
    assert!(result.is_err());
    assert_eq!(calls, 0);
}

#[test]
fn test_bad_target_fails_before_rendering() {
    let spec = AnimationSpec::new(3).with_track(AnimationTrack::new(
        ParamTarget::Noise {
            layer: Layer::B,
            param: NoiseParam::Scale,
        },
        1.0,
        2.0,
    ));
    let mut calls = 0;
    let err = animate_with_progress(&noise_recipe(), &spec, 8, 8, &token(), |_, _| calls += 1)
        .unwrap_err();
    assert_eq!(calls, 0);
    match err {
        GenerateError::Configuration(e) => assert_eq!(e.field, "tracks[0].target"),
        other => panic!("expected configuration error, got {:?}", other),
    }

    let sprite_track = AnimationSpec::new(2).with_track(AnimationTrack::new(
        ParamTarget::Sprite(SpriteParam::Radius),
        0.1,
        0.2,
    ));
    assert!(animate(&noise_recipe(), &sprite_track, 8, 8, &token()).is_err());
}

#[test]
fn test_invalid_frame_value_fails_before_rendering() {
    // octaves fall to 0 on the last frame
    let spec = AnimationSpec::new(3).with_track(AnimationTrack::new(
        ParamTarget::Noise {
            layer: Layer::A,
            param: NoiseParam::Octaves,
        },
        4.0,
        0.0,
    ));
    let mut calls = 0;
    let err = animate_with_progress(&noise_recipe(), &spec, 8, 8, &token(), |_, _| calls += 1)
        .unwrap_err();
    assert_eq!(calls, 0);
    match err {
        GenerateError::Validation(errors) => {
            assert_eq!(errors.errors[0].field, "frames[2].layer_a.octaves")
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_progress_reports_every_frame() {
    let spec = AnimationSpec::z_drift(4, 0.0, 0.1).with_composition(Composition::Sequence);
    let mut seen = Vec::new();
    animate_with_progress(&noise_recipe(), &spec, 8, 8, &token(), |done, total| {
        seen.push((done, total))
    })
    .unwrap();
    assert_eq!(seen, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
}

#[test]
fn test_cancelled_animation_returns_no_frames() {
    let t = token();
    let spec = AnimationSpec::z_drift(6, 0.0, 0.1);
    let result = animate_with_progress(&noise_recipe(), &spec, 8, 8, &t, |done, _| {
        if done == 2 {
            t.cancel();
        }
    })
    .unwrap();
    assert!(result.is_cancelled());
}

#[test]
fn test_color_track_drives_sprite_tint() {
    let sprite = SpriteParameters::for_shape(SpriteShape::Circle);
    let spec = AnimationSpec::new(3)
        .with_color([255, 0, 0], [0, 0, 255])
        .with_composition(Composition::Sequence);
    let frames = sequence(animate(&sprite, &spec, 16, 16, &token()).unwrap().complete().unwrap());
    let first = frames[0].get(8, 8);
    let last = frames[2].get(8, 8);
    assert_eq!((first.r, first.b), (1.0, 0.0));
    assert_eq!((last.r, last.b), (0.0, 1.0));
}

#[test]
fn test_color_track_rejected_for_noise() {
    let spec = AnimationSpec::new(2).with_color([0, 0, 0], [255, 255, 255]);
    match animate(&noise_recipe(), &spec, 8, 8, &token()) {
        Err(GenerateError::Configuration(e)) => assert_eq!(e.field, "color"),
        other => panic!("expected configuration error, got {:?}", other),
    }
}

#[test]
fn test_mix_weight_track() {
    let recipe = noise_recipe().with_layer_b(
        NoiseParameters::new(NoiseType::Ridged).with_scale(6.0),
        BlendSpec::new(BlendMode::Screen, 0.0),
    );
    let spec = AnimationSpec::new(2)
        .with_curve(Curve::Stepped)
        .with_track(AnimationTrack::new(ParamTarget::MixWeight, 0.0, 1.0));
    let first = frame_parameters(&recipe, &spec, 0).unwrap();
    let last = frame_parameters(&recipe, &spec, 1).unwrap();
    assert_eq!(first.blend.mix_weight, 0.0);
    assert_eq!(last.blend.mix_weight, 1.0);
}

#[test]
fn test_integer_parameters_are_rounded() {
    let sprite = SpriteParameters::for_shape(SpriteShape::Star);
    let spec = AnimationSpec::new(3).with_track(AnimationTrack::new(
        ParamTarget::Sprite(SpriteParam::Points),
        4.0,
        7.0,
    ));
    assert_eq!(frame_parameters(&sprite, &spec, 1).unwrap().points, 6);
}

#[test]
fn test_random_style_is_reproducible() {
    let spec = AnimationSpec::z_drift(4, 0.0, 1.0)
        .with_style(Style::Random)
        .with_seed(77)
        .with_composition(Composition::Sequence);
    let a = animate(&noise_recipe(), &spec, 8, 8, &token()).unwrap().complete().unwrap();
    let b = animate(&noise_recipe(), &spec, 8, 8, &token()).unwrap().complete().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_animation_map_keeps_layout() {
    let spec = AnimationSpec::new(2);
    let animation = animate(&noise_recipe(), &spec, 4, 4, &token())
        .unwrap()
        .complete()
        .unwrap();
    let mapped = animation.map(|field| field.width);
    assert_eq!(mapped.frame_count(), 2);
    match mapped {
        Animation::Atlas(atlas) => assert_eq!(atlas.buffer, 8),
        Animation::Sequence(_) => panic!("expected an atlas"),
    }
}
