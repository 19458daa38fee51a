//! Frame fractions and easing curves.

use noisekit_spec::{AnimationSpec, AnimationTrack, ColorTrack, Curve, Style};

use crate::rng::DeterministicRng;

/// Remaps a fraction in [0, 1] through an easing curve.
pub fn ease(curve: Curve, t: f64) -> f64 {
    match curve {
        Curve::Linear => t,
        Curve::EaseIn => t * t,
        Curve::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        Curve::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
            }
        }
        Curve::Stepped => {
            if t < 1.0 {
                0.0
            } else {
                1.0
            }
        }
    }
}

/// Interpolation fraction for frame `index` of `frame_count`.
///
/// Linear runs `index / max(1, n - 1)`; PingPong folds that at 0.5; Random
/// draws from an RNG seeded with `derive_frame_seed(seed, index)`, so every
/// frame is independent of the others.
pub fn frame_fraction(style: Style, index: u32, frame_count: u32, seed: u32) -> f64 {
    let t = index as f64 / frame_count.saturating_sub(1).max(1) as f64;
    match style {
        Style::Linear => t,
        Style::PingPong => {
            if t <= 0.5 {
                2.0 * t
            } else {
                2.0 - 2.0 * t
            }
        }
        Style::Random => {
            DeterministicRng::new(DeterministicRng::derive_frame_seed(seed, index)).gen_f64()
        }
    }
}

/// Value of a track on frame `index`, using the track's curve and style
/// overrides where set.
pub fn track_value(track: &AnimationTrack, spec: &AnimationSpec, index: u32) -> f64 {
    let style = track.style.unwrap_or(spec.style);
    let curve = track.curve.unwrap_or(spec.curve);
    let t = ease(curve, frame_fraction(style, index, spec.frame_count, spec.seed));
    track.start + (track.end - track.start) * t
}

/// Tint on frame `index`; each channel is interpolated and rounded.
pub fn color_value(color: &ColorTrack, spec: &AnimationSpec, index: u32) -> [u8; 3] {
    let t = ease(
        spec.curve,
        frame_fraction(spec.style, index, spec.frame_count, spec.seed),
    );
    let mut out = [0u8; 3];
    for (channel, (&a, &b)) in out.iter_mut().zip(color.start.iter().zip(&color.end)) {
        let v = a as f64 + (b as f64 - a as f64) * t;
        *channel = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}
