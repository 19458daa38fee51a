//! Analytic shapes: each pixel depends only on its own position.

use std::f64::consts::PI;

use noisekit_spec::{GradientKind, SpriteParameters};

use super::filter::gaussian_blur;
use super::{edge, fade, rise, rotate, Canvas};
use crate::cancel::{CancelToken, Outcome};
use crate::field::Field;

pub(super) fn circle(p: &SpriteParameters, c: &Canvas, token: &CancelToken) -> Outcome<Field> {
    let radius = p.radius * c.min / 2.0;
    let softness = p.softness * c.min / 2.0;

    c.rasterize(token, |x, y| {
        let d = c.dist(x, y);
        let i = edge(d - radius, softness);
        if p.gradient {
            i * fade(d, radius)
        } else {
            i
        }
    })
}

/// Chebyshev distance in the rotated frame.
pub(super) fn square(p: &SpriteParameters, c: &Canvas, token: &CancelToken) -> Outcome<Field> {
    let size = p.size * c.min / 2.0;
    let softness = p.softness * c.min / 2.0;
    let rotation = p.rotation.to_radians();

    c.rasterize(token, |x, y| {
        let (dx, dy) = c.offset(x, y);
        let (rx, ry) = rotate(dx, dy, rotation);
        let d = rx.abs().max(ry.abs());
        let i = edge(d - size, softness);
        if p.gradient {
            i * fade(d, size)
        } else {
            i
        }
    })
}

pub(super) fn line(p: &SpriteParameters, c: &Canvas, token: &CancelToken) -> Outcome<Field> {
    let thickness = p.thickness * c.min;
    let softness = p.softness * c.min;
    let angle = p.angle.to_radians();
    let length = p.length * (c.width as f64).hypot(c.height as f64);

    c.rasterize(token, |x, y| {
        let (dx, dy) = c.offset(x, y);
        let (along, perp) = rotate(dx, dy, angle);
        let mut i = edge(perp.abs() - thickness / 2.0, softness);
        if p.length_falloff {
            i *= edge(along.abs() - length / 2.0, length * 0.1);
        }
        i
    })
}

/// Regular polygon approximated by an angular modulation of the radius.
pub(super) fn ngon(p: &SpriteParameters, c: &Canvas, token: &CancelToken) -> Outcome<Field> {
    let radius = p.radius * c.min / 2.0;
    let softness = p.softness * c.min / 2.0;
    let rotation = p.rotation.to_radians();
    let sides = p.sides as f64;

    c.rasterize(token, |x, y| {
        let (dx, dy) = c.offset(x, y);
        let angle = dy.atan2(dx) + rotation;
        let d = dx.hypot(dy);
        let modulation = (angle * sides).cos() * 0.5 + 0.5;
        let polygon_radius = radius * (0.8 + 0.2 * modulation);
        let i = edge(d - polygon_radius, softness);
        if p.gradient {
            i * fade(d, radius)
        } else {
            i
        }
    })
}

pub(super) fn star(p: &SpriteParameters, c: &Canvas, token: &CancelToken) -> Outcome<Field> {
    let outer = p.outer_radius * c.min / 2.0;
    let inner = p.inner_radius * c.min / 2.0;
    let softness = p.softness * c.min / 2.0;
    let rotation = p.rotation.to_radians();
    let points = p.points as f64;
    let step = 2.0 * PI / points;

    c.rasterize(token, |x, y| {
        let (dx, dy) = c.offset(x, y);
        let angle = dy.atan2(dx) + rotation;
        let d = dx.hypot(dy);
        let within = angle.rem_euclid(step) - step / 2.0;
        let factor = (within * points).cos() * 0.5 + 0.5;
        let star_radius = inner + (outer - inner) * factor;
        let i = edge(d - star_radius, softness);
        if p.gradient {
            i * fade(d, outer)
        } else {
            i
        }
    })
}

/// Radial power falloff, optionally blurred with `sigma = blur * min / 10`.
pub(super) fn glow(p: &SpriteParameters, c: &Canvas, token: &CancelToken) -> Outcome<Field> {
    let extent = c.half_diagonal() * p.radius;

    c.rasterize(token, |x, y| {
        fade(c.dist(x, y), extent).powf(p.falloff) * p.intensity
    })
    .map(|field| gaussian_blur(&field, p.blur * c.min / 10.0))
}

/// `rays` bars through the center, plus a gaussian core.
pub(super) fn sparkle(p: &SpriteParameters, c: &Canvas, token: &CancelToken) -> Outcome<Field> {
    let thickness = p.thickness * c.min;
    let length = p.length * c.min / 2.0;
    let softness = p.softness * c.min;
    let rotation = p.rotation.to_radians();
    let rays: Vec<f64> = (0..p.rays)
        .map(|i| rotation + i as f64 * PI / p.rays as f64)
        .collect();

    c.rasterize(token, |x, y| {
        let (dx, dy) = c.offset(x, y);
        let mut i = rays
            .iter()
            .map(|&angle| {
                let (along, perp) = rotate(dx, dy, angle);
                edge(perp.abs() - thickness / 2.0, softness)
                    * edge(along.abs() - length, length * 0.2)
            })
            .fold(0.0, f64::max);

        if thickness > 0.0 {
            let core = (-(dx.hypot(dy) / (thickness * 3.0)).powi(2)).exp();
            i = i.max(core);
        }
        i
    })
}

pub(super) fn gradient(p: &SpriteParameters, c: &Canvas, token: &CancelToken) -> Outcome<Field> {
    let max_dist = c.half_diagonal();
    let (sin, cos) = p.angle.to_radians().sin_cos();

    c.rasterize(token, |x, y| {
        let i = match p.gradient_kind {
            GradientKind::Radial => fade(c.dist(x, y), max_dist),
            GradientKind::Linear => {
                let (dx, dy) = c.offset(x, y);
                let projection = dx * cos + dy * sin;
                (0.5 + projection / (2.0 * max_dist)).clamp(0.0, 1.0)
            }
        };
        i.powf(p.falloff)
    })
}

pub(super) fn ring(p: &SpriteParameters, c: &Canvas, token: &CancelToken) -> Outcome<Field> {
    let outer = p.outer_radius * c.min / 2.0;
    let inner = p.inner_radius * c.min / 2.0;
    let softness = p.softness * c.min / 2.0;
    let middle = (outer + inner) / 2.0;
    let half_width = (outer - inner) / 2.0;

    c.rasterize(token, |x, y| {
        let d = c.dist(x, y);
        let i = edge(d - outer, softness) * rise(d - inner, softness);
        if p.gradient {
            i * fade((d - middle).abs(), half_width)
        } else {
            i
        }
    })
}

pub(super) fn cross(p: &SpriteParameters, c: &Canvas, token: &CancelToken) -> Outcome<Field> {
    let thickness = p.thickness * c.min;
    let softness = p.softness * c.min;
    let rotation = p.rotation.to_radians();

    c.rasterize(token, |x, y| {
        let (dx, dy) = c.offset(x, y);
        let (rx, ry) = rotate(dx, dy, rotation);
        let horizontal = edge(ry.abs() - thickness / 2.0, softness);
        let vertical = edge(rx.abs() - thickness / 2.0, softness);
        horizontal.max(vertical)
    })
}
