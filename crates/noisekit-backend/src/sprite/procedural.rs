//! Seeded shapes: flame, value noise, lightning and smoke.
//!
//! Each shape draws from a [`DeterministicRng`] built from `params.seed`, so
//! the same parameters always rasterize to the same buffer.

use std::f64::consts::TAU;

use noisekit_spec::SpriteParameters;

use super::filter::{gaussian_blur, upsample_at};
use super::{edge, Canvas};
use crate::cancel::{CancelToken, Outcome};
use crate::field::{Field, FrameBuffer};
use crate::noise::{Fbm, Noise3D, PerlinNoise};
use crate::rng::DeterministicRng;

/// Narrowing cone rising from the bottom edge.
///
/// `ny` runs from 0 at the bottom row to 1 at the top. The half-width
/// shrinks as `width * (1 - 0.7 ny)`, brightness as `1 - 0.6 ny`, and the
/// cone is cut at `ny = height`. Turbulence adds seeded per-pixel jitter,
/// smoothed with `sigma = 0.05 * min`, to the horizontal distance.
pub(super) fn flame(p: &SpriteParameters, c: &Canvas, token: &CancelToken) -> Outcome<Field> {
    let jitter = (p.turbulence > 0.0).then(|| {
        let mut rng = DeterministicRng::new(p.seed);
        let raw = Field {
            width: c.width,
            height: c.height,
            data: (0..c.width as usize * c.height as usize)
                .map(|_| rng.gen_signed_f64())
                .collect(),
        };
        gaussian_blur(&raw, c.min * 0.05)
    });

    let half_width = c.width as f64 / 2.0;
    let height = c.height as f64;

    c.rasterize(token, |x, y| {
        let nx = (x as f64 - c.cx) / half_width;
        let ny = (height - 1.0 - y as f64) / height;
        if ny >= p.height {
            return 0.0;
        }

        let cone_width = p.width * (1.0 - ny * 0.7);
        let mut dist_x = nx.abs() / cone_width;
        if let Some(jitter) = &jitter {
            dist_x += jitter.get(x, y) * p.turbulence;
        }

        let i = (1.0 - dist_x).clamp(0.0, 1.0) * (1.0 - ny * 0.6);
        i.powf(p.falloff)
    })
    .map(|field| gaussian_blur(&field, p.blur * c.min / 20.0))
}

/// Sum of value-noise octaves, normalized by its maximum.
///
/// Octave `o` is a grid of `floor(dim * scale * 2^o) + 1` random cells per
/// axis (capped at the canvas size) stretched bilinearly over the canvas,
/// weighted `0.5^o`. Grids with a single row or column contribute nothing.
pub(super) fn value_noise(
    p: &SpriteParameters,
    c: &Canvas,
    token: &CancelToken,
) -> Outcome<Field> {
    let mut rng = DeterministicRng::new(p.seed);
    let cells = |dim: u32, freq: f64| -> u32 {
        let n = (dim as f64 * p.scale * freq).min(dim as f64);
        n as u32 + 1
    };

    let mut octaves = Vec::with_capacity(p.octaves as usize);
    for octave in 0..p.octaves {
        if token.is_cancelled() {
            return Outcome::Cancelled;
        }
        let freq = 2f64.powi(octave as i32);
        let amplitude = 0.5f64.powi(octave as i32);
        let (gw, gh) = (cells(c.width, freq), cells(c.height, freq));
        let grid = Field {
            width: gw,
            height: gh,
            data: (0..gw as usize * gh as usize).map(|_| rng.gen_f64()).collect(),
        };
        if gw > 1 && gh > 1 {
            octaves.push((grid, amplitude));
        }
    }

    c.rasterize(token, |x, y| {
        octaves
            .iter()
            .map(|(grid, amplitude)| upsample_at(grid, x, y, c.width, c.height) * amplitude)
            .sum()
    })
    .map(|sum| {
        let max = sum.data.iter().copied().fold(0.0, f64::max);
        sum.map(|v| {
            let v = if max > 0.0 { v / max } else { v };
            let v = ((v - 0.5) * p.contrast + 0.5).clamp(0.0, 1.0);
            if p.threshold > 0.0 && v <= p.threshold {
                0.0
            } else {
                v
            }
        })
    })
}

type Point = (f64, f64);

fn distance(a: Point, b: Point) -> f64 {
    (b.0 - a.0).hypot(b.1 - a.1)
}

/// Distance from `p` to the segment `a..b`.
fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return distance(p, a);
    }
    let t = (((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len_sq).clamp(0.0, 1.0);
    distance(p, (a.0 + abx * t, a.1 + aby * t))
}

/// Polyline from `start` to `end` split into exactly `segments` pieces.
///
/// Repeatedly splits the longest piece at its midpoint, displaced
/// perpendicular by up to `jaggedness * len / 2`.
fn displaced_polyline(
    rng: &mut DeterministicRng,
    start: Point,
    end: Point,
    segments: u32,
    jaggedness: f64,
) -> Vec<Point> {
    let mut points = vec![start, end];
    while points.len() - 1 < segments as usize {
        let (idx, len) = points
            .windows(2)
            .map(|pair| distance(pair[0], pair[1]))
            .enumerate()
            .fold((0, -1.0), |best, (i, len)| if len > best.1 { (i, len) } else { best });

        let (a, b) = (points[idx], points[idx + 1]);
        let (nx, ny) = if len > 0.0 {
            (-(b.1 - a.1) / len, (b.0 - a.0) / len)
        } else {
            (0.0, 0.0)
        };
        let offset = rng.gen_signed_f64() * jaggedness * len * 0.5;
        let mid = (
            (a.0 + b.0) / 2.0 + nx * offset,
            (a.1 + b.1) / 2.0 + ny * offset,
        );
        points.insert(idx + 1, mid);
    }
    points
}

struct Stroke {
    points: Vec<Point>,
    half_thickness: f64,
    weight: f64,
}

impl Stroke {
    fn distance(&self, p: Point) -> f64 {
        self.points
            .windows(2)
            .map(|pair| segment_distance(p, pair[0], pair[1]))
            .fold(f64::INFINITY, f64::min)
    }
}

/// Jagged bolt through the center along `angle`, with forked branches.
///
/// The main bolt spans `length * min`. Each branch leaves from a random
/// interior vertex at 20 to 50 degrees off the bolt direction, is 25 to 50
/// percent as long, half as finely segmented, thinner (0.6x) and dimmer (0.7x).
pub(super) fn lightning(p: &SpriteParameters, c: &Canvas, token: &CancelToken) -> Outcome<Field> {
    let mut rng = DeterministicRng::new(p.seed);
    let thickness = p.thickness * c.min;
    let softness = p.softness * c.min;
    let length = p.length * c.min;
    let angle = p.angle.to_radians();
    let (sin, cos) = angle.sin_cos();

    let start = (c.cx - cos * length / 2.0, c.cy - sin * length / 2.0);
    let end = (c.cx + cos * length / 2.0, c.cy + sin * length / 2.0);
    let main = displaced_polyline(&mut rng, start, end, p.segments, p.jaggedness);

    let mut strokes = Vec::with_capacity(1 + p.branches as usize);
    for _ in 0..p.branches {
        let origin = if main.len() > 2 {
            main[rng.gen_range(1..main.len() - 1)]
        } else {
            main[0]
        };
        let side = if rng.gen_f64() < 0.5 { -1.0 } else { 1.0 };
        let fork = angle + side * rng.gen_range(20.0f64..50.0).to_radians();
        let fork_length = length * rng.gen_range(0.25..0.5);
        let (fs, fc) = fork.sin_cos();
        let tip = (origin.0 + fc * fork_length, origin.1 + fs * fork_length);
        strokes.push(Stroke {
            points: displaced_polyline(
                &mut rng,
                origin,
                tip,
                (p.segments / 2).max(1),
                p.jaggedness,
            ),
            half_thickness: thickness * 0.3,
            weight: 0.7,
        });
    }
    strokes.insert(
        0,
        Stroke {
            points: main,
            half_thickness: thickness / 2.0,
            weight: 1.0,
        },
    );

    c.rasterize(token, |x, y| {
        let pixel = (x as f64, y as f64);
        strokes
            .iter()
            .map(|s| s.weight * edge(s.distance(pixel) - s.half_thickness, softness))
            .fold(0.0, f64::max)
    })
}

struct Puff {
    center: Point,
    radius: f64,
}

/// Cluster of soft puffs, screen-combined and modulated by FBM.
///
/// Puff centers are scattered uniformly in a disc of `0.75 * radius * min`
/// around the canvas center; each puff radius is 60 to 100 percent of
/// `radius * min / 2`. The FBM (Perlin, `octaves` octaves) is sampled at
/// `(x * scale, y * scale)` and scales coverage by
/// `1 - turbulence + turbulence * n01`.
pub(super) fn smoke(p: &SpriteParameters, c: &Canvas, token: &CancelToken) -> Outcome<Field> {
    let mut rng = DeterministicRng::new(p.seed);
    let spread = 0.75 * p.radius * c.min;
    let base_radius = p.radius * c.min / 2.0;
    let softness = p.softness * c.min / 2.0;

    let puffs: Vec<Puff> = (0..p.puffs)
        .map(|_| {
            let theta = rng.gen_f64() * TAU;
            let r = rng.gen_f64().sqrt() * spread;
            Puff {
                center: (c.cx + r * theta.cos(), c.cy + r * theta.sin()),
                radius: base_radius * (0.6 + 0.4 * rng.gen_f64()),
            }
        })
        .collect();

    let fbm = Fbm::new(PerlinNoise::new(DeterministicRng::derive_stream_seed(
        p.seed, "smoke",
    )))
    .with_octaves(p.octaves);

    c.rasterize(token, |x, y| {
        let pixel = (x as f64, y as f64);
        let clear: f64 = puffs
            .iter()
            .map(|puff| 1.0 - edge(distance(pixel, puff.center) - puff.radius, softness))
            .product();
        let coverage = 1.0 - clear;

        let n = fbm.sample(x as f64 * p.scale, y as f64 * p.scale, 0.0);
        let n01 = (n * 0.5 + 0.5).clamp(0.0, 1.0);
        (coverage * (1.0 - p.turbulence + p.turbulence * n01)).max(0.0)
    })
}
