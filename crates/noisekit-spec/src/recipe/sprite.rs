//! Sprite shape parameters.
//!
//! [`SpriteParameters`] is a flat record holding the union of every shape's
//! geometry fields. Which fields a shape reads is documented on
//! [`SpriteShape`]; unread fields are carried along untouched so a caller can
//! switch shapes without losing settings.
//!
//! Missing fields in a JSON document are filled from the defaults of the
//! document's `shape` ([`SpriteParameters::for_shape`]), not from a single
//! global default.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, ValidationErrors};
use crate::validation::common::{
    validate_count, validate_finite, validate_non_negative, validate_positive, validate_range,
    validate_unit_interval,
};

/// Largest accepted `blur`; the gaussian sigma is `blur * min(w, h) / 10`
/// at most.
pub const MAX_BLUR: f64 = 10.0;

/// Procedural sprite shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteShape {
    /// Disc. Reads `radius`, `softness`, `gradient`.
    Circle,
    /// Rotated square. Reads `size`, `softness`, `rotation`, `gradient`.
    Square,
    /// Straight bar. Reads `thickness`, `softness`, `angle`, `length`, `length_falloff`.
    Line,
    /// Regular polygon. Reads `sides`, `radius`, `softness`, `rotation`, `gradient`.
    NGon,
    /// Star. Reads `points`, `outer_radius`, `inner_radius`, `softness`, `rotation`, `gradient`.
    Star,
    /// Radial halo. Reads `intensity`, `falloff`, `radius`, `blur`.
    Glow,
    /// Upward flame. Reads `height`, `width`, `turbulence`, `falloff`, `blur`, `seed`.
    Flame,
    /// Crossed rays with a bright core. Reads `rays`, `thickness`, `length`, `softness`, `rotation`.
    Sparkle,
    /// Value-noise blotch. Reads `scale`, `octaves`, `seed`, `contrast`, `threshold`.
    Noise,
    /// Radial or linear ramp. Reads `gradient_kind`, `angle`, `falloff`.
    Gradient,
    /// Annulus. Reads `outer_radius`, `inner_radius`, `softness`, `gradient`.
    Ring,
    /// Plus sign. Reads `thickness`, `softness`, `rotation`.
    Cross,
    /// Jagged bolt. Reads `segments`, `jaggedness`, `branches`, `thickness`,
    /// `softness`, `length`, `angle`, `seed`.
    Lightning,
    /// Cluster of soft puffs. Reads `puffs`, `radius`, `softness`, `turbulence`,
    /// `scale`, `seed`.
    Smoke,
}

impl SpriteShape {
    /// All sprite shapes, in display order.
    pub const ALL: [SpriteShape; 14] = [
        SpriteShape::Circle,
        SpriteShape::Square,
        SpriteShape::Line,
        SpriteShape::NGon,
        SpriteShape::Star,
        SpriteShape::Glow,
        SpriteShape::Flame,
        SpriteShape::Sparkle,
        SpriteShape::Noise,
        SpriteShape::Gradient,
        SpriteShape::Ring,
        SpriteShape::Cross,
        SpriteShape::Lightning,
        SpriteShape::Smoke,
    ];

    /// Returns the shape as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpriteShape::Circle => "circle",
            SpriteShape::Square => "square",
            SpriteShape::Line => "line",
            SpriteShape::NGon => "n_gon",
            SpriteShape::Star => "star",
            SpriteShape::Glow => "glow",
            SpriteShape::Flame => "flame",
            SpriteShape::Sparkle => "sparkle",
            SpriteShape::Noise => "noise",
            SpriteShape::Gradient => "gradient",
            SpriteShape::Ring => "ring",
            SpriteShape::Cross => "cross",
            SpriteShape::Lightning => "lightning",
            SpriteShape::Smoke => "smoke",
        }
    }

    /// Parses a shape from its string form.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|shape| shape.as_str() == s)
    }

    /// Whether the shape draws from its own seeded randomness.
    pub fn is_seeded(&self) -> bool {
        matches!(
            self,
            SpriteShape::Flame | SpriteShape::Noise | SpriteShape::Lightning | SpriteShape::Smoke
        )
    }
}

impl std::fmt::Display for SpriteShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of the gradient sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKind {
    /// Bright center fading toward the corners.
    #[default]
    Radial,
    /// Ramp along `angle`.
    Linear,
}

/// Numeric sprite parameter that an animation track can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteParam {
    Radius,
    Size,
    Thickness,
    Length,
    Angle,
    Rotation,
    Sides,
    Points,
    OuterRadius,
    InnerRadius,
    Intensity,
    Falloff,
    Blur,
    Height,
    Width,
    Turbulence,
    Rays,
    Scale,
    Octaves,
    Contrast,
    Threshold,
    Segments,
    Jaggedness,
    Branches,
    Puffs,
    Softness,
    Alpha,
    Seed,
}

/// Parameters for one sprite.
///
/// Relative extents (`radius`, `size`, `thickness`, ...) are fractions of the
/// canvas; geometry that falls outside the canvas is clipped. Angles are in
/// degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SpriteParametersDoc")]
pub struct SpriteParameters {
    pub shape: SpriteShape,
    pub radius: f64,
    pub size: f64,
    pub thickness: f64,
    pub length: f64,
    pub angle: f64,
    pub rotation: f64,
    pub sides: u32,
    pub points: u32,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub intensity: f64,
    pub falloff: f64,
    pub blur: f64,
    pub height: f64,
    pub width: f64,
    pub turbulence: f64,
    pub rays: u32,
    pub scale: f64,
    pub octaves: u32,
    pub contrast: f64,
    pub threshold: f64,
    pub segments: u32,
    pub jaggedness: f64,
    pub branches: u32,
    pub puffs: u32,
    /// Multiply intensity by a falloff from the shape center.
    pub gradient: bool,
    /// Fade the ends of a line.
    pub length_falloff: bool,
    pub gradient_kind: GradientKind,
    /// Edge feather width, relative to the canvas.
    pub softness: f64,
    /// RGB tint.
    pub color: [u8; 3],
    /// Alpha multiplier in [0, 1].
    pub alpha: f64,
    /// Seed for shapes with their own randomness.
    pub seed: u32,
}

impl SpriteParameters {
    /// Returns the default parameters for a shape.
    pub fn for_shape(shape: SpriteShape) -> Self {
        let mut p = Self {
            shape,
            radius: 0.4,
            size: 0.6,
            thickness: 0.1,
            length: 0.8,
            angle: 0.0,
            rotation: 0.0,
            sides: 6,
            points: 5,
            outer_radius: 0.4,
            inner_radius: 0.2,
            intensity: 1.0,
            falloff: 2.0,
            blur: 0.0,
            height: 0.8,
            width: 0.5,
            turbulence: 0.3,
            rays: 4,
            scale: 0.1,
            octaves: 3,
            contrast: 1.0,
            threshold: 0.0,
            segments: 12,
            jaggedness: 0.3,
            branches: 2,
            puffs: 7,
            gradient: false,
            length_falloff: true,
            gradient_kind: GradientKind::Radial,
            softness: 0.1,
            color: [255, 255, 255],
            alpha: 1.0,
            seed: 42,
        };

        match shape {
            SpriteShape::Line => p.softness = 0.2,
            SpriteShape::Glow => p.radius = 0.5,
            SpriteShape::Flame => {
                p.blur = 1.0;
                p.color = [255, 128, 0];
            }
            SpriteShape::Sparkle => {
                p.thickness = 0.05;
                p.softness = 0.15;
            }
            SpriteShape::Gradient => p.falloff = 1.0,
            SpriteShape::Ring => p.inner_radius = 0.25,
            SpriteShape::Lightning => {
                p.thickness = 0.02;
                p.softness = 0.03;
                p.length = 0.9;
                p.angle = 90.0;
                p.color = [180, 200, 255];
            }
            SpriteShape::Smoke => {
                p.radius = 0.2;
                p.softness = 0.3;
                p.turbulence = 0.5;
                p.scale = 0.05;
                p.color = [200, 200, 200];
                p.alpha = 0.8;
            }
            _ => {}
        }

        p
    }

    /// Sets the softness.
    pub fn with_softness(mut self, softness: f64) -> Self {
        self.softness = softness;
        self
    }

    /// Sets the color.
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    /// Sets the alpha multiplier.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables the center gradient.
    pub fn with_gradient(mut self, gradient: bool) -> Self {
        self.gradient = gradient;
        self
    }

    /// Sets any numeric parameter by name, e.g. `.with_param(SpriteParam::Radius, 0.3)`.
    pub fn with_param(mut self, param: SpriteParam, value: f64) -> Self {
        self.set_param(param, value);
        self
    }

    /// Reads a numeric parameter.
    pub fn param(&self, param: SpriteParam) -> f64 {
        match param {
            SpriteParam::Radius => self.radius,
            SpriteParam::Size => self.size,
            SpriteParam::Thickness => self.thickness,
            SpriteParam::Length => self.length,
            SpriteParam::Angle => self.angle,
            SpriteParam::Rotation => self.rotation,
            SpriteParam::Sides => self.sides as f64,
            SpriteParam::Points => self.points as f64,
            SpriteParam::OuterRadius => self.outer_radius,
            SpriteParam::InnerRadius => self.inner_radius,
            SpriteParam::Intensity => self.intensity,
            SpriteParam::Falloff => self.falloff,
            SpriteParam::Blur => self.blur,
            SpriteParam::Height => self.height,
            SpriteParam::Width => self.width,
            SpriteParam::Turbulence => self.turbulence,
            SpriteParam::Rays => self.rays as f64,
            SpriteParam::Scale => self.scale,
            SpriteParam::Octaves => self.octaves as f64,
            SpriteParam::Contrast => self.contrast,
            SpriteParam::Threshold => self.threshold,
            SpriteParam::Segments => self.segments as f64,
            SpriteParam::Jaggedness => self.jaggedness,
            SpriteParam::Branches => self.branches as f64,
            SpriteParam::Puffs => self.puffs as f64,
            SpriteParam::Softness => self.softness,
            SpriteParam::Alpha => self.alpha,
            SpriteParam::Seed => self.seed as f64,
        }
    }

    /// Writes a numeric parameter. Integer parameters are rounded and
    /// saturate at zero.
    pub fn set_param(&mut self, param: SpriteParam, value: f64) {
        let int = || value.round().max(0.0) as u32;
        match param {
            SpriteParam::Radius => self.radius = value,
            SpriteParam::Size => self.size = value,
            SpriteParam::Thickness => self.thickness = value,
            SpriteParam::Length => self.length = value,
            SpriteParam::Angle => self.angle = value,
            SpriteParam::Rotation => self.rotation = value,
            SpriteParam::Sides => self.sides = int(),
            SpriteParam::Points => self.points = int(),
            SpriteParam::OuterRadius => self.outer_radius = value,
            SpriteParam::InnerRadius => self.inner_radius = value,
            SpriteParam::Intensity => self.intensity = value,
            SpriteParam::Falloff => self.falloff = value,
            SpriteParam::Blur => self.blur = value,
            SpriteParam::Height => self.height = value,
            SpriteParam::Width => self.width = value,
            SpriteParam::Turbulence => self.turbulence = value,
            SpriteParam::Rays => self.rays = int(),
            SpriteParam::Scale => self.scale = value,
            SpriteParam::Octaves => self.octaves = int(),
            SpriteParam::Contrast => self.contrast = value,
            SpriteParam::Threshold => self.threshold = value,
            SpriteParam::Segments => self.segments = int(),
            SpriteParam::Jaggedness => self.jaggedness = value,
            SpriteParam::Branches => self.branches = int(),
            SpriteParam::Puffs => self.puffs = int(),
            SpriteParam::Softness => self.softness = value,
            SpriteParam::Alpha => self.alpha = value,
            SpriteParam::Seed => self.seed = int(),
        }
    }

    /// Checks every parameter invariant, collecting all failures.
    ///
    /// Every field is checked regardless of shape so that switching shapes
    /// never exposes a previously hidden invalid value.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut check = |result: Result<(), ConfigurationError>| {
            if let Err(e) = result {
                errors.push(e);
            }
        };

        check(validate_non_negative("softness", self.softness));
        check(validate_unit_interval("alpha", self.alpha));
        check(validate_count("sides", self.sides, 3, 64));
        check(validate_count("points", self.points, 3, 64));
        check(validate_count("rays", self.rays, 2, 64));
        check(validate_count("octaves", self.octaves, 1, 8));
        check(validate_count("segments", self.segments, 1, 256));
        check(validate_count("branches", self.branches, 0, 16));
        check(validate_count("puffs", self.puffs, 1, 64));

        for (name, value) in [
            ("radius", self.radius),
            ("size", self.size),
            ("thickness", self.thickness),
            ("length", self.length),
            ("outer_radius", self.outer_radius),
            ("inner_radius", self.inner_radius),
            ("intensity", self.intensity),
            ("falloff", self.falloff),
            ("height", self.height),
            ("turbulence", self.turbulence),
            ("contrast", self.contrast),
            ("jaggedness", self.jaggedness),
        ] {
            check(validate_non_negative(name, value));
        }
        check(validate_range("blur", self.blur, 0.0, MAX_BLUR));
        check(validate_finite("angle", self.angle));
        check(validate_finite("rotation", self.rotation));
        check(validate_positive("width", self.width));
        check(validate_positive("scale", self.scale));
        check(validate_unit_interval("threshold", self.threshold));

        if self.inner_radius > self.outer_radius {
            errors.push(ConfigurationError::new(
                "inner_radius",
                format!(
                    "must not exceed outer_radius ({}), got {}",
                    self.outer_radius, self.inner_radius
                ),
            ));
        }

        errors.into_result()
    }
}

/// Wire form of [`SpriteParameters`]: every field except `shape` is optional
/// and falls back to the shape's defaults.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SpriteParametersDoc {
    shape: SpriteShape,
    radius: Option<f64>,
    size: Option<f64>,
    thickness: Option<f64>,
    length: Option<f64>,
    angle: Option<f64>,
    rotation: Option<f64>,
    sides: Option<u32>,
    points: Option<u32>,
    outer_radius: Option<f64>,
    inner_radius: Option<f64>,
    intensity: Option<f64>,
    falloff: Option<f64>,
    blur: Option<f64>,
    height: Option<f64>,
    width: Option<f64>,
    turbulence: Option<f64>,
    rays: Option<u32>,
    scale: Option<f64>,
    octaves: Option<u32>,
    contrast: Option<f64>,
    threshold: Option<f64>,
    segments: Option<u32>,
    jaggedness: Option<f64>,
    branches: Option<u32>,
    puffs: Option<u32>,
    gradient: Option<bool>,
    length_falloff: Option<bool>,
    gradient_kind: Option<GradientKind>,
    softness: Option<f64>,
    color: Option<[u8; 3]>,
    alpha: Option<f64>,
    seed: Option<u32>,
}

impl From<SpriteParametersDoc> for SpriteParameters {
    fn from(doc: SpriteParametersDoc) -> Self {
        let d = SpriteParameters::for_shape(doc.shape);
        SpriteParameters {
            shape: doc.shape,
            radius: doc.radius.unwrap_or(d.radius),
            size: doc.size.unwrap_or(d.size),
            thickness: doc.thickness.unwrap_or(d.thickness),
            length: doc.length.unwrap_or(d.length),
            angle: doc.angle.unwrap_or(d.angle),
            rotation: doc.rotation.unwrap_or(d.rotation),
            sides: doc.sides.unwrap_or(d.sides),
            points: doc.points.unwrap_or(d.points),
            outer_radius: doc.outer_radius.unwrap_or(d.outer_radius),
            inner_radius: doc.inner_radius.unwrap_or(d.inner_radius),
            intensity: doc.intensity.unwrap_or(d.intensity),
            falloff: doc.falloff.unwrap_or(d.falloff),
            blur: doc.blur.unwrap_or(d.blur),
            height: doc.height.unwrap_or(d.height),
            width: doc.width.unwrap_or(d.width),
            turbulence: doc.turbulence.unwrap_or(d.turbulence),
            rays: doc.rays.unwrap_or(d.rays),
            scale: doc.scale.unwrap_or(d.scale),
            octaves: doc.octaves.unwrap_or(d.octaves),
            contrast: doc.contrast.unwrap_or(d.contrast),
            threshold: doc.threshold.unwrap_or(d.threshold),
            segments: doc.segments.unwrap_or(d.segments),
            jaggedness: doc.jaggedness.unwrap_or(d.jaggedness),
            branches: doc.branches.unwrap_or(d.branches),
            puffs: doc.puffs.unwrap_or(d.puffs),
            gradient: doc.gradient.unwrap_or(d.gradient),
            length_falloff: doc.length_falloff.unwrap_or(d.length_falloff),
            gradient_kind: doc.gradient_kind.unwrap_or(d.gradient_kind),
            softness: doc.softness.unwrap_or(d.softness),
            color: doc.color.unwrap_or(d.color),
            alpha: doc.alpha.unwrap_or(d.alpha),
            seed: doc.seed.unwrap_or(d.seed),
        }
    }
}
