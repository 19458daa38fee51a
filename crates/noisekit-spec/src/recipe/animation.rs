//! Animation settings: interpolation curves, styles, parameter tracks, and
//! atlas layout.

use serde::{Deserialize, Serialize};

use super::sprite::SpriteParam;
use crate::error::{ConfigurationError, ValidationErrors};
use crate::validation::common::{validate_finite, MAX_DIMENSION};

/// Upper bound on frames in one animation.
pub const MAX_FRAME_COUNT: u32 = 1024;

/// Remapping applied to the interpolation fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    /// Identity.
    #[default]
    Linear,
    /// Quadratic ease in.
    EaseIn,
    /// Quadratic ease out.
    EaseOut,
    /// Quadratic ease in, then out.
    EaseInOut,
    /// Holds the start value until the last frame.
    Stepped,
}

/// How the interpolation fraction advances across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Start to end.
    #[default]
    Linear,
    /// Start to end and back (triangle wave).
    PingPong,
    /// Seeded random fraction per frame.
    Random,
}

/// How frames are arranged in an atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtlasLayout {
    /// Smallest near-square grid holding every frame.
    #[default]
    Auto,
    /// One row.
    RowOnly,
    /// One column.
    ColumnOnly,
    /// Explicit grid.
    Manual { rows: u32, cols: u32 },
}

impl AtlasLayout {
    /// Resolves the grid as `(rows, cols)` for `frame_count` frames.
    ///
    /// Fails when a manual grid has fewer cells than frames.
    ///
    /// # Example
    /// ```
    /// use noisekit_spec::recipe::AtlasLayout;
    ///
    /// assert_eq!(AtlasLayout::Auto.resolve(10).unwrap(), (3, 4));
    /// assert_eq!(AtlasLayout::RowOnly.resolve(5).unwrap(), (1, 5));
    /// assert!(AtlasLayout::Manual { rows: 2, cols: 2 }.resolve(5).is_err());
    /// ```
    pub fn resolve(&self, frame_count: u32) -> Result<(u32, u32), ConfigurationError> {
        let n = frame_count.max(1);
        match *self {
            AtlasLayout::Auto => {
                let cols = (n as f64).sqrt().ceil() as u32;
                let rows = n.div_ceil(cols);
                Ok((rows, cols))
            }
            AtlasLayout::RowOnly => Ok((1, n)),
            AtlasLayout::ColumnOnly => Ok((n, 1)),
            AtlasLayout::Manual { rows, cols } => {
                let cells = u64::from(rows) * u64::from(cols);
                if cells < u64::from(n) {
                    return Err(ConfigurationError::new(
                        "layout",
                        format!(
                            "manual grid {}x{} has {} cells, fewer than frame_count {}",
                            rows, cols, cells, n
                        ),
                    ));
                }
                Ok((rows, cols))
            }
        }
    }
}

/// Pixel size of a `rows x cols` grid of `width x height` cells, bounded by
/// [`MAX_DIMENSION`] per side.
pub fn atlas_extent(
    rows: u32,
    cols: u32,
    width: u32,
    height: u32,
) -> Result<(u32, u32), ConfigurationError> {
    let side = |cells: u32, cell: u32| cells.checked_mul(cell).filter(|&v| v <= MAX_DIMENSION);
    match (side(cols, width), side(rows, height)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(ConfigurationError::new(
            "layout",
            format!(
                "atlas of {}x{} cells of {}x{} px exceeds {} px per side",
                cols, rows, width, height, MAX_DIMENSION
            ),
        )),
    }
}

/// What the animated frames are turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Composition {
    /// One atlas buffer.
    #[default]
    Atlas,
    /// Independent frame buffers.
    Sequence,
}

/// Noise layer selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    #[default]
    A,
    B,
}

/// Numeric noise parameter that an animation track can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseParam {
    Scale,
    Octaves,
    Persistence,
    Lacunarity,
    OffsetX,
    OffsetY,
    OffsetZ,
    Power,
    WarpStrength,
}

/// Parameter bound to an animation track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamTarget {
    /// A field of one noise layer.
    Noise {
        #[serde(default)]
        layer: Layer,
        param: NoiseParam,
    },
    /// The noise blend weight.
    MixWeight,
    /// A sprite field.
    Sprite(SpriteParam),
}

impl ParamTarget {
    /// Targets `offset_z` of layer A.
    pub fn offset_z() -> Self {
        ParamTarget::Noise {
            layer: Layer::A,
            param: NoiseParam::OffsetZ,
        }
    }

    /// Whether the target applies to noise recipes (as opposed to sprites).
    pub fn is_noise(&self) -> bool {
        matches!(self, ParamTarget::Noise { .. } | ParamTarget::MixWeight)
    }
}

/// One animated parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationTrack {
    /// Parameter driven by this track.
    pub target: ParamTarget,
    /// Value on the first frame.
    pub start: f64,
    /// Value on the last frame.
    pub end: f64,
    /// Overrides the animation-wide curve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<Curve>,
    /// Overrides the animation-wide style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl AnimationTrack {
    /// Creates a track with the animation-wide curve and style.
    pub fn new(target: ParamTarget, start: f64, end: f64) -> Self {
        Self {
            target,
            start,
            end,
            curve: None,
            style: None,
        }
    }

    /// Overrides the curve for this track.
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = Some(curve);
        self
    }

    /// Overrides the style for this track.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

/// Animated RGB tint (sprites only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorTrack {
    pub start: [u8; 3],
    pub end: [u8; 3],
}

/// Animation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationSpec {
    /// Number of frames.
    pub frame_count: u32,

    /// Default curve for every track.
    #[serde(default)]
    pub curve: Curve,

    /// Default style for every track.
    #[serde(default)]
    pub style: Style,

    /// Seed for the random style.
    #[serde(default = "default_seed")]
    pub seed: u32,

    /// Animated numeric parameters.
    #[serde(default)]
    pub tracks: Vec<AnimationTrack>,

    /// Animated tint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorTrack>,

    /// Atlas grid layout.
    #[serde(default)]
    pub layout: AtlasLayout,

    /// Output composition.
    #[serde(default)]
    pub composition: Composition,
}

fn default_seed() -> u32 {
    42
}

impl AnimationSpec {
    /// Creates an animation with no tracks.
    pub fn new(frame_count: u32) -> Self {
        Self {
            frame_count,
            curve: Curve::default(),
            style: Style::default(),
            seed: default_seed(),
            tracks: Vec::new(),
            color: None,
            layout: AtlasLayout::default(),
            composition: Composition::default(),
        }
    }

    /// Drifts layer A's `offset_z` from `z` by `rate` per frame.
    ///
    /// # Example
    /// ```
    /// use noisekit_spec::recipe::AnimationSpec;
    ///
    /// let spec = AnimationSpec::z_drift(16, 0.0, 0.05);
    /// assert_eq!(spec.tracks[0].start, 0.0);
    /// assert!((spec.tracks[0].end - 0.75).abs() < 1e-12);
    /// ```
    pub fn z_drift(frame_count: u32, z: f64, rate: f64) -> Self {
        let span = rate * f64::from(frame_count.saturating_sub(1));
        Self::new(frame_count).with_track(AnimationTrack::new(ParamTarget::offset_z(), z, z + span))
    }

    /// Sets the default curve.
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    /// Sets the default style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Sets the random-style seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Adds a track.
    pub fn with_track(mut self, track: AnimationTrack) -> Self {
        self.tracks.push(track);
        self
    }

    /// Sets the color track.
    pub fn with_color(mut self, start: [u8; 3], end: [u8; 3]) -> Self {
        self.color = Some(ColorTrack { start, end });
        self
    }

    /// Sets the atlas layout.
    pub fn with_layout(mut self, layout: AtlasLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the composition.
    pub fn with_composition(mut self, composition: Composition) -> Self {
        self.composition = composition;
        self
    }

    /// Resolves the atlas grid for this animation's frame count.
    pub fn grid(&self) -> Result<(u32, u32), ConfigurationError> {
        self.layout.resolve(self.frame_count)
    }

    /// Pixel size of the atlas holding `width x height` frames.
    ///
    /// Fails when the grid cannot hold every frame or when either side of
    /// the atlas exceeds [`MAX_DIMENSION`].
    ///
    /// # Example
    /// ```
    /// use noisekit_spec::recipe::{AnimationSpec, AtlasLayout};
    ///
    /// let spec = AnimationSpec::new(10);
    /// assert_eq!(spec.atlas_size(64, 32).unwrap(), (256, 96));
    /// assert!(spec.atlas_size(4096, 32).is_err());
    /// ```
    pub fn atlas_size(&self, width: u32, height: u32) -> Result<(u32, u32), ConfigurationError> {
        let (rows, cols) = self.grid()?;
        atlas_extent(rows, cols, width, height)
    }

    /// Checks frame count, layout, and track values.
    ///
    /// The manual layout is only checked for atlas composition.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.frame_count < 1 || self.frame_count > MAX_FRAME_COUNT {
            errors.push(ConfigurationError::new(
                "frame_count",
                format!(
                    "must be in [1, {}], got {}",
                    MAX_FRAME_COUNT, self.frame_count
                ),
            ));
        } else if self.composition == Composition::Atlas {
            if let Err(e) = self.grid() {
                errors.push(e);
            }
        }

        for (i, track) in self.tracks.iter().enumerate() {
            let parent = format!("tracks[{}]", i);
            if let Err(e) = validate_finite("start", track.start) {
                errors.push(e.nested(&parent));
            }
            if let Err(e) = validate_finite("end", track.end) {
                errors.push(e.nested(&parent));
            }
        }

        errors.into_result()
    }
}
