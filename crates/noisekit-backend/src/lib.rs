//! noisekit synthesis backend
//!
//! Turns the parameter records of `noisekit-spec` into pixel buffers:
//! normalized noise fields, seamless tiles, blended layers, procedural VFX
//! sprites and animated sequences or atlases.
//!
//! # Pipeline
//!
//! - **Noise**: Sample -> Normalize -> Tile -> Blend, producing a [`Field`]
//!   with every value in [0, 1].
//! - **Sprite**: Sample -> Rasterize -> Color, producing an [`RgbaField`].
//! - **Animation**: each frame applies its interpolated track values to a
//!   template and delegates to one of the above.
//!
//! # Example
//!
//! ```
//! use noisekit_backend::{generate_recipe, seam_error, CancelToken};
//! use noisekit_spec::{NoiseParameters, NoiseRecipe, NoiseType, TilingSpec};
//!
//! let recipe = NoiseRecipe::single(NoiseParameters::new(NoiseType::Fbm).with_scale(32.0))
//!     .with_tiling(TilingSpec::default());
//! let field = generate_recipe(&recipe, 64, 64, &CancelToken::new())
//!     .unwrap()
//!     .complete()
//!     .unwrap();
//! assert!(field.data.iter().all(|v| (0.0..=1.0).contains(v)));
//! assert!(seam_error(&field) < 1e-9);
//! ```
//!
//! # Determinism
//!
//! - Same parameters + same seed = identical buffers
//! - PCG32 for every random draw, seeded explicitly per call
//! - PNG encoding uses fixed compression settings
//!
//! # Cancellation
//!
//! Long loops poll a [`CancelToken`] (per row, per frame) and return
//! [`Outcome::Cancelled`] instead of a partial buffer.

pub mod animation;
pub mod blend;
pub mod cancel;
pub mod color;
pub mod field;
pub mod generate;
pub mod noise;
pub mod png;
pub mod rng;
pub mod sprite;
pub mod tiling;

pub use animation::{
    animate, animate_with_progress, frame_parameters, render_frame, Animatable, Animation, Atlas,
};
pub use blend::blend;
pub use cancel::{CancelToken, Outcome};
pub use color::Color;
pub use field::{Field, FrameBuffer, RgbaField};
pub use generate::{generate, generate_noise, generate_recipe, normalize, Frame, GenerateError};
pub use png::{PngConfig, PngError};
pub use rng::DeterministicRng;
pub use sprite::{generate_sprite, rasterize_intensity};
pub use tiling::{center_seams, seam_error, tile};
