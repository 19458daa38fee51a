//! Deterministic PNG writer.
//!
//! Uses fixed compression settings so the same buffer always encodes to
//! byte-identical output. Noise fields are written as 8-bit grayscale,
//! sprites as 8-bit RGBA.

use std::io::Write;
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;

use crate::field::{Field, RgbaField};
use crate::generate::Frame;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// PNG export configuration.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Use a fixed value for determinism.
    pub compression: Compression,
    /// Filter type. Use a fixed value for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            filter: FilterType::NoFilter,
        }
    }
}

impl PngConfig {
    /// Faster, larger output. Still deterministic.
    pub fn fast() -> Self {
        Self {
            compression: Compression::Fast,
            ..Self::default()
        }
    }
}

/// Raw 8-bit samples of a frame and the matching PNG color type.
fn frame_samples(frame: &Frame) -> (ColorType, Vec<u8>) {
    match frame {
        Frame::Gray(field) => (ColorType::Grayscale, field.to_gray8()),
        Frame::Rgba(field) => (ColorType::Rgba, field.to_rgba8()),
    }
}

fn encode_samples<W: Write>(
    writer: W,
    (width, height): (u32, u32),
    color_type: ColorType,
    samples: &[u8],
    config: &PngConfig,
) -> Result<(), PngError> {
    if width == 0 || height == 0 {
        return Err(PngError::InvalidDimensions(format!(
            "cannot encode a {}x{} image",
            width, height
        )));
    }

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);
    encoder.write_header()?.write_image_data(samples)?;
    Ok(())
}

/// Encode a frame (grayscale or RGBA) into any writer.
pub fn write_frame_to_writer<W: Write>(
    frame: &Frame,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    let (color_type, samples) = frame_samples(frame);
    encode_samples(
        writer,
        (frame.width(), frame.height()),
        color_type,
        &samples,
        config,
    )
}

/// Encode a noise field as grayscale PNG bytes.
pub fn encode_gray(field: &Field, config: &PngConfig) -> Result<Vec<u8>, PngError> {
    let mut out = Vec::new();
    encode_samples(
        &mut out,
        (field.width, field.height),
        ColorType::Grayscale,
        &field.to_gray8(),
        config,
    )?;
    Ok(out)
}

/// Encode a sprite field as RGBA PNG bytes.
pub fn encode_rgba(field: &RgbaField, config: &PngConfig) -> Result<Vec<u8>, PngError> {
    let mut out = Vec::new();
    encode_samples(
        &mut out,
        (field.width, field.height),
        ColorType::Rgba,
        &field.to_rgba8(),
        config,
    )?;
    Ok(out)
}

/// Write a frame to a PNG file.
pub fn write_frame(frame: &Frame, path: &Path, config: &PngConfig) -> Result<(), PngError> {
    let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_frame_to_writer(frame, &mut writer, config)?;
    writer.flush()?;
    Ok(())
}

/// BLAKE3 hex digest of encoded PNG bytes.
pub fn hash_png(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// Encode a frame in memory, returning the bytes and their digest.
pub fn write_frame_to_vec_with_hash(
    frame: &Frame,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    let mut bytes = Vec::new();
    write_frame_to_writer(frame, &mut bytes, config)?;
    let hash = hash_png(&bytes);
    Ok((bytes, hash))
}
