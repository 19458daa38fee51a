//! Grid atlas packing.

use noisekit_spec::recipe::atlas_extent;
use noisekit_spec::ConfigurationError;

use crate::field::FrameBuffer;
use crate::generate::GenerateError;

/// Frames packed row-major into a uniform grid.
///
/// Frame `i` sits in cell `(i % cols, i / cols)`. Cells beyond
/// `frame_count` are left at the buffer's default pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Atlas<F> {
    pub buffer: F,
    pub rows: u32,
    pub cols: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub frame_count: u32,
}

impl<F: FrameBuffer> Atlas<F> {
    /// Packs `frames` into a `rows x cols` grid.
    ///
    /// Every frame must have the size of the first one, the grid must hold
    /// every frame, and the atlas must fit the per-side pixel limit.
    pub fn pack(frames: &[F], rows: u32, cols: u32) -> Result<Self, GenerateError> {
        let Some(first) = frames.first() else {
            return Ok(Self {
                buffer: F::blank(0, 0),
                rows,
                cols,
                cell_width: 0,
                cell_height: 0,
                frame_count: 0,
            });
        };
        if (frames.len() as u64) > u64::from(rows) * u64::from(cols) {
            return Err(ConfigurationError::new(
                "layout",
                format!(
                    "grid {}x{} cannot hold {} frames",
                    rows,
                    cols,
                    frames.len()
                ),
            )
            .into());
        }

        let (cell_width, cell_height) = (first.width(), first.height());
        let (atlas_width, atlas_height) = atlas_extent(rows, cols, cell_width, cell_height)?;
        let mut buffer = F::blank(atlas_width, atlas_height);
        for (i, frame) in frames.iter().enumerate() {
            if !frame.same_size(first) {
                return Err(GenerateError::mismatch(first, frame));
            }
            let i = i as u32;
            buffer.blit(frame, (i % cols) * cell_width, (i / cols) * cell_height);
        }

        Ok(Self {
            buffer,
            rows,
            cols,
            cell_width,
            cell_height,
            frame_count: frames.len() as u32,
        })
    }

    /// Top-left pixel of cell `index`.
    pub fn cell_origin(&self, index: u32) -> (u32, u32) {
        (
            (index % self.cols) * self.cell_width,
            (index / self.cols) * self.cell_height,
        )
    }

    /// Copies frame `index` back out of the atlas.
    pub fn frame(&self, index: u32) -> Option<F> {
        if index >= self.frame_count {
            return None;
        }
        let (x0, y0) = self.cell_origin(index);
        let mut out = F::blank(self.cell_width, self.cell_height);
        for y in 0..self.cell_height {
            for x in 0..self.cell_width {
                out.set(x, y, self.buffer.get(x0 + x, y0 + y));
            }
        }
        Some(out)
    }
}

impl<F> Atlas<F> {
    /// Converts the atlas buffer, keeping the grid metadata.
    pub fn map<G>(self, f: impl FnOnce(F) -> G) -> Atlas<G> {
        Atlas {
            buffer: f(self.buffer),
            rows: self.rows,
            cols: self.cols,
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            frame_count: self.frame_count,
        }
    }
}
