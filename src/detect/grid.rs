//! Cell-size inference by boundary scanning.
//!
//! The first opaque pixel in row-major order anchors the top-left of a cell. The cell
//! extends right while columns (rows at/after the anchor) hold an opaque pixel, then down
//! while rows (within the found columns) hold one.
//!
//! Cost is O(W·H) for the anchor search on sparse rasters; the boundary scans are bounded by
//! the same figure.

use crate::foundation::core::CellSize;
use crate::foundation::error::{InputError, SpriteResult};
use crate::raster::buffer::PixelBuffer;

/// Grid detection options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DetectOpts {
    /// Pixels with alpha strictly above this value count as opaque.
    pub alpha_threshold: u8,
}

/// Infer the frame size of the first sprite on a sheet.
pub fn detect_grid(raster: &PixelBuffer) -> SpriteResult<CellSize> {
    detect_grid_with(raster, DetectOpts::default())
}

/// [`detect_grid`] with an explicit alpha threshold.
#[tracing::instrument(skip(raster), fields(width = raster.width(), height = raster.height()))]
pub fn detect_grid_with(raster: &PixelBuffer, opts: DetectOpts) -> SpriteResult<CellSize> {
    let opaque = |x: u32, y: u32| raster.alpha(x, y) > opts.alpha_threshold;
    let (w, h) = (raster.width(), raster.height());

    let (ax, ay) = find_anchor(w, h, opaque).ok_or(InputError::NoOpaquePixels)?;

    let mut x_end = ax;
    while x_end < w && (ay..h).any(|y| opaque(x_end, y)) {
        x_end += 1;
    }

    let mut y_end = ay;
    while y_end < h && (ax..x_end).any(|x| opaque(x, y_end)) {
        y_end += 1;
    }

    let (width, height) = (x_end - ax, y_end - ay);
    if width == 0 || height == 0 {
        return Err(InputError::DegenerateFrame { width, height }.into());
    }

    tracing::debug!(anchor_x = ax, anchor_y = ay, width, height, "detected grid cell");
    Ok(CellSize { width, height })
}

fn find_anchor(w: u32, h: u32, opaque: impl Fn(u32, u32) -> bool) -> Option<(u32, u32)> {
    (0..h).find_map(|y| (0..w).find(|&x| opaque(x, y)).map(|x| (x, y)))
}

#[cfg(test)]
#[path = "../../tests/unit/detect/grid.rs"]
mod tests;
