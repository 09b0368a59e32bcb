//! 4-connected component labeling over the alpha channel.
//!
//! The outer scan is row-major, so components come out in a stable discovery order for a
//! given raster. Each flood is stack-based and shares one visited bitmap sized `W·H`.

use crate::foundation::error::SpriteResult;
use crate::raster::buffer::{PixelBuffer, PixelRect};

/// One maximal 4-connected region of non-transparent pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Tight bounding box of the region.
    pub bounds: PixelRect,
    /// Number of opaque pixels in the region (at most `bounds.area()`).
    pub pixel_count: u64,
}

/// An extracted sprite element: the source cropped at a component's bounding box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Part {
    /// Bounding box on the source raster.
    pub bounds: PixelRect,
    /// Cropped pixels, alpha preserved. Pixels of neighbouring parts inside the box are kept.
    pub pixels: PixelBuffer,
}

/// Reusable labeler holding the visited bitmap and flood stack.
#[derive(Debug, Default)]
pub struct ComponentLabeler {
    visited: Vec<bool>,
    stack: Vec<(u32, u32)>,
}

impl ComponentLabeler {
    /// Empty labeler; buffers grow on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Label every component of `raster` in row-major discovery order.
    pub fn label(&mut self, raster: &PixelBuffer) -> Vec<ConnectedComponent> {
        let (w, h) = (raster.width(), raster.height());
        let n = w as usize * h as usize;
        self.visited.clear();
        self.visited.resize(n, false);
        self.stack.clear();

        let mut out = Vec::new();
        for y in 0..h {
            for x in 0..w {
                let i = index(w, x, y);
                if self.visited[i] || raster.alpha(x, y) == 0 {
                    continue;
                }
                out.push(self.flood(raster, x, y));
            }
        }
        out
    }

    fn flood(&mut self, raster: &PixelBuffer, sx: u32, sy: u32) -> ConnectedComponent {
        let (w, h) = (raster.width(), raster.height());
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (sx, sy, sx, sy);
        let mut pixel_count = 0u64;

        self.visited[index(w, sx, sy)] = true;
        self.stack.push((sx, sy));

        while let Some((x, y)) = self.stack.pop() {
            pixel_count += 1;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);

            let neighbours = [
                (x < w - 1).then(|| (x + 1, y)),
                (x > 0).then(|| (x - 1, y)),
                (y < h - 1).then(|| (x, y + 1)),
                (y > 0).then(|| (x, y - 1)),
            ];
            for (nx, ny) in neighbours.into_iter().flatten() {
                let ni = index(w, nx, ny);
                if !self.visited[ni] && raster.alpha(nx, ny) > 0 {
                    self.visited[ni] = true;
                    self.stack.push((nx, ny));
                }
            }
        }

        ConnectedComponent {
            bounds: PixelRect {
                x: min_x,
                y: min_y,
                width: max_x - min_x + 1,
                height: max_y - min_y + 1,
            },
            pixel_count,
        }
    }
}

/// Find every disjoint region of non-transparent pixels.
#[tracing::instrument(skip(raster), fields(width = raster.width(), height = raster.height()))]
pub fn label_components(raster: &PixelBuffer) -> Vec<ConnectedComponent> {
    let components = ComponentLabeler::new().label(raster);
    tracing::debug!(count = components.len(), "labeled components");
    components
}

/// Find every disjoint region and crop it out of the source.
///
/// An all-transparent raster yields an empty list.
#[tracing::instrument(skip(raster), fields(width = raster.width(), height = raster.height()))]
pub fn segment_parts(raster: &PixelBuffer) -> SpriteResult<Vec<Part>> {
    let components = ComponentLabeler::new().label(raster);
    tracing::debug!(count = components.len(), "segmented parts");
    components
        .into_iter()
        .map(|c| {
            Ok(Part {
                bounds: c.bounds,
                pixels: raster.crop(c.bounds)?,
            })
        })
        .collect()
}

#[inline]
fn index(w: u32, x: u32, y: u32) -> usize {
    y as usize * w as usize + x as usize
}

#[cfg(test)]
#[path = "../../tests/unit/segment/parts.rs"]
mod tests;
