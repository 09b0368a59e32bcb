use std::sync::Arc;

use crate::foundation::error::{InputError, SpriteResult};

/// Axis-aligned pixel rectangle, `x`/`y` at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Number of pixels covered.
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Exclusive right edge.
    pub fn right(self) -> u64 {
        u64::from(self.x) + u64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> u64 {
        u64::from(self.y) + u64::from(self.height)
    }
}

/// Decoded RGBA8 raster with straight (non-premultiplied) alpha.
///
/// Pixels are row-major, 4 bytes each. The byte storage is shared, so clones are cheap and
/// the buffer can be handed to a worker thread for the O(W·H) passes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    rgba8: Arc<Vec<u8>>,
}

impl PixelBuffer {
    /// Wrap raw row-major RGBA8 bytes. Length must be `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> SpriteResult<Self> {
        let expected = byte_len(width, height);
        if expected != Some(rgba8.len()) {
            return Err(InputError::BufferSize {
                expected: expected.unwrap_or(usize::MAX),
                actual: rgba8.len(),
            }
            .into());
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// Fully transparent raster. Panics if the byte length does not fit in memory.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba8: Arc::new(vec![0u8; alloc_len(width, height)]),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major RGBA8 bytes.
    pub fn as_rgba8(&self) -> &[u8] {
        &self.rgba8
    }

    /// Copy out the raw bytes.
    pub fn into_rgba8(self) -> Vec<u8> {
        Arc::try_unwrap(self.rgba8).unwrap_or_else(|shared| (*shared).clone())
    }

    /// True when the raster has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// RGBA of one pixel. Caller guarantees `x < width && y < height`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.rgba8[i],
            self.rgba8[i + 1],
            self.rgba8[i + 2],
            self.rgba8[i + 3],
        ]
    }

    /// Alpha of one pixel. Caller guarantees `x < width && y < height`.
    #[inline]
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.rgba8[self.offset(x, y) + 3]
    }

    /// Copy a sub-rectangle into a new buffer, alpha preserved.
    pub fn crop(&self, rect: PixelRect) -> SpriteResult<Self> {
        if rect.right() > u64::from(self.width) || rect.bottom() > u64::from(self.height) {
            return Err(InputError::CropOutOfBounds {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                raster_width: self.width,
                raster_height: self.height,
            }
            .into());
        }

        let row_bytes = rect.width as usize * 4;
        let mut out = Vec::with_capacity(byte_len(rect.width, rect.height).unwrap_or(0));
        for y in rect.y..rect.y + rect.height {
            let start = self.offset(rect.x, y);
            out.extend_from_slice(&self.rgba8[start..start + row_bytes]);
        }

        Ok(Self {
            width: rect.width,
            height: rect.height,
            rgba8: Arc::new(out),
        })
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

/// Incremental builder used by tests and callers that paint rasters by hand.
#[derive(Clone, Debug)]
pub struct PixelBufferBuilder {
    width: u32,
    height: u32,
    rgba8: Vec<u8>,
}

impl PixelBufferBuilder {
    /// Start from a fully transparent raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba8: vec![0u8; alloc_len(width, height)],
        }
    }

    /// Set one pixel; out-of-range coordinates are ignored.
    pub fn put(mut self, x: u32, y: u32, rgba: [u8; 4]) -> Self {
        if x < self.width && y < self.height {
            let i = (y as usize * self.width as usize + x as usize) * 4;
            self.rgba8[i..i + 4].copy_from_slice(&rgba);
        }
        self
    }

    /// Fill a rectangle, clipped to the raster.
    pub fn fill(mut self, rect: PixelRect, rgba: [u8; 4]) -> Self {
        let x_end = (rect.right().min(u64::from(self.width))) as u32;
        let y_end = (rect.bottom().min(u64::from(self.height))) as u32;
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                self = self.put(x, y, rgba);
            }
        }
        self
    }

    /// Finish the raster.
    pub fn build(self) -> PixelBuffer {
        PixelBuffer {
            width: self.width,
            height: self.height,
            rgba8: Arc::new(self.rgba8),
        }
    }
}

fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize).checked_mul(height as usize)?.checked_mul(4)
}

fn alloc_len(width: u32, height: u32) -> usize {
    byte_len(width, height).unwrap_or(usize::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
