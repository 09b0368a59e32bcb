use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::error::{ConfigError, SpriteResult};

/// Shared `(frameWidth, frameHeight)` of every frame in a sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CellSize {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl CellSize {
    /// Fallback used when a resolution string cannot be parsed.
    pub const FALLBACK: Self = Self {
        width: 64,
        height: 64,
    };

    /// Build a cell size, rejecting zero-length sides.
    pub fn new(width: u32, height: u32) -> SpriteResult<Self> {
        let cell = Self { width, height };
        cell.validate()?;
        Ok(cell)
    }

    /// Check both sides are > 0.
    pub fn validate(self) -> SpriteResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::NonPositiveCellDimension {
                width: self.width,
                height: self.height,
            }
            .into());
        }
        Ok(())
    }

    /// Pixel area of one cell.
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl std::fmt::Display for CellSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Read the first `<W>x<H>` pair out of a free-form resolution label such as
/// `"64x64 sprites"`.
///
/// Labels without a usable pair fall back to [`CellSize::FALLBACK`].
pub fn parse_resolution(label: &str) -> CellSize {
    match find_dimension_pair(label) {
        Some(cell) => cell,
        None => {
            tracing::warn!(
                label,
                "could not parse resolution, falling back to {}",
                CellSize::FALLBACK
            );
            CellSize::FALLBACK
        }
    }
}

static DIMENSION_PAIR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\d+)x(\d+)").ok());

fn find_dimension_pair(label: &str) -> Option<CellSize> {
    DIMENSION_PAIR
        .as_ref()?
        .captures_iter(label)
        .find_map(|caps| {
            let width = caps[1].parse::<u32>().ok()?;
            let height = caps[2].parse::<u32>().ok()?;
            CellSize::new(width, height).ok()
        })
}

/// Playback rate in frames per second.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Fps(f64);

impl Fps {
    /// Build a frame rate; must be finite and > 0.
    pub fn new(fps: f64) -> SpriteResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(ConfigError::InvalidFps(fps).into());
        }
        Ok(Self(fps))
    }

    /// Frames per second.
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Tick period, `1000ms / fps`.
    pub fn period_ms(self) -> f64 {
        1000.0 / self.0
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self(12.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
