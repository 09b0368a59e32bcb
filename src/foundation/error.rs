/// Convenience result type used across spritekit.
pub type SpriteResult<T> = Result<T, SpriteError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum SpriteError {
    /// The raster handed to a pixel pass cannot produce usable geometry.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Invalid caller-supplied dimensions, counts or sheet data.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A playback or crop request against an animation that cannot satisfy it.
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// Errors when serializing or deserializing sheet documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpriteError {
    /// Build a [`SpriteError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Failures of the raster passes (grid detection, segmentation, cropping).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Every pixel of the raster is fully transparent.
    #[error("no non-transparent pixels found")]
    NoOpaquePixels,

    /// The scan produced a cell with a zero-length side.
    #[error("detected a zero-sized frame ({width}x{height})")]
    DegenerateFrame {
        /// Detected width in pixels.
        width: u32,
        /// Detected height in pixels.
        height: u32,
    },

    /// Pixel byte length does not match `width * height * 4`.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize {
        /// Required byte length.
        expected: usize,
        /// Byte length actually supplied.
        actual: usize,
    },

    /// A crop rectangle reaches outside the raster.
    #[error("crop {width}x{height} at ({x},{y}) exceeds {raster_width}x{raster_height} raster")]
    CropOutOfBounds {
        /// Crop left edge.
        x: u32,
        /// Crop top edge.
        y: u32,
        /// Crop width.
        width: u32,
        /// Crop height.
        height: u32,
        /// Source raster width.
        raster_width: u32,
        /// Source raster height.
        raster_height: u32,
    },
}

/// Rejected builder/rebuilder/player configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// An animation descriptor asked for zero frames.
    #[error("animation '{name}' must have at least one frame")]
    NonPositiveFrameCount {
        /// Descriptor name.
        name: String,
    },

    /// A cell dimension is zero.
    #[error("cell size must be positive, got {width}x{height}")]
    NonPositiveCellDimension {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A frame coordinate does not fit in `u32`.
    #[error("frame layout of '{name}' overflows u32 pixel coordinates")]
    LayoutOverflow {
        /// Animation whose layout overflowed.
        name: String,
    },

    /// Frame rate must be finite and > 0.
    #[error("fps must be finite and > 0, got {0}")]
    InvalidFps(f64),

    /// Two animations in one sheet share a name.
    #[error("duplicate animation name '{0}'")]
    DuplicateName(String),

    /// A caller asked for an animation the sheet does not contain.
    #[error("unknown animation '{0}'")]
    UnknownAnimation(String),

    /// A caller addressed a playback slot that does not exist.
    #[error("unknown playback slot '{0}'")]
    UnknownSlot(String),
}

/// Requests that need frames from an animation that has none.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The animation has zero frames.
    #[error("animation '{name}' has no frames")]
    EmptyAnimation {
        /// Animation name.
        name: String,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
