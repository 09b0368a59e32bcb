//! spritekit is a sprite-sheet geometry and animation playback engine.
//!
//! The library works on raw RGBA8 rasters and plain metadata; decoding and encoding image
//! files is left to callers (the bundled `spritekit` binary uses `image` for that). Typical use:
//!
//! - Measure a sheet's cell size with [`detect_grid`]
//! - Lay out rows of animations with [`build_metadata`] or [`SheetSpec::build`]
//! - Recompute layout after a resize with [`rebuild_metadata`]
//! - Cut loose artwork into parts with [`segment_parts`]
//! - Drive display slots with [`Player`] or a [`Stage`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod detect;
mod foundation;
mod playback;
mod raster;
mod segment;
mod sheet;

pub use crate::foundation::core::{CellSize, Fps, parse_resolution};
pub use crate::foundation::error::{
    ConfigError, InputError, SpriteError, SpriteResult, StateError,
};

pub use crate::raster::buffer::{PixelBuffer, PixelBufferBuilder, PixelRect};

pub use crate::sheet::document::{CellSource, SheetSpec};
pub use crate::sheet::layout::{
    build_metadata, build_strip, crop_animation_strip, rebuild_metadata,
};
pub use crate::sheet::model::{
    AnimationDescriptor, AnimationIdentity, AnimationMetadata, Frame, LoopMode, SpriteSheet,
    with_common_animations,
};

pub use crate::detect::grid::{DetectOpts, detect_grid, detect_grid_with};
pub use crate::segment::parts::{
    ComponentLabeler, ConnectedComponent, Part, label_components, segment_parts,
};

pub use crate::playback::clock::{TickClock, TickToken};
pub use crate::playback::player::{Advance, Player, advance};
pub use crate::playback::stage::{SlotAdvance, Stage};
pub use crate::playback::state::{Direction, PlaybackState, TransitionEvent, next_frame};
