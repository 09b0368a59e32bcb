//! Row-per-animation sheet layout.
//!
//! Animation `r` fills row `r`; frame `i` of that row sits at
//! `(i * frameWidth, r * frameHeight)`. Building and rebuilding are pure functions of their
//! inputs.

use crate::foundation::core::CellSize;
use crate::foundation::error::{ConfigError, SpriteResult, StateError};
use crate::raster::buffer::{PixelBuffer, PixelRect};
use crate::sheet::model::{AnimationDescriptor, AnimationMetadata, Frame, LoopMode};

/// Lay out one metadata entry per descriptor.
#[tracing::instrument(skip(descriptors), fields(rows = descriptors.len()))]
pub fn build_metadata(
    descriptors: &[AnimationDescriptor],
    cell: CellSize,
) -> SpriteResult<Vec<AnimationMetadata>> {
    cell.validate()?;
    if let Some(d) = descriptors.iter().find(|d| d.frame_count == 0) {
        return Err(ConfigError::NonPositiveFrameCount {
            name: d.name.clone(),
        }
        .into());
    }

    descriptors
        .iter()
        .enumerate()
        .map(|(row, d)| {
            Ok(AnimationMetadata {
                name: d.name.clone(),
                frames: row_frames(&d.name, row, d.frame_count as usize, cell)?,
                loop_mode: d.loop_mode,
                transition_to: d.transition_to.clone(),
                frame_width: cell.width,
                frame_height: cell.height,
            })
        })
        .collect()
}

/// Recompute every frame rectangle under a new cell size.
///
/// Names, loop modes, transition targets and frame counts are carried over unchanged; row
/// index is each animation's position in `existing`.
#[tracing::instrument(skip(existing), fields(rows = existing.len()))]
pub fn rebuild_metadata(
    existing: &[AnimationMetadata],
    width: u32,
    height: u32,
) -> SpriteResult<Vec<AnimationMetadata>> {
    let cell = CellSize::new(width, height)?;

    existing
        .iter()
        .enumerate()
        .map(|(row, anim)| {
            Ok(AnimationMetadata {
                frames: row_frames(&anim.name, row, anim.frame_count(), cell)?,
                frame_width: cell.width,
                frame_height: cell.height,
                ..anim.clone()
            })
        })
        .collect()
}

/// Single-row looping animation spanning a whole raster, `frame_count` cells wide.
///
/// Frame width is `sheet_width / frame_count` rounded down; leftover columns on the right
/// are not covered by any frame.
pub fn build_strip(
    name: impl Into<String>,
    frame_count: u32,
    sheet_width: u32,
    sheet_height: u32,
) -> SpriteResult<AnimationMetadata> {
    let name = name.into();
    if frame_count == 0 {
        return Err(ConfigError::NonPositiveFrameCount { name }.into());
    }
    let cell = CellSize::new(sheet_width / frame_count, sheet_height)?;
    Ok(AnimationMetadata {
        frames: row_frames(&name, 0, frame_count as usize, cell)?,
        name,
        loop_mode: LoopMode::Loop,
        transition_to: None,
        frame_width: cell.width,
        frame_height: cell.height,
    })
}

/// Copy one animation's row of frames out of the full sheet.
///
/// The strip is `frames.len() * frameWidth` by `frameHeight` pixels starting at the first
/// frame's origin.
pub fn crop_animation_strip(
    sheet: &PixelBuffer,
    animation: &AnimationMetadata,
) -> SpriteResult<PixelBuffer> {
    let first = animation
        .frames
        .first()
        .ok_or_else(|| StateError::EmptyAnimation {
            name: animation.name.clone(),
        })?;
    let width = u32::try_from(animation.frame_count())
        .ok()
        .and_then(|n| n.checked_mul(animation.frame_width))
        .ok_or_else(|| ConfigError::LayoutOverflow {
            name: animation.name.clone(),
        })?;
    sheet.crop(PixelRect {
        x: first.x,
        y: first.y,
        width,
        height: animation.frame_height,
    })
}

fn row_frames(name: &str, row: usize, count: usize, cell: CellSize) -> SpriteResult<Vec<Frame>> {
    let overflow = || ConfigError::LayoutOverflow {
        name: name.to_string(),
    };
    let y = u32::try_from(row)
        .ok()
        .and_then(|r| r.checked_mul(cell.height))
        .ok_or_else(overflow)?;

    let mut frames = Vec::with_capacity(count);
    for i in 0..count {
        let x = u32::try_from(i)
            .ok()
            .and_then(|i| i.checked_mul(cell.width))
            .ok_or_else(overflow)?;
        frames.push(Frame {
            x,
            y,
            width: cell.width,
            height: cell.height,
        });
    }
    Ok(frames)
}

#[cfg(test)]
#[path = "../../tests/unit/sheet/layout.rs"]
mod tests;
