use std::collections::HashSet;

use crate::foundation::core::CellSize;
use crate::foundation::error::{ConfigError, SpriteResult};
use crate::raster::buffer::PixelRect;

/// One playback step: a rectangle on the sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Frame {
    /// The frame as a raster rectangle.
    pub fn rect(self) -> PixelRect {
        PixelRect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Playback repeat policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// Wrap from the last frame back to the first.
    #[default]
    Loop,
    /// Play to the last frame and hold; may hand off to `transition_to`.
    Once,
    /// Bounce between the first and last frame.
    PingPong,
}

/// Canonical, serializable description of one animation row.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationMetadata {
    /// Name, unique within a sheet.
    #[serde(rename = "animationName")]
    pub name: String,
    /// Frames in playback order.
    pub frames: Vec<Frame>,
    /// Repeat policy.
    #[serde(rename = "loop", default)]
    pub loop_mode: LoopMode,
    /// Animation to hand off to when a `once` animation finishes. Not validated.
    #[serde(
        rename = "transitionTo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transition_to: Option<String>,
    /// Shared frame width.
    #[serde(rename = "frameWidth")]
    pub frame_width: u32,
    /// Shared frame height.
    #[serde(rename = "frameHeight")]
    pub frame_height: u32,
}

impl AnimationMetadata {
    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Shared cell size of every frame.
    pub fn cell(&self) -> CellSize {
        CellSize {
            width: self.frame_width,
            height: self.frame_height,
        }
    }

    /// Transition target, only when the loop mode makes it reachable.
    pub fn active_transition(&self) -> Option<&str> {
        match self.loop_mode {
            LoopMode::Once => self.transition_to.as_deref(),
            LoopMode::Loop | LoopMode::PingPong => None,
        }
    }

    /// Identity tuple used to decide whether a playback binding changed.
    pub fn identity(&self) -> AnimationIdentity<'_> {
        AnimationIdentity {
            name: &self.name,
            loop_mode: self.loop_mode,
            cell: self.cell(),
            frames: &self.frames,
        }
    }
}

/// `(name, loopMode, frame geometry)` of an animation, compared as one value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationIdentity<'a> {
    /// Animation name.
    pub name: &'a str,
    /// Repeat policy.
    pub loop_mode: LoopMode,
    /// Shared frame size.
    pub cell: CellSize,
    /// Frame rectangles.
    pub frames: &'a [Frame],
}

/// Builder input for one animation row.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationDescriptor {
    /// Animation name.
    pub name: String,
    /// Number of frames to lay out.
    #[serde(rename = "frames")]
    pub frame_count: u32,
    /// Repeat policy.
    #[serde(rename = "loop", default)]
    pub loop_mode: LoopMode,
    /// Hand-off target for `once` animations.
    #[serde(
        rename = "transitionTo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transition_to: Option<String>,
}

impl AnimationDescriptor {
    /// Descriptor without a transition target.
    pub fn new(name: impl Into<String>, frame_count: u32, loop_mode: LoopMode) -> Self {
        Self {
            name: name.into(),
            frame_count,
            loop_mode,
            transition_to: None,
        }
    }

    /// Set the hand-off target.
    pub fn with_transition(mut self, target: impl Into<String>) -> Self {
        self.transition_to = Some(target.into());
        self
    }
}

/// Append the stock `Attack`, `Hurt` and `Die` rows when the list does not already name them
/// (case-insensitive). Each plays 8 frames once; all but `Die` return to `Idle`.
pub fn with_common_animations(mut descriptors: Vec<AnimationDescriptor>) -> Vec<AnimationDescriptor> {
    let existing: HashSet<String> = descriptors
        .iter()
        .map(|d| d.name.to_lowercase())
        .collect();
    for name in ["Attack", "Hurt", "Die"] {
        if existing.contains(&name.to_lowercase()) {
            continue;
        }
        let d = AnimationDescriptor::new(name, 8, LoopMode::Once);
        descriptors.push(if name == "Die" {
            d
        } else {
            d.with_transition("Idle")
        });
    }
    descriptors
}

/// Ordered set of animations with lookup by name.
///
/// A sheet is produced wholesale by the builder or rebuilder and replaced wholesale on
/// change.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SpriteSheet {
    animations: Vec<AnimationMetadata>,
}

impl SpriteSheet {
    /// Wrap a metadata list, rejecting duplicate names.
    pub fn new(animations: Vec<AnimationMetadata>) -> SpriteResult<Self> {
        let sheet = Self { animations };
        sheet.validate()?;
        Ok(sheet)
    }

    /// Check name uniqueness. Transition targets are not resolved here.
    pub fn validate(&self) -> SpriteResult<()> {
        let mut seen = HashSet::with_capacity(self.animations.len());
        for anim in &self.animations {
            if !seen.insert(anim.name.as_str()) {
                return Err(ConfigError::DuplicateName(anim.name.clone()).into());
            }
        }
        Ok(())
    }

    /// Animations in row order.
    pub fn animations(&self) -> &[AnimationMetadata] {
        &self.animations
    }

    /// Find an animation by exact name.
    pub fn get(&self, name: &str) -> Option<&AnimationMetadata> {
        self.animations.iter().find(|a| a.name == name)
    }

    /// Number of animations.
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    /// True when the sheet holds no animations.
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Unwrap into the metadata list.
    pub fn into_animations(self) -> Vec<AnimationMetadata> {
        self.animations
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sheet/model.rs"]
mod tests;
