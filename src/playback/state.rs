use std::sync::Arc;

use crate::foundation::error::{SpriteResult, StateError};
use crate::sheet::model::{AnimationMetadata, Frame, LoopMode};

/// Travel direction; only `pingpong` ever turns around.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Increasing frame index.
    #[default]
    Forward,
    /// Decreasing frame index.
    Backward,
}

/// Signal that a finished `once` animation wants to hand off to another animation.
///
/// The target is an unresolved name; whoever owns the animation registry decides what to do
/// with it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransitionEvent {
    /// Name of the animation to switch to.
    pub target: String,
}

/// Next `(frame, direction)` for one tick. Pure in `(current, direction, loop_mode)`.
///
/// A zero-frame animation has nowhere to go; the input is returned unchanged.
pub fn next_frame(
    current: usize,
    direction: Direction,
    loop_mode: LoopMode,
    frame_count: usize,
) -> (usize, Direction) {
    let Some(last) = frame_count.checked_sub(1) else {
        return (current, direction);
    };
    match loop_mode {
        LoopMode::Loop => ((current + 1) % frame_count, direction),
        LoopMode::Once => ((current + 1).min(last), direction),
        LoopMode::PingPong if last == 0 => (0, direction),
        LoopMode::PingPong => match direction {
            Direction::Forward if current >= last => (last - 1, Direction::Backward),
            Direction::Forward => (current + 1, Direction::Forward),
            Direction::Backward if current == 0 => (1, Direction::Forward),
            Direction::Backward => (current - 1, Direction::Backward),
        },
    }
}

/// Playback position of one display slot.
///
/// Rebinding resets to frame 0 / forward only when the bound animation's identity
/// (`name`, loop mode, frame geometry) changes.
#[derive(Clone, Debug)]
pub struct PlaybackState {
    animation: Arc<AnimationMetadata>,
    frame_index: usize,
    direction: Direction,
    playing: bool,
    transition_sent: bool,
    empty_reported: bool,
}

impl PlaybackState {
    /// Fresh state at frame 0, playing.
    pub fn new(animation: impl Into<Arc<AnimationMetadata>>) -> Self {
        Self {
            animation: animation.into(),
            frame_index: 0,
            direction: Direction::Forward,
            playing: true,
            transition_sent: false,
            empty_reported: false,
        }
    }

    /// Bind to `animation`. Returns true when the identity changed and the state was reset.
    ///
    /// The stored animation is always replaced so non-identity fields (such as the
    /// transition target) take effect.
    pub fn bind(&mut self, animation: impl Into<Arc<AnimationMetadata>>) -> bool {
        let animation = animation.into();
        let changed = self.animation.identity() != animation.identity();
        self.animation = animation;
        if changed {
            self.reset();
        }
        changed
    }

    /// Back to frame 0, forward, with the transition latch cleared.
    pub fn reset(&mut self) {
        self.frame_index = 0;
        self.direction = Direction::Forward;
        self.transition_sent = false;
        self.empty_reported = false;
    }

    /// Apply one tick.
    ///
    /// Paused or zero-frame states do not move. A `once` animation that is already on its
    /// last frame emits its transition a single time, then holds.
    pub fn tick(&mut self) -> Option<TransitionEvent> {
        if !self.playing {
            return None;
        }
        let count = self.animation.frame_count();
        if count == 0 {
            if !self.empty_reported {
                tracing::debug!(animation = %self.animation.name, "animation has no frames; not advancing");
                self.empty_reported = true;
            }
            return None;
        }

        let mut event = None;
        if self.frame_index >= count - 1 && !self.transition_sent {
            if let Some(target) = self.animation.active_transition() {
                self.transition_sent = true;
                event = Some(TransitionEvent {
                    target: target.to_string(),
                });
            }
        }

        let (next, direction) = next_frame(
            self.frame_index,
            self.direction,
            self.animation.loop_mode,
            count,
        );
        self.frame_index = next;
        self.direction = direction;
        event
    }

    /// Resume tick delivery.
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Stop tick delivery. Position is untouched.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Whether ticks are applied.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current frame index.
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Current direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Bound animation.
    pub fn animation(&self) -> &Arc<AnimationMetadata> {
        &self.animation
    }

    /// Rectangle to draw, if the animation has any frames.
    pub fn visible_frame(&self) -> Option<Frame> {
        self.animation.frames.get(self.frame_index).copied()
    }

    /// Rectangle to draw; errors on a zero-frame animation.
    pub fn current_frame(&self) -> SpriteResult<Frame> {
        self.visible_frame().ok_or_else(|| {
            StateError::EmptyAnimation {
                name: self.animation.name.clone(),
            }
            .into()
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/state.rs"]
mod tests;
