use std::sync::Arc;

use crate::foundation::core::Fps;
use crate::playback::clock::{TickClock, TickToken};
use crate::playback::state::{PlaybackState, TransitionEvent};
use crate::sheet::model::{AnimationMetadata, Frame};

/// Result of feeding elapsed time (or one scheduled tick) to a [`Player`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Advance {
    /// Frame index after all due ticks.
    pub frame_index: usize,
    /// Rectangle to draw; `None` for a zero-frame animation.
    pub frame: Option<Frame>,
    /// Hand-off requested by a finished `once` animation.
    pub transition: Option<TransitionEvent>,
    /// Ticks applied by this call.
    pub ticks: u64,
    /// Ticks that fell due after `transition` was emitted and were not applied. Pass them to
    /// [`Player::follow_transition`] or [`Player::resume`].
    pub pending_ticks: u64,
}

/// One display slot: a [`PlaybackState`] driven by its own [`TickClock`].
///
/// The player is the only writer of its state. Rebinding the animation or changing the rate
/// stops the running tick source before the new one is installed.
#[derive(Clone, Debug)]
pub struct Player {
    state: PlaybackState,
    clock: TickClock,
}

impl Player {
    /// Player bound to `animation`, playing at `fps`.
    pub fn new(animation: impl Into<Arc<AnimationMetadata>>, fps: Fps) -> Self {
        Self {
            state: PlaybackState::new(animation),
            clock: TickClock::new(fps),
        }
    }

    /// Bind a (possibly) different animation.
    ///
    /// On identity change the old tick source is stopped, the position resets and a fresh
    /// source is installed; returns true in that case.
    pub fn rebind(&mut self, animation: impl Into<Arc<AnimationMetadata>>) -> bool {
        let animation = animation.into();
        if self.state.animation().identity() == animation.identity() {
            self.state.bind(animation);
            return false;
        }
        self.state.bind(animation);
        self.clock.restart(self.clock.fps());
        tracing::debug!(animation = %self.state.animation().name, "player rebound");
        true
    }

    /// Change the playback rate, replacing the tick source. Position is kept.
    pub fn set_fps(&mut self, fps: Fps) {
        if fps != self.clock.fps() {
            self.clock.restart(fps);
        }
    }

    /// Resume tick delivery.
    pub fn play(&mut self) {
        self.state.play();
    }

    /// Gate tick delivery. Neither position nor carried time changes while paused.
    pub fn pause(&mut self) {
        self.state.pause();
    }

    /// Feed elapsed wall time and apply the ticks that fell due.
    ///
    /// Ticking stops at the first transition event; the rest come back as
    /// [`Advance::pending_ticks`].
    pub fn advance(&mut self, elapsed_ms: f64) -> Advance {
        if !self.state.is_playing() {
            return self.snapshot(None, 0, 0);
        }
        let due = self.clock.drain(elapsed_ms);
        self.run(due)
    }

    /// Switch to the transition target and spend `pending_ticks` on it.
    ///
    /// Unlike [`Player::rebind`], carried time survives the switch so the slot's timeline
    /// is the same however elapsed time was split across calls.
    pub fn follow_transition(
        &mut self,
        target: impl Into<Arc<AnimationMetadata>>,
        pending_ticks: u64,
    ) -> Advance {
        if self.state.bind(target) {
            self.clock.hand_off();
            tracing::debug!(animation = %self.state.animation().name, "followed transition");
        }
        self.run(pending_ticks)
    }

    /// Spend `pending_ticks` on the current binding (for a transition nobody follows).
    pub fn resume(&mut self, pending_ticks: u64) -> Advance {
        self.run(pending_ticks)
    }

    /// Token for scheduling ticks from outside; invalidated by rebinding or a rate change.
    pub fn tick_token(&self) -> Option<TickToken> {
        self.clock.token()
    }

    /// Apply one externally scheduled tick. Stale tokens are rejected with `None`.
    pub fn tick(&mut self, token: TickToken) -> Option<Advance> {
        if !self.clock.accepts(token) {
            return None;
        }
        if !self.state.is_playing() {
            return Some(self.snapshot(None, 0, 0));
        }
        let transition = self.state.tick();
        Some(self.snapshot(transition, 1, 0))
    }

    /// Read-only view of the playback position.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Read-only view of the tick source.
    pub fn clock(&self) -> &TickClock {
        &self.clock
    }

    fn run(&mut self, due: u64) -> Advance {
        let mut applied = 0;
        while applied < due {
            applied += 1;
            if let Some(event) = self.state.tick() {
                return self.snapshot(Some(event), applied, due - applied);
            }
        }
        self.snapshot(None, applied, 0)
    }

    fn snapshot(
        &self,
        transition: Option<TransitionEvent>,
        ticks: u64,
        pending_ticks: u64,
    ) -> Advance {
        Advance {
            frame_index: self.state.frame_index(),
            frame: self.state.visible_frame(),
            transition,
            ticks,
            pending_ticks,
        }
    }
}

/// Feed `elapsed_ms` to `player`; see [`Player::advance`].
pub fn advance(player: &mut Player, elapsed_ms: f64) -> Advance {
    player.advance(elapsed_ms)
}

#[cfg(test)]
#[path = "../../tests/unit/playback/player.rs"]
mod tests;
