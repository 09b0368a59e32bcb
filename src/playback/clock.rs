use crate::foundation::core::Fps;

/// Identifies which tick source an externally scheduled tick belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickToken {
    generation: u64,
}

/// Converts elapsed wall time into whole ticks at `1000ms / fps`.
///
/// Every stop bumps the generation, so tokens handed out before a restart are rejected
/// afterwards and two sources can never drive the same player.
#[derive(Clone, Debug)]
pub struct TickClock {
    fps: Fps,
    carry_ms: f64,
    generation: u64,
    running: bool,
}

impl TickClock {
    /// Running clock at `fps`.
    pub fn new(fps: Fps) -> Self {
        Self {
            fps,
            carry_ms: 0.0,
            generation: 0,
            running: true,
        }
    }

    /// Current rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Tick period in milliseconds.
    pub fn period_ms(&self) -> f64 {
        self.fps.period_ms()
    }

    /// Time accumulated toward the next tick.
    pub fn carry_ms(&self) -> f64 {
        self.carry_ms
    }

    /// Whether a tick source is installed.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of tick sources torn down so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Token for the installed source; `None` once stopped.
    pub fn token(&self) -> Option<TickToken> {
        self.running.then_some(TickToken {
            generation: self.generation,
        })
    }

    /// True when `token` came from the installed source.
    pub fn accepts(&self, token: TickToken) -> bool {
        self.running && token.generation == self.generation
    }

    /// Tear down the installed source and drop carried time.
    pub fn stop(&mut self) {
        self.running = false;
        self.carry_ms = 0.0;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Stop the previous source, then install a new one at `fps`.
    pub fn restart(&mut self, fps: Fps) {
        self.stop();
        self.fps = fps;
        self.running = true;
    }

    /// Install a fresh source at the current rate, keeping carried time.
    ///
    /// Used when a transition switches animations mid-timeline: stale tokens are rejected
    /// but no elapsed time is dropped.
    pub fn hand_off(&mut self) {
        let carry = self.carry_ms;
        self.restart(self.fps);
        self.carry_ms = carry;
    }

    /// Add elapsed time and return how many whole ticks fell due.
    ///
    /// Negative or non-finite input is ignored. A stopped clock never ticks.
    pub fn drain(&mut self, elapsed_ms: f64) -> u64 {
        if !self.running || !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return 0;
        }
        let period = self.period_ms();
        let total = self.carry_ms + elapsed_ms;
        // Absorb rounding so 1000ms at 12fps is exactly 12 ticks.
        let ticks = (total / period + 1e-9).floor();
        self.carry_ms = (total - ticks * period).max(0.0);
        ticks as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/clock.rs"]
mod tests;
