//! Simulation time model.
//!
//! # Design
//!
//! Agents are ticked once per frame with a real-time delta `dt` in seconds.
//! The world clock accumulates those deltas into `now` (sim seconds) and maps
//! real seconds onto in-game time through the configured day length:
//!
//!   game_minutes = dt * 1440 / day_length_real_secs
//!
//! With a day length of 1,440 real seconds, one real second is one in-game
//! minute.  Wound and bleed timers are kept in in-game minutes; hold-ground
//! cooldowns and scan timers are kept in sim seconds.

use std::fmt;

// ── Frame ─────────────────────────────────────────────────────────────────────

/// A monotonically increasing frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Frame(pub u64);

impl Frame {
    pub const ZERO: Frame = Frame(0);

    /// The frame after `self`.
    #[inline]
    pub fn next(self) -> Frame {
        Frame(self.0 + 1)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── WorldClock ────────────────────────────────────────────────────────────────

/// In-game minutes in one day.
const MINUTES_PER_DAY: f64 = 1_440.0;

/// Sim clock shared (read-only) by every agent during a frame.
#[derive(Clone, Debug)]
pub struct WorldClock {
    /// Sim seconds since start.
    pub now: f64,
    /// Real seconds that make up one in-game day.  Must be positive.
    pub day_length_real_secs: f32,
    /// While `true`, agent ticks are skipped entirely.
    pub paused: bool,
}

impl WorldClock {
    pub fn new(day_length_real_secs: f32) -> Self {
        Self {
            now: 0.0,
            day_length_real_secs,
            paused: false,
        }
    }

    /// Advance the clock by `dt` real seconds.  No-op while paused.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        if !self.paused {
            self.now += dt as f64;
        }
    }

    /// In-game minutes that elapse during `dt` real seconds.
    #[inline]
    pub fn game_minutes(&self, dt: f32) -> f32 {
        if self.day_length_real_secs <= 0.0 {
            return 0.0;
        }
        (dt as f64 * MINUTES_PER_DAY / self.day_length_real_secs as f64) as f32
    }

    /// In-game hours that elapse during `dt` real seconds.
    #[inline]
    pub fn world_hours(&self, dt: f32) -> f32 {
        self.game_minutes(dt) / 60.0
    }

    /// Sim seconds elapsed since `earlier`, never negative.
    #[inline]
    pub fn since(&self, earlier: f64) -> f64 {
        (self.now - earlier).max(0.0)
    }
}

impl Default for WorldClock {
    fn default() -> Self {
        // 1 real second = 1 in-game minute.
        Self::new(MINUTES_PER_DAY as f32)
    }
}

impl fmt::Display for WorldClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.2}s", self.now)?;
        if self.paused {
            f.write_str(" (paused)")?;
        }
        Ok(())
    }
}
