//! `AgentModeContext` — the per-agent mode record.
//!
//! # Mutation rules
//!
//! The mode fields (`current_mode`, `previous_mode`, both time-in-mode
//! timers) and the bleed-out fields are private.  They change only through:
//!
//! | Method                | Used by                                        |
//! |-----------------------|------------------------------------------------|
//! | [`flip_mode`]         | the state machine's commit step                |
//! | [`advance_time`]      | the state machine's pre-process phase          |
//! | [`start_bleed_out`]   | damage application                             |
//! | [`progress_bleed`]    | the wound tracker                              |
//! | [`end_bleed_out`]     | death or recovery                              |
//!
//! Target, hold-ground reason and the wound fields are plain public data.
//!
//! [`flip_mode`]: AgentModeContext::flip_mode
//! [`advance_time`]: AgentModeContext::advance_time
//! [`start_bleed_out`]: AgentModeContext::start_bleed_out
//! [`progress_bleed`]: AgentModeContext::progress_bleed
//! [`end_bleed_out`]: AgentModeContext::end_bleed_out

use wl_core::{Mode, TargetId, ThreatCategory};

/// Why a bleed-out stopped.  A bleed-out never ends for any other reason.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BleedEnd {
    Death,
    Recovery,
}

/// Mutable mode and wound record owned by one agent.
#[derive(Clone, Debug)]
pub struct AgentModeContext {
    current_mode:             Mode,
    previous_mode:            Mode,
    time_in_mode:             f32,
    time_in_mode_world_hours: f32,

    /// Weak handle to the current target; resolve through the roster.
    pub current_target:          Option<TargetId>,
    /// The deterrent that made the agent hold its ground, if any.
    pub hold_ground_reason:      Option<ThreatCategory>,
    pub wounded:                 bool,
    pub elapsed_wounded_minutes: f32,

    bleeding_out:              bool,
    elapsed_bleed_minutes:     f32,
    death_after_bleed_minutes: f32,
}

impl AgentModeContext {
    /// A fresh context sitting in `start_mode` with every timer at zero.
    pub fn new(start_mode: Mode) -> Self {
        Self {
            current_mode:              start_mode,
            previous_mode:             Mode::None,
            time_in_mode:              0.0,
            time_in_mode_world_hours:  0.0,
            current_target:            None,
            hold_ground_reason:        None,
            wounded:                   false,
            elapsed_wounded_minutes:   0.0,
            bleeding_out:              false,
            elapsed_bleed_minutes:     0.0,
            death_after_bleed_minutes: 0.0,
        }
    }

    // ── Mode ──────────────────────────────────────────────────────────────

    #[inline]
    pub fn current_mode(&self) -> Mode {
        self.current_mode
    }

    #[inline]
    pub fn previous_mode(&self) -> Mode {
        self.previous_mode
    }

    /// Sim seconds spent in the current mode.
    #[inline]
    pub fn time_in_mode(&self) -> f32 {
        self.time_in_mode
    }

    #[inline]
    pub fn time_in_mode_world_hours(&self) -> f32 {
        self.time_in_mode_world_hours
    }

    #[inline]
    pub fn is_in(&self, mode: Mode) -> bool {
        self.current_mode == mode
    }

    /// Accumulate time spent in the current mode.
    pub fn advance_time(&mut self, dt: f32, world_hours: f32) {
        self.time_in_mode += dt;
        self.time_in_mode_world_hours += world_hours;
    }

    /// Make `new` the current mode and zero both time-in-mode timers.
    ///
    /// Only the commit step of the state machine calls this, after the exit
    /// and enter handlers have run.  Returns the outgoing mode.
    pub fn flip_mode(&mut self, new: Mode) -> Mode {
        let old = self.current_mode;
        self.previous_mode = old;
        self.current_mode = new;
        self.time_in_mode = 0.0;
        self.time_in_mode_world_hours = 0.0;
        old
    }

    // ── Bleed-out ─────────────────────────────────────────────────────────

    #[inline]
    pub fn bleeding_out(&self) -> bool {
        self.bleeding_out
    }

    #[inline]
    pub fn elapsed_bleed_minutes(&self) -> f32 {
        self.elapsed_bleed_minutes
    }

    #[inline]
    pub fn death_after_bleed_minutes(&self) -> f32 {
        self.death_after_bleed_minutes
    }

    /// In-game minutes left before the bleed-out becomes lethal.
    pub fn bleed_remaining_minutes(&self) -> Option<f32> {
        self.bleeding_out
            .then(|| (self.death_after_bleed_minutes - self.elapsed_bleed_minutes).max(0.0))
    }

    /// Begin a bleed-out lasting `minutes`, or shorten the running one.
    ///
    /// A running countdown is only replaced when the new one would end
    /// sooner.  Returns `true` when the countdown changed.
    pub fn start_bleed_out(&mut self, minutes: f32) -> bool {
        if !(minutes > 0.0) {
            return false;
        }
        match self.bleed_remaining_minutes() {
            Some(remaining) if minutes >= remaining => false,
            Some(_) => {
                self.death_after_bleed_minutes = self.elapsed_bleed_minutes + minutes;
                true
            }
            None => {
                self.bleeding_out = true;
                self.elapsed_bleed_minutes = 0.0;
                self.death_after_bleed_minutes = minutes;
                true
            }
        }
    }

    /// Move bleed progress forward by `minutes` without passing `ceiling`
    /// and never past the death threshold.  Progress never moves backwards.
    ///
    /// Returns `true` once progress sits at the death threshold.
    pub fn progress_bleed(&mut self, minutes: f32, ceiling: f32) -> bool {
        if !self.bleeding_out {
            return false;
        }
        let death = self.death_after_bleed_minutes;
        let old = self.elapsed_bleed_minutes;
        let next = (old + minutes).min(ceiling).max(old);
        self.elapsed_bleed_minutes = next.min(death);
        self.elapsed_bleed_minutes >= death
    }

    /// Stop the bleed-out.  Death keeps the final progress for inspection;
    /// recovery clears it.
    pub fn end_bleed_out(&mut self, reason: BleedEnd) {
        self.bleeding_out = false;
        if reason == BleedEnd::Recovery {
            self.elapsed_bleed_minutes = 0.0;
            self.death_after_bleed_minutes = 0.0;
        }
    }
}

impl Default for AgentModeContext {
    fn default() -> Self {
        Self::new(Mode::Idle)
    }
}
