//! Per-tick borrows handed to every phase.

use wl_agent::Roster;
use wl_core::AgentRng;
use wl_world::{MotionSink, World};

/// Everything an agent tick may read or touch outside its own state.
///
/// Built by the driver for one agent at a time; all borrows end when that
/// agent's tick returns.  The roster is mutable only so the scanner can
/// prune dead entries while it walks it.
pub struct TickEnv<'a> {
    /// Real seconds covered by this tick.
    pub dt:     f32,
    pub world:  &'a World,
    pub roster: &'a mut Roster,
    pub rng:    &'a mut AgentRng,
    pub sink:   &'a mut dyn MotionSink,
}

impl<'a> TickEnv<'a> {
    #[inline]
    pub fn new(
        dt:     f32,
        world:  &'a World,
        roster: &'a mut Roster,
        rng:    &'a mut AgentRng,
        sink:   &'a mut dyn MotionSink,
    ) -> Self {
        Self { dt, world, roster, rng, sink }
    }

    /// Sim seconds on the world clock.
    #[inline]
    pub fn now(&self) -> f64 {
        self.world.clock.now
    }

    /// In-game minutes covered by this tick.
    #[inline]
    pub fn game_minutes(&self) -> f32 {
        self.world.clock.game_minutes(self.dt)
    }
}
