//! `ModeStateMachine` — the per-tick driver and the only place modes change.

use std::sync::Arc;

use tracing::{debug, error, trace};

use wl_agent::{AgentState, FleeReason};
use wl_behavior::{Hook, ModeTable, SpeciesBehavior, TickEnv};
use wl_core::{AgentId, Mode, SpeciesConfig};
use wl_world::MotionSignals;

use crate::anim;
use crate::threat::{self, ThreatDecision};
use crate::wounds::{self, DamageOutcome, DamageSource};

/// One committed mode change.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Transition {
    pub agent: AgentId,
    pub from:  Mode,
    pub to:    Mode,
    /// Sim seconds on the world clock.
    pub at:    f64,
}

/// Drives one agent through its modes.
///
/// Owns the agent's species strategy and a handle to the shared
/// [`ModeTable`].  The agent's state is lent in on every call so the driver
/// can keep states and machines in separate slots.
pub struct ModeStateMachine {
    pub(crate) species: Box<dyn SpeciesBehavior>,
    table:              Arc<ModeTable>,
    journal:            Vec<Transition>,
}

impl ModeStateMachine {
    pub fn new(species: Box<dyn SpeciesBehavior>, table: Arc<ModeTable>) -> Self {
        Self { species, table, journal: Vec::new() }
    }

    #[inline]
    pub fn config(&self) -> &SpeciesConfig {
        self.species.config()
    }

    /// Every transition committed since the last drain, oldest first.
    pub fn drain_transitions(&mut self) -> impl Iterator<Item = Transition> + '_ {
        self.journal.drain(..)
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Run pre-process, process and post-process for one agent.
    ///
    /// Does nothing while the world clock is paused.
    pub fn tick(&mut self, agent: &mut AgentState, env: &mut TickEnv<'_>) {
        if env.world.clock.paused {
            return;
        }

        let wanted = match self.species.pre_process(agent, env) {
            Hook::Handled(wanted) => wanted,
            Hook::Continue        => self.base_pre_process(agent, env),
        };
        if let Some(mode) = wanted {
            self.request(agent, env, mode);
        }

        let wanted = match self.species.process(agent, env) {
            Hook::Handled(wanted) => wanted,
            Hook::Continue        => {
                let handlers = *self.table.get(agent.mode());
                (handlers.process)(agent, self.species.as_mut(), env)
            }
        };
        if let Some(mode) = wanted {
            self.request(agent, env, mode);
        }

        let signals = match self.species.post_process(agent, env) {
            Hook::Handled(signals) => signals,
            Hook::Continue         => self.base_post_process(agent),
        };
        env.sink.emit(agent.id, signals);
    }

    fn base_pre_process(&mut self, agent: &mut AgentState, env: &mut TickEnv<'_>) -> Option<Mode> {
        let hours = env.world.clock.world_hours(env.dt);
        agent.ctx.advance_time(env.dt, hours);
        agent.motion.pursuit_scale = 1.0;

        let mut wanted = None;
        if agent.timers.stun_remaining > 0.0 {
            agent.timers.stun_remaining = (agent.timers.stun_remaining - env.dt).max(0.0);
            if agent.timers.stun_remaining == 0.0 && agent.mode() == Mode::Stunned {
                wanted = Some(self.config().default_mode);
            }
        }

        if let Some(mode) = wounds::advance(agent, self.species.config(), env) {
            return Some(mode);
        }
        if wanted.is_none() {
            self.hold_ground_check(agent, env);
        }
        wanted
    }

    fn base_post_process(&self, agent: &AgentState) -> MotionSignals {
        match anim::derive_signals(agent, self.species.config()) {
            Ok(signals) => signals,
            Err(e) => {
                error!("{e}; attack animation aborted");
                anim::movement_signals(agent, self.species.config())
            }
        }
    }

    // ── Requests ──────────────────────────────────────────────────────────

    /// Ask for `mode`.  Dropped once the agent is dead.
    ///
    /// Returns `true` if a transition was committed.
    pub fn request(&mut self, agent: &mut AgentState, env: &mut TickEnv<'_>, mode: Mode) -> bool {
        if agent.is_dead() {
            trace!("{}: dead, dropping request for {mode}", agent.id);
            return false;
        }
        self.route(agent, env, mode)
    }

    /// Ask for `mode` even if the agent is dead (revive, scripted override).
    /// Arbitration still applies.
    pub fn request_forced(&mut self, agent: &mut AgentState, env: &mut TickEnv<'_>, mode: Mode) -> bool {
        self.route(agent, env, mode)
    }

    fn route(&mut self, agent: &mut AgentState, env: &mut TickEnv<'_>, requested: Mode) -> bool {
        match self.resolve(agent, env, requested) {
            Some(mode) if mode != agent.mode() => {
                self.commit(agent, env, mode);
                true
            }
            Some(_) | None => {
                trace!("{}: request for {requested} suppressed in {}", agent.id, agent.mode());
                false
            }
        }
    }

    /// Exit the current mode, enter `new`, then flip the context.
    fn commit(&mut self, agent: &mut AgentState, env: &mut TickEnv<'_>, new: Mode) {
        let old = agent.mode();

        if !self.species.exit_mode(agent, old, env).is_handled() {
            let exit = self.table.get(old).exit;
            exit(agent, self.species.config(), env);
        }
        if !self.species.enter_mode(agent, new, env).is_handled() {
            let enter = self.table.get(new).enter;
            enter(agent, self.species.config(), env);
        }
        agent.ctx.flip_mode(new);

        let at = env.now();
        debug!("{}: {old} -> {new} at {at:.2}s", agent.id);
        self.journal.push(Transition { agent: agent.id, from: old, to: new, at });
    }

    // ── Phase helpers ─────────────────────────────────────────────────────

    /// Run the threat negotiator and commit HoldGround on an inner hit.
    ///
    /// Returns `true` when the agent now holds its ground.
    pub fn hold_ground_check(&mut self, agent: &mut AgentState, env: &mut TickEnv<'_>) -> bool {
        match threat::evaluate(agent, self.species.as_mut(), env) {
            ThreatDecision::Hold(reading) => {
                agent.ctx.hold_ground_reason = Some(reading.category);
                let held = self.request(agent, env, Mode::HoldGround) || agent.mode() == Mode::HoldGround;
                if !held {
                    agent.ctx.hold_ground_reason = None;
                    return false;
                }
                agent.timers.hold_ground_last[reading.category.index()] = Some(env.now());
                debug!(
                    "{}: holding ground, {} at {:.1}m (inner {:.1}m)",
                    agent.id, reading.category, reading.distance, reading.inner_radius
                );
                true
            }
            ThreatDecision::Handled(true) => {
                self.request(agent, env, Mode::HoldGround) || agent.mode() == Mode::HoldGround
            }
            ThreatDecision::Handled(false)
            | ThreatDecision::SlowDown { .. }
            | ThreatDecision::Clear
            | ThreatDecision::Gated => false,
        }
    }

    /// Apply damage and request Dead if it was lethal.  Wounded prey runs.
    pub fn apply_damage(
        &mut self,
        agent:         &mut AgentState,
        env:           &mut TickEnv<'_>,
        amount:        f32,
        bleed_minutes: f32,
        source:        DamageSource,
    ) -> DamageOutcome {
        let outcome = wounds::apply_damage(agent, self.species.config(), env, amount, bleed_minutes, source);
        match outcome {
            DamageOutcome::Killed => {
                self.request(agent, env, Mode::Dead);
            }
            DamageOutcome::Wounded if !self.config().is_predator() && self.config().reactive => {
                if agent.mode() != Mode::Flee {
                    agent.flags.flee_reason = Some(FleeReason::Damage);
                }
                self.request(agent, env, Mode::Flee);
            }
            DamageOutcome::Wounded | DamageOutcome::Survived | DamageOutcome::Ignored => {}
        }
        outcome
    }

    /// Stun for `secs` seconds.  The agent returns to its default mode when
    /// the timer runs out.
    pub fn stun(&mut self, agent: &mut AgentState, env: &mut TickEnv<'_>, secs: f32) -> bool {
        if agent.is_dead() || !(secs > 0.0) {
            return false;
        }
        agent.timers.stun_remaining = agent.timers.stun_remaining.max(secs);
        self.request(agent, env, Mode::Stunned) || agent.mode() == Mode::Stunned
    }
}
