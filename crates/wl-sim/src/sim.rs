//! The `Sim` struct and its frame loop.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use wl_agent::{AgentBuilder, AgentState, PlayerSnapshot, Published, Roster};
use wl_behavior::{ModeTable, SpeciesBehavior, StandardSpecies, TickEnv};
use wl_brain::{DamageOutcome, DamageSource, ModeStateMachine, Transition};
use wl_core::{AgentId, AgentRng, Frame, Mode, SpeciesConfig, SpeciesKind, Vec3, WorldConfig};
use wl_world::{MotionSink, World};

use crate::{FrameSummary, SimError, SimObserver, SimResult};

// ── AgentSlot ─────────────────────────────────────────────────────────────────

/// Everything one spawned agent owns.
///
/// State and machine sit side by side so the machine can borrow the state
/// mutably while the rest of the slot stays untouched.
pub struct AgentSlot {
    pub state:   AgentState,
    pub machine: ModeStateMachine,
    rng:         AgentRng,
    /// Published with every snapshot so scanners can read who hunts whom.
    prey:        Arc<[SpeciesKind]>,
}

impl AgentSlot {
    fn snapshot(&self) -> Published {
        let state = &self.state;
        Published {
            id:         state.id,
            kind:       Some(state.kind),
            position:   state.pose.position,
            alive:      !state.is_dead(),
            destroyed:  false,
            vulnerable: state.ctx.wounded || state.stun_active(),
            prey:       Arc::clone(&self.prey),
        }
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The population driver.
///
/// `Sim<S>` owns every agent slot, the published roster, the world and the
/// motion sink, and drives the frame loop described in the crate docs.
/// Agent ids are slot indices and are never reused.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: MotionSink> {
    /// World configuration (seed, frame length, total frames, …).
    pub config: WorldConfig,

    /// Clock, flags, deterrents and the external capability seams.
    /// Hosts place and toggle threat sources through `world.threats`.
    pub world: World,

    /// Published snapshots of every agent plus the player.
    pub roster: Roster,

    /// The next frame to run.
    pub frame: Frame,

    /// Receives one `MotionSignals` per agent per frame.
    pub sink: S,

    pub(crate) slots:   Vec<Option<AgentSlot>>,
    pub(crate) species: FxHashMap<String, Arc<SpeciesConfig>>,
    pub(crate) table:   Arc<ModeTable>,
    /// Transitions committed outside the frame loop, reported next frame.
    pub(crate) pending: Vec<Transition>,
}

impl<S: MotionSink> Sim<S> {
    // ── Frame loop ────────────────────────────────────────────────────────

    /// Run from the current frame to `config.total_frames`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        while self.frame.0 < self.config.total_frames {
            self.step(observer);
        }
        observer.on_sim_end(self.frame);
    }

    /// Run exactly `n` frames from the current position (ignores
    /// `total_frames`).
    pub fn run_frames<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    /// Tick every spawned agent once.  Returns how many were ticked.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> usize {
        let frame = self.frame;
        let dt = self.config.frame_secs;
        observer.on_frame_start(frame);
        for transition in self.pending.drain(..) {
            observer.on_transition(frame, &transition);
        }

        let mut ticked = 0;
        for slot in self.slots.iter_mut().flatten() {
            let mut env = TickEnv::new(dt, &self.world, &mut self.roster, &mut slot.rng, &mut self.sink);
            slot.machine.tick(&mut slot.state, &mut env);
            self.roster.publish(slot.snapshot());
            for transition in slot.machine.drain_transitions() {
                observer.on_transition(frame, &transition);
            }
            ticked += 1;
        }

        self.world.clock.advance(dt);
        self.frame = frame.next();
        observer.on_frame_end(frame, ticked);

        let interval = self.config.output_interval_frames;
        if interval > 0 && self.frame.0 % interval == 0 {
            observer.on_summary(&self.summary(frame));
        }
        ticked
    }

    /// Live and dead counts as of now, labelled with `frame`.
    pub fn summary(&self, frame: Frame) -> FrameSummary {
        let dead = self.agents().filter(|a| a.is_dead()).count();
        FrameSummary {
            frame,
            time: self.world.now(),
            live: self.agent_count() - dead,
            dead,
        }
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Spawn a registered species at `position` with the base pipeline.
    pub fn spawn(&mut self, species: &str, position: Vec3) -> SimResult<AgentId> {
        let config = self
            .species
            .get(species)
            .cloned()
            .ok_or_else(|| SimError::UnknownSpecies(species.to_string()))?;
        self.spawn_with(Box::new(StandardSpecies::new(config)), position)
    }

    /// Spawn an agent driven by a custom species strategy.
    pub fn spawn_with(&mut self, species: Box<dyn SpeciesBehavior>, position: Vec3) -> SimResult<AgentId> {
        let id = AgentId::try_from(self.slots.len())
            .map_err(|_| SimError::Config("agent id space exhausted".into()))?;
        species.config().validate()?;

        let state = AgentBuilder::new(id, species.config()).position(position).build();
        let prey: Arc<[SpeciesKind]> = species.config().prey.as_slice().into();
        let slot = AgentSlot {
            state,
            machine: ModeStateMachine::new(species, Arc::clone(&self.table)),
            rng:     AgentRng::new(self.config.seed, id),
            prey,
        };

        info!(
            "spawned {id} ({}) at ({:.1}, {:.1}) in {}",
            slot.machine.config().name,
            position.x,
            position.z,
            slot.state.mode()
        );
        self.roster.publish(slot.snapshot());
        self.slots.push(Some(slot));
        Ok(id)
    }

    /// Remove an agent from the world.  Its id stays retired and any
    /// handle to it resolves to nothing from now on.
    pub fn despawn(&mut self, id: AgentId) -> SimResult<()> {
        let mut slot = self.slots.get_mut(id.index()).and_then(Option::take).ok_or(SimError::NotSpawned(id))?;
        self.roster.mark_destroyed(id);
        if let Some(player) = self.roster.player_mut() {
            if player.struggling_with == Some(id) {
                player.struggling_with = None;
            }
        }
        self.pending.extend(slot.machine.drain_transitions());
        info!("despawned {id} in {}", slot.state.mode());
        Ok(())
    }

    #[inline]
    pub fn agent(&self, id: AgentId) -> Option<&AgentState> {
        self.slots.get(id.index()).and_then(Option::as_ref).map(|s| &s.state)
    }

    /// Direct access for hosts that drive flags or poses themselves.
    #[inline]
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut AgentState> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut).map(|s| &mut s.state)
    }

    /// Every spawned agent, in id order.
    pub fn agents(&self) -> impl Iterator<Item = &AgentState> {
        self.slots.iter().flatten().map(|s| &s.state)
    }

    pub fn agent_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn set_player(&mut self, player: PlayerSnapshot) {
        self.roster.set_player(player);
    }

    // ── External events ───────────────────────────────────────────────────

    /// Deal damage to an agent.  A lethal hit commits Dead immediately.
    pub fn apply_damage(
        &mut self,
        id:            AgentId,
        amount:        f32,
        bleed_minutes: f32,
        source:        DamageSource,
    ) -> SimResult<DamageOutcome> {
        self.with_agent(id, |machine, agent, env| {
            machine.apply_damage(agent, env, amount, bleed_minutes, source)
        })
    }

    /// Stun an agent for `secs` sim seconds.
    pub fn stun(&mut self, id: AgentId, secs: f32) -> SimResult<bool> {
        self.with_agent(id, |machine, agent, env| machine.stun(agent, env, secs))
    }

    /// Ask an agent's machine for `mode` through normal arbitration.
    pub fn request_mode(&mut self, id: AgentId, mode: Mode) -> SimResult<bool> {
        self.with_agent(id, |machine, agent, env| machine.request(agent, env, mode))
    }

    /// Like [`request_mode`](Self::request_mode) but also reaches dead
    /// agents.
    pub fn request_forced(&mut self, id: AgentId, mode: Mode) -> SimResult<bool> {
        self.with_agent(id, |machine, agent, env| machine.request_forced(agent, env, mode))
    }

    /// Lock an agent and the player in a struggle.
    ///
    /// Returns `false` (and leaves the player untouched) if the agent could
    /// not enter Struggle, e.g. because it is dead.
    pub fn begin_struggle(&mut self, id: AgentId) -> SimResult<bool> {
        if self.roster.player().is_none() {
            return Err(SimError::NoPlayer);
        }
        self.with_agent(id, |machine, agent, env| {
            let entered = machine.request(agent, env, Mode::Struggle) || agent.mode() == Mode::Struggle;
            if entered {
                if let Some(player) = env.roster.player_mut() {
                    player.struggling_with = Some(agent.id);
                }
            }
            entered
        })
    }

    /// Release a struggle.  The agent returns to its default mode.
    pub fn end_struggle(&mut self, id: AgentId) -> SimResult<bool> {
        self.with_agent(id, |machine, agent, env| {
            if let Some(player) = env.roster.player_mut() {
                if player.struggling_with == Some(agent.id) {
                    player.struggling_with = None;
                }
            }
            if agent.mode() != Mode::Struggle {
                return false;
            }
            let default = machine.config().default_mode;
            machine.request(agent, env, default)
        })
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Lend one agent's machine, state and a zero-length tick environment
    /// to `f`, then republish the agent and queue its transitions.
    fn with_agent<T>(
        &mut self,
        id: AgentId,
        f:  impl FnOnce(&mut ModeStateMachine, &mut AgentState, &mut TickEnv<'_>) -> T,
    ) -> SimResult<T> {
        let slot = self
            .slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(SimError::NotSpawned(id))?;
        let mut env = TickEnv::new(0.0, &self.world, &mut self.roster, &mut slot.rng, &mut self.sink);
        let out = f(&mut slot.machine, &mut slot.state, &mut env);
        self.roster.publish(slot.snapshot());

        let before = self.pending.len();
        self.pending.extend(slot.machine.drain_transitions());
        if self.pending.len() > before {
            debug!("{id}: {} transition(s) queued outside the frame loop", self.pending.len() - before);
        }
        Ok(out)
    }
}
