//! Fluent builder for a freshly spawned [`AgentState`].
//!
//! # Usage
//!
//! ```rust
//! use wl_agent::AgentBuilder;
//! use wl_core::{AgentId, Mode, SpeciesConfig, SpeciesKind, Vec3};
//!
//! let deer = SpeciesConfig::for_kind(SpeciesKind::Deer);
//! let agent = AgentBuilder::new(AgentId(3), &deer)
//!     .position(Vec3::new(10.0, 0.0, -4.0))
//!     .build();
//!
//! assert_eq!(agent.mode(), Mode::Wander);
//! assert_eq!(agent.vitals.hp, deer.max_hp);
//! ```

use wl_core::{AgentId, Mode, SpeciesConfig, SpeciesKind, Vec3};

use crate::{AgentFlags, AgentModeContext, AgentState, AgentTimers, Motion, Pose, Vitals};

/// Builds an [`AgentState`] from species defaults plus per-spawn overrides.
pub struct AgentBuilder {
    id:           AgentId,
    kind:         SpeciesKind,
    start_mode:   Mode,
    max_hp:       f32,
    hp:           Option<f32>,
    invulnerable: bool,
    predator:     bool,
    pose:         Pose,
    home:         Option<Vec3>,
}

impl AgentBuilder {
    pub fn new(id: AgentId, species: &SpeciesConfig) -> Self {
        Self {
            id,
            kind:         species.kind,
            start_mode:   species.start_mode,
            max_hp:       species.max_hp,
            hp:           None,
            invulnerable: species.invulnerable,
            predator:     species.is_predator(),
            pose:         Pose::default(),
            home:         None,
        }
    }

    pub fn position(mut self, position: Vec3) -> Self {
        self.pose.position = position;
        self
    }

    pub fn forward(mut self, forward: Vec3) -> Self {
        self.pose.forward = forward;
        self
    }

    /// Start below full health.  Clamped to `max_hp`.
    pub fn hp(mut self, hp: f32) -> Self {
        self.hp = Some(hp);
        self
    }

    /// Override the species start mode for this one agent.
    pub fn start_mode(mut self, mode: Mode) -> Self {
        self.start_mode = mode;
        self
    }

    /// Centre of the wander area.  Defaults to the spawn position.
    pub fn home(mut self, home: Vec3) -> Self {
        self.home = Some(home);
        self
    }

    pub fn build(self) -> AgentState {
        let start = if self.start_mode == Mode::None { Mode::Idle } else { self.start_mode };
        AgentState {
            id:          self.id,
            kind:        self.kind,
            ctx:         AgentModeContext::new(start),
            vitals:      Vitals {
                hp:           self.hp.unwrap_or(self.max_hp).min(self.max_hp),
                max_hp:       self.max_hp,
                invulnerable: self.invulnerable,
            },
            pose:        self.pose,
            motion:      Motion::default(),
            flags:       AgentFlags { can_hold_ground: self.predator, ..AgentFlags::default() },
            timers:      AgentTimers::default(),
            home:        self.home.unwrap_or(self.pose.position),
            attack_side: 0,
        }
    }
}
