//! `AgentState` — everything one agent owns between ticks.

use wl_core::{AgentId, Mode, SpeciesKind, ThreatCategory, Vec3};

use crate::AgentModeContext;

// ── Parts ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Vitals {
    pub hp:           f32,
    pub max_hp:       f32,
    pub invulnerable: bool,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    /// Horizontal facing direction.  Not necessarily normalized.
    pub forward:  Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self { position: Vec3::ZERO, forward: Vec3::FORWARD }
    }
}

/// Locomotion targets written by mode behaviors and read by post-process.
#[derive(Clone, Debug, PartialEq)]
pub struct Motion {
    /// Desired speed in metres per second before slowdown.
    pub goal_speed:    f32,
    /// Degrees per second.
    pub turn_speed:    f32,
    /// Fraction of the way to the pursuit point the agent is allowed to go;
    /// 1 means unrestricted.  Reset each tick by pre-process.
    pub pursuit_scale: f32,
    /// Destination of the current path, if one is running.
    pub path_target:   Option<Vec3>,
}

impl Default for Motion {
    fn default() -> Self {
        Self { goal_speed: 0.0, turn_speed: 0.0, pursuit_scale: 1.0, path_target: None }
    }
}

/// Why an agent is currently fleeing.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FleeReason {
    /// Ran from a detected target.
    Detection,
    /// Ran through and past its target after an attack.
    AfterPassingAttack,
    /// Sent off by a scripted trigger volume.
    TriggerVolume,
    /// Ran after being hurt.
    Damage,
}

/// Behavior flags set by modes, scripts and the pack coordinator.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentFlags {
    pub too_scared_to_attack:   bool,
    /// Flee at retreat speed until the next Flee re-request.
    pub use_retreat_speed:      bool,
    pub flee_reason:            Option<FleeReason>,
    pub can_hold_ground:        bool,
    pub in_pack:                bool,
    pub pack_combat_restricted: bool,
    /// Walking to a scripted position; never flees on detection.
    pub wander_to_position:     bool,
    pub scanning_enabled:       bool,
}

impl Default for AgentFlags {
    fn default() -> Self {
        Self {
            too_scared_to_attack:   false,
            use_retreat_speed:      false,
            flee_reason:            None,
            can_hold_ground:        true,
            in_pack:                false,
            pack_combat_restricted: false,
            wander_to_position:     false,
            scanning_enabled:       true,
        }
    }
}

/// Per-agent timers.  Absolute stamps are sim seconds on the world clock.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentTimers {
    /// Seconds of stun left.  Zero means not stunned.
    pub stun_remaining:   f32,
    pub next_scan_at:     f64,
    /// When the agent last held ground for each threat category.
    pub hold_ground_last: [Option<f64>; ThreatCategory::COUNT],
}

impl Default for AgentTimers {
    fn default() -> Self {
        Self {
            stun_remaining:   0.0,
            next_scan_at:     0.0,
            hold_ground_last: [None; ThreatCategory::COUNT],
        }
    }
}

// ── AgentState ────────────────────────────────────────────────────────────────

/// A single wildlife agent.
#[derive(Clone, Debug)]
pub struct AgentState {
    pub id:          AgentId,
    pub kind:        SpeciesKind,
    pub ctx:         AgentModeContext,
    pub vitals:      Vitals,
    pub pose:        Pose,
    pub motion:      Motion,
    pub flags:       AgentFlags,
    pub timers:      AgentTimers,
    /// Where wandering is centred.
    pub home:        Vec3,
    /// Index of the attack animation side chosen on entering Attack.
    pub attack_side: u8,
}

impl AgentState {
    #[inline]
    pub fn mode(&self) -> Mode {
        self.ctx.current_mode()
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.ctx.is_in(Mode::Dead)
    }

    /// Stunned with time left on the stun timer.
    #[inline]
    pub fn stun_active(&self) -> bool {
        self.ctx.is_in(Mode::Stunned) && self.timers.stun_remaining > 0.0
    }

    #[inline]
    pub fn is_fleeing_for(&self, reason: FleeReason) -> bool {
        self.ctx.is_in(Mode::Flee) && self.flags.flee_reason == Some(reason)
    }

    /// Hit points as a fraction of maximum.
    pub fn health_fraction(&self) -> f32 {
        if self.vitals.max_hp <= 0.0 {
            return 0.0;
        }
        (self.vitals.hp / self.vitals.max_hp).clamp(0.0, 1.0)
    }
}
