//! Hold-ground negotiation.
//!
//! # Algorithm
//!
//! For predators that may currently hold ground, every deterrent category is
//! measured in [`ThreatCategory::PRIORITY`] order:
//!
//! 1. Skip the category if the agent held ground for it within the last
//!    `cooldown_secs`.
//! 2. Build a [`ThreatReading`] (nearest source, or the containing field).
//!    No source, or a failed field lookup, skips the category.
//! 3. The first reading inside its inner radius wins: the caller commits
//!    HoldGround.
//!
//! With no inner hit and slowdown allowed, the first reading inside its
//! outer radius sets the agent's pursuit scale to the eased factor
//! `sqrt(clamp((d - inner) / (outer - inner), 0, 1))` and the agent keeps
//! its mode.

use tracing::debug;

use wl_agent::{AgentState, HeldItem};
use wl_behavior::{Hook, SpeciesBehavior, TickEnv};
use wl_core::{Mode, SpeciesConfig, ThreatCategory, ThreatReading, Vec3};
use wl_world::FieldKind;

/// What the negotiator decided for one tick.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ThreatDecision {
    /// The agent may not hold ground right now; nothing was measured.
    Gated,
    /// The species hook answered for the whole negotiation.
    Handled(bool),
    /// Inside the inner radius of `reading`.
    Hold(ThreatReading),
    /// Inside only the outer radius; speed and pursuit were scaled.
    SlowDown { reading: ThreatReading, factor: f32 },
    /// Nothing in range.
    Clear,
}

/// Whether the negotiator runs at all for this agent.
pub fn gate(agent: &AgentState, config: &SpeciesConfig) -> bool {
    let mode = agent.mode();
    config.is_predator()
        && agent.flags.can_hold_ground
        && !mode.is_early_out_hold_ground()
        && !(mode == Mode::Attack && config.hold_ground.ignore_stimuli_when_attacking)
}

/// Measure every deterrent category and decide.
///
/// Never returns `Hold` for an agent in an early-out mode.
pub fn evaluate(agent: &mut AgentState, species: &mut dyn SpeciesBehavior, env: &mut TickEnv<'_>) -> ThreatDecision {
    if !gate(agent, species.config()) {
        return ThreatDecision::Gated;
    }
    if let Hook::Handled(hold) = species.hold_ground(agent, env) {
        return ThreatDecision::Handled(hold);
    }

    let now = env.now();
    let cooldown = species.config().hold_ground.cooldown_secs as f64;
    let mut first_outer: Option<ThreatReading> = None;

    for category in ThreatCategory::PRIORITY {
        let cooling = agent.timers.hold_ground_last[category.index()]
            .is_some_and(|at| now - at < cooldown);
        if cooling {
            continue;
        }
        let Some(reading) = read(category, agent, species.config(), env) else {
            continue;
        };
        let inner = species
            .threat_check(agent, &reading)
            .or_else(|| reading.within_inner());
        if inner {
            return ThreatDecision::Hold(reading);
        }
        if first_outer.is_none() && reading.within_outer() {
            first_outer = Some(reading);
        }
    }

    match first_outer {
        Some(reading) if species.config().hold_ground.allow_slowdown => {
            let factor = reading.slowdown_factor();
            agent.motion.pursuit_scale = agent.motion.pursuit_scale.min(factor);
            ThreatDecision::SlowDown { reading, factor }
        }
        _ => ThreatDecision::Clear,
    }
}

/// One category's reading for `agent`, or `None` when nothing of that kind
/// is around.
pub fn read(
    category: ThreatCategory,
    agent:    &AgentState,
    config:   &SpeciesConfig,
    env:      &TickEnv<'_>,
) -> Option<ThreatReading> {
    let pos = agent.pose.position;

    if category.is_field() {
        let kind = match category {
            ThreatCategory::SafeHaven => FieldKind::SafeHaven,
            _                         => FieldKind::Hazard,
        };
        let anchor = field_anchor(agent, env)?;
        let Some(field) = env.world.threats.containing_field(anchor, kind) else {
            debug!("{}: no {category} around {anchor}, skipping", agent.id);
            return None;
        };
        return Some(ThreatReading {
            category,
            inner_radius: field.radius,
            outer_radius: field.radius + config.hold_ground.radii.field_slowdown_band,
            distance:     field.center.flat_distance(pos),
        });
    }

    let radii = config.hold_ground.radii.radii(category)?;
    let placed = env.world.threats.nearest(category, pos).map(|(_, d)| d);
    let carried = player_distance(category, agent, env);
    let distance = match (placed, carried) {
        (Some(a), Some(b)) => a.min(b),
        (a, b)             => a.or(b)?,
    };
    Some(ThreatReading {
        category,
        inner_radius: radii.inner,
        outer_radius: radii.outer,
        distance,
    })
}

/// Where to look for a containing field: the current target if it still
/// resolves, otherwise the player.
fn field_anchor(agent: &AgentState, env: &TickEnv<'_>) -> Option<Vec3> {
    agent
        .ctx
        .current_target
        .and_then(|t| env.roster.resolve(t))
        .map(|t| t.position)
        .or_else(|| env.roster.player().map(|p| p.position))
}

/// Distance to the player when the player embodies `category` (holding a
/// torch, a flare or a raised spear, or wrestling another animal).
fn player_distance(category: ThreatCategory, agent: &AgentState, env: &TickEnv<'_>) -> Option<f32> {
    let player = env.roster.player().filter(|p| p.alive)?;
    let embodies = match category {
        ThreatCategory::Torch          => player.held == Some(HeldItem::Torch),
        ThreatCategory::RedFlare       => player.held == Some(HeldItem::RedFlare),
        ThreatCategory::BlueFlare      => player.held == Some(HeldItem::BlueFlare),
        ThreatCategory::Spear          => player.held == Some(HeldItem::Spear),
        ThreatCategory::ActiveStruggle => player.struggling_with.is_some_and(|other| other != agent.id),
        _                              => false,
    };
    embodies.then(|| player.position.flat_distance(agent.pose.position))
}
