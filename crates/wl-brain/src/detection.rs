//! Reaction to a newly acquired target: flee, stalk or carry on.

use tracing::trace;

use wl_agent::{AgentState, FleeReason, TargetView};
use wl_behavior::{Hook, SpeciesBehavior, TickEnv};
use wl_core::{Mode, SpeciesKind, TargetId};

use crate::scanner::is_hostile;

/// The decision plus the numbers behind it.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct DetectionOutcome {
    pub next:        Option<Mode>,
    /// Final flee chance in percent, `[0, 100]`.
    pub flee_chance: f32,
    /// The roll in `[0, 100)`; `None` when no roll happened.
    pub roll:        Option<f32>,
}

impl DetectionOutcome {
    const SKIPPED: DetectionOutcome = DetectionOutcome { next: None, flee_chance: 0.0, roll: None };
}

/// Hook-aware entry point used by the scanner.
pub fn respond(agent: &mut AgentState, species: &mut dyn SpeciesBehavior, env: &mut TickEnv<'_>) -> Option<Mode> {
    if let Hook::Handled(mode) = species.detection_response(agent, env) {
        return mode;
    }
    on_target_detected(agent, species, env).next
}

/// Roll once against the flee chance for the current target.
///
/// Non-reactive species and agents without a resolvable target skip the
/// roll entirely.  A Flee decision records [`FleeReason::Detection`].
pub fn on_target_detected(agent: &mut AgentState, species: &mut dyn SpeciesBehavior, env: &mut TickEnv<'_>) -> DetectionOutcome {
    if !species.config().reactive {
        return DetectionOutcome::SKIPPED;
    }
    let Some(view) = agent.ctx.current_target.and_then(|t| env.roster.resolve(t)) else {
        return DetectionOutcome::SKIPPED;
    };

    let flee_chance = flee_chance(agent, species, &view, env);
    let roll = env.rng.roll_percent();
    let next = if roll < flee_chance {
        agent.flags.flee_reason = Some(FleeReason::Detection);
        Some(Mode::Flee)
    } else if species.can_stalk(agent) {
        Some(Mode::Stalking)
    } else {
        None
    };
    trace!("{}: detected {}, flee {flee_chance:.0}% rolled {roll:.1}", agent.id, view.target);
    DetectionOutcome { next, flee_chance, roll: Some(roll) }
}

/// Percent chance of fleeing `target`.
pub fn flee_chance(agent: &AgentState, species: &dyn SpeciesBehavior, target: &TargetView, env: &TickEnv<'_>) -> f32 {
    let config = species.config();
    let is_player = target.target.is_player();
    let vulnerable = match target.target {
        TargetId::Agent(id) => env.roster.get(id).is_some_and(|e| e.vulnerable),
        TargetId::Player    => false,
    };

    let zeroed = is_hostile(agent, config, target, env) != Some(true)
        || target.kind.is_some_and(SpeciesKind::is_ambient)
        || (config.is_predator() && (vulnerable || agent.mode() != Mode::Wander))
        || (config.kind == SpeciesKind::Cougar && is_player)
        || agent.flags.wander_to_position
        || env.world.packs.morale_override(agent.id);

    let mut chance = if zeroed { 0.0 } else { config.flee.base_chance };
    if !zeroed && is_player && config.kind.is_wolf_type() {
        chance += config.flee.player_bonus;
    }
    if is_player {
        chance *= env.world.flags.flee_chance_scalar;
    }
    if species.always_flee_from(target) {
        chance = 100.0;
    }
    chance.clamp(0.0, 100.0)
}
