//! Target acquisition.
//!
//! A scan walks the whole published roster plus the player, so it costs
//! O(n) per scanning agent.  Scans are spaced `uniform(0.1, 0.5)` seconds
//! apart per agent.

use tracing::trace;

use wl_agent::{AgentState, TargetView};
use wl_behavior::{Hook, SpeciesBehavior, TickEnv};
use wl_core::{Mode, SpeciesConfig, SpeciesKind, TargetId, WildlifeMode};

use crate::detection;

/// Seconds between scans, drawn uniformly per scan.
const SCAN_INTERVAL_SECS: std::ops::Range<f64> = 0.1..0.5;

/// Why a candidate was ignored.  Variants are listed in check order.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum IgnoreReason {
    NoTarget,
    IsSelf,
    InvisiblePlayer,
    PlayerWhileFeeding,
    Dead,
    /// Wolves leave moose alone.
    Moose,
    InvalidForPack,
    NotHostile,
    /// Player is in the main menu or wrestling something.
    PlayerUnavailable,
    PlayerOnly,
    OutsideHazardField,
    /// Entity class the species tables know nothing about.
    UnknownClass,
}

/// Look for the nearest valid target and react to it.
///
/// Returns the mode the detection response wants, if any.  An unchanged
/// target, a formed pack group or an empty scan return `None`.
pub fn scan_for_target(agent: &mut AgentState, species: &mut dyn SpeciesBehavior, env: &mut TickEnv<'_>) -> Option<Mode> {
    if let Hook::Handled(mode) = species.scan(agent, env) {
        return mode;
    }
    if !agent.flags.scanning_enabled {
        return None;
    }
    let now = env.now();
    if now < agent.timers.next_scan_at {
        return None;
    }
    agent.timers.next_scan_at = now + env.rng.gen_range(SCAN_INTERVAL_SECS);

    let pruned = env.roster.prune();
    if pruned > 0 {
        trace!("{}: pruned {pruned} stale roster entries", agent.id);
    }

    let config = species.config();
    let candidates = env
        .roster
        .iter()
        .map(|e| TargetId::Agent(e.id))
        .chain(env.roster.player().map(|_| TargetId::Player));

    let mut best: Option<(TargetId, f32)> = None;
    for candidate in candidates {
        let d = compute_distance(agent, config, candidate, env);
        if d.is_finite() && best.is_none_or(|(_, b)| d < b) {
            best = Some((candidate, d));
        }
    }
    let Some((target, distance)) = best else {
        trace!("{}: scan found no candidates", agent.id);
        return None;
    };

    if agent.ctx.current_target.replace(target) == Some(target) {
        return None;
    }
    trace!("{}: acquired {target} at {distance:.1}m", agent.id);

    let packs = &env.world.packs;
    let grouped = packs.try_form_group(agent.id, target);
    packs.alert(agent.id, target);
    if grouped {
        return None;
    }
    detection::respond(agent, species, env)
}

/// Horizontal distance to `target`, or `+∞` if it should be ignored or
/// cannot be seen.
pub fn compute_distance(agent: &AgentState, config: &SpeciesConfig, target: TargetId, env: &TickEnv<'_>) -> f32 {
    if target_can_be_ignored(agent, config, Some(target), env).is_some() {
        return f32::INFINITY;
    }
    let Some(view) = env.roster.resolve(target) else {
        return f32::INFINITY;
    };
    let senses = &config.detection;
    let range = if target.is_player() { senses.player_range } else { senses.range };
    let visible = env.world.visibility.is_visible(
        agent.pose.position,
        agent.pose.forward,
        view.position,
        range,
        senses.fov_deg,
        senses.height_tolerance,
    );
    if visible { agent.pose.position.flat_distance(view.position) } else { f32::INFINITY }
}

/// The first rule that says `target` is not worth considering.
pub fn target_can_be_ignored(
    agent:  &AgentState,
    config: &SpeciesConfig,
    target: Option<TargetId>,
    env:    &TickEnv<'_>,
) -> Option<IgnoreReason> {
    let Some(target) = target else {
        return Some(IgnoreReason::NoTarget);
    };
    let Some(view) = env.roster.resolve(target) else {
        return Some(IgnoreReason::NoTarget);
    };
    if target == TargetId::Agent(agent.id) {
        return Some(IgnoreReason::IsSelf);
    }
    let player = if target.is_player() { env.roster.player() } else { None };
    if player.is_some_and(|p| p.invisible_to_ai) {
        return Some(IgnoreReason::InvisiblePlayer);
    }
    if player.is_some() && agent.mode() == Mode::Feeding {
        return Some(IgnoreReason::PlayerWhileFeeding);
    }
    if !view.alive {
        return Some(IgnoreReason::Dead);
    }
    if agent.kind.is_wolf_type() && view.kind == Some(SpeciesKind::Moose) {
        return Some(IgnoreReason::Moose);
    }
    if !env.world.packs.is_valid_target(agent.id, target) {
        return Some(IgnoreReason::InvalidForPack);
    }
    let hostile = is_hostile(agent, config, &view, env);
    if hostile == Some(false) {
        return Some(IgnoreReason::NotHostile);
    }
    if player.is_some_and(|p| env.world.flags.main_menu || p.in_struggle()) {
        return Some(IgnoreReason::PlayerUnavailable);
    }
    if config.targets_player_only && player.is_none() {
        return Some(IgnoreReason::PlayerOnly);
    }
    if player.is_none()
        && config.wildlife_mode == WildlifeMode::HazardBound
        && !env.world.threats.in_hazard(view.position)
    {
        return Some(IgnoreReason::OutsideHazardField);
    }
    if hostile.is_none() {
        return Some(IgnoreReason::UnknownClass);
    }
    None
}

/// Whether `target` and `agent` are enemies.  `None` when the target's class
/// is unknown and no answer exists.
pub fn is_hostile(agent: &AgentState, config: &SpeciesConfig, target: &TargetView, env: &TickEnv<'_>) -> Option<bool> {
    let TargetId::Agent(id) = target.target else {
        return Some(true);
    };
    let kind = target.kind?;
    let hunted_by_it = env.roster.get(id).is_some_and(|e| e.hunts(agent.kind));
    Some(config.prey.contains(&kind) || hunted_by_it)
}
