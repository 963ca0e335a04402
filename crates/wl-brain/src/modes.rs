//! Base enter / process / exit handlers for every vanilla mode.
//!
//! | Mode                       | Process                                                  |
//! |----------------------------|----------------------------------------------------------|
//! | Idle                       | scan; default mode after `idle_secs`                     |
//! | Wander                     | scan; walk to a random point near home, then pause       |
//! | WanderPaused               | scan; Wander after `wander_pause_secs`                   |
//! | PatrolPointsOfInterest     | scan; walk point to point without pausing                |
//! | FollowWaypoints            | as PatrolPointsOfInterest                                |
//! | Stalking                   | creep toward the target; Attack once close               |
//! | Attack                     | run at the target; Flee (retreat) after the pass         |
//! | Flee                       | run away from the threat; default mode after `flee_secs` |
//! | HoldGround                 | stand; release when the deterrent backs off or times out |
//! | Feeding / Howl             | stand; default mode when done                            |
//! | Investigate(Food)          | walk to the target; default mode when done               |
//! | Sleep, Stunned, Struggle, ScriptedSequence | nothing; left by external requests       |
//! | Struggle (exit)            | releases the player from the pairing                     |
//! | Dead                       | nothing; enter ends any bleed-out                        |
//!
//! Handlers only request; the machine commits.

use std::f32::consts::TAU;

use wl_agent::{AgentState, BleedEnd, FleeReason};
use wl_behavior::{ModeHandlers, ModeTable, SpeciesBehavior, TickEnv};
use wl_core::{Mode, SpeciesConfig, Vec3};

use crate::scanner::scan_for_target;
use crate::threat;
use crate::BrainResult;

/// Closer than this counts as arrived.
const ARRIVE_RADIUS: f32 = 0.5;

/// Stalkers commit to an attack within this many attack ranges.
const POUNCE_RANGES: f32 = 2.0;

/// The table every species starts from.  `Mode::None` has no entry; the
/// preprocessor never lets an agent into it.
pub fn base_table() -> BrainResult<ModeTable> {
    let mut table = ModeTable::new();

    table.register(Mode::Idle, ModeHandlers::process(idle).with_enter(stand_still))?;
    table.register(Mode::Wander, ModeHandlers::process(wander).with_enter(enter_wander))?;
    table.register(Mode::WanderPaused, ModeHandlers::process(wander_paused).with_enter(stand_still))?;
    table.register(Mode::PatrolPointsOfInterest, ModeHandlers::process(patrol).with_enter(enter_wander))?;
    table.register(Mode::FollowWaypoints, ModeHandlers::process(patrol).with_enter(enter_wander))?;
    table.register(Mode::Stalking, ModeHandlers::process(stalking).with_enter(enter_stalking))?;
    table.register(Mode::Attack, ModeHandlers::process(attack).with_enter(enter_attack))?;
    table.register(
        Mode::Flee,
        ModeHandlers::process(flee).with_enter(enter_flee).with_exit(exit_flee),
    )?;
    table.register(
        Mode::HoldGround,
        ModeHandlers::process(hold_ground).with_enter(stand_still).with_exit(exit_hold_ground),
    )?;
    table.register(Mode::Feeding, ModeHandlers::process(feeding).with_enter(stand_still))?;
    table.register(Mode::Investigate, ModeHandlers::process(investigate).with_enter(enter_walk))?;
    table.register(Mode::InvestigateFood, ModeHandlers::process(investigate).with_enter(enter_walk))?;
    table.register(Mode::Howl, ModeHandlers::process(howl).with_enter(stand_still))?;
    table.register(Mode::Sleep, ModeHandlers::NOOP.with_enter(stand_still))?;
    table.register(Mode::Stunned, ModeHandlers::NOOP.with_enter(stand_still))?;
    table.register(
        Mode::Struggle,
        ModeHandlers::NOOP.with_enter(stand_still).with_exit(exit_struggle),
    )?;
    table.register(Mode::ScriptedSequence, ModeHandlers::NOOP.with_enter(stand_still))?;
    table.register(Mode::Dead, ModeHandlers::NOOP.with_enter(enter_dead).with_exit(exit_dead))?;

    Ok(table)
}

// ── Kinematics ────────────────────────────────────────────────────────────────

/// Step toward `dest` on the horizontal plane at the effective speed
/// (`goal_speed * pursuit_scale`).  Returns `true` on arrival.
fn move_toward(agent: &mut AgentState, dest: Vec3, dt: f32) -> bool {
    let pos = agent.pose.position;
    let to = Vec3::new(dest.x - pos.x, 0.0, dest.z - pos.z);
    let dist = to.length();
    if dist <= ARRIVE_RADIUS {
        return true;
    }
    let step = (agent.motion.goal_speed * agent.motion.pursuit_scale * dt).max(0.0);
    let dir = to.scale(1.0 / dist);
    agent.pose.forward = dir;
    if step >= dist {
        agent.pose.position = Vec3::new(dest.x, pos.y, dest.z);
        return true;
    }
    agent.pose.position = pos.add(dir.scale(step));
    false
}

/// A reachable random point within `wander_radius` of home, or `None` when
/// the pathfinder refuses it.
fn pick_destination(agent: &AgentState, config: &SpeciesConfig, env: &mut TickEnv<'_>) -> Option<Vec3> {
    let radius = config.timing.wander_radius.max(ARRIVE_RADIUS * 2.0);
    let angle = env.rng.gen_range(0.0..TAU);
    let dist = env.rng.gen_range(ARRIVE_RADIUS..radius);
    let dest = agent.home.add(Vec3::new(angle.cos() * dist, 0.0, angle.sin() * dist));
    env.world
        .pathfinder
        .start_path(agent.pose.position, dest, config.speeds.walk)
        .then_some(dest)
}

/// Where the current target stands, if it still resolves and lives.
fn target_position(agent: &AgentState, env: &TickEnv<'_>) -> Option<Vec3> {
    agent
        .ctx
        .current_target
        .and_then(|t| env.roster.resolve(t))
        .filter(|t| t.alive)
        .map(|t| t.position)
}

fn timed_out(agent: &AgentState, secs: f32) -> bool {
    agent.ctx.time_in_mode() >= secs
}

// ── Enter / exit ──────────────────────────────────────────────────────────────

fn stand_still(agent: &mut AgentState, config: &SpeciesConfig, _env: &mut TickEnv<'_>) {
    agent.motion.goal_speed = 0.0;
    agent.motion.turn_speed = config.speeds.turn;
    agent.motion.path_target = None;
}

fn enter_walk(agent: &mut AgentState, config: &SpeciesConfig, _env: &mut TickEnv<'_>) {
    agent.motion.goal_speed = config.speeds.walk;
    agent.motion.turn_speed = config.speeds.turn;
    agent.motion.path_target = None;
}

fn enter_wander(agent: &mut AgentState, config: &SpeciesConfig, env: &mut TickEnv<'_>) {
    enter_walk(agent, config, env);
    agent.motion.path_target = pick_destination(agent, config, env);
}

fn enter_stalking(agent: &mut AgentState, config: &SpeciesConfig, _env: &mut TickEnv<'_>) {
    agent.motion.goal_speed = config.speeds.stalk;
    agent.motion.turn_speed = config.speeds.turn;
    agent.motion.path_target = None;
}

fn enter_attack(agent: &mut AgentState, config: &SpeciesConfig, env: &mut TickEnv<'_>) {
    agent.motion.goal_speed = config.speeds.run;
    agent.motion.turn_speed = config.speeds.turn;
    agent.motion.path_target = None;
    agent.attack_side = env.rng.gen_range(0..config.animation.attack_sides.max(1));
}

fn enter_flee(agent: &mut AgentState, config: &SpeciesConfig, env: &mut TickEnv<'_>) {
    if agent.mode() == Mode::Attack && timed_out(agent, config.timing.attack_pass_secs) {
        agent.flags.flee_reason = Some(FleeReason::AfterPassingAttack);
        agent.flags.use_retreat_speed = true;
    }
    let speed = if agent.flags.use_retreat_speed { config.speeds.retreat } else { config.speeds.flee };
    agent.motion.goal_speed = speed;
    agent.motion.turn_speed = config.speeds.turn;

    let pos = agent.pose.position;
    let threat = target_position(agent, env).or_else(|| env.roster.player().map(|p| p.position));
    let away = match threat.map(|t| Vec3::new(pos.x - t.x, 0.0, pos.z - t.z).normalized()) {
        Some(dir) if dir != Vec3::ZERO => dir,
        _ => {
            let angle = env.rng.gen_range(0.0..TAU);
            Vec3::new(angle.cos(), 0.0, angle.sin())
        }
    };
    agent.motion.path_target = Some(pos.add(away.scale(config.speeds.flee * config.timing.flee_secs)));
}

fn exit_flee(agent: &mut AgentState, _config: &SpeciesConfig, _env: &mut TickEnv<'_>) {
    agent.flags.flee_reason = None;
    agent.flags.use_retreat_speed = false;
}

/// The category's cooldown restarts on release.
fn exit_hold_ground(agent: &mut AgentState, _config: &SpeciesConfig, env: &mut TickEnv<'_>) {
    if let Some(category) = agent.ctx.hold_ground_reason.take() {
        agent.timers.hold_ground_last[category.index()] = Some(env.now());
    }
}

/// However the struggle ends, the player is free again.
fn exit_struggle(agent: &mut AgentState, _config: &SpeciesConfig, env: &mut TickEnv<'_>) {
    if let Some(player) = env.roster.player_mut() {
        if player.struggling_with == Some(agent.id) {
            player.struggling_with = None;
        }
    }
}

fn enter_dead(agent: &mut AgentState, _config: &SpeciesConfig, _env: &mut TickEnv<'_>) {
    if agent.ctx.bleeding_out() {
        agent.ctx.end_bleed_out(BleedEnd::Death);
    }
    agent.vitals.hp = agent.vitals.hp.min(0.0);
    agent.motion.goal_speed = 0.0;
    agent.motion.turn_speed = 0.0;
    agent.motion.path_target = None;
    agent.flags.scanning_enabled = false;
    agent.ctx.current_target = None;
}

/// Only a forced request gets here.
fn exit_dead(agent: &mut AgentState, _config: &SpeciesConfig, _env: &mut TickEnv<'_>) {
    agent.vitals.hp = agent.vitals.max_hp;
    agent.flags.scanning_enabled = true;
}

// ── Process ───────────────────────────────────────────────────────────────────

fn idle(agent: &mut AgentState, species: &mut dyn SpeciesBehavior, env: &mut TickEnv<'_>) -> Option<Mode> {
    if let Some(mode) = scan_for_target(agent, species, env) {
        return Some(mode);
    }
    let config = species.config();
    timed_out(agent, config.timing.idle_secs).then_some(config.default_mode)
}

fn wander(agent: &mut AgentState, species: &mut dyn SpeciesBehavior, env: &mut TickEnv<'_>) -> Option<Mode> {
    if let Some(mode) = scan_for_target(agent, species, env) {
        return Some(mode);
    }
    let Some(dest) = agent.motion.path_target else {
        return Some(Mode::WanderPaused);
    };
    move_toward(agent, dest, env.dt).then_some(Mode::WanderPaused)
}

fn wander_paused(agent: &mut AgentState, species: &mut dyn SpeciesBehavior, env: &mut TickEnv<'_>) -> Option<Mode> {
    if let Some(mode) = scan_for_target(agent, species, env) {
        return Some(mode);
    }
    timed_out(agent, species.config().timing.wander_pause_secs).then_some(Mode::Wander)
}

fn patrol(agent: &mut AgentState, species: &mut dyn SpeciesBehavior, env: &mut TickEnv<'_>) -> Option<Mode> {
    if let Some(mode) = scan_for_target(agent, species, env) {
        return Some(mode);
    }
    let arrived = match agent.motion.path_target {
        Some(dest) => move_toward(agent, dest, env.dt),
        None       => true,
    };
    if arrived {
        agent.motion.path_target = pick_destination(agent, species.config(), env);
    }
    None
}

fn stalking(agent: &mut AgentState, species: &mut dyn SpeciesBehavior, env: &mut TickEnv<'_>) -> Option<Mode> {
    let config = species.config();
    let Some(target) = target_position(agent, env) else {
        agent.ctx.current_target = None;
        return Some(config.default_mode);
    };

    let is_player = agent.ctx.current_target.is_some_and(|t| t.is_player());
    let range = if is_player { config.detection.player_range } else { config.detection.range };
    let distance = agent.pose.position.flat_distance(target);
    if distance > range * config.timing.stalk_give_up_scale {
        agent.ctx.current_target = None;
        return Some(config.default_mode);
    }
    if distance <= config.timing.attack_range * POUNCE_RANGES {
        return Some(Mode::Attack);
    }
    move_toward(agent, target, env.dt);
    None
}

fn attack(agent: &mut AgentState, species: &mut dyn SpeciesBehavior, env: &mut TickEnv<'_>) -> Option<Mode> {
    let config = species.config();
    let Some(target) = target_position(agent, env) else {
        agent.ctx.current_target = None;
        return Some(config.default_mode);
    };
    move_toward(agent, target, env.dt);
    timed_out(agent, config.timing.attack_pass_secs).then_some(Mode::Flee)
}

fn flee(agent: &mut AgentState, species: &mut dyn SpeciesBehavior, env: &mut TickEnv<'_>) -> Option<Mode> {
    let config = species.config();
    if let Some(dest) = agent.motion.path_target {
        move_toward(agent, dest, env.dt);
    }
    timed_out(agent, config.timing.flee_secs).then_some(config.default_mode)
}

/// Released once the recorded deterrent is gone or outside its outer
/// radius, or after `max_hold_secs`.  A hold without a recorded reason only
/// times out.
fn hold_ground(agent: &mut AgentState, species: &mut dyn SpeciesBehavior, env: &mut TickEnv<'_>) -> Option<Mode> {
    let config = species.config();
    if timed_out(agent, config.hold_ground.max_hold_secs) {
        return Some(config.default_mode);
    }
    let category = agent.ctx.hold_ground_reason?;
    let still_near = threat::read(category, agent, config, env).is_some_and(|r| r.within_outer());
    if still_near { None } else { Some(config.default_mode) }
}

fn feeding(agent: &mut AgentState, species: &mut dyn SpeciesBehavior, env: &mut TickEnv<'_>) -> Option<Mode> {
    if let Some(mode) = scan_for_target(agent, species, env) {
        return Some(mode);
    }
    let config = species.config();
    timed_out(agent, config.timing.feed_secs).then_some(config.default_mode)
}

fn investigate(agent: &mut AgentState, species: &mut dyn SpeciesBehavior, env: &mut TickEnv<'_>) -> Option<Mode> {
    if let Some(mode) = scan_for_target(agent, species, env) {
        return Some(mode);
    }
    if let Some(target) = target_position(agent, env) {
        move_toward(agent, target, env.dt);
    }
    let config = species.config();
    timed_out(agent, config.timing.investigate_secs).then_some(config.default_mode)
}

fn howl(agent: &mut AgentState, species: &mut dyn SpeciesBehavior, _env: &mut TickEnv<'_>) -> Option<Mode> {
    let config = species.config();
    timed_out(agent, config.timing.howl_secs).then_some(config.default_mode)
}
