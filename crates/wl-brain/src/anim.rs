//! Post-process motion mapping.
//!
//! Turns the agent's mode and locomotion targets into a [`MotionSignals`]
//! value for the host.  The slowdown factor written by the threat
//! negotiator is applied here, so a slowed agent's emitted speed is
//! `goal_speed * pursuit_scale`.

use wl_agent::AgentState;
use wl_core::{Mode, SpeciesConfig};
use wl_world::{AnimState, MotionSignals, MoveState};

use crate::{BrainError, BrainResult};

/// Full signals for the current mode.
///
/// Fails only when an attacking agent's chosen side has no animation; the
/// caller falls back to [`movement_signals`].
pub fn derive_signals(agent: &AgentState, config: &SpeciesConfig) -> BrainResult<MotionSignals> {
    let anim_state = match agent.mode() {
        Mode::Attack => {
            let sides = config.animation.attack_sides;
            if agent.attack_side >= sides {
                return Err(BrainError::AnimationIndex { agent: agent.id, side: agent.attack_side, sides });
            }
            AnimState::Attack { side: agent.attack_side }
        }
        mode => anim_for(mode),
    };
    Ok(MotionSignals { anim_state, ..movement_signals(agent, config) })
}

/// Locomotion only; the animation layer stays at its plain default for the
/// mode (`Locomotion` for an attack).
pub fn movement_signals(agent: &AgentState, config: &SpeciesConfig) -> MotionSignals {
    let mode = agent.mode();
    let goal_speed = if mode.is_movement_allowed() {
        (agent.motion.goal_speed * agent.motion.pursuit_scale).max(0.0)
    } else {
        0.0
    };
    let move_state = if goal_speed <= f32::EPSILON {
        MoveState::Stopped
    } else if mode == Mode::Stalking {
        MoveState::Stalk
    } else if goal_speed <= config.speeds.walk {
        MoveState::Walk
    } else {
        MoveState::Run
    };
    let turn_speed = match mode {
        Mode::Dead | Mode::Stunned | Mode::Sleep => 0.0,
        _                                        => agent.motion.turn_speed,
    };
    let anim_state = match mode {
        Mode::Attack => AnimState::Locomotion,
        mode         => anim_for(mode),
    };
    MotionSignals { move_state, anim_state, goal_speed, turn_speed }
}

fn anim_for(mode: Mode) -> AnimState {
    match mode {
        Mode::Wander
        | Mode::PatrolPointsOfInterest
        | Mode::FollowWaypoints
        | Mode::Stalking
        | Mode::Attack
        | Mode::Flee
        | Mode::Investigate
        | Mode::InvestigateFood => AnimState::Locomotion,
        Mode::HoldGround        => AnimState::Alert,
        Mode::Feeding           => AnimState::Feed,
        Mode::Howl              => AnimState::Howl,
        Mode::Sleep             => AnimState::Sleep,
        Mode::Dead              => AnimState::Dead,
        Mode::Stunned           => AnimState::Stunned,
        Mode::Struggle          => AnimState::Struggle,
        Mode::ScriptedSequence  => AnimState::Scripted,
        Mode::Custom(n)         => AnimState::Custom(n),
        Mode::None
        | Mode::Idle
        | Mode::WanderPaused    => AnimState::Idle,
    }
}
