//! Transition arbitration.
//!
//! Every mode request passes through [`ModeStateMachine::resolve`] before it
//! can be committed.  Rules run in a fixed order and the first one that
//! decides wins:
//!
//! | # | Rule                                                                 |
//! |---|----------------------------------------------------------------------|
//! | 1 | species `resolve_mode` hook; `Handled(x)` is final                   |
//! | 2 | custom modes pass straight through                                   |
//! | 3 | Flee while already fleeing after a passing attack → no-op            |
//! | 4 | Attack: too-scared veto, hold-ground check, target validity, reach   |
//! | 5 | Wander under pack-combat restriction → HoldGround                    |
//! | 6 | Wander / Flee → PatrolPointsOfInterest when that is the default      |
//! | 7 | None → Idle                                                          |
//! | 8 | re-request of the current mode → no-op (retreat-speed side effect)   |
//! | 9 | stun lock: only Dead and ScriptedSequence get through                |
//!
//! Rules 4–7 may rewrite the request; later rules see the rewritten mode.

use tracing::{trace, warn};

use wl_agent::{AgentState, FleeReason};
use wl_behavior::{Hook, TickEnv};
use wl_core::Mode;
use wl_world::PathRequirement;

use crate::ModeStateMachine;

impl ModeStateMachine {
    /// Decide what a request for `requested` actually commits.
    ///
    /// `None` means "do nothing".  May commit HoldGround itself (rule 4)
    /// and may clear the retreat-speed flag (rule 8).
    pub fn resolve(&mut self, agent: &mut AgentState, env: &mut TickEnv<'_>, requested: Mode) -> Option<Mode> {
        if let Hook::Handled(mode) = self.species.resolve_mode(agent, requested) {
            return mode;
        }
        if !requested.is_vanilla() {
            return Some(requested);
        }
        if requested == Mode::Flee && agent.is_fleeing_for(FleeReason::AfterPassingAttack) {
            return None;
        }

        let mut mode = requested;
        if mode == Mode::Attack {
            mode = self.resolve_attack(agent, env)?;
        }

        let config = self.species.config();
        if mode == Mode::Wander && agent.flags.pack_combat_restricted {
            mode = Mode::HoldGround;
        }
        if matches!(mode, Mode::Wander | Mode::Flee)
            && config.default_mode == Mode::PatrolPointsOfInterest
        {
            mode = Mode::PatrolPointsOfInterest;
        }
        if mode == Mode::None {
            mode = Mode::Idle;
        }

        if mode == agent.mode() {
            if mode == Mode::Flee && agent.flags.use_retreat_speed {
                agent.flags.use_retreat_speed = false;
                agent.motion.goal_speed = config.speeds.flee;
                trace!("{}: retreat over, flee speed {:.1}", agent.id, config.speeds.flee);
            }
            return None;
        }

        if agent.stun_active() && !matches!(mode, Mode::Dead | Mode::ScriptedSequence) {
            return None;
        }
        Some(mode)
    }

    /// Rule 4.  `None` vetoes the request outright.
    fn resolve_attack(&mut self, agent: &mut AgentState, env: &mut TickEnv<'_>) -> Option<Mode> {
        let config = self.species.config();
        if agent.flags.too_scared_to_attack {
            return match (config.pack_capable, agent.flags.in_pack) {
                (true, true)  => Some(Mode::HoldGround),
                (true, false) => Some(Mode::Flee),
                (false, _)    => None,
            };
        }

        if self.hold_ground_check(agent, env) {
            return None;
        }

        let config = self.species.config();
        let default = config.default_mode;
        let reach = PathRequirement::Nearby(config.timing.attack_range);
        let Some(target) = agent
            .ctx
            .current_target
            .and_then(|t| env.roster.resolve(t))
            .filter(|t| t.alive)
        else {
            warn!("{}: attack without a valid target, reverting to {default}", agent.id);
            agent.ctx.current_target = None;
            return Some(default);
        };

        if !env.world.pathfinder.can_reach_position(agent.pose.position, target.position, reach) {
            warn!("{}: cannot reach {}, reverting to {default}", agent.id, target.target);
            self.species.on_cannot_reach_target(agent, env);
            return Some(default);
        }
        Some(Mode::Attack)
    }
}
