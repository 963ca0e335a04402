//! Wound and bleed-out progression.
//!
//! Both timers run in in-game minutes, converted from real seconds through
//! the world clock's day length.  Bleed progress never passes the death
//! threshold, and during a struggle it stops `struggle_bleed_margin_minutes`
//! short of it.

use tracing::debug;

use wl_agent::{AgentState, BleedEnd, FleeReason};
use wl_behavior::TickEnv;
use wl_core::{AgentId, Mode, SpeciesConfig};

/// Hit points at or below this count as dead.
const DEATH_HP: f32 = 0.01;

/// Who dealt the damage.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DamageSource {
    Player,
    Agent(AgentId),
    /// Falls, hazards, scripted harm.
    Environment,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DamageOutcome {
    /// Dead already or invulnerable.
    Ignored,
    Wounded,
    /// Would have died while fleeing a trigger volume; left on one hit point
    /// with a forced bleed-out instead.
    Survived,
    Killed,
}

/// Advance wound and bleed timers by one tick.  Returns `Some(Dead)` once
/// a lethal bleed-out completes.
pub fn advance(agent: &mut AgentState, config: &SpeciesConfig, env: &TickEnv<'_>) -> Option<Mode> {
    let minutes = env.game_minutes();

    if agent.ctx.wounded {
        agent.ctx.elapsed_wounded_minutes += minutes;
        let healed = agent.ctx.elapsed_wounded_minutes;
        if config.wounds.recovery_minutes.is_some_and(|r| healed >= r) {
            recover(agent);
            debug!("{}: wounds healed", agent.id);
            return None;
        }
    }

    if !agent.ctx.bleeding_out() {
        return None;
    }
    let death = agent.ctx.death_after_bleed_minutes();
    let ceiling = if agent.mode() == Mode::Struggle {
        death - config.wounds.struggle_bleed_margin_minutes
    } else {
        death
    };
    let bled_out = agent.ctx.progress_bleed(minutes, ceiling);
    if bled_out && config.wounds.can_die_from_bleed_out && !agent.is_dead() {
        debug!("{}: bled out after {death:.1} minutes", agent.id);
        return Some(Mode::Dead);
    }
    None
}

/// Deal `amount` damage and optionally start or shorten a bleed-out.
///
/// The caller commits Dead on [`DamageOutcome::Killed`].
pub fn apply_damage(
    agent:         &mut AgentState,
    config:        &SpeciesConfig,
    env:           &TickEnv<'_>,
    amount:        f32,
    bleed_minutes: f32,
    source:        DamageSource,
) -> DamageOutcome {
    if agent.is_dead() || agent.vitals.invulnerable {
        return DamageOutcome::Ignored;
    }

    let mut amount = amount.max(0.0);
    if config.is_predator() && source == DamageSource::Player && env.world.flags.event_active {
        amount *= config.wounds.event_damage_scale;
    }
    agent.vitals.hp -= amount;
    agent.ctx.wounded = true;

    if agent.mode() != Mode::Struggle {
        env.world.packs.notify_damaged(agent.id, amount);
    }
    if bleed_minutes > 0.0 {
        agent.ctx.start_bleed_out(bleed_minutes);
    }

    if agent.vitals.hp <= DEATH_HP && agent.is_fleeing_for(FleeReason::TriggerVolume) {
        agent.vitals.hp = 1.0;
        agent.ctx.start_bleed_out(config.wounds.trigger_volume_bleed_minutes);
        debug!("{}: spared by trigger volume, bleeding out", agent.id);
        return DamageOutcome::Survived;
    }
    if agent.vitals.hp <= DEATH_HP {
        agent.vitals.hp = 0.0;
        return DamageOutcome::Killed;
    }
    DamageOutcome::Wounded
}

/// Close every wound and stop any bleed-out.
pub fn recover(agent: &mut AgentState) {
    agent.ctx.wounded = false;
    agent.ctx.elapsed_wounded_minutes = 0.0;
    if agent.ctx.bleeding_out() {
        agent.ctx.end_bleed_out(BleedEnd::Recovery);
    }
}
