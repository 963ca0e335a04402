//! Unit tests for wl-agent.

#[cfg(test)]
mod context {
    use wl_core::Mode;

    use crate::{AgentModeContext, BleedEnd};

    #[test]
    fn flip_resets_timers() {
        let mut ctx = AgentModeContext::new(Mode::Wander);
        ctx.advance_time(3.0, 0.05);
        assert_eq!(ctx.time_in_mode(), 3.0);

        let old = ctx.flip_mode(Mode::Flee);
        assert_eq!(old, Mode::Wander);
        assert_eq!(ctx.previous_mode(), Mode::Wander);
        assert_eq!(ctx.current_mode(), Mode::Flee);
        assert_eq!(ctx.time_in_mode(), 0.0);
        assert_eq!(ctx.time_in_mode_world_hours(), 0.0);
    }

    #[test]
    fn bleed_out_only_shortens() {
        let mut ctx = AgentModeContext::default();
        assert!(ctx.start_bleed_out(60.0));
        ctx.progress_bleed(10.0, f32::INFINITY);
        assert_eq!(ctx.bleed_remaining_minutes(), Some(50.0));

        // longer than what is left: ignored
        assert!(!ctx.start_bleed_out(80.0));
        assert_eq!(ctx.death_after_bleed_minutes(), 60.0);

        // shorter: countdown now ends 20 minutes from here
        assert!(ctx.start_bleed_out(20.0));
        assert_eq!(ctx.death_after_bleed_minutes(), 30.0);
        assert_eq!(ctx.elapsed_bleed_minutes(), 10.0);
    }

    #[test]
    fn progress_clamps_to_threshold() {
        let mut ctx = AgentModeContext::default();
        ctx.start_bleed_out(5.0);
        assert!(!ctx.progress_bleed(3.0, f32::INFINITY));
        assert!(ctx.progress_bleed(100.0, f32::INFINITY));
        assert_eq!(ctx.elapsed_bleed_minutes(), 5.0);
    }

    #[test]
    fn progress_respects_ceiling_and_never_rewinds() {
        let mut ctx = AgentModeContext::default();
        ctx.start_bleed_out(10.0);
        ctx.progress_bleed(9.5, f32::INFINITY);
        // ceiling below current progress: stays put
        assert!(!ctx.progress_bleed(2.0, 9.0));
        assert_eq!(ctx.elapsed_bleed_minutes(), 9.5);
    }

    #[test]
    fn not_bleeding_is_inert() {
        let mut ctx = AgentModeContext::default();
        assert!(!ctx.progress_bleed(10.0, f32::INFINITY));
        assert_eq!(ctx.elapsed_bleed_minutes(), 0.0);
        assert_eq!(ctx.bleed_remaining_minutes(), None);
        assert!(!ctx.start_bleed_out(0.0));
    }

    #[test]
    fn end_bleed_out_reasons() {
        let mut ctx = AgentModeContext::default();
        ctx.start_bleed_out(10.0);
        ctx.progress_bleed(4.0, f32::INFINITY);
        ctx.end_bleed_out(BleedEnd::Death);
        assert!(!ctx.bleeding_out());
        assert_eq!(ctx.elapsed_bleed_minutes(), 4.0);

        ctx.start_bleed_out(10.0);
        ctx.end_bleed_out(BleedEnd::Recovery);
        assert_eq!(ctx.elapsed_bleed_minutes(), 0.0);
        assert_eq!(ctx.death_after_bleed_minutes(), 0.0);
    }
}

#[cfg(test)]
mod builder {
    use wl_core::{AgentId, Mode, SpeciesConfig, SpeciesKind, Vec3};

    use crate::AgentBuilder;

    #[test]
    fn defaults_from_species() {
        let bear = SpeciesConfig::for_kind(SpeciesKind::Bear);
        let a = AgentBuilder::new(AgentId(1), &bear).position(Vec3::new(1.0, 0.0, 2.0)).build();
        assert_eq!(a.kind, SpeciesKind::Bear);
        assert_eq!(a.vitals.hp, 300.0);
        assert!(a.flags.can_hold_ground);
        assert_eq!(a.home, Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(a.ctx.current_target, None);
    }

    #[test]
    fn prey_cannot_hold_ground() {
        let deer = SpeciesConfig::for_kind(SpeciesKind::Deer);
        let a = AgentBuilder::new(AgentId(0), &deer).build();
        assert!(!a.flags.can_hold_ground);
    }

    #[test]
    fn hp_is_clamped_and_none_start_becomes_idle() {
        let wolf = SpeciesConfig::for_kind(SpeciesKind::Wolf);
        let a = AgentBuilder::new(AgentId(0), &wolf).hp(1_000.0).start_mode(Mode::None).build();
        assert_eq!(a.vitals.hp, wolf.max_hp);
        assert_eq!(a.mode(), Mode::Idle);
    }
}

#[cfg(test)]
mod roster {
    use std::sync::Arc;

    use wl_core::{AgentId, SpeciesKind, TargetId, Vec3};

    use crate::{PlayerSnapshot, Published, Roster};

    fn entry(id: u32, alive: bool) -> Published {
        Published {
            id:         AgentId(id),
            kind:       Some(SpeciesKind::Deer),
            position:   Vec3::new(id as f32, 0.0, 0.0),
            alive,
            destroyed:  false,
            vulnerable: false,
            prey:       Arc::from(Vec::new()),
        }
    }

    #[test]
    fn publish_and_resolve() {
        let mut roster = Roster::new();
        roster.publish(entry(4, true));
        assert_eq!(roster.len(), 1);
        let view = roster.resolve(TargetId::Agent(AgentId(4))).unwrap();
        assert_eq!(view.position.x, 4.0);
        assert!(roster.resolve(TargetId::Agent(AgentId(2))).is_none());
        assert!(roster.resolve(TargetId::Player).is_none());
    }

    #[test]
    fn prune_drops_dead_and_destroyed() {
        let mut roster = Roster::new();
        roster.publish(entry(0, true));
        roster.publish(entry(1, true));
        roster.publish(entry(2, true));
        roster.publish(entry(1, false));
        roster.mark_destroyed(AgentId(2));
        assert_eq!(roster.prune(), 2);
        assert_eq!(roster.len(), 1);

        // a pruned corpse does not come back
        roster.publish(entry(1, false));
        assert!(roster.get(AgentId(1)).is_none());
    }

    #[test]
    fn destroyed_entries_do_not_resolve() {
        let mut roster = Roster::new();
        roster.publish(entry(0, true));
        roster.mark_destroyed(AgentId(0));
        assert!(roster.resolve(TargetId::Agent(AgentId(0))).is_none());
    }

    #[test]
    fn player_snapshot() {
        let mut roster = Roster::new();
        roster.set_player(PlayerSnapshot::at(Vec3::new(5.0, 0.0, 5.0)));
        let view = roster.resolve(TargetId::Player).unwrap();
        assert!(view.alive);
        assert_eq!(view.kind, None);
        roster.clear_player();
        assert!(roster.player().is_none());
    }
}
