//! Integration tests for wl-sim.

use wl_agent::PlayerSnapshot;
use wl_brain::{DamageOutcome, DamageSource, Transition};
use wl_core::{AgentId, Frame, Mode, SpeciesConfig, SpeciesKind, TargetId, Vec3, WorldConfig};
use wl_world::{MotionSink, RecordingSink};

use crate::{FrameSummary, NoopObserver, Sim, SimBuilder, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_frames: u64) -> WorldConfig {
    WorldConfig {
        seed:                   42,
        frame_secs:             0.5,
        total_frames,
        output_interval_frames: 5,
        ..WorldConfig::default()
    }
}

fn named(kind: SpeciesKind, name: &str) -> SpeciesConfig {
    SpeciesConfig { name: name.to_string(), ..SpeciesConfig::for_kind(kind) }
}

fn valley(total_frames: u64) -> Sim<RecordingSink> {
    SimBuilder::new(test_config(total_frames))
        .species(named(SpeciesKind::Deer, "deer"))
        .species(named(SpeciesKind::Wolf, "wolf"))
        .sink(RecordingSink::default())
        .build()
        .unwrap()
}

/// Records every callback.
#[derive(Default)]
struct Log {
    started:     Vec<Frame>,
    transitions: Vec<(Frame, Transition)>,
    ticked:      Vec<usize>,
    summaries:   Vec<FrameSummary>,
    ended:       Option<Frame>,
}

impl SimObserver for Log {
    fn on_frame_start(&mut self, frame: Frame) {
        self.started.push(frame);
    }

    fn on_transition(&mut self, frame: Frame, transition: &Transition) {
        self.transitions.push((frame, *transition));
    }

    fn on_frame_end(&mut self, _frame: Frame, ticked: usize) {
        self.ticked.push(ticked);
    }

    fn on_summary(&mut self, summary: &FrameSummary) {
        self.summaries.push(*summary);
    }

    fn on_sim_end(&mut self, final_frame: Frame) {
        self.ended = Some(final_frame);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = SimBuilder::new(test_config(10)).build().unwrap();
        assert_eq!(sim.agent_count(), 0);
        assert_eq!(sim.frame, Frame::ZERO);
        assert!(sim.roster.player().is_none());
    }

    #[test]
    fn duplicate_species_name_errors() {
        let result = SimBuilder::new(test_config(10))
            .species(named(SpeciesKind::Deer, "deer"))
            .species(named(SpeciesKind::Moose, "deer"))
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn zero_frame_length_errors() {
        let config = WorldConfig { frame_secs: 0.0, ..test_config(10) };
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Core(_))));
    }

    #[test]
    fn invalid_species_errors() {
        let broken = SpeciesConfig { max_hp: 0.0, ..named(SpeciesKind::Deer, "deer") };
        let result = SimBuilder::new(test_config(10)).species(broken).build();
        assert!(result.is_err());
    }

    #[test]
    fn player_lands_in_roster() {
        let sim = SimBuilder::new(test_config(10))
            .player(PlayerSnapshot::at(Vec3::new(3.0, 0.0, 4.0)))
            .build()
            .unwrap();
        let view = sim.roster.resolve(TargetId::Player).unwrap();
        assert_eq!(view.position, Vec3::new(3.0, 0.0, 4.0));
    }
}

// ── Population ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod population_tests {
    use super::*;

    #[test]
    fn spawn_assigns_sequential_ids_and_publishes() {
        let mut sim = valley(10);
        let a = sim.spawn("deer", Vec3::new(0.0, 0.0, 0.0)).unwrap();
        let b = sim.spawn("wolf", Vec3::new(5.0, 0.0, 0.0)).unwrap();
        assert_eq!((a, b), (AgentId(0), AgentId(1)));

        let published = sim.roster.get(b).unwrap();
        assert_eq!(published.kind, Some(SpeciesKind::Wolf));
        assert!(published.alive);
        assert!(published.hunts(SpeciesKind::Deer));
        assert_eq!(sim.agent(a).unwrap().mode(), Mode::Wander);
    }

    #[test]
    fn unknown_species_errors() {
        let mut sim = valley(10);
        let result = sim.spawn("sasquatch", Vec3::ZERO);
        assert!(matches!(result, Err(SimError::UnknownSpecies(name)) if name == "sasquatch"));
    }

    #[test]
    fn despawn_retires_the_id() {
        let mut sim = valley(10);
        let deer = sim.spawn("deer", Vec3::ZERO).unwrap();
        sim.spawn("deer", Vec3::new(2.0, 0.0, 0.0)).unwrap();

        sim.despawn(deer).unwrap();
        assert!(sim.agent(deer).is_none());
        assert!(sim.roster.resolve(TargetId::Agent(deer)).is_none());
        assert!(matches!(sim.despawn(deer), Err(SimError::NotSpawned(_))));

        // The next spawn gets a fresh id.
        let next = sim.spawn("deer", Vec3::ZERO).unwrap();
        assert_eq!(next, AgentId(2));
        assert_eq!(sim.step(&mut NoopObserver), 2);
    }

    #[test]
    fn calls_on_missing_agents_error() {
        let mut sim = valley(10);
        assert!(matches!(sim.stun(AgentId(9), 1.0), Err(SimError::NotSpawned(AgentId(9)))));
        assert!(matches!(sim.request_mode(AgentId(9), Mode::Idle), Err(SimError::NotSpawned(_))));
    }
}

// ── Frame loop ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn run_stops_at_total_frames() {
        let mut sim = valley(12);
        sim.spawn("deer", Vec3::ZERO).unwrap();
        let mut log = Log::default();
        sim.run(&mut log);

        assert_eq!(sim.frame, Frame(12));
        assert_eq!(log.started.len(), 12);
        assert_eq!(log.ended, Some(Frame(12)));
        assert!((sim.world.now() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn run_frames_ignores_total() {
        let mut sim = valley(2);
        sim.run_frames(5, &mut NoopObserver);
        assert_eq!(sim.frame, Frame(5));
    }

    #[test]
    fn summaries_follow_the_interval() {
        let mut sim = valley(10);
        sim.spawn("deer", Vec3::ZERO).unwrap();
        sim.spawn("deer", Vec3::new(1.0, 0.0, 0.0)).unwrap();
        let mut log = Log::default();
        sim.run(&mut log);

        let frames: Vec<Frame> = log.summaries.iter().map(|s| s.frame).collect();
        assert_eq!(frames, vec![Frame(4), Frame(9)]);
        assert!(log.summaries.iter().all(|s| s.live == 2 && s.dead == 0));
    }

    #[test]
    fn every_agent_emits_once_per_frame() {
        let mut sim = valley(3);
        let a = sim.spawn("deer", Vec3::ZERO).unwrap();
        let b = sim.spawn("wolf", Vec3::new(50.0, 0.0, 50.0)).unwrap();
        sim.run(&mut NoopObserver);

        assert_eq!(sim.sink.emitted.len(), 6);
        assert_eq!(sim.sink.emitted.iter().filter(|(id, _)| *id == a).count(), 3);
        assert!(sim.sink.last_for(b).is_some());
    }

    #[test]
    fn roster_tracks_agent_positions() {
        let mut sim = valley(20);
        let deer = sim.spawn("deer", Vec3::ZERO).unwrap();
        sim.run(&mut NoopObserver);
        let state = sim.agent(deer).unwrap();
        assert_eq!(sim.roster.get(deer).unwrap().position, state.pose.position);
    }

    #[test]
    fn paused_clock_freezes_agents() {
        let mut sim = valley(5);
        let deer = sim.spawn("deer", Vec3::ZERO).unwrap();
        sim.world.clock.paused = true;
        let mut log = Log::default();
        sim.run(&mut log);

        assert_eq!(sim.world.now(), 0.0);
        assert!(log.transitions.is_empty());
        assert_eq!(sim.agent(deer).unwrap().ctx.time_in_mode(), 0.0);
    }

    #[test]
    fn same_seed_replays_identically() {
        let positions = |seed: u64| {
            let mut sim = SimBuilder::new(WorldConfig { seed, ..test_config(40) })
                .species(named(SpeciesKind::Deer, "deer"))
                .species(named(SpeciesKind::Wolf, "wolf"))
                .build()
                .unwrap();
            sim.spawn("deer", Vec3::ZERO).unwrap();
            sim.spawn("wolf", Vec3::new(30.0, 0.0, 0.0)).unwrap();
            sim.run(&mut NoopObserver);
            sim.agents().map(|a| (a.pose.position, a.mode())).collect::<Vec<_>>()
        };
        assert_eq!(positions(9), positions(9));
    }
}

// ── External events ───────────────────────────────────────────────────────────

#[cfg(test)]
mod event_tests {
    use super::*;

    #[test]
    fn lethal_damage_is_reported_next_frame() {
        let mut sim = valley(10);
        let deer = sim.spawn("deer", Vec3::ZERO).unwrap();
        let outcome = sim.apply_damage(deer, 500.0, 0.0, DamageSource::Player).unwrap();
        assert_eq!(outcome, DamageOutcome::Killed);
        assert!(sim.agent(deer).unwrap().is_dead());
        assert!(!sim.roster.get(deer).unwrap().alive);

        let mut log = Log::default();
        sim.step(&mut log);
        let (frame, t) = log.transitions[0];
        assert_eq!(frame, Frame(0));
        assert_eq!((t.agent, t.from, t.to), (deer, Mode::Wander, Mode::Dead));
        assert_eq!(sim.summary(Frame(0)).dead, 1);
    }

    #[test]
    fn wounded_deer_bolts_and_shows_vulnerable() {
        let mut sim = valley(10);
        let deer = sim.spawn("deer", Vec3::ZERO).unwrap();
        let outcome = sim.apply_damage(deer, 10.0, 0.0, DamageSource::Environment).unwrap();
        assert_eq!(outcome, DamageOutcome::Wounded);
        assert_eq!(sim.agent(deer).unwrap().mode(), Mode::Flee);
        assert!(sim.roster.get(deer).unwrap().vulnerable);
    }

    #[test]
    fn stun_then_recover() {
        let mut sim = valley(10);
        let wolf = sim.spawn("wolf", Vec3::ZERO).unwrap();
        assert!(sim.stun(wolf, 1.0).unwrap());
        assert_eq!(sim.agent(wolf).unwrap().mode(), Mode::Stunned);

        // 0.5 s frames: the stun runs out on the second frame.
        sim.run_frames(2, &mut NoopObserver);
        assert_eq!(sim.agent(wolf).unwrap().mode(), Mode::Wander);
    }

    #[test]
    fn forced_request_revives() {
        let mut sim = valley(10);
        let deer = sim.spawn("deer", Vec3::ZERO).unwrap();
        sim.apply_damage(deer, 500.0, 0.0, DamageSource::Player).unwrap();

        assert!(!sim.request_mode(deer, Mode::Wander).unwrap());
        assert!(sim.request_forced(deer, Mode::Wander).unwrap());
        let state = sim.agent(deer).unwrap();
        assert!(!state.is_dead());
        assert_eq!(state.vitals.hp, state.vitals.max_hp);
        assert!(sim.roster.get(deer).unwrap().alive);
    }

    #[test]
    fn struggle_needs_a_player() {
        let mut sim = valley(10);
        let wolf = sim.spawn("wolf", Vec3::ZERO).unwrap();
        assert!(matches!(sim.begin_struggle(wolf), Err(SimError::NoPlayer)));
    }

    #[test]
    fn struggle_locks_and_releases() {
        let mut sim = valley(10);
        sim.set_player(PlayerSnapshot::at(Vec3::new(1.0, 0.0, 0.0)));
        let wolf = sim.spawn("wolf", Vec3::ZERO).unwrap();

        assert!(sim.begin_struggle(wolf).unwrap());
        assert_eq!(sim.agent(wolf).unwrap().mode(), Mode::Struggle);
        assert_eq!(sim.roster.player().unwrap().struggling_with, Some(wolf));

        assert!(sim.end_struggle(wolf).unwrap());
        assert_eq!(sim.agent(wolf).unwrap().mode(), Mode::Wander);
        assert!(!sim.roster.player().unwrap().in_struggle());
    }

    #[test]
    fn dead_agents_cannot_struggle() {
        let mut sim = valley(10);
        sim.set_player(PlayerSnapshot::at(Vec3::ZERO));
        let wolf = sim.spawn("wolf", Vec3::ZERO).unwrap();
        sim.apply_damage(wolf, 1_000.0, 0.0, DamageSource::Player).unwrap();

        assert!(!sim.begin_struggle(wolf).unwrap());
        assert_eq!(sim.roster.player().unwrap().struggling_with, None);
    }

    #[test]
    fn death_in_a_struggle_frees_the_player() {
        let mut sim = valley(10);
        sim.set_player(PlayerSnapshot::at(Vec3::new(0.0, 0.0, 8.0)));
        let wolf = sim.spawn("wolf", Vec3::new(0.0, 0.0, 7.0)).unwrap();
        assert!(sim.begin_struggle(wolf).unwrap());

        let outcome = sim.apply_damage(wolf, 1_000.0, 0.0, DamageSource::Player).unwrap();
        assert_eq!(outcome, DamageOutcome::Killed);
        assert!(!sim.roster.player().unwrap().in_struggle());

        // A fresh wolf facing the player picks them up on its first scan.
        let hunter = sim.spawn("wolf", Vec3::ZERO).unwrap();
        sim.step(&mut NoopObserver);
        assert_eq!(sim.agent(hunter).unwrap().ctx.current_target, Some(TargetId::Player));
    }

    #[test]
    fn stun_in_a_struggle_frees_the_player() {
        let mut sim = valley(10);
        sim.set_player(PlayerSnapshot::at(Vec3::new(1.0, 0.0, 0.0)));
        let wolf = sim.spawn("wolf", Vec3::ZERO).unwrap();
        assert!(sim.begin_struggle(wolf).unwrap());

        assert!(sim.stun(wolf, 2.0).unwrap());
        assert_eq!(sim.agent(wolf).unwrap().mode(), Mode::Stunned);
        assert_eq!(sim.roster.player().unwrap().struggling_with, None);
    }

    #[test]
    fn despawn_in_a_struggle_frees_the_player() {
        let mut sim = valley(10);
        sim.set_player(PlayerSnapshot::at(Vec3::new(1.0, 0.0, 0.0)));
        let wolf = sim.spawn("wolf", Vec3::ZERO).unwrap();
        assert!(sim.begin_struggle(wolf).unwrap());

        sim.despawn(wolf).unwrap();
        assert!(!sim.roster.player().unwrap().in_struggle());
    }

    #[test]
    fn another_animals_struggle_is_left_alone() {
        let mut sim = valley(10);
        sim.set_player(PlayerSnapshot::at(Vec3::new(1.0, 0.0, 0.0)));
        let held = sim.spawn("wolf", Vec3::ZERO).unwrap();
        let bystander = sim.spawn("wolf", Vec3::new(30.0, 0.0, 0.0)).unwrap();
        assert!(sim.begin_struggle(held).unwrap());

        sim.despawn(bystander).unwrap();
        assert_eq!(sim.roster.player().unwrap().struggling_with, Some(held));
    }
}

// ── Sink plumbing ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod sink_tests {
    use super::*;

    /// Counts emissions without storing them.
    #[derive(Default)]
    struct Counter(usize);

    impl MotionSink for Counter {
        fn emit(&mut self, _agent: AgentId, _signals: wl_world::MotionSignals) {
            self.0 += 1;
        }
    }

    #[test]
    fn custom_sink_receives_signals() {
        let mut sim = SimBuilder::new(test_config(4))
            .species(named(SpeciesKind::Rabbit, "hare"))
            .sink(Counter::default())
            .build()
            .unwrap();
        sim.spawn("hare", Vec3::ZERO).unwrap();
        sim.run(&mut NoopObserver);
        assert_eq!(sim.sink.0, 4);
    }
}
