//! `valley` — wildlife around a campfire, a player walking through with a
//! torch, and a handful of scripted events.
//!
//! Mode transitions go to `transitions.csv` and periodic population counts to
//! `frame_summaries.csv` in the output directory.
//!
//! Run with:
//!   cargo run -p valley --release -- [scenario.toml] [output_dir]
//!   RUST_LOG=wl_brain=debug cargo run -p valley

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wl_agent::{HeldItem, PlayerSnapshot};
use wl_brain::{DamageSource, Transition};
use wl_core::{AgentId, Frame, Mode, ScenarioConfig, SpeciesKind, ThreatCategory, Vec3};
use wl_output::{CsvWriter, OutputWriter, SimOutputObserver};
use wl_sim::{FrameSummary, Sim, SimBuilder, SimObserver};
use wl_world::{FieldKind, NullSink, OpenTerrain, World};

// ── Constants ─────────────────────────────────────────────────────────────────

const HALF_EXTENT:  f32  = 150.0;
const CAMPFIRE:     Vec3 = Vec3::new(0.0, 0.0, 0.0);
const RANGER_HUT:   Vec3 = Vec3::new(-90.0, 0.0, 60.0);
const BOULDER:      Vec3 = Vec3::new(40.0, 0.0, -30.0);
/// The player crosses the valley west to east at this speed, m/s.
const PLAYER_SPEED: f32  = 1.2;

/// Frames at which the scripted events fire.
const TORCH_LIT:    u64 = 600;
const DEER_SHOT:    u64 = 1_200;
const FIRE_OUT:     u64 = 1_800;
const WOLF_STUNNED: u64 = 2_400;

// ── Progress observer ─────────────────────────────────────────────────────────

/// Prints a line per summary and forwards everything to the CSV observer.
struct Progress<W: OutputWriter> {
    output:      SimOutputObserver<W>,
    start:       Instant,
    transitions: u64,
}

impl<W: OutputWriter> SimObserver for Progress<W> {
    fn on_transition(&mut self, frame: Frame, transition: &Transition) {
        self.transitions += 1;
        self.output.on_transition(frame, transition);
    }

    fn on_summary(&mut self, summary: &FrameSummary) {
        println!(
            "  {:>6}  t={:7.1}s  live={:3}  dead={:3}  transitions={:6}  {:.3}s",
            summary.frame.to_string(),
            summary.time,
            summary.live,
            summary.dead,
            self.transitions,
            self.start.elapsed().as_secs_f64(),
        );
        self.output.on_summary(summary);
    }

    fn on_sim_end(&mut self, final_frame: Frame) {
        self.output.on_sim_end(final_frame);
    }
}

// ── Scene setup ───────────────────────────────────────────────────────────────

fn spawn_population(sim: &mut Sim<NullSink>) -> Result<()> {
    let herds: [(&str, &[(f32, f32)]); 4] = [
        ("grey wolf",  &[(60.0, 60.0), (-50.0, -70.0), (100.0, -10.0)]),
        ("white-tail", &[(20.0, 40.0), (30.0, 45.0), (-40.0, 10.0), (-35.0, 20.0), (80.0, 80.0)]),
        ("snowshoe",   &[(10.0, -20.0), (-15.0, -25.0), (70.0, 20.0), (-100.0, 90.0)]),
        ("black bear", &[(-110.0, -100.0)]),
    ];
    for (species, spots) in herds {
        for &(x, z) in spots {
            sim.spawn(species, Vec3::new(x, 0.0, z))
                .with_context(|| format!("spawning {species}"))?;
        }
    }
    Ok(())
}

/// Move the player one frame along their walk.
fn walk_player(sim: &mut Sim<NullSink>, dt: f32) {
    if let Some(player) = sim.roster.player_mut() {
        if player.struggling_with.is_none() && player.position.x < HALF_EXTENT {
            player.position.x += PLAYER_SPEED * dt;
        }
    }
}

/// The living deer nearest to the player.
fn nearest_deer(sim: &Sim<NullSink>) -> Option<AgentId> {
    let player = sim.roster.player()?.position;
    sim.agents()
        .filter(|a| a.kind == SpeciesKind::Deer && !a.is_dead())
        .min_by(|a, b| {
            a.pose.position.distance(player).total_cmp(&b.pose.position.distance(player))
        })
        .map(|a| a.id)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("valley=info,wl_sim=info,wl_brain=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();

    let mut args = std::env::args().skip(1);
    let scenario_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/valley.toml")));
    let output_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("output/valley"));

    // 1. Scenario.
    let scenario = ScenarioConfig::load(&scenario_path)
        .with_context(|| format!("loading {}", scenario_path.display()))?;
    let frames = scenario.world.total_frames;
    let dt = scenario.world.frame_secs;
    println!("=== rust_wildlife  valley ===");
    println!(
        "Species: {}  |  Frames: {frames} x {dt}s  |  Seed: {}",
        scenario.species.len(),
        scenario.world.seed
    );

    // 2. World: bounded terrain, a boulder, the campfire and a safe haven.
    let terrain = OpenTerrain::square(HALF_EXTENT).with_obstacle(BOULDER, 12.0);
    let mut world = World::from_config(&scenario.world).with_terrain(terrain);
    let campfire = world.threats.add_source(ThreatCategory::Fire, CAMPFIRE)?;
    world.threats.add_field(FieldKind::SafeHaven, RANGER_HUT, 25.0);

    // 3. Sim and population.
    let mut sim = SimBuilder::from_scenario(scenario)
        .world(world)
        .player(PlayerSnapshot::at(Vec3::new(-HALF_EXTENT + 5.0, 0.0, 0.0)))
        .build()?;
    spawn_population(&mut sim)?;
    info!("spawned {} agents", sim.agent_count());

    // 4. Output.
    let writer = CsvWriter::new(&output_dir)
        .with_context(|| format!("opening output in {}", output_dir.display()))?;
    let mut observer = Progress {
        output:      SimOutputObserver::new(writer),
        start:       Instant::now(),
        transitions: 0,
    };

    // 5. Run, firing scripted events on the way.
    while sim.frame.0 < frames {
        match sim.frame.0 {
            TORCH_LIT => {
                if let Some(player) = sim.roster.player_mut() {
                    player.held = Some(HeldItem::Torch);
                }
                info!("player lights a torch");
            }
            DEER_SHOT => {
                if let Some(deer) = nearest_deer(&sim) {
                    let outcome = sim.apply_damage(deer, 45.0, 20.0, DamageSource::Player)?;
                    info!("player shoots {deer}: {outcome:?}");
                }
            }
            FIRE_OUT => {
                sim.world.threats.set_source_active(campfire, false)?;
                info!("campfire burns out");
            }
            WOLF_STUNNED => {
                let wolf = sim
                    .agents()
                    .find(|a| a.kind == SpeciesKind::Wolf && a.mode() != Mode::Dead)
                    .map(|a| a.id);
                if let Some(wolf) = wolf {
                    sim.stun(wolf, 5.0)?;
                    info!("{wolf} stunned");
                }
            }
            _ => {}
        }
        walk_player(&mut sim, dt);
        sim.step(&mut observer);
    }
    observer.on_sim_end(sim.frame);

    if let Some(e) = observer.output.take_error() {
        return Err(e).context("writing output");
    }

    let summary = sim.summary(sim.frame);
    println!();
    println!(
        "Done: {} transitions, {} live / {} dead after {:.1}s of sim time ({:.3}s wall)",
        observer.transitions,
        summary.live,
        summary.dead,
        summary.time,
        observer.start.elapsed().as_secs_f64(),
    );
    println!("Output written to {}", output_dir.display());
    Ok(())
}
