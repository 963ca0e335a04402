//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;

use rustc_hash::FxHashMap;

use wl_agent::{PlayerSnapshot, Roster};
use wl_behavior::ModeTable;
use wl_brain::base_table;
use wl_core::{Frame, ScenarioConfig, SpeciesConfig, WorldConfig};
use wl_world::{MotionSink, NullSink, World};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<S>`].
///
/// # Required inputs
///
/// - [`WorldConfig`]: seed, frame length, day length, total frames, …
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                       |
/// |-------------------|-----------------------------------------------|
/// | `.species(c)`     | no species; `Sim::spawn` by name then fails   |
/// | `.world(w)`       | `World::from_config(&config)` (open terrain)  |
/// | `.table(t)`       | `wl_brain::base_table()`                      |
/// | `.sink(s)`        | `NullSink`                                    |
/// | `.player(p)`      | no player                                     |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::from_scenario(scenario)
///     .world(World::from_config(&scenario.world).with_terrain(terrain))
///     .player(PlayerSnapshot::at(Vec3::ZERO))
///     .build()?;
/// ```
pub struct SimBuilder<S: MotionSink = NullSink> {
    scenario: ScenarioConfig,
    world:    Option<World>,
    table:    Option<ModeTable>,
    player:   Option<PlayerSnapshot>,
    sink:     S,
}

impl SimBuilder<NullSink> {
    /// Create a builder with no species registered.
    pub fn new(config: WorldConfig) -> Self {
        Self::from_scenario(ScenarioConfig { world: config, species: Vec::new() })
    }

    /// Create a builder with the world settings and species of a scenario.
    pub fn from_scenario(scenario: ScenarioConfig) -> Self {
        Self {
            scenario,
            world:  None,
            table:  None,
            player: None,
            sink:   NullSink,
        }
    }
}

impl<S: MotionSink> SimBuilder<S> {
    /// Register a species that [`Sim::spawn`] can refer to by name.
    pub fn species(mut self, config: SpeciesConfig) -> Self {
        self.scenario.species.push(config);
        self
    }

    /// Supply the world (terrain, deterrents, pack coordinator).
    ///
    /// The world's clock and flags are used as given; `WorldConfig`'s day
    /// length and flee scalar only apply to the default world.
    pub fn world(mut self, world: World) -> Self {
        self.world = Some(world);
        self
    }

    /// Replace the base mode table, e.g. to register custom modes.
    pub fn table(mut self, table: ModeTable) -> Self {
        self.table = Some(table);
        self
    }

    pub fn player(mut self, player: PlayerSnapshot) -> Self {
        self.player = Some(player);
        self
    }

    /// Route every agent's motion output to `sink`.
    pub fn sink<T: MotionSink>(self, sink: T) -> SimBuilder<T> {
        SimBuilder {
            scenario: self.scenario,
            world:    self.world,
            table:    self.table,
            player:   self.player,
            sink,
        }
    }

    /// Validate inputs, build the mode table and return a ready-to-run
    /// [`Sim`] with no agents spawned.
    pub fn build(self) -> SimResult<Sim<S>> {
        self.scenario.validate()?;

        // ── Species registry ──────────────────────────────────────────────
        let mut species = FxHashMap::default();
        for config in self.scenario.species {
            let name = config.name.clone();
            if species.insert(name.clone(), Arc::new(config)).is_some() {
                return Err(SimError::Config(format!("species {name:?} is defined twice")));
            }
        }

        let table = match self.table {
            Some(t) => t,
            None    => base_table()?,
        };
        let world = self.world.unwrap_or_else(|| World::from_config(&self.scenario.world));

        let mut roster = Roster::new();
        if let Some(player) = self.player {
            roster.set_player(player);
        }

        Ok(Sim {
            config:  self.scenario.world,
            world,
            roster,
            frame:   Frame::ZERO,
            slots:   Vec::new(),
            species,
            table:   Arc::new(table),
            sink:    self.sink,
            pending: Vec::new(),
        })
    }
}
