//! The `World` bundle lent (read-only) to every agent tick.

use wl_core::{WorldClock, WorldConfig};

use crate::{NoPacks, OpenTerrain, PackCoordinator, Pathfinder, ThreatMap, Visibility};

/// Global switches read by the scanner and the detection responder.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldFlags {
    /// Player sits in the main menu; wildlife ignores them.
    pub main_menu:          bool,
    /// A global event (e.g. an aurora) is running.
    pub event_active:       bool,
    /// Difficulty scalar on flee chances against the player.
    pub flee_chance_scalar: f32,
}

impl Default for WorldFlags {
    fn default() -> Self {
        Self { main_menu: false, event_active: false, flee_chance_scalar: 1.0 }
    }
}

/// Clock, deterrents and external capabilities for one scene.
pub struct World {
    pub clock:      WorldClock,
    pub flags:      WorldFlags,
    pub threats:    ThreatMap,
    pub visibility: Box<dyn Visibility>,
    pub pathfinder: Box<dyn Pathfinder>,
    pub packs:      Box<dyn PackCoordinator>,
}

impl World {
    /// Open terrain, no packs, clock and flags from `config`.
    pub fn from_config(config: &WorldConfig) -> Self {
        Self {
            clock: WorldClock::new(config.day_length_real_secs),
            flags: WorldFlags {
                flee_chance_scalar: config.flee_chance_scalar,
                ..WorldFlags::default()
            },
            ..Self::default()
        }
    }

    /// Use one terrain for both sight and navigation.
    pub fn with_terrain(mut self, terrain: OpenTerrain) -> Self {
        self.visibility = Box::new(terrain.clone());
        self.pathfinder = Box::new(terrain);
        self
    }

    pub fn with_visibility(mut self, visibility: Box<dyn Visibility>) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_pathfinder(mut self, pathfinder: Box<dyn Pathfinder>) -> Self {
        self.pathfinder = pathfinder;
        self
    }

    pub fn with_packs(mut self, packs: Box<dyn PackCoordinator>) -> Self {
        self.packs = packs;
        self
    }

    #[inline]
    pub fn now(&self) -> f64 {
        self.clock.now
    }
}

impl Default for World {
    fn default() -> Self {
        Self {
            clock:      WorldClock::default(),
            flags:      WorldFlags::default(),
            threats:    ThreatMap::new(),
            visibility: Box::new(OpenTerrain::default()),
            pathfinder: Box::new(OpenTerrain::default()),
            packs:      Box::new(NoPacks),
        }
    }
}
