//! `wl-world` — everything an agent perceives or drives outside itself.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`sense`]       | `Visibility`, `Pathfinder` traits, `PathRequirement`       |
//! | [`terrain`]     | `OpenTerrain` (bounded flat area with round obstacles)     |
//! | [`threat_map`]  | `ThreatMap` (R-tree of deterrent sources + threat fields)  |
//! | [`motion`]      | `MotionSink` trait, `MotionSignals`, `RecordingSink`       |
//! | [`pack`]        | `PackCoordinator` trait, `NoPacks`                         |
//! | [`world`]       | `World` bundle, `WorldFlags`                               |
//! | [`error`]       | `WorldError`, `WorldResult<T>`                             |
//!
//! # Pluggability
//!
//! The brain only talks to the navigation engine, the animation system and
//! pack logic through the traits here, so a host game can swap in raycasts
//! and a navmesh without touching the behavior core.  `OpenTerrain` and
//! `NoPacks` are sufficient for demos and tests.

pub mod error;
pub mod motion;
pub mod pack;
pub mod sense;
pub mod terrain;
pub mod threat_map;
pub mod world;


pub use error::{WorldError, WorldResult};
pub use motion::{AnimState, MotionSignals, MotionSink, MoveState, NullSink, RecordingSink};
pub use pack::{NoPacks, PackCoordinator};
pub use sense::{PathRequirement, Pathfinder, Visibility};
pub use terrain::{Obstacle, OpenTerrain};
pub use threat_map::{DeterrentSource, FieldKind, ThreatField, ThreatMap};
pub use world::{World, WorldFlags};
