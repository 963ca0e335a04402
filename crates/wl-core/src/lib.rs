//! `wl-core` — foundational types for the `rust_wildlife` behavior framework.
//!
//! This crate is a dependency of every other `wl-*` crate.  It has no `wl-*`
//! dependencies and only a handful of external ones (`rand`, `thiserror`,
//! `serde` and `toml`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `SourceId`, `FieldId`, `TargetId`              |
//! | [`geo`]         | `Vec3`, horizontal distance, field-of-view angle          |
//! | [`time`]        | `Frame`, `WorldClock` (day-length scaling, pause)         |
//! | [`rng`]         | `AgentRng` (per-agent, deterministic)                     |
//! | [`mode`]        | `Mode` enum and its static flag sets                      |
//! | [`threat`]      | `ThreatCategory` priority order, `ThreatReading`          |
//! | [`species`]     | `SpeciesKind`, `WildlifeMode`                             |
//! | [`config`]      | `WorldConfig`, `SpeciesConfig`, `ScenarioConfig`          |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod mode;
pub mod rng;
pub mod species;
pub mod threat;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    AnimationConfig, DetectionConfig, FleeConfig, HoldGroundConfig, ModeTiming, ScenarioConfig,
    SpeciesConfig, SpeedConfig, ThreatRadii, ThreatRadiiTable, WorldConfig, WoundConfig,
};
pub use error::{CoreError, CoreResult};
pub use geo::Vec3;
pub use ids::{AgentId, FieldId, SourceId, TargetId};
pub use mode::{Mode, ModeFlags};
pub use rng::AgentRng;
pub use species::{SpeciesKind, WildlifeMode};
pub use threat::{ThreatCategory, ThreatReading};
pub use time::{Frame, WorldClock};
