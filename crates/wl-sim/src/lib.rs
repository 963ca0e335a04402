//! `wl-sim` — frame loop and population driver for the rust_wildlife framework.
//!
//! # Frame loop
//!
//! ```text
//! for frame in 0..config.total_frames:
//!   ① Flush     : report transitions committed by external calls since the
//!                 last frame (damage, stuns, struggles, scripted requests).
//!   ② Tick      : for each spawned agent in ascending AgentId order:
//!                   ModeStateMachine::tick(state, TickEnv)
//!                   publish the agent's snapshot into the roster
//!                   report its committed transitions
//!   ③ Clock     : advance the world clock by frame_secs (unless paused).
//!   ④ Summary   : every output_interval_frames, report live / dead counts.
//! ```
//!
//! Publishing right after each agent's tick means agents later in the same
//! frame see fresh positions and life states.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wl_core::{ScenarioConfig, Vec3};
//! use wl_sim::{NoopObserver, SimBuilder};
//!
//! let scenario = ScenarioConfig::load("valley.toml".as_ref())?;
//! let mut sim = SimBuilder::from_scenario(scenario).build()?;
//! sim.spawn("grey wolf", Vec3::new(0.0, 0.0, 0.0))?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{FrameSummary, NoopObserver, SimObserver};
pub use sim::{AgentSlot, Sim};
