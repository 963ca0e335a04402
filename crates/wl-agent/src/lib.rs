//! `wl-agent` — per-agent state for the `rust_wildlife` framework.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`context`]   | `AgentModeContext` (mode, timers, target, wound and bleed)     |
//! | [`state`]     | `AgentState` and its `Vitals` / `Pose` / `Motion` / flag parts |
//! | [`builder`]   | `AgentBuilder` (fluent construction from a `SpeciesConfig`)    |
//! | [`roster`]    | `Roster`, `Published`, `PlayerSnapshot`                        |
//!
//! # Ownership
//!
//! An `AgentState` is owned by exactly one slot in the driver.  Other agents
//! only ever see the [`Published`] snapshot it leaves in the [`Roster`] after
//! its tick, so no agent can reach into another agent's context.

pub mod builder;
pub mod context;
pub mod roster;
pub mod state;

#[cfg(test)]
mod tests;

pub use builder::AgentBuilder;
pub use context::{AgentModeContext, BleedEnd};
pub use roster::{HeldItem, PlayerSnapshot, Published, Roster, TargetView};
pub use state::{AgentFlags, AgentState, AgentTimers, FleeReason, Motion, Pose, Vitals};
