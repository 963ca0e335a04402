//! `wl-behavior` — how species-specific logic plugs into the mode pipeline.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                         |
//! |--------------|------------------------------------------------------------------|
//! | [`hook`]     | `Hook<T>` — `Handled(value)` or `Continue`                       |
//! | [`env`]      | `TickEnv<'a>` — everything borrowed for the length of one tick   |
//! | [`species`]  | `SpeciesBehavior` trait, `StandardSpecies`                       |
//! | [`table`]    | `ModeTable`, `ModeHandlers` — per-mode enter/process/exit fns    |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                             |
//!
//! # Design notes
//!
//! Every phase of the state machine first asks the agent's
//! [`SpeciesBehavior`] whether it wants to handle the phase itself.  A
//! `Handled` answer replaces the base logic outright; `Continue` runs it.
//! Nothing in the base pipeline is skipped without such an explicit answer.
//!
//! Neither hooks nor mode handlers commit modes directly.  They return the
//! mode they would like, and the state machine routes it through the
//! preprocessor before committing.  This keeps every transition on a single
//! path.

pub mod env;
pub mod error;
pub mod hook;
pub mod species;
pub mod table;


pub use env::TickEnv;
pub use error::{BehaviorError, BehaviorResult};
pub use hook::Hook;
pub use species::{SpeciesBehavior, StandardSpecies};
pub use table::{EnterFn, ExitFn, ModeHandlers, ModeTable, ProcessFn};
