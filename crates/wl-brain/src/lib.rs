//! `wl-brain` — the per-agent behavior mode state machine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                          |
//! |-----------------|-------------------------------------------------------------------|
//! | [`machine`]     | `ModeStateMachine` — tick phases, requests, commit, journal       |
//! | [`preprocess`]  | transition arbitration (`ModeStateMachine::resolve`)              |
//! | [`threat`]      | hold-ground negotiation against deterrents, slowdown blending     |
//! | [`scanner`]     | nearest valid target search, ignore rules                         |
//! | [`detection`]   | flee / stalk roll on a newly acquired target                      |
//! | [`wounds`]      | wound and bleed-out progression, damage application               |
//! | [`modes`]       | base `ModeTable`: enter / process / exit for every vanilla mode   |
//! | [`anim`]        | movement and animation signal derivation                          |
//! | [`error`]       | `BrainError`, `BrainResult<T>`                                    |
//!
//! # Tick
//!
//! ```text
//! tick ──► pre-process ──► process ──► post-process ──► MotionSink
//!            │ timers         │ ModeTable[mode]
//!            │ stun           │   (scanner → detection)
//!            │ wounds
//!            │ hold ground
//!            ▼                ▼
//!          request(mode) ──► resolve ──► commit (exit → enter → flip)
//! ```
//!
//! Each phase first offers itself to the agent's species hook.

pub mod anim;
pub mod detection;
pub mod error;
pub mod machine;
pub mod modes;
pub mod preprocess;
pub mod scanner;
pub mod threat;
pub mod wounds;


pub use detection::DetectionOutcome;
pub use error::{BrainError, BrainResult};
pub use machine::{ModeStateMachine, Transition};
pub use modes::base_table;
pub use scanner::IgnoreReason;
pub use threat::ThreatDecision;
pub use wounds::{DamageOutcome, DamageSource};
