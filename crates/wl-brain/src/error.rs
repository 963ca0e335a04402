//! Brain error type.

use thiserror::Error;

use wl_behavior::BehaviorError;
use wl_core::AgentId;

#[derive(Debug, Error)]
pub enum BrainError {
    /// The chosen attack side has no animation asset.
    #[error("{agent}: attack side {side} out of range (species has {sides})")]
    AnimationIndex { agent: AgentId, side: u8, sides: u8 },

    #[error(transparent)]
    Behavior(#[from] BehaviorError),
}

pub type BrainResult<T> = Result<T, BrainError>;
