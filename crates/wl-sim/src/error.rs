use thiserror::Error;

use wl_behavior::BehaviorError;
use wl_brain::BrainError;
use wl_core::{AgentId, CoreError};

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("no species named {0:?} in this scenario")]
    UnknownSpecies(String),

    #[error("agent {0} is not spawned")]
    NotSpawned(AgentId),

    #[error("no player in the scene")]
    NoPlayer,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Brain(#[from] BrainError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),
}

pub type SimResult<T> = Result<T, SimError>;
