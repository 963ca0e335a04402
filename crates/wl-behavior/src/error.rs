use thiserror::Error;

use wl_core::Mode;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("mode {0} already has handlers registered")]
    DuplicateMode(Mode),

    #[error("behavior configuration error: {0}")]
    Config(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
