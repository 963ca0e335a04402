//! World error type.

use thiserror::Error;

use wl_core::{FieldId, SourceId, ThreatCategory};

/// Errors produced by `wl-world`.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("deterrent source {0} not found")]
    SourceNotFound(SourceId),

    #[error("threat field {0} not found")]
    FieldNotFound(FieldId),

    #[error("{0} cannot be placed as a point source")]
    NotASource(ThreatCategory),
}

pub type WorldResult<T> = Result<T, WorldError>;
