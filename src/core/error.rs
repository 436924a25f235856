//! Error types for parameter validation and session handling

use crate::core::{FieldId, PathKind};
use thiserror::Error;

/// Rejections produced while checking a parameter set.
///
/// Every variant is recoverable: the caller reports it and asks the user
/// for corrected input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Parse error: {0} is not a valid number")]
    Parse(FieldId),

    #[error("Range error: {0}")]
    Range(String),

    #[error("Missing path: {0} must not be empty")]
    MissingPath(PathKind),

    #[error("Conflicting scale mode: save and load cannot both be selected")]
    ConflictingMode,
}

/// Failures while reading or writing a session file
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Incompatible session: {0}")]
    Incompatible(String),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
