//! Error types for the merge engine.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that abort a merge.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Target '{0}' has no file extension (expected e.g. '{0}.properties')")]
    MissingExtension(String),

    #[error("Entry '{key}' has empty content and cannot be merged")]
    EmptyContent { key: String },
}
