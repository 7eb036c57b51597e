//! Error types for resource handling.

use std::path::PathBuf;

use fmerge_core::CoreError;
use thiserror::Error;

/// Result type alias for resource operations.
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Errors that can occur while loading, transforming or emitting resources.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Failed to read transformer config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid transformer config: {0}")]
    InvalidConfig(String),

    #[error("Document {index} in resource stream is not a mapping")]
    InvalidDocument { index: usize },

    #[error("Invalid resource {id}: {message}")]
    InvalidResource { id: String, message: String },

    #[error("No resource at index {0}")]
    IndexOutOfRange(usize),

    #[error("Merge failed for {id}: {source}")]
    Merge { id: String, source: CoreError },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ResourceError {
    /// Whether the error comes from malformed input documents.
    pub fn is_input_format(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig(_)
                | Self::InvalidDocument { .. }
                | Self::InvalidResource { .. }
                | Self::Yaml(_)
        )
    }

    /// Whether the error is a merge contract violation.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::Merge { .. })
    }
}
