//! Error types for the analysis pipeline.

use api_report_core::{ApiFormat, UnknownFormat};
use thiserror::Error;

/// Errors that can abort an analysis, conversion or report run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Input text is not valid JSON.
    #[error("failed to parse API description: {0}")]
    Parse(#[source] serde_json::Error),

    /// A format identifier is not in the catalog.
    #[error(transparent)]
    UnknownFormat(#[from] UnknownFormat),

    /// The format exists but cannot be read as a source.
    #[error("{} cannot be used as a source format (supported: postman, swagger)", .0.display_name())]
    UnsupportedSource(ApiFormat),

    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization failure while emitting output.
    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias for results with [`AnalysisError`].
pub type Result<T> = std::result::Result<T, AnalysisError>;
