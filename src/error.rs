//! Error types for Tubelens.

use serde::Serialize;
use thiserror::Error;

/// Library-level error type for Tubelens operations.
#[derive(Error, Debug)]
pub enum TubelensError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    #[error("Inference failed: {0}")]
    InferenceFailure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Wire-level classification of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    TranscriptUnavailable,
    InferenceFailure,
    Configuration,
    Internal,
}

impl ErrorKind {
    /// Whether the fault lies with the caller (bad URL, no transcript).
    pub fn is_client_error(self) -> bool {
        matches!(self, ErrorKind::InvalidInput | ErrorKind::TranscriptUnavailable)
    }
}

impl TubelensError {
    /// Classify this error for reporting to a client.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TubelensError::InvalidInput(_) => ErrorKind::InvalidInput,
            TubelensError::TranscriptUnavailable(_) => ErrorKind::TranscriptUnavailable,
            TubelensError::InferenceFailure(_) => ErrorKind::InferenceFailure,
            TubelensError::Config(_) => ErrorKind::Configuration,
            TubelensError::Io(_)
            | TubelensError::Json(_)
            | TubelensError::TomlParse(_)
            | TubelensError::Http(_) => ErrorKind::Internal,
        }
    }
}

/// Result type alias for Tubelens operations.
pub type Result<T> = std::result::Result<T, TubelensError>;
