use std::io;
use thiserror::Error;

/// Errors surfaced by the logging bridge itself.
#[derive(Debug, Error)]
pub enum LogError {
    /// Severity text outside the closed `{debug, info, warning, error}`
    /// vocabulary.
    #[error("unrecognized log level: {0:?}")]
    InvalidLevel(String),

    /// The structured sink could not be attached to its output stream.
    /// Fatal at startup: the process must not fall back to an unstructured
    /// destination.
    #[error("structured log sink unavailable: {0}")]
    SinkUnavailable(#[from] io::Error),
}
