//! Error types for genre-linker.
//!
//! Only failures that end a run live here. Per-item problems (unmatched folders,
//! name conflicts, rejected library calls) are reported through the outcome enums in
//! [`crate::reconcile`] and [`crate::library`].

use thiserror::Error;

/// Fatal errors surfaced by the pipeline and CLI.
#[derive(Debug, Error)]
pub enum LinkerError {
    /// Missing or malformed configuration. Raised before any filesystem mutation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bad credentials or unreachable server. Raised before any filesystem mutation.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A media server call returned a non-success status or failed in transport.
    #[error("Media server error: {0}")]
    Remote(String),

    /// The media server returned no movies or series.
    #[error("No items found on the media server")]
    EmptyCatalog,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Interactive confirmation could not be read.
    #[error("Failed to get user input: {0}")]
    Prompt(String),
}

impl From<config::ConfigError> for LinkerError {
    fn from(err: config::ConfigError) -> Self {
        LinkerError::Config(err.to_string())
    }
}

impl From<reqwest::Error> for LinkerError {
    fn from(err: reqwest::Error) -> Self {
        LinkerError::Remote(err.to_string())
    }
}
