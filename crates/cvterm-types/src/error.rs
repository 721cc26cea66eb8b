//! Error types for the CV terminal.

use std::io;

/// Errors produced by the CV terminal.
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    #[error("command source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("usage sink failure: {0}")]
    SinkFailure(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, TermError>;
