//! Error types for scrollkit.

use std::io;

/// Errors produced by scrollkit.
#[derive(Debug, thiserror::Error)]
pub enum ScrollError {
    #[error("invalid viewport: {0}")]
    InvalidViewport(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("script error: {0}")]
    Script(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ScrollError>;
