//! Error types for symnav
//!
//! Expected-empty outcomes (no block, no symbols, no next target) are not
//! errors and never appear here.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub type NavResult<T> = std::result::Result<T, NavError>;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Symbol provider timed out after {0:?}")]
    Timeout(Duration),

    #[error("Symbol query cancelled")]
    Cancelled,

    #[error("Symbol provider unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed symbol data in {path}: {message}")]
    Malformed { path: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ProviderError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Worth another attempt: transient failures only, never cancellation
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Unavailable(_))
    }

    pub fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("File too large ({size_mb}MB > {limit_mb}MB limit): {path}")]
    TooLarge {
        path: String,
        size_mb: u64,
        limit_mb: u64,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
