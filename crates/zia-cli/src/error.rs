//! Error types for zia-cli

use std::path::Path;

use serde_json::{Value, json};
use zia_core::ErrorKind;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from zia-core
    #[error(transparent)]
    Core(#[from] zia_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The local store file is unreadable
    #[error("Invalid store {path}: {message}")]
    Store { path: String, message: String },

    /// Some manifest entries failed; each was already reported
    #[error("{failed} of {total} resources failed")]
    EntriesFailed { failed: usize, total: usize },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    pub fn store(path: &Path, message: impl std::fmt::Display) -> Self {
        Self::Store {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CliError::Core(e) => e.kind(),
            CliError::Io(_) | CliError::Json(_) | CliError::Store { .. } => ErrorKind::Io,
            CliError::EntriesFailed { .. } | CliError::User { .. } => ErrorKind::Config,
        }
    }

    /// Whether the failure details have already been printed
    pub fn is_reported(&self) -> bool {
        matches!(self, CliError::EntriesFailed { .. })
    }

    /// Machine-readable failure payload
    pub fn to_json(&self) -> Value {
        failure_json(self.kind(), &self.to_string())
    }
}

pub fn failure_json(kind: ErrorKind, msg: &str) -> Value {
    json!({
        "failed": true,
        "kind": kind.as_str(),
        "msg": msg,
    })
}
