//! Error types for zia-core

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::gateway::GatewayError;

/// Result type for zia-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reconciling or querying resources
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A desired or remote record cannot be normalized
    #[error("Malformed resource: {0}")]
    MalformedResource(#[source] zia_content::Error),

    /// The remote collection could not be read
    #[error("Failed to look up {kind}: {source}")]
    Lookup {
        kind: String,
        #[source]
        source: GatewayError,
    },

    /// `source` is `None` when the gateway accepted the call but returned
    /// no resource
    #[error("Failed to create {kind} '{name}': {}", cause_text(.source))]
    Create {
        kind: String,
        name: String,
        #[source]
        source: Option<GatewayError>,
    },

    #[error("Failed to update {kind} {id}: {}", cause_text(.source))]
    Update {
        kind: String,
        id: String,
        #[source]
        source: Option<GatewayError>,
    },

    /// Query target does not exist
    #[error("{kind} not found: {what}")]
    NotFound { kind: String, what: String },

    /// Manifest could not be read or interpreted
    #[error("Invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Caller input does not match the resource schema
    #[error(transparent)]
    Schema(#[from] zia_schema::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

fn cause_text(source: &Option<GatewayError>) -> String {
    match source {
        Some(err) => err.to_string(),
        None => "no resource returned".to_string(),
    }
}

impl From<zia_content::Error> for Error {
    fn from(err: zia_content::Error) -> Self {
        match err {
            zia_content::Error::Schema(inner) => Error::Schema(inner),
            other => Error::MalformedResource(other),
        }
    }
}

/// Machine-checkable error category, reported in failure output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MalformedResource,
    Lookup,
    Create,
    Update,
    NotFound,
    Config,
    Validation,
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedResource => "malformed_resource",
            ErrorKind::Lookup => "lookup",
            ErrorKind::Create => "create",
            ErrorKind::Update => "update",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Config => "config",
            ErrorKind::Validation => "validation",
            ErrorKind::Io => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedResource(_) => ErrorKind::MalformedResource,
            Error::Lookup { .. } => ErrorKind::Lookup,
            Error::Create { .. } => ErrorKind::Create,
            Error::Update { .. } => ErrorKind::Update,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Config { .. } | Error::Toml(_) | Error::Yaml(_) => ErrorKind::Config,
            Error::Schema(_) => ErrorKind::Validation,
            Error::Io(_) | Error::Json(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn config(path: impl Into<PathBuf>, message: impl fmt::Display) -> Self {
        Error::Config {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
