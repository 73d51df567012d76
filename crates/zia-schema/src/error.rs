//! Error types for zia-schema

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown resource kind: {kind}")]
    UnknownKind { kind: String },

    #[error("Invalid input for {kind}: expected an object, got {found}")]
    NotAnObject { kind: String, found: String },

    #[error("Unknown field '{path}' for {kind}")]
    UnknownField { kind: String, path: String },

    #[error("Missing required field '{path}' for {kind}")]
    MissingField { kind: String, path: String },

    #[error("Invalid value for '{path}' ({kind}): expected {expected}, got {found}")]
    InvalidType {
        kind: String,
        path: String,
        expected: String,
        found: String,
    },

    #[error("Value '{value}' for '{path}' ({kind}) must be one of: {}", choices.join(", "))]
    InvalidChoice {
        kind: String,
        path: String,
        value: String,
        choices: Vec<String>,
    },
}

impl Error {
    /// Path of the offending field, if the error concerns one
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::UnknownField { path, .. }
            | Error::MissingField { path, .. }
            | Error::InvalidType { path, .. }
            | Error::InvalidChoice { path, .. } => Some(path),
            Error::UnknownKind { .. } | Error::NotAnObject { .. } => None,
        }
    }
}
