//! Error types for zia-content

/// Result type for zia-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, normalizing or comparing resources
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A value cannot be brought into canonical form
    #[error("Malformed {kind} resource at '{field}': {reason}")]
    MalformedResource {
        kind: String,
        field: String,
        reason: String,
    },

    #[error("{kind} resource has no '{field}' identifier")]
    MissingId { kind: String, field: String },

    #[error("{kind} resource has no '{field}'")]
    MissingName { kind: String, field: String },

    #[error("Expected a JSON object, got {found}")]
    NotAnObject { found: String },

    #[error(transparent)]
    Schema(#[from] zia_schema::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn malformed(
        kind: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedResource {
            kind: kind.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}
