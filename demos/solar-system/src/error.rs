//! Error types for settings and body-registry loading.
//! The per-frame simulation never fails; only configuration input can be rejected.

use thiserror::Error;

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("body '{key}' is invalid: {reason}")]
    InvalidBody { key: String, reason: String },

    #[error("duplicate body key: {0}")]
    DuplicateBody(String),

    #[error("body registry is empty")]
    EmptyRegistry,

    #[error("invalid color '{0}', expected #RRGGBB")]
    InvalidColor(String),
}
