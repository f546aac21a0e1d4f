//! Error types for the grocery assistant frontend.
//!
//! One enum covers the whole client: HTTP failures with the backend's own
//! message, auth rejections that force a logout, validation of pasted JSON,
//! and missing-DOM preconditions.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Non-2xx response; message comes from the body's `error` field when
    /// present, otherwise "Erreur {status}".
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 401/403; the client clears the session and reloads.
    #[error("Session expirée ({status})")]
    Unauthorized { status: u16 },

    /// Request never reached the backend (network down, CORS, aborted).
    #[error("Erreur réseau: {0}")]
    Network(String),

    /// Response body was not the JSON we expected.
    #[error("Réponse illisible: {0}")]
    Decode(String),

    /// User-supplied JSON (import boxes, flyer paste) failed validation.
    #[error("{0}")]
    Validation(String),

    /// localStorage unavailable or unreadable.
    #[error("Stockage local indisponible: {0}")]
    Storage(String),

    /// A selector the tutorial or an action relied on matched nothing.
    #[error("Élément introuvable: {0}")]
    MissingElement(String),
}

impl AppError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// True when the UI should treat this as a dead session.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
