//! Error types for Pokedex operations.
//!
//! Every public operation on [`PokemonService`](crate::service::PokemonService)
//! fails with one of the three kinds of [`PokedexError`]. Callers pattern-match
//! on the variant rather than inspecting messages.

use crate::search::SearchKind;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Offending field/value pairs reported by a uniqueness violation.
pub type ConflictFields = BTreeMap<String, Value>;

/// Main error type for Pokedex operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PokedexError {
    /// No entity matched the classified token or id.
    #[error("Pokemon with {kind} \"{token}\" not found")]
    NotFound { kind: SearchKind, token: String },

    /// A uniqueness constraint was violated on write.
    #[error("Pokemon already exists: {}", render_fields(.fields))]
    Conflict { fields: ConflictFields },

    /// Any other backend failure.
    #[error("Internal failure: {detail}")]
    InternalFailure { detail: String },
}

/// Errors that can occur while building a service from configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Invalid configuration provided
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Errors produced when parsing an opaque id from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectIdError {
    #[error("Invalid object id length {length}, expected 24 hex characters")]
    InvalidLength { length: usize },

    #[error("Invalid character '{character}' at position {index} in object id")]
    InvalidCharacter { character: char, index: usize },
}

fn render_fields(fields: &ConflictFields) -> String {
    serde_json::to_string(fields).unwrap_or_else(|_| format!("{:?}", fields))
}

// Convenience methods for creating common errors
impl PokedexError {
    /// Create a not found error for a classified token
    pub fn not_found(kind: SearchKind, token: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            token: token.into(),
        }
    }

    /// Create a conflict error from the offending fields
    pub fn conflict(fields: ConflictFields) -> Self {
        Self::Conflict { fields }
    }

    /// Create an internal failure
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::InternalFailure {
            detail: detail.into(),
        }
    }

    /// HTTP status an API layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            PokedexError::NotFound { .. } => 404,
            PokedexError::Conflict { .. } => 400,
            PokedexError::InternalFailure { .. } => 500,
        }
    }

    /// Whether the caller can correct the request and retry.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PokedexError::InternalFailure { .. })
    }

    /// Stable machine-readable code for this error kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            PokedexError::NotFound { .. } => "NOT_FOUND",
            PokedexError::Conflict { .. } => "CONFLICT",
            PokedexError::InternalFailure { .. } => "INTERNAL_FAILURE",
        }
    }
}

/// Caller-facing projection of a [`PokedexError`].
///
/// Client-correctable errors keep their full message, including the searched
/// token or the conflicting fields. Internal failures are reduced to a generic
/// message so that backend details never reach the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error_code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<ConflictFields>,
}

impl From<&PokedexError> for ErrorResponse {
    fn from(error: &PokedexError) -> Self {
        let (message, fields) = match error {
            PokedexError::NotFound { .. } => (error.to_string(), None),
            PokedexError::Conflict { fields } => (error.to_string(), Some(fields.clone())),
            PokedexError::InternalFailure { .. } => ("Internal server error".to_string(), None),
        };

        ErrorResponse {
            status: error.status_code(),
            error_code: error.error_code().to_string(),
            message,
            fields,
        }
    }
}

// Result type aliases for convenience
pub type PokedexResult<T> = Result<T, PokedexError>;
pub type BuildResult<T> = Result<T, BuildError>;
