//! Storage-specific error types.
//!
//! These errors describe persistence failures. They carry no knowledge of the
//! caller-facing taxonomy; the service layer reclassifies them through
//! [`BackendError`].

use crate::error::ConflictFields;
use crate::storage::BackendError;
use std::fmt;

/// Errors that can occur during storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// A unique index rejected the write.
    DuplicateKey {
        index: String,
        key_value: ConflictFields,
    },

    /// Generic internal storage error.
    Internal {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::DuplicateKey { index, key_value } => {
                let rendered = serde_json::to_string(key_value)
                    .unwrap_or_else(|_| format!("{:?}", key_value));
                write!(
                    f,
                    "Duplicate key error on index '{}': {}",
                    index, rendered
                )
            }
            StorageError::Internal { message, .. } => {
                write!(f, "Internal storage error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Internal { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

impl BackendError for StorageError {
    fn is_uniqueness_violation(&self) -> bool {
        matches!(self, StorageError::DuplicateKey { .. })
    }

    fn conflicting_fields(&self) -> ConflictFields {
        match self {
            StorageError::DuplicateKey { key_value, .. } => key_value.clone(),
            _ => ConflictFields::new(),
        }
    }
}

impl StorageError {
    /// Create a DuplicateKey error for a single colliding field.
    pub fn duplicate_key(field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        let field = field.into();
        let mut key_value = ConflictFields::new();
        key_value.insert(field.clone(), value.into());
        Self::DuplicateKey {
            index: format!("{}_1", field),
            key_value,
        }
    }

    /// Create a new Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }
}
