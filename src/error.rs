use thiserror::Error;

use crate::validate::{join_messages, ValidationError};

/// Failure of a ledger operation. The in-memory collection is left as it was
/// before the operation whenever one of these is returned.
#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    #[error("Validation failed: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ValidationError> for LedgerError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(vec![err])
    }
}

#[derive(Debug, Error)]
pub(crate) enum StorageError {
    #[error("Storage error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to serialize data: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to load data: {0}")]
    Corrupt(#[source] serde_json::Error),
}

/// Import failure that rejects the whole document. Per-entry problems are
/// warnings on the report instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum ImportError {
    #[error("JSON Parse Error: {0}")]
    Parse(String),

    #[error("Invalid JSON structure: Expected array or object with yearlyData/data property")]
    Shape,
}
