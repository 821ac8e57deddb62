//! Error taxonomy for catalog lookups, conversions and persistence
//!
//! All errors are serializable so the presentation layer can render them.
//! The session never propagates these to its caller: unknown ids become
//! no-ops, failed conversions become "N/A" and corrupt storage becomes
//! defaults. Lower layers (catalog, store, settings) return them.

use thiserror::Error;
use serde::Serialize;

/// Conversion and storage errors
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum ConvertError {
    /// No category with this id in the catalog
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// No unit with this id in the given category
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// The source unit has no rule reaching the target unit
    #[error("Not convertible: {0}")]
    NotConvertible(String),

    /// Invalid input or parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Persistent store failure (open, read, write)
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON encode/decode failure
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File system error
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        ConvertError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(err: serde_json::Error) -> Self {
        ConvertError::Serialization(err.to_string())
    }
}

impl From<redb::DatabaseError> for ConvertError {
    fn from(err: redb::DatabaseError) -> Self {
        ConvertError::Storage(format!("Failed to open database: {}", err))
    }
}

impl From<redb::TransactionError> for ConvertError {
    fn from(err: redb::TransactionError) -> Self {
        ConvertError::Storage(format!("Failed to begin transaction: {}", err))
    }
}

impl From<redb::TableError> for ConvertError {
    fn from(err: redb::TableError) -> Self {
        ConvertError::Storage(format!("Failed to open table: {}", err))
    }
}

impl From<redb::StorageError> for ConvertError {
    fn from(err: redb::StorageError) -> Self {
        ConvertError::Storage(err.to_string())
    }
}

impl From<redb::CommitError> for ConvertError {
    fn from(err: redb::CommitError) -> Self {
        ConvertError::Storage(format!("Failed to commit: {}", err))
    }
}

// Helper type alias for fallible catalog/store operations
pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_type_and_message() {
        let err = ConvertError::UnknownUnit("parsec".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "UnknownUnit");
        assert_eq!(json["message"], "parsec");
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ConvertError::UnknownCategory("bogus".to_string()).to_string(),
            "Unknown category: bogus"
        );
        assert_eq!(
            ConvertError::NotConvertible("meter has no rule".to_string()).to_string(),
            "Not convertible: meter has no rule"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err: ConvertError = serde_json::from_str::<Vec<u8>>("not json").unwrap_err().into();
        assert!(matches!(err, ConvertError::Serialization(_)));
    }
}
