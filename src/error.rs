//! Error types for tablekv
//!
//! Provides a unified error type for all store operations.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for tablekv operations
///
/// Every variant is recoverable: a failed call leaves the store untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Registry Errors
    // -------------------------------------------------------------------------
    #[error("table {table} does not exist")]
    TableNotFound { table: String },

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("item with id {key} not found in table {table}")]
    KeyNotFound { key: String, table: String },

    /// Never produced by the store itself (write is an upsert). Callers that
    /// need insert-only semantics do a read-before-write and report this.
    #[error("item with id {key} already exists in table {table}")]
    KeyAlreadyExists { key: String, table: String },

    #[error("invalid range: start {start} is past end {end}")]
    InvalidRange { start: i64, end: i64 },

    // -------------------------------------------------------------------------
    // Command Errors
    // -------------------------------------------------------------------------
    #[error("Command error: {0}")]
    Command(String),
}

impl StoreError {
    pub(crate) fn table_not_found(table: &str) -> Self {
        StoreError::TableNotFound {
            table: table.to_string(),
        }
    }

    /// True for `TableNotFound` and `KeyNotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::TableNotFound { .. } | StoreError::KeyNotFound { .. }
        )
    }
}
