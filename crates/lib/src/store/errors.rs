//! Error types for record store operations.
//!
//! These errors are produced by [`RecordStore`](super::RecordStore)
//! implementations and propagate unchanged through the ordering engine.

use thiserror::Error;

/// Errors that can occur during record store operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row with this id exists in the table.
    #[error("Record not found in '{table}': {id}")]
    RecordNotFound {
        /// The table that was queried
        table: String,
        /// The missing id
        id: i64,
    },

    /// The operation needs a stored record but got a new one.
    #[error("Record in '{table}' has not been saved yet")]
    NotPersisted {
        /// The table of the record
        table: String,
    },

    /// The store has no schema for this table.
    #[error("Unknown table: {table}")]
    UnknownTable {
        /// The table name
        table: String,
    },

    /// The table has no such column.
    #[error("Unknown column '{column}' in table '{table}'")]
    UnknownColumn {
        /// The table name
        table: String,
        /// The column name
        column: String,
    },

    /// A table or column name is not a plain identifier.
    #[error("Invalid identifier: {name}")]
    InvalidIdentifier {
        /// The rejected name
        name: String,
    },

    /// A value does not fit the column it is written to.
    #[error("Type mismatch for '{table}.{column}': expected {expected}, found {actual}")]
    TypeMismatch {
        /// The table name
        table: String,
        /// The column name
        column: String,
        /// The column's declared kind
        expected: String,
        /// The kind of the offending value
        actual: String,
    },

    /// Transaction bookkeeping failed (commit without begin, ...).
    #[error("Transaction failed: {reason}")]
    TransactionFailed {
        /// Description of the failure
        reason: String,
    },

    /// SQL operation failed.
    #[cfg(any(feature = "sqlite", feature = "postgres"))]
    #[error("SQL error: {reason}")]
    Sqlx {
        /// Description of the SQL error
        reason: String,
        /// The underlying sqlx error
        #[source]
        source: Option<sqlx::Error>,
    },

    /// The store's async runtime could not be created.
    #[error("Runtime error: {reason}")]
    Runtime {
        /// Description of the failure
        reason: String,
    },

    /// File I/O error.
    #[error("File I/O error")]
    FileIo {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Serialization failed.
    #[error("Serialization failed")]
    SerializationFailed {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization failed.
    #[error("Deserialization failed")]
    DeserializationFailed {
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// A lock guarding store state was poisoned by a panicking thread.
    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::RecordNotFound { .. }
                | StoreError::UnknownTable { .. }
                | StoreError::UnknownColumn { .. }
        )
    }

    /// Check if this error is related to I/O operations.
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            StoreError::FileIo { .. }
                | StoreError::SerializationFailed { .. }
                | StoreError::DeserializationFailed { .. }
        )
    }

    /// Check if this error comes from the SQL layer.
    pub fn is_sql_error(&self) -> bool {
        match self {
            #[cfg(any(feature = "sqlite", feature = "postgres"))]
            StoreError::Sqlx { .. } => true,
            _ => false,
        }
    }

    /// Check if this error indicates a caller mistake rather than a store failure.
    pub fn is_logical_error(&self) -> bool {
        matches!(
            self,
            StoreError::NotPersisted { .. }
                | StoreError::InvalidIdentifier { .. }
                | StoreError::TypeMismatch { .. }
                | StoreError::TransactionFailed { .. }
        )
    }

    /// The table this error is about, if any.
    pub fn table(&self) -> Option<&str> {
        match self {
            StoreError::RecordNotFound { table, .. }
            | StoreError::NotPersisted { table }
            | StoreError::UnknownTable { table }
            | StoreError::UnknownColumn { table, .. }
            | StoreError::TypeMismatch { table, .. } => Some(table),
            _ => None,
        }
    }
}

impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
