//! Error types for list registration and resolution.

use thiserror::Error;

/// Errors raised by the [`ListRegistry`](super::ListRegistry).
///
/// These are configuration errors: they are raised before any filter is
/// bound or any store is touched.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No list with this name is registered for the table.
    #[error("sortable list '{list}' does not exist on '{table}'")]
    UnknownList {
        /// The table (record type) that was queried
        table: String,
        /// The requested list name
        list: String,
    },

    /// A list with this name is already registered for the table.
    #[error("sortable list '{list}' is already registered on '{table}'")]
    DuplicateList {
        /// The table (record type)
        table: String,
        /// The duplicated list name
        list: String,
    },

    /// The definition violates a registry invariant.
    #[error("invalid sortable list '{list}' on '{table}': {reason}")]
    InvalidDefinition {
        /// The table (record type)
        table: String,
        /// The offending list name
        list: String,
        /// What is wrong with the definition
        reason: String,
    },
}

impl RegistryError {
    /// Check if this error is an unknown list lookup.
    pub fn is_unknown_list(&self) -> bool {
        matches!(self, RegistryError::UnknownList { .. })
    }

    /// Check if this error is a duplicate registration.
    pub fn is_duplicate_list(&self) -> bool {
        matches!(self, RegistryError::DuplicateList { .. })
    }

    /// Check if this error is an invalid definition.
    pub fn is_invalid_definition(&self) -> bool {
        matches!(self, RegistryError::InvalidDefinition { .. })
    }

    /// The list name this error is about.
    pub fn list(&self) -> &str {
        match self {
            RegistryError::UnknownList { list, .. }
            | RegistryError::DuplicateList { list, .. }
            | RegistryError::InvalidDefinition { list, .. } => list,
        }
    }

    /// The table this error is about.
    pub fn table(&self) -> &str {
        match self {
            RegistryError::UnknownList { table, .. }
            | RegistryError::DuplicateList { table, .. }
            | RegistryError::InvalidDefinition { table, .. } => table,
        }
    }
}

impl From<RegistryError> for crate::Error {
    fn from(err: RegistryError) -> Self {
        crate::Error::Registry(err)
    }
}
