//!
//! Sortable: scoped, densely ordered lists over relational records.
//!
//! A table can carry any number of named lists. Each list keeps an integer
//! order column whose values, within one scope, are exactly `1..=N`; `NULL`
//! means the record is not in the list. This library maintains that
//! invariant across every mutation, including records moving between scopes.
//!
//! ## Core Concepts
//!
//! * **Lists (`registry::ListDefinition`)**: a named list on a table: its order column, base condition and scope keys.
//! * **Registry (`registry::ListRegistry`)**: all list definitions, per table. Built once (often from `config::SortableConfig`) and shared by `Arc`.
//! * **Records (`record::Record`)**: dynamically typed rows carrying the values they were loaded with and a ledger of changed scope keys.
//! * **Stores (`store::RecordStore`)**: the storage collaborator. `store::InMemoryStore` keeps tables in memory with JSON persistence; `store::SqlxStore` works on SQLite or PostgreSQL.
//! * **Engine (`lists::Lists`)**: positional queries, list mutations and the record lifecycle hooks that keep every list dense.

pub mod condition;
pub mod config;
pub mod constants;
pub mod lists;
pub mod record;
pub mod registry;
pub mod store;
pub mod value;

/// Re-export the engine and the types most callers need.
pub use lists::Lists;
pub use record::Record;
pub use value::Value;

/// Result type used throughout the Sortable library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Sortable library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured list registry errors from the registry module
    #[error(transparent)]
    Registry(registry::RegistryError),

    /// Structured store errors from the store module
    #[error(transparent)]
    Store(store::StoreError),

    /// Structured configuration errors from the config module
    #[error(transparent)]
    Config(config::ConfigError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Registry(_) => "registry",
            Error::Store(_) => "store",
            Error::Config(_) => "config",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Registry(registry_err) => registry_err.is_unknown_list(),
            Error::Store(store_err) => store_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error names a list that is not registered.
    pub fn is_unknown_list(&self) -> bool {
        match self {
            Error::Registry(registry_err) => registry_err.is_unknown_list(),
            _ => false,
        }
    }

    /// Check if this error indicates a list was registered twice.
    pub fn is_duplicate_list(&self) -> bool {
        match self {
            Error::Registry(registry_err) => registry_err.is_duplicate_list(),
            _ => false,
        }
    }

    /// Check if this error comes from invalid configuration.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Error::Config(_) => true,
            Error::Registry(registry_err) => {
                registry_err.is_invalid_definition() || registry_err.is_duplicate_list()
            }
            _ => false,
        }
    }

    /// Check if this error is store-related.
    pub fn is_database_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Store(store_err) => store_err.is_io_error(),
            Error::Config(config_err) => config_err.is_io_error(),
            _ => false,
        }
    }
}
