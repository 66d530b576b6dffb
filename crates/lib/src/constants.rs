//! Constants used throughout the Sortable library.
//!
//! This module provides central definitions for default names and reserved
//! identifiers.

/// Name of the default list on a table.
pub const DEFAULT_LIST: &str = "";

/// Order column used when a list does not name one.
pub const DEFAULT_ORDER_COLUMN: &str = "position";

/// Primary key column every stored table carries.
pub const ID_COLUMN: &str = "id";

/// Persistence file name used by the in-memory store in a data directory.
pub const IN_MEMORY_FILE: &str = "sortable.json";

/// Database file name used by the SQLite store in a data directory.
pub const SQLITE_FILE: &str = "sortable.db";
