//! Persistence operations for the in-memory store
//!
//! This module handles serialization and file I/O for saving/loading
//! the in-memory tables to/from JSON files.

use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Deserializer, Serialize};

use super::{InMemoryStore, Table};
use crate::{Result, store::StoreError};

/// The current persistence file format version.
/// v0 indicates this is an unstable format subject to breaking changes.
const PERSISTENCE_VERSION: u8 = 0;

/// Helper to check if version is default (0) for serde skip_serializing_if
fn is_v0(v: &u8) -> bool {
    *v == 0
}

/// Validates the persistence version during deserialization.
fn validate_persistence_version<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u8::deserialize(deserializer)?;
    if version != PERSISTENCE_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported persistence version {version}; only version {PERSISTENCE_VERSION} is supported"
        )));
    }
    Ok(version)
}

/// Serializable form of the store.
#[derive(Serialize, Deserialize)]
struct SerializableStore {
    /// File format version for compatibility checking
    #[serde(
        rename = "_v",
        default,
        skip_serializing_if = "is_v0",
        deserialize_with = "validate_persistence_version"
    )]
    version: u8,
    #[serde(default)]
    tables: HashMap<String, Table>,
}

/// Saves every table to `path` as pretty-printed JSON.
pub(crate) fn save_to_file<P: AsRef<Path>>(store: &InMemoryStore, path: P) -> Result<()> {
    let serializable = SerializableStore {
        version: PERSISTENCE_VERSION,
        tables: store.read()?.clone(),
    };
    let json = serde_json::to_string_pretty(&serializable)
        .map_err(|e| StoreError::SerializationFailed { source: e })?;
    std::fs::write(path.as_ref(), json).map_err(|e| StoreError::FileIo { source: e })?;

    tracing::info!(path = %path.as_ref().display(), "Saved in-memory store");
    Ok(())
}

/// Loads a store from `path`; a missing file yields an empty store.
pub(crate) fn load_from_file<P: AsRef<Path>>(path: P) -> Result<InMemoryStore> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!(path = %path.display(), "No store file found, starting empty");
        return Ok(InMemoryStore::new());
    }

    let json = std::fs::read_to_string(path).map_err(|e| StoreError::FileIo { source: e })?;
    let serializable: SerializableStore = serde_json::from_str(&json)
        .map_err(|e| StoreError::DeserializationFailed { source: e })?;

    tracing::info!(
        path = %path.display(),
        tables = serializable.tables.len(),
        "Loaded in-memory store"
    );
    Ok(InMemoryStore::from_tables(serializable.tables))
}
