//! Configuration documents.
//!
//! A [`SortableConfig`] describes tables, their columns and the lists defined
//! on them. It is plain JSON:
//!
//! ```
//! use sortable::config::SortableConfig;
//!
//! let config = SortableConfig::from_json(r#"{
//!     "tables": [{
//!         "name": "todos",
//!         "columns": [
//!             {"name": "project_id", "kind": "integer"},
//!             {"name": "action", "kind": "text"},
//!             {"name": "position", "kind": "integer"},
//!             {"name": "client_priority", "kind": "integer"}
//!         ],
//!         "lists": [
//!             {"scope": "project_id"},
//!             {"name": "client", "column": "client_priority", "scope": "project_id",
//!              "conditions": [{"op": "not_null", "field": "action"}]}
//!         ]
//!     }]
//! }"#).unwrap();
//!
//! let registry = config.registry().unwrap();
//! assert!(registry.resolve("todos", "client").is_ok());
//! assert_eq!(config.schemas()[0].columns().len(), 4);
//! ```

mod errors;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use errors::ConfigError;

use crate::{
    Result,
    registry::{ListDefinition, ListRegistry},
    store::{Column, ColumnKind, TableSchema},
};

/// One table: its columns and its lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub lists: Vec<ListDefinition>,
}

/// The whole configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortableConfig {
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

impl SortableConfig {
    /// Parse a configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json).map_err(|source| ConfigError::Parse { source })?)
    }

    /// Read and parse the configuration file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            tables = config.tables.len(),
            "Loaded sortable configuration"
        );
        Ok(config)
    }

    /// Build the list registry, validating every definition.
    pub fn registry(&self) -> Result<ListRegistry> {
        Ok(ListRegistry::from_config(self)?)
    }

    /// Table schemas for stores that need them.
    ///
    /// Order columns that a table does not declare are added as integers.
    pub fn schemas(&self) -> Vec<TableSchema> {
        self.tables
            .iter()
            .map(|table| {
                let mut columns = table.columns.clone();
                for list in &table.lists {
                    if !columns.iter().any(|c| c.name == list.order_column()) {
                        columns.push(Column {
                            name: list.order_column().to_string(),
                            kind: ColumnKind::Integer,
                        });
                    }
                }
                TableSchema::with_columns(&table.name, columns)
            })
            .collect()
    }
}
