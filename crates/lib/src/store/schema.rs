//! Table schemas.
//!
//! Stores that need to know column types up front (the SQL store decodes
//! rows column by column) are given a [`TableSchema`] per table. Every table
//! also has the implicit integer primary key `id`.

use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::{condition::is_identifier, constants::ID_COLUMN, value::Value};

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Integer,
    Text,
    Boolean,
}

impl ColumnKind {
    /// Whether `value` can be written to a column of this kind.
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (_, Value::Null)
                | (ColumnKind::Integer, Value::Int(_))
                | (ColumnKind::Text, Value::Text(_))
                | (ColumnKind::Boolean, Value::Bool(_))
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Text => "text",
            ColumnKind::Boolean => "boolean",
        }
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// Columns of one table, excluding `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    name: String,
    columns: Vec<Column>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Add a column.
    pub fn column(mut self, name: impl Into<String>, kind: ColumnKind) -> Self {
        self.columns.push(Column {
            name: name.into(),
            kind,
        });
        self
    }

    pub fn with_columns(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Kind of `column`, or `None` if the table has no such column.
    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        self.columns
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.kind)
    }

    /// Reject non-identifiers, a user-declared `id`, and duplicate columns.
    pub fn validate(&self) -> Result<(), StoreError> {
        if !is_identifier(&self.name) {
            return Err(StoreError::InvalidIdentifier {
                name: self.name.clone(),
            });
        }
        for (index, column) in self.columns.iter().enumerate() {
            if !is_identifier(&column.name)
                || column.name == ID_COLUMN
                || self.columns[..index].iter().any(|c| c.name == column.name)
            {
                return Err(StoreError::InvalidIdentifier {
                    name: format!("{}.{}", self.name, column.name),
                });
            }
        }
        Ok(())
    }
}
