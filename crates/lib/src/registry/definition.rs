//! Configuration of one named list on one table.

use serde::{Deserialize, Deserializer, Serialize};

use super::RegistryError;
use crate::{
    condition::{Clause, Condition, ResolvedFilter, is_identifier},
    constants::{DEFAULT_LIST, DEFAULT_ORDER_COLUMN},
    record::Record,
};

fn default_column() -> String {
    DEFAULT_ORDER_COLUMN.to_string()
}

/// Accept either `"project_id"` or `["project_id", "sprint_id"]`.
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(key) => vec![key],
        OneOrMany::Many(keys) => keys,
    })
}

/// A named, scoped list defined on a table.
///
/// Immutable once registered. Every operation binds it to a record through
/// [`ListDefinition::bind`], producing a fresh [`ResolvedFilter`].
///
/// # Example
///
/// ```
/// use sortable::{condition::Clause, registry::ListDefinition};
///
/// let client = ListDefinition::new("client")
///     .column("client_priority")
///     .scope("project_id")
///     .condition(Clause::not_null("action"));
///
/// assert_eq!(client.order_column(), "client_priority");
/// assert_eq!(client.scope_keys(), ["project_id"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDefinition {
    #[serde(default)]
    name: String,
    #[serde(default = "default_column")]
    column: String,
    #[serde(default)]
    conditions: Condition,
    #[serde(default, deserialize_with = "one_or_many")]
    scope: Vec<String>,
}

impl Default for ListDefinition {
    fn default() -> Self {
        Self::new(DEFAULT_LIST)
    }
}

impl ListDefinition {
    /// A list ordered by `position` with no scope and no condition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: default_column(),
            conditions: Condition::new(),
            scope: Vec::new(),
        }
    }

    /// Use `column` as the order column.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }

    /// Add a scope key.
    pub fn scope(mut self, key: impl Into<String>) -> Self {
        self.scope.push(key.into());
        self
    }

    /// Add a clause to the base condition.
    pub fn condition(mut self, clause: Clause) -> Self {
        self.conditions = self.conditions.and(clause);
        self
    }

    /// Replace the base condition.
    pub fn conditions(mut self, conditions: Condition) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn order_column(&self) -> &str {
        &self.column
    }

    pub fn base_condition(&self) -> &Condition {
        &self.conditions
    }

    pub fn scope_keys(&self) -> &[String] {
        &self.scope
    }

    /// Whether `field` partitions this list.
    pub fn is_scoped_by(&self, field: &str) -> bool {
        self.scope.iter().any(|key| key == field)
    }

    /// Bind the base condition and scope keys to `record`'s current values.
    ///
    /// Each scope key contributes `key = value`, or `key IS NULL` when the
    /// record's value is absent.
    pub fn bind(&self, record: &Record) -> ResolvedFilter {
        let mut clauses = self.conditions.clauses().to_vec();
        clauses.extend(
            self.scope
                .iter()
                .map(|key| Clause::equals(key.as_str(), record.get(key).clone())),
        );
        ResolvedFilter::new(record.table(), clauses)
    }

    /// Check the registry invariants for a list on `table`.
    pub(crate) fn validate(&self, table: &str) -> Result<(), RegistryError> {
        let invalid = |reason: String| RegistryError::InvalidDefinition {
            table: table.to_string(),
            list: self.name.clone(),
            reason,
        };

        if !is_identifier(table) {
            return Err(invalid(format!("'{table}' is not a valid table name")));
        }
        if !is_identifier(&self.column) {
            return Err(invalid(format!(
                "'{}' is not a valid column name",
                self.column
            )));
        }
        for (index, key) in self.scope.iter().enumerate() {
            if !is_identifier(key) {
                return Err(invalid(format!("'{key}' is not a valid scope key")));
            }
            if key == &self.column {
                return Err(invalid(format!(
                    "order column '{key}' cannot also be a scope key"
                )));
            }
            if self.scope[..index].contains(key) {
                return Err(invalid(format!("scope key '{key}' is listed twice")));
            }
        }
        for clause in self.conditions.clauses() {
            if !is_identifier(clause.field()) {
                return Err(invalid(format!(
                    "'{}' is not a valid condition field",
                    clause.field()
                )));
            }
        }
        Ok(())
    }
}
