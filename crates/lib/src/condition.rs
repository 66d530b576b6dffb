//! Structured filter conditions.
//!
//! A list's base condition is a conjunction of [`Clause`]s. Binding a list
//! definition to a record produces a [`ResolvedFilter`]: the base clauses
//! plus one clause per scope key, holding the record's current scope values.
//!
//! Clauses are kept structured rather than as query strings so every store
//! can render or evaluate them in its own dialect. Evaluation follows SQL
//! semantics: any comparison against a NULL field fails.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

static NULL: Value = Value::Null;

/// Whether `name` is a plain SQL identifier (`[A-Za-z_][A-Za-z0-9_]*`).
///
/// Table and field names are interpolated into queries, so only plain
/// identifiers are accepted anywhere a name is configured.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// One predicate over a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Clause {
    /// `field = value`
    Eq { field: String, value: Value },
    /// `field IS NULL`
    IsNull { field: String },
    /// `field IS NOT NULL`
    NotNull { field: String },
    /// `field < value`
    Lt { field: String, value: i64 },
    /// `field > value`
    Gt { field: String, value: i64 },
}

impl Clause {
    /// Equality clause; a `Null` value becomes `IS NULL`.
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        let field = field.into();
        match value.into() {
            Value::Null => Clause::IsNull { field },
            value => Clause::Eq { field, value },
        }
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Clause::IsNull {
            field: field.into(),
        }
    }

    pub fn not_null(field: impl Into<String>) -> Self {
        Clause::NotNull {
            field: field.into(),
        }
    }

    pub fn less_than(field: impl Into<String>, value: i64) -> Self {
        Clause::Lt {
            field: field.into(),
            value,
        }
    }

    pub fn greater_than(field: impl Into<String>, value: i64) -> Self {
        Clause::Gt {
            field: field.into(),
            value,
        }
    }

    /// The field this clause constrains.
    pub fn field(&self) -> &str {
        match self {
            Clause::Eq { field, .. }
            | Clause::IsNull { field }
            | Clause::NotNull { field }
            | Clause::Lt { field, .. }
            | Clause::Gt { field, .. } => field,
        }
    }

    /// Evaluate this clause against a row's fields. Missing fields are NULL.
    pub fn matches(&self, fields: &BTreeMap<String, Value>) -> bool {
        let current = fields.get(self.field()).unwrap_or(&NULL);
        match self {
            Clause::Eq { value, .. } => !current.is_null() && current == value,
            Clause::IsNull { .. } => current.is_null(),
            Clause::NotNull { .. } => !current.is_null(),
            Clause::Lt { value, .. } => current.as_int().is_some_and(|c| c < *value),
            Clause::Gt { value, .. } => current.as_int().is_some_and(|c| c > *value),
        }
    }
}

/// A conjunction of clauses used as a list's base condition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Condition {
    clauses: Vec<Clause>,
}

impl Condition {
    /// The always-true condition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a condition from `field => value` pairs.
    ///
    /// Each pair becomes an equality clause, or `IS NULL` for a `Null` value.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            clauses: pairs
                .into_iter()
                .map(|(field, value)| Clause::equals(field, value))
                .collect(),
        }
    }

    /// Append a clause.
    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl From<Vec<Clause>> for Condition {
    fn from(clauses: Vec<Clause>) -> Self {
        Self { clauses }
    }
}

/// A list's conditions bound to one record's current scope values.
///
/// Built fresh for every operation and consumed by the record store. Derived
/// filters (`column > n`, ...) are produced with [`ResolvedFilter::and`],
/// which returns a new filter and leaves the original untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFilter {
    table: String,
    clauses: Vec<Clause>,
}

impl ResolvedFilter {
    pub fn new(table: impl Into<String>, clauses: Vec<Clause>) -> Self {
        Self {
            table: table.into(),
            clauses,
        }
    }

    /// The table (record type) being filtered.
    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// A copy of this filter with one more clause.
    pub fn and(&self, clause: Clause) -> Self {
        let mut clauses = self.clauses.clone();
        clauses.push(clause);
        Self {
            table: self.table.clone(),
            clauses,
        }
    }

    /// Whether a row satisfies every clause.
    pub fn matches(&self, fields: &BTreeMap<String, Value>) -> bool {
        self.clauses.iter().all(|clause| clause.matches(fields))
    }
}
