//! SQL statement building.
//!
//! Statements are assembled as text with `$n` placeholders and a parallel
//! parameter list, then bound in one pass. Table and column names are quoted
//! identifiers; they are validated as plain identifiers before they get here.

use sqlx::Any;
use sqlx::any::AnyArguments;
use sqlx::query::Query;

use crate::{condition::Clause, value::Value};

/// A bound parameter. Booleans are stored as 0/1 integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Param {
    Int(i64),
    Text(String),
}

/// Quote an identifier for interpolation into SQL.
pub(crate) fn quote(identifier: &str) -> String {
    format!("\"{identifier}\"")
}

/// A statement under construction.
#[derive(Debug, Default)]
pub(crate) struct Statement {
    sql: String,
    params: Vec<Param>,
}

impl Statement {
    pub(crate) fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Append a placeholder for `param`.
    pub(crate) fn param(&mut self, param: Param) -> &mut Self {
        self.params.push(param);
        let placeholder = format!("${}", self.params.len());
        self.sql.push_str(&placeholder);
        self
    }

    /// Append a value: a placeholder, or the literal `NULL`.
    pub(crate) fn value(&mut self, value: &Value) -> &mut Self {
        match value {
            Value::Null => self.push("NULL"),
            Value::Bool(b) => self.param(Param::Int(i64::from(*b))),
            Value::Int(i) => self.param(Param::Int(*i)),
            Value::Text(s) => self.param(Param::Text(s.clone())),
        }
    }

    /// Append ` WHERE ...` for `clauses`; nothing when there are none.
    pub(crate) fn where_clauses(&mut self, clauses: &[Clause]) -> &mut Self {
        for (index, clause) in clauses.iter().enumerate() {
            self.push(if index == 0 { " WHERE " } else { " AND " });
            self.clause(clause);
        }
        self
    }

    fn clause(&mut self, clause: &Clause) -> &mut Self {
        let field = quote(clause.field());
        self.push(&field);
        match clause {
            // `Eq` never holds NULL; `Clause::equals` turns it into `IsNull`.
            Clause::Eq { value, .. } if value.is_null() => self.push(" IS NULL"),
            Clause::Eq { value, .. } => self.push(" = ").value(value),
            Clause::IsNull { .. } => self.push(" IS NULL"),
            Clause::NotNull { .. } => self.push(" IS NOT NULL"),
            Clause::Lt { value, .. } => self.push(" < ").param(Param::Int(*value)),
            Clause::Gt { value, .. } => self.push(" > ").param(Param::Int(*value)),
        }
    }

    pub(crate) fn sql(&self) -> &str {
        &self.sql
    }

    #[cfg(test)]
    pub(crate) fn params(&self) -> &[Param] {
        &self.params
    }

    /// Build the sqlx query with every parameter bound.
    pub(crate) fn query(&self) -> Query<'_, Any, AnyArguments<'_>> {
        self.params
            .iter()
            .fold(sqlx::query(&self.sql), |query, param| match param {
                Param::Int(i) => query.bind(*i),
                Param::Text(s) => query.bind(s.clone()),
            })
    }
}
