//! Table creation and row decoding for SQL stores.
//!
//! Every registered table is created with an integer primary key `id` plus
//! its declared columns. The DDL is portable between SQLite and PostgreSQL
//! except for the primary key, whose auto-increment syntax differs.
//!
//! Booleans are stored as `BIGINT` 0/1 so the same decoding path works on
//! both backends through sqlx's `Any` driver.

use std::collections::BTreeMap;

use sqlx::Row;
use sqlx::any::AnyRow;

use super::query::quote;
use super::{DbKind, SqlxResultExt};
use crate::{
    Result,
    constants::ID_COLUMN,
    store::{ColumnKind, TableSchema},
    value::Value,
};

/// `CREATE TABLE IF NOT EXISTS` statement for `schema`.
pub(crate) fn create_table_sql(kind: DbKind, schema: &TableSchema) -> String {
    let primary_key = match kind {
        DbKind::Sqlite => "INTEGER PRIMARY KEY AUTOINCREMENT",
        DbKind::Postgres => "BIGSERIAL PRIMARY KEY",
    };
    let mut columns = vec![format!("{} {primary_key}", quote(ID_COLUMN))];
    columns.extend(schema.columns().iter().map(|column| {
        let sql_type = match column.kind {
            ColumnKind::Integer | ColumnKind::Boolean => "BIGINT",
            ColumnKind::Text => "TEXT",
        };
        format!("{} {sql_type}", quote(&column.name))
    }));
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote(schema.name()),
        columns.join(", ")
    )
}

/// Column list for `SELECT`, starting with `id`.
pub(crate) fn select_list(schema: &TableSchema) -> String {
    std::iter::once(quote(ID_COLUMN))
        .chain(schema.columns().iter().map(|c| quote(&c.name)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decode a row selected with [`select_list`] into `(id, fields)`.
pub(crate) fn decode_row(
    schema: &TableSchema,
    row: &AnyRow,
) -> Result<(i64, BTreeMap<String, Value>)> {
    let id: i64 = row
        .try_get(ID_COLUMN)
        .sql_context(&format!("Failed to decode id of '{}'", schema.name()))?;

    let mut fields = BTreeMap::new();
    for column in schema.columns() {
        let context = format!("Failed to decode '{}.{}'", schema.name(), column.name);
        let value = match column.kind {
            ColumnKind::Integer => row
                .try_get::<Option<i64>, _>(column.name.as_str())
                .sql_context(&context)?
                .map_or(Value::Null, Value::Int),
            ColumnKind::Text => row
                .try_get::<Option<String>, _>(column.name.as_str())
                .sql_context(&context)?
                .map_or(Value::Null, Value::Text),
            ColumnKind::Boolean => row
                .try_get::<Option<i64>, _>(column.name.as_str())
                .sql_context(&context)?
                .map_or(Value::Null, |flag| Value::Bool(flag != 0)),
        };
        fields.insert(column.name.clone(), value);
    }
    Ok((id, fields))
}
