//! Record stores.
//!
//! The ordering engine never talks to a database directly; it goes through
//! the [`RecordStore`] trait, which offers exactly what list maintenance
//! needs: conditional point and list reads, a `MAX` aggregate, an atomic bulk
//! shift of the order column, single-row writes, and transactions.
//!
//! Two implementations are provided:
//!
//! - [`InMemoryStore`]: `RwLock`-guarded tables with JSON file persistence.
//! - [`SqlxStore`] (features `sqlite` / `postgres`): relational tables through
//!   sqlx, exposed synchronously.

mod errors;
mod gate;
mod in_memory;
mod schema;
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub mod sql;

use std::any::Any;

pub use errors::StoreError;
pub use in_memory::InMemoryStore;
pub use schema::{Column, ColumnKind, TableSchema};
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub use sql::{DbKind, SqlxStore};

use crate::{Result, condition::ResolvedFilter, record::Record};

/// Storage collaborator of the ordering engine.
///
/// Every read takes a [`ResolvedFilter`], which names the table and carries
/// the bound clauses. Implementations must be `Send + Sync`.
///
/// ## Transactions
///
/// `begin`/`commit` nest: only the outermost `commit` makes changes durable,
/// and `rollback` at any depth discards the whole transaction. A transaction
/// belongs to the thread that began it: its statements run inside it, and
/// calls from any other thread block until it commits or rolls back, so one
/// caller's `rollback` never discards another caller's writes.
pub trait RecordStore: Send + Sync + Any {
    /// The row matching `filter` whose `column` equals `value`.
    ///
    /// If several rows match, the one with the lowest id is returned.
    fn find_one_where(
        &self,
        filter: &ResolvedFilter,
        column: &str,
        value: i64,
    ) -> Result<Option<Record>>;

    /// All rows matching `filter`, ascending by `order_by`.
    fn find_all_where(&self, filter: &ResolvedFilter, order_by: &str) -> Result<Vec<Record>>;

    /// `MAX(column)` over rows matching `filter`; `None` if there are none.
    fn max_where(&self, filter: &ResolvedFilter, column: &str) -> Result<Option<i64>>;

    /// Atomically add `delta` to `column` on every row matching `filter`.
    ///
    /// Returns the number of rows changed.
    fn update_all_where(&self, filter: &ResolvedFilter, column: &str, delta: i64) -> Result<u64>;

    /// Insert a new record and return its id.
    fn insert(&self, record: &Record) -> Result<i64>;

    /// Write the fields of a stored record that differ from its persisted
    /// snapshot. Other columns keep their stored values.
    fn update(&self, record: &Record) -> Result<()>;

    /// Delete a stored record.
    fn delete(&self, record: &Record) -> Result<()>;

    /// Load the row `id` of `table`.
    fn fetch(&self, table: &str, id: i64) -> Result<Record>;

    /// Open a transaction, or nest into the open one.
    fn begin(&self) -> Result<()>;

    /// Close one nesting level; the outermost level commits.
    fn commit(&self) -> Result<()>;

    /// Discard the open transaction. A no-op when none is open.
    fn rollback(&self) -> Result<()>;

    /// Returns a reference to the store as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}
