/*! Integration tests for Sortable.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * Modules:
 * - registry: Tests for list registration and configuration loading
 * - queries: Tests for positional reads (first/last item, offsets, ...)
 * - mutations: Tests for insert_at, moves and removal
 * - lifecycle: Tests for create/save/destroy/reload hooks
 * - scope_changes: Tests for records moving between scopes
 * - conditions: Tests for base conditions and single-table inheritance
 * - in_memory: Tests for the in-memory store and its persistence
 * - sql_store: Tests for the sqlx store on in-memory SQLite
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("sortable=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod conditions;
mod in_memory;
mod queries;
mod registry;
#[cfg(feature = "sqlite")]
mod sql_store;
