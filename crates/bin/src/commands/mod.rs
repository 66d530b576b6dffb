//! Subcommand implementations.
//!
//! Each command works on a [`Lists`] engine built from the configuration
//! and the selected store.

pub mod items;
pub mod records;
pub mod show;

use sortable::{Lists, Record, Value};

use crate::cli::RecordArgs;

/// Split `field=value` pairs, parsing each value as a literal.
pub fn parse_assignments(pairs: &[String]) -> Result<Vec<(String, Value)>, String> {
    pairs
        .iter()
        .map(|pair| match pair.split_once('=') {
            Some((field, value)) if !field.is_empty() => {
                Ok((field.to_string(), Value::parse_literal(value)))
            }
            _ => Err(format!("Expected FIELD=VALUE, got '{pair}'")),
        })
        .collect()
}

/// Load the record named on the command line.
pub fn load_record(lists: &Lists, args: &RecordArgs) -> sortable::Result<Record> {
    lists.store().fetch(&args.table, args.id)
}
