//! The show command: print one scope of a list in order.

use sortable::{Lists, Record};

use super::{load_record, parse_assignments};
use crate::cli::{RecordArgs, ShowArgs};
use crate::output::{OutputFormat, print_records};

/// Run the show command
pub fn run(
    lists: &Lists,
    args: &ShowArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let definition = lists.registry().resolve(&args.table, &args.list)?;

    // The scope comes from a stored record or from a probe record holding
    // the given values.
    let probe = match args.id {
        Some(id) => load_record(
            lists,
            &RecordArgs {
                table: args.table.clone(),
                id,
            },
        )?,
        None => parse_assignments(&args.filters)?
            .into_iter()
            .fold(Record::new(args.table.as_str()), |record, (field, value)| {
                record.with(field, value)
            }),
    };

    let items = lists.items(&probe, &args.list)?;
    tracing::debug!(
        table = %args.table,
        list = %args.list,
        items = items.len(),
        "Listing items"
    );
    print_records(&items, definition.order_column(), format);
    Ok(())
}
