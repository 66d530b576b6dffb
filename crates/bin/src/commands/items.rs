//! List maintenance commands: append, remove, insert-at and the moves.

use sortable::Lists;

use super::load_record;
use crate::cli::{InsertAtArgs, ItemArgs};
use crate::output::{OutputFormat, print_record};

/// A list operation on a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Append,
    Remove,
    InsertAt(i64),
    Up,
    Down,
    Top,
    Bottom,
}

impl Move {
    fn name(&self) -> &'static str {
        match self {
            Move::Append => "append",
            Move::Remove => "remove",
            Move::InsertAt(_) => "insert-at",
            Move::Up => "up",
            Move::Down => "down",
            Move::Top => "top",
            Move::Bottom => "bottom",
        }
    }
}

/// Run the insert-at command
pub fn insert_at(
    lists: &Lists,
    args: &InsertAtArgs,
    format: OutputFormat,
) -> Result<bool, Box<dyn std::error::Error>> {
    run(lists, &args.item, Move::InsertAt(args.position), format)
}

/// Apply `operation` to the record and print where it ended up.
///
/// Returns whether anything changed.
pub fn run(
    lists: &Lists,
    args: &ItemArgs,
    operation: Move,
    format: OutputFormat,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut record = load_record(lists, &args.record)?;
    let list = args.list.as_str();

    let changed = match operation {
        Move::Append => {
            lists.add_to_list_and_save(&mut record, list)?;
            true
        }
        Move::Remove => lists.remove_from_list_and_save(&mut record, list)?,
        Move::InsertAt(position) => lists.insert_at(&mut record, position, list)?,
        Move::Up => lists.move_up(&mut record, list)?,
        Move::Down => lists.move_down(&mut record, list)?,
        Move::Top => lists.move_to_top(&mut record, list)?,
        Move::Bottom => lists.move_to_bottom(&mut record, list)?,
    };

    if !changed {
        tracing::info!(
            table = %args.record.table,
            id = args.record.id,
            list,
            operation = operation.name(),
            "Nothing to do"
        );
    }
    print_record(&record, format);
    Ok(changed)
}
