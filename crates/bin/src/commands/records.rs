//! Record lifecycle commands: create, set and destroy.

use sortable::{Lists, Record};

use super::{load_record, parse_assignments};
use crate::cli::{CreateArgs, RecordArgs, SetArgs};
use crate::output::{OutputFormat, print_record};

/// Run the create command
pub fn create(
    lists: &Lists,
    args: &CreateArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut record = parse_assignments(&args.values)?
        .into_iter()
        .fold(Record::new(args.table.as_str()), |record, (field, value)| {
            record.with(field, value)
        });
    lists.create(&mut record)?;
    print_record(&record, format);
    Ok(())
}

/// Run the set command
///
/// Scope keys are assigned through the engine, so a changed scope moves the
/// record when it is saved.
pub fn set(
    lists: &Lists,
    args: &SetArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut record = load_record(lists, &args.record)?;
    for (field, value) in parse_assignments(&args.values)? {
        lists.set(&mut record, &field, value);
    }
    if record.scope_changed() {
        tracing::info!(
            table = %args.record.table,
            id = args.record.id,
            keys = ?record.scope_changes().collect::<Vec<_>>(),
            "Scope changed; moving record"
        );
    }
    lists.save(&mut record)?;
    print_record(&record, format);
    Ok(())
}

/// Run the destroy command
pub fn destroy(
    lists: &Lists,
    args: &RecordArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut record = load_record(lists, args)?;
    lists.destroy(&mut record)?;
    match format {
        OutputFormat::Human => println!("Destroyed {} #{}", args.table, args.id),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({"table": args.table, "id": args.id, "destroyed": true})
        ),
    }
    Ok(())
}
