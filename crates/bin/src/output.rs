//! Output formatting helpers for human-readable and JSON output.

use sortable::{Record, Value};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Print a table with aligned columns in human-readable format.
///
/// `headers` and each row in `rows` must have the same length.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    // Calculate column widths (max of header and all row values)
    let col_count = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    // Print header
    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
        .collect();
    println!("{}", header_line.join("  "));

    // Print rows
    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .take(col_count)
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect();
        println!("{}", line.join("  "));
    }
}

/// Render `record` as a JSON object with its id.
pub fn record_json(record: &Record) -> serde_json::Value {
    let mut object = serde_json::Map::new();
    object.insert("id".to_string(), record.id().into());
    for (field, value) in record.fields() {
        let value = match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => (*b).into(),
            Value::Int(i) => (*i).into(),
            Value::Text(s) => s.clone().into(),
        };
        object.insert(field.clone(), value);
    }
    serde_json::Value::Object(object)
}

/// Print `records` as one row each: the order column first, then the id,
/// then every other field.
pub fn print_records(records: &[Record], order_column: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = records.iter().map(record_json).collect();
            println!("{}", serde_json::Value::Array(entries));
        }
        OutputFormat::Human => {
            if records.is_empty() {
                println!("No items.");
                return;
            }
            let mut fields: Vec<&str> = records
                .iter()
                .flat_map(|record| record.fields().keys().map(String::as_str))
                .filter(|field| *field != order_column)
                .collect();
            fields.sort_unstable();
            fields.dedup();

            let mut headers = vec![order_column, "id"];
            headers.extend(fields.iter().copied());
            let rows: Vec<Vec<String>> = records
                .iter()
                .map(|record| {
                    let mut row = vec![
                        record.get(order_column).to_string(),
                        record.id().map_or_else(String::new, |id| id.to_string()),
                    ];
                    row.extend(fields.iter().map(|field| record.get(field).to_string()));
                    row
                })
                .collect();
            print_table(&headers, &rows);
        }
    }
}

/// Print a single record.
pub fn print_record(record: &Record, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", record_json(record)),
        OutputFormat::Human => {
            let id = record.id().map_or_else(|| "-".to_string(), |id| id.to_string());
            println!("{} #{id}", record.table());
            for (field, value) in record.fields() {
                println!("  {field:<20} {value}");
            }
        }
    }
}
