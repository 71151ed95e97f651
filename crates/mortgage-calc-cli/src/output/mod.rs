pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Schedule columns in display order: (JSON key, header).
pub const SCHEDULE_COLUMNS: [(&str, &str); 5] = [
    ("month", "Month"),
    ("payment", "Payment"),
    ("principal", "Principal"),
    ("interest", "Interest"),
    ("balance", "Balance"),
];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value, rows: usize) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value, rows),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The month-by-month schedule inside a computation envelope, if present.
pub fn schedule_rows(value: &Value) -> Option<&Vec<Value>> {
    value.get("result")?.get("schedule")?.as_array()
}
