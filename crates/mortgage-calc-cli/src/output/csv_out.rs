use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;
use std::io;
use std::str::FromStr;

use super::{schedule_rows, SCHEDULE_COLUMNS};

/// Write the schedule as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("CSV output error: {}", e);
    }
}

/// One row per month with a `Month,Payment,Principal,Interest,Balance`
/// header. Values without a schedule fall back to `field,value` pairs.
pub fn write_csv<W: io::Write>(writer: W, value: &Value) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    match (schedule_rows(value), value) {
        (Some(rows), _) => {
            wtr.write_record(SCHEDULE_COLUMNS.iter().map(|(_, header)| *header))?;
            for row in rows {
                wtr.write_record(SCHEDULE_COLUMNS.iter().map(|(key, _)| {
                    match row.get(*key) {
                        Some(v) if *key != "month" => format_cents(v),
                        Some(v) => format_csv_value(v),
                        None => String::new(),
                    }
                }))?;
            }
        }
        (None, Value::Object(map)) => {
            let fields = map
                .get("result")
                .and_then(Value::as_object)
                .unwrap_or(map);
            wtr.write_record(["field", "value"])?;
            for (key, val) in fields {
                wtr.write_record([key.as_str(), format_csv_value(val).as_str()])?;
            }
        }
        (None, other) => {
            wtr.write_record([&format_csv_value(other)])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Amounts always carry two decimals, whether they arrive as JSON numbers
/// or decimal strings.
fn format_cents(value: &Value) -> String {
    let text = format_csv_value(value);
    match Decimal::from_str(&text) {
        Ok(d) => format!(
            "{:.2}",
            d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        Err(_) => text,
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
