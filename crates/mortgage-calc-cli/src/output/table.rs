use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::{Map, Value};
use std::str::FromStr;
use tabled::{builder::Builder, Table};

use super::{schedule_rows, SCHEDULE_COLUMNS};

/// Keys whose values are shown as dollar amounts.
const CURRENCY_FIELDS: &[&str] = &[
    "price",
    "downPayment",
    "extraMonthly",
    "principal",
    "basePayment",
    "scheduledPayment",
    "totalInterest",
    "totalPayment",
    "interest",
    "payment",
    "balance",
];

/// Print a summary table and the schedule, limited to `rows` months
/// (0 = all).
pub fn print_table(value: &Value, rows: usize) {
    let Some(envelope) = value.as_object().filter(|m| m.contains_key("result")) else {
        println!("{}", flat_table(value));
        return;
    };

    println!("{}", summary_table(&envelope["result"]));

    if let Some(schedule) = schedule_rows(value) {
        if !schedule.is_empty() {
            println!("\n{}", schedule_table(schedule, rows));
            if rows > 0 && rows < schedule.len() {
                println!("({} of {} months shown)", rows, schedule.len());
            }
        }
    }

    print_notes(envelope);
}

fn print_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Every result field except the schedule; echoed inputs are flattened.
pub fn summary_table(result: &Value) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);

    if let Value::Object(map) = result {
        for (key, val) in map {
            match (key.as_str(), val) {
                ("schedule", _) => {}
                ("inputs", Value::Object(inputs)) => {
                    for (k, v) in inputs {
                        builder.push_record([format!("inputs.{}", k), format_value(k, v)]);
                    }
                }
                _ => builder.push_record([key.clone(), format_value(key, val)]),
            }
        }
    }

    builder.build()
}

/// Schedule rows in display order, truncated to `rows` when non-zero.
pub fn schedule_table(schedule: &[Value], rows: usize) -> Table {
    let limit = if rows == 0 { schedule.len() } else { rows };

    let mut builder = Builder::default();
    builder.push_record(SCHEDULE_COLUMNS.iter().map(|(_, header)| header.to_string()));
    for row in schedule.iter().take(limit) {
        builder.push_record(SCHEDULE_COLUMNS.iter().map(|(key, _)| {
            row.get(*key)
                .map(|v| format_value(key, v))
                .unwrap_or_default()
        }));
    }

    builder.build()
}

fn flat_table(value: &Value) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                builder.push_record([key.clone(), format_value(key, val)]);
            }
        }
        other => builder.push_record(["value".to_string(), format_value("value", other)]),
    }
    builder.build()
}

fn format_value(key: &str, value: &Value) -> String {
    if CURRENCY_FIELDS.contains(&key) {
        if let Some(amount) = as_decimal(value) {
            return format_currency(amount);
        }
    }

    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(|v| format_value("", v)).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

fn as_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

/// US-style dollar amount with thousands separators: `$1,438.92`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, grouped, cents)
}
