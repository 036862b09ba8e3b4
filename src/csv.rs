//! Owner export as CSV.

use serde_json::Value;

use crate::types::Row;

/// Body sent when there are no owners
pub const EMPTY_OWNERS: &str = "owner_id,first_name,last_name,phone,email,address\n";

pub const CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub const OWNERS_DISPOSITION: &str = "attachment; filename=\"owners.csv\"";

/// Header from the first row's keys in column order, one line per row, joined by
/// `\n` with no trailing newline.
pub fn owners_csv(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return EMPTY_OWNERS.to_string();
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.join(","));

    for row in rows {
        let values: Vec<String> = headers.iter().map(|h| csv_value(row.get(*h))).collect();
        lines.push(values.join(","));
    }

    lines.join("\n")
}

/// Quote iff the text holds a comma, quote or newline; null and absent are empty.
pub fn csv_value(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => return String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    if text.contains([',', '"', '\n']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text
    }
}
