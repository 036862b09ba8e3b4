//! Input checks that run before any query.

use serde_json::Value;

/// A rejected request body. The message is sent to the client verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invalid(pub &'static str);

impl std::fmt::Display for Invalid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for Invalid {}

/// True iff `email` looks like `local@domain.tld`: exactly one `@`, no whitespace,
/// and a `.` with at least one character on each side somewhere in the domain.
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(is_space) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Whitespace as browsers' regex `\s` sees it: Unicode `White_Space` without NEL,
/// plus the byte-order mark.
fn is_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Whole-number coercion. Accepts JSON integers and strings holding a base-10
/// integer; everything else (floats, empty strings, null, booleans) is rejected.
pub fn to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => parse_int(s),
        _ => None,
    }
}

/// Same rules as [`to_int`] for a raw path segment
pub fn parse_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// `to_int` of an optional body field; absent fields fail
pub fn int_field(body: &Value, field: &str) -> Option<i64> {
    body.get(field).and_then(to_int)
}

/// Truthiness as the dashboard's JSON bodies expect it: non-empty strings,
/// non-zero numbers, `true`, and any array or object.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// True when every listed field is present and truthy
pub fn has_required(body: &Value, fields: &[&str]) -> bool {
    fields.iter().all(|field| is_truthy(body.get(*field)))
}

/// Text rendering of a body field for binding. Absent or falsy values become "".
pub fn text_field(body: &Value, field: &str) -> String {
    let value = body.get(field);
    if !is_truthy(value) {
        return String::new();
    }
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
