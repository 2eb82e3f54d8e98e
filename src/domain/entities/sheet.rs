use serde_json::{Map, Value};

/// One spreadsheet row as the backend hands it over: column header to raw cell.
pub type SheetRow = Map<String, Value>;

/// Text view of a cell. `None` only when the column is absent or `null`.
pub fn cell_text(row: &SheetRow, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        other => Some(other.to_string()),
    }
}

/// Text view that also treats blank strings as absent.
pub fn cell_non_blank(row: &SheetRow, column: &str) -> Option<String> {
    cell_text(row, column).filter(|text| !text.trim().is_empty())
}

/// Numeric view of a cell.
///
/// Absent and `null` cells stay `None` so the sort can push them to the end.
/// Anything else coerces, falling back to `0.0` when no number can be read.
pub fn cell_number(row: &SheetRow, column: &str) -> Option<f64> {
    match row.get(column)? {
        Value::Null => None,
        Value::Number(number) => Some(number.as_f64().unwrap_or(0.0)),
        Value::String(text) => Some(parse_numeric_text(text).unwrap_or(0.0)),
        _ => Some(0.0),
    }
}

/// Coordinate view of a cell: unlike [`cell_number`], unreadable text is absent.
pub fn cell_coordinate(row: &SheetRow, column: &str) -> Option<f64> {
    match row.get(column)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_numeric_text(text),
        _ => None,
    }
    .filter(|value| value.is_finite())
}

/// Reads the leading number of a cell text, e.g. `"45 min"` -> `45`.
///
/// A comma is taken as the decimal separator when the text has no dot,
/// which is how pt-BR sheets export prices (`"12,50"`).
pub fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replacen(',', ".", 1)
    } else {
        trimmed.to_string()
    };

    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (idx, ch) in normalized.char_indices() {
        match ch {
            '+' | '-' if idx == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = idx + ch.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    normalized[..end].trim_end_matches('.').parse::<f64>().ok()
}

/// Formats a number the way the sheet shows it: no trailing zeros, and the
/// shortest text that reads back as the same value.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    value.to_string()
}
