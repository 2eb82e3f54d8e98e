use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{Duration, NaiveDate};
use serde_json::{Number, Value};

use crate::domain::entities::sheet::SheetRow;

pub fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::String(v) => Value::String(v.clone()),
        Data::Float(v) => float_value(*v),
        Data::Int(v) => Value::from(*v),
        Data::Bool(v) => Value::Bool(*v),
        Data::DateTime(v) => excel_serial_to_date(v.as_f64())
            .map(|date| Value::String(date.format("%Y-%m-%d").to_string()))
            .unwrap_or_else(|| Value::String(v.to_string())),
        Data::DateTimeIso(v) => Value::String(v.clone()),
        Data::DurationIso(v) => Value::String(v.clone()),
        Data::Error(v) => Value::String(format!("{v:?}")),
        Data::Empty => Value::String(String::new()),
    }
}

/// Whole floats come back as integers so ids read `"3"`, not `"3.0"`.
fn float_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

/// Reads one tab: the first row holds the headers, blank rows are skipped.
pub fn read_workbook_tab(xlsx_path: &Path, tab: &str) -> Result<Vec<SheetRow>> {
    let mut workbook = open_workbook_auto(xlsx_path)
        .with_context(|| format!("failed to open workbook: {}", xlsx_path.display()))?;
    let range = workbook
        .worksheet_range(tab)
        .with_context(|| format!("failed to read sheet: {tab}"))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();
    if headers.iter().all(|header| header.is_empty()) {
        anyhow::bail!("sheet {tab} has no header row");
    }

    let mut out = Vec::new();
    for row in rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        let mut record = SheetRow::new();
        for (col_idx, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let value = row
                .get(col_idx)
                .map(cell_to_value)
                .unwrap_or_else(|| Value::String(String::new()));
            record.insert(header.clone(), value);
        }
        out.push(record);
    }
    Ok(out)
}
