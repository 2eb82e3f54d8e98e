use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::domain::entities::sheet::SheetRow;

/// Reads a CSV export of one tab. Every cell stays text.
pub fn read_csv_rows(csv_path: &Path) -> Result<Vec<SheetRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {}", csv_path.display()))?
        .clone();

    if headers.is_empty() {
        anyhow::bail!("csv header is required")
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to parse csv record")?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let mut row = SheetRow::new();
        for (col_idx, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let value = record.get(col_idx).unwrap_or("");
            row.insert(header.to_string(), Value::String(value.to_string()));
        }
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn rows_keyed_by_header() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "ID,NomePesqueiro,Distancia").expect("write");
        writeln!(file, "1,Lago Azul,12.5").expect("write");
        writeln!(file, ",,").expect("write");
        writeln!(file, "2,Recanto").expect("write");

        let rows = read_csv_rows(file.path()).expect("rows");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["NomePesqueiro"], Value::String("Lago Azul".into()));
        assert_eq!(rows[1]["Distancia"], Value::String(String::new()));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = read_csv_rows(Path::new("/nonexistent/pesqueiros.csv")).unwrap_err();
        assert!(err.to_string().contains("failed to open csv"));
    }
}
