use chrono::{DateTime, Local, NaiveDate, TimeZone};

use crate::domain::entities::sheet::{cell_non_blank, cell_text, SheetRow};
use crate::domain::entities::spot::SpotId;

pub const COL_VISIT_SPOT_ID: &str = "PesqueiroID";
pub const COL_VISIT_SPOT_NAME: &str = "PesqueiroNome";
pub const COL_VISIT_DATE: &str = "DataVisita";
pub const COL_VISIT_CATCH: &str = "PeixesCapturados";
pub const COL_VISIT_NOTES: &str = "Observacoes";

/// Visits shown on the home timeline.
pub const TIMELINE_LIMIT: usize = 5;

pub const VISIT_FORM_COLUMNS: [&str; 3] = [COL_VISIT_DATE, COL_VISIT_CATCH, COL_VISIT_NOTES];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Visit {
    pub spot_id: SpotId,
    pub spot_name: Option<String>,
    pub date: Option<NaiveDate>,
    /// Raw date cell, kept for display when it does not parse.
    pub date_text: Option<String>,
    pub catch_notes: Option<String>,
    pub observations: Option<String>,
}

impl Visit {
    pub fn from_row(row: &SheetRow) -> Self {
        let date_text = cell_non_blank(row, COL_VISIT_DATE);
        Self {
            spot_id: SpotId(cell_text(row, COL_VISIT_SPOT_ID).unwrap_or_default()),
            spot_name: cell_non_blank(row, COL_VISIT_SPOT_NAME),
            date: date_text.as_deref().and_then(parse_sheet_date),
            date_text,
            catch_notes: cell_non_blank(row, COL_VISIT_CATCH),
            observations: cell_non_blank(row, COL_VISIT_NOTES),
        }
    }

    /// `dd/mm/yyyy`, falling back to the raw cell.
    pub fn display_date(&self) -> String {
        match (self.date, self.date_text.as_deref()) {
            (Some(date), _) => date.format("%d/%m/%Y").to_string(),
            (None, Some(raw)) => raw.to_string(),
            (None, None) => "N/A".to_string(),
        }
    }
}

/// Parses the date shapes the sheet script emits: ISO timestamps from date
/// cells, plain ISO dates and pt-BR `dd/mm/yyyy`. Timestamps land on the
/// local calendar day.
pub fn parse_sheet_date(text: &str) -> Option<NaiveDate> {
    parse_sheet_date_in(text, &Local)
}

/// [`parse_sheet_date`] with timestamps read in `zone`.
pub fn parse_sheet_date_in<Tz: TimeZone>(text: &str, zone: &Tz) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.with_timezone(zone).date_naive());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .ok()
}

/// Newest visits first; undated visits go last in input order.
pub fn recent_visits(visits: &[Visit], limit: usize) -> Vec<Visit> {
    let mut sorted = visits.to_vec();
    sorted.sort_by(|a, b| match (a.date, b.date) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    sorted.truncate(limit);
    sorted
}
