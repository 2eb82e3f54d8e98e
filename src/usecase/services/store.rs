use std::collections::HashSet;

use crate::domain::entities::sheet::SheetRow;
use crate::domain::entities::spot::Spot;
use crate::domain::entities::wishlist::WishlistItem;
use crate::usecase::ports::backend::BackendError;

/// Records that can be built from a sheet row.
pub trait FromSheetRow: Sized {
    fn from_sheet_row(row: &SheetRow) -> Self;

    fn record_id(&self) -> &str;
}

impl FromSheetRow for Spot {
    fn from_sheet_row(row: &SheetRow) -> Self {
        Spot::from_row(row)
    }

    fn record_id(&self) -> &str {
        &self.id.0
    }
}

impl FromSheetRow for WishlistItem {
    fn from_sheet_row(row: &SheetRow) -> Self {
        WishlistItem::from_row(row)
    }

    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Outcome of the last load, so "nothing there" and "could not fetch" differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    NotLoaded,
    Loaded { count: usize },
    Failed { reason: String },
}

impl LoadStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadStatus::Failed { .. })
    }
}

/// Holds the last fetched record set.
#[derive(Debug, Clone)]
pub struct EntityStore<R> {
    records: Vec<R>,
    status: LoadStatus,
}

impl<R> Default for EntityStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            status: LoadStatus::NotLoaded,
        }
    }
}

impl<R: FromSheetRow> EntityStore<R> {
    /// Replaces every record with the fetch result. A failed fetch leaves the
    /// store empty.
    pub fn ingest(&mut self, fetched: Result<Vec<SheetRow>, BackendError>) -> &LoadStatus {
        match fetched {
            Ok(rows) => {
                self.records = rows.iter().map(R::from_sheet_row).collect();
                self.warn_on_duplicate_ids();
                self.status = LoadStatus::Loaded {
                    count: self.records.len(),
                };
                tracing::debug!(count = self.records.len(), "store loaded");
            }
            Err(err) => {
                tracing::warn!(error = %err, "store load failed, showing no records");
                self.records.clear();
                self.status = LoadStatus::Failed {
                    reason: err.to_string(),
                };
            }
        }
        &self.status
    }

    fn warn_on_duplicate_ids(&self) {
        let mut seen = HashSet::new();
        for record in &self.records {
            let id = record.record_id();
            if !id.is_empty() && !seen.insert(id) {
                tracing::warn!(id, "duplicate record id in sheet");
            }
        }
    }
}

impl<R> EntityStore<R> {
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
