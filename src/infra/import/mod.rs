//! Read-only backend over a local export of the spreadsheet.

pub mod csv;
pub mod xlsx;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::domain::entities::sheet::{cell_text, SheetRow};
use crate::domain::entities::spot::SpotId;
use crate::domain::entities::visit::COL_VISIT_SPOT_ID;
use crate::usecase::ports::backend::{BackendError, MutationReceipt, SheetBackend};

pub const TAB_SPOTS: &str = "Pesqueiros";
pub const TAB_VISITS: &str = "Visitas";
pub const TAB_WISHLIST: &str = "Wishlist";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSource {
    /// `.xlsx`/`.ods` workbook with one tab per collection.
    Workbook(PathBuf),
    /// Directory holding `pesqueiros.csv`, `visitas.csv` and `wishlist.csv`.
    CsvDir(PathBuf),
}

impl SheetSource {
    pub fn detect(path: &Path) -> Self {
        if path.is_dir() {
            SheetSource::CsvDir(path.to_path_buf())
        } else {
            SheetSource::Workbook(path.to_path_buf())
        }
    }
}

pub struct SheetFileBackend {
    source: SheetSource,
}

impl SheetFileBackend {
    pub fn new(source: SheetSource) -> Self {
        Self { source }
    }

    pub fn open(path: &Path) -> Self {
        Self::new(SheetSource::detect(path))
    }

    fn read_tab(&self, tab: &str) -> Result<Vec<SheetRow>> {
        match &self.source {
            SheetSource::Workbook(path) => xlsx::read_workbook_tab(path, tab),
            SheetSource::CsvDir(dir) => {
                csv::read_csv_rows(&dir.join(format!("{}.csv", tab.to_lowercase())))
            }
        }
    }

    fn load(&self, tab: &str) -> Result<Vec<SheetRow>, BackendError> {
        let rows = self.read_tab(tab).map_err(|err| {
            tracing::warn!(tab, error = %format!("{err:#}"), "reading sheet export failed");
            BackendError::Source(format!("{err:#}"))
        })?;
        tracing::debug!(tab, count = rows.len(), "sheet export read");
        Ok(rows)
    }

    fn read_only<T>(&self, action: &str) -> Result<T, BackendError> {
        tracing::warn!(action, "mutation refused by file backend");
        Err(BackendError::ReadOnly)
    }
}

impl SheetBackend for SheetFileBackend {
    fn fetch_spots(&self) -> Result<Vec<SheetRow>, BackendError> {
        self.load(TAB_SPOTS)
    }

    fn create_spot(&self, _data: SheetRow) -> Result<MutationReceipt, BackendError> {
        self.read_only("create")
    }

    fn update_spot(&self, _data: SheetRow) -> Result<MutationReceipt, BackendError> {
        self.read_only("update")
    }

    fn delete_spot(&self, _id: &SpotId) -> Result<MutationReceipt, BackendError> {
        self.read_only("delete")
    }

    fn fetch_visits(&self, spot_id: &SpotId) -> Result<Vec<SheetRow>, BackendError> {
        let wanted = spot_id.0.trim();
        Ok(self
            .load(TAB_VISITS)?
            .into_iter()
            .filter(|row| {
                cell_text(row, COL_VISIT_SPOT_ID).is_some_and(|id| id.trim() == wanted)
            })
            .collect())
    }

    fn fetch_all_visits(&self) -> Result<Vec<SheetRow>, BackendError> {
        self.load(TAB_VISITS)
    }

    fn create_visit(&self, _data: SheetRow) -> Result<MutationReceipt, BackendError> {
        self.read_only("createVisita")
    }

    fn fetch_wishlist(&self) -> Result<Vec<SheetRow>, BackendError> {
        self.load(TAB_WISHLIST)
    }

    fn create_wishlist_item(&self, _data: SheetRow) -> Result<MutationReceipt, BackendError> {
        self.read_only("createWishlist")
    }

    fn update_wishlist_item(&self, _data: SheetRow) -> Result<MutationReceipt, BackendError> {
        self.read_only("updateWishlist")
    }

    fn delete_wishlist_item(&self, _id: &str) -> Result<MutationReceipt, BackendError> {
        self.read_only("deleteWishlist")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn csv_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(
            dir.path().join("pesqueiros.csv"),
            "ID,NomePesqueiro,TempoSemTransito,Peixes\n1,Lago Azul,45,\"Tilápia, Pacu\"\n2,Recanto,90,Bass\n",
        )
        .expect("write spots");
        fs::write(
            dir.path().join("visitas.csv"),
            "PesqueiroID,DataVisita,PeixesCapturados\n1,2024-03-02,3 tilápias\n2,2024-04-10,\n1,2024-05-01,nada\n",
        )
        .expect("write visits");
        dir
    }

    #[test]
    fn csv_dir_is_detected() {
        let dir = csv_dir();
        assert_eq!(
            SheetSource::detect(dir.path()),
            SheetSource::CsvDir(dir.path().to_path_buf())
        );
    }

    #[test]
    fn reads_spots_from_csv_dir() {
        let dir = csv_dir();
        let backend = SheetFileBackend::open(dir.path());

        let rows = backend.fetch_spots().expect("spots");

        assert_eq!(rows.len(), 2);
        assert_eq!(cell_text(&rows[0], "Peixes").as_deref(), Some("Tilápia, Pacu"));
    }

    #[test]
    fn visits_are_filtered_by_spot() {
        let dir = csv_dir();
        let backend = SheetFileBackend::open(dir.path());

        assert_eq!(backend.fetch_visits(&SpotId::from("1")).expect("visits").len(), 2);
        assert_eq!(backend.fetch_all_visits().expect("visits").len(), 3);
    }

    #[test]
    fn missing_tab_is_a_source_error() {
        let dir = csv_dir();
        let backend = SheetFileBackend::open(dir.path());

        assert!(matches!(backend.fetch_wishlist(), Err(BackendError::Source(_))));
    }

    #[test]
    fn mutations_are_refused() {
        let dir = csv_dir();
        let backend = SheetFileBackend::open(dir.path());

        assert_eq!(
            backend.delete_spot(&SpotId::from("1")),
            Err(BackendError::ReadOnly)
        );
        assert_eq!(
            backend.create_visit(SheetRow::new()),
            Err(BackendError::ReadOnly)
        );
    }
}
