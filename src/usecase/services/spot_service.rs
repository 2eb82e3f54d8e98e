use std::sync::Arc;

use serde_json::Value;

use crate::domain::entities::sheet::{cell_non_blank, SheetRow};
use crate::domain::entities::spot::{Spot, SpotId, COL_ID, COL_NAME};
use crate::usecase::ports::backend::{BackendError, MutationReceipt, SheetBackend};
use crate::usecase::ports::renderer::ViewSink;
use crate::usecase::services::collection_view::SpotView;
use crate::usecase::services::store::LoadStatus;

pub struct SpotService {
    backend: Arc<dyn SheetBackend>,
}

impl SpotService {
    pub fn new(backend: Arc<dyn SheetBackend>) -> Self {
        Self { backend }
    }

    pub fn load(&self, view: &mut SpotView, sink: &mut dyn ViewSink<Spot>) -> LoadStatus {
        let status = view.reload(self.backend.fetch_spots(), sink);
        tracing::info!(status = ?status, "spots loaded");
        status
    }

    /// Creates the spot when the draft carries no `ID`, updates it otherwise,
    /// then reloads the view. Nothing changes locally on failure.
    pub fn save(
        &self,
        view: &mut SpotView,
        draft: SheetRow,
        sink: &mut dyn ViewSink<Spot>,
    ) -> Result<MutationReceipt, BackendError> {
        let draft = normalize_draft(draft);
        if cell_non_blank(&draft, COL_NAME).is_none() {
            return Err(BackendError::InvalidPayload(format!(
                "{COL_NAME} is required"
            )));
        }

        let receipt = match cell_non_blank(&draft, COL_ID) {
            Some(id) => {
                tracing::info!(%id, "updating spot");
                self.backend.update_spot(draft)
            }
            None => {
                tracing::info!("creating spot");
                self.backend.create_spot(draft)
            }
        }
        .inspect_err(|err| tracing::warn!(error = %err, "saving spot failed"))?;

        self.load(view, sink);
        Ok(receipt)
    }

    pub fn delete(
        &self,
        view: &mut SpotView,
        id: &SpotId,
        sink: &mut dyn ViewSink<Spot>,
    ) -> Result<MutationReceipt, BackendError> {
        if id.0.trim().is_empty() {
            return Err(BackendError::InvalidPayload("spot id is empty".to_string()));
        }
        tracing::info!(%id, "deleting spot");
        let receipt = self
            .backend
            .delete_spot(id)
            .inspect_err(|err| tracing::warn!(%id, error = %err, "deleting spot failed"))?;
        self.load(view, sink);
        Ok(receipt)
    }
}

/// Trims text cells and drops a blank `ID` so it reads as a new record.
pub(crate) fn normalize_draft(mut draft: SheetRow) -> SheetRow {
    for value in draft.values_mut() {
        if let Value::String(text) = value {
            let trimmed = text.trim();
            if trimmed.len() != text.len() {
                *text = trimmed.to_string();
            }
        }
    }
    if cell_non_blank(&draft, COL_ID).is_none() {
        draft.remove(COL_ID);
    }
    draft
}
