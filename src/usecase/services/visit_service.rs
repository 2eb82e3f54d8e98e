use std::sync::Arc;

use crate::domain::entities::sheet::{cell_non_blank, SheetRow};
use crate::domain::entities::spot::SpotId;
use crate::domain::entities::visit::{recent_visits, Visit, COL_VISIT_SPOT_ID, TIMELINE_LIMIT};
use crate::usecase::ports::backend::{BackendError, MutationReceipt, SheetBackend};
use crate::usecase::services::spot_service::normalize_draft;

pub struct VisitService {
    backend: Arc<dyn SheetBackend>,
}

impl VisitService {
    pub fn new(backend: Arc<dyn SheetBackend>) -> Self {
        Self { backend }
    }

    pub fn visits_for(&self, spot_id: &SpotId) -> Result<Vec<Visit>, BackendError> {
        let rows = self
            .backend
            .fetch_visits(spot_id)
            .inspect_err(|err| tracing::warn!(%spot_id, error = %err, "loading visits failed"))?;
        Ok(rows.iter().map(Visit::from_row).collect())
    }

    pub fn all_visits(&self) -> Result<Vec<Visit>, BackendError> {
        let rows = self
            .backend
            .fetch_all_visits()
            .inspect_err(|err| tracing::warn!(error = %err, "loading visits failed"))?;
        Ok(rows.iter().map(Visit::from_row).collect())
    }

    /// The latest visits across every spot, newest first.
    pub fn timeline(&self) -> Result<Vec<Visit>, BackendError> {
        Ok(recent_visits(&self.all_visits()?, TIMELINE_LIMIT))
    }

    pub fn record_visit(&self, draft: SheetRow) -> Result<MutationReceipt, BackendError> {
        let draft = normalize_draft(draft);
        let Some(spot_id) = cell_non_blank(&draft, COL_VISIT_SPOT_ID) else {
            return Err(BackendError::InvalidPayload(format!(
                "{COL_VISIT_SPOT_ID} is required"
            )));
        };
        tracing::info!(%spot_id, "recording visit");
        self.backend
            .create_visit(draft)
            .inspect_err(|err| tracing::warn!(%spot_id, error = %err, "recording visit failed"))
    }
}
