use std::sync::Arc;

use serde_json::Value;

use crate::domain::entities::sheet::{cell_non_blank, parse_numeric_text, SheetRow};
use crate::domain::entities::wishlist::{WishlistItem, COL_ITEM_ID, COL_ITEM_NAME, COL_ITEM_PRICE};
use crate::usecase::ports::backend::{BackendError, MutationReceipt, SheetBackend};
use crate::usecase::ports::renderer::ViewSink;
use crate::usecase::services::collection_view::WishlistView;
use crate::usecase::services::spot_service::normalize_draft;
use crate::usecase::services::store::LoadStatus;

pub struct WishlistService {
    backend: Arc<dyn SheetBackend>,
}

impl WishlistService {
    pub fn new(backend: Arc<dyn SheetBackend>) -> Self {
        Self { backend }
    }

    pub fn load(
        &self,
        view: &mut WishlistView,
        sink: &mut dyn ViewSink<WishlistItem>,
    ) -> LoadStatus {
        let status = view.reload(self.backend.fetch_wishlist(), sink);
        tracing::info!(status = ?status, "wishlist loaded");
        status
    }

    pub fn save(
        &self,
        view: &mut WishlistView,
        draft: SheetRow,
        sink: &mut dyn ViewSink<WishlistItem>,
    ) -> Result<MutationReceipt, BackendError> {
        let draft = normalize_price(normalize_draft(draft))?;
        if cell_non_blank(&draft, COL_ITEM_NAME).is_none() {
            return Err(BackendError::InvalidPayload(format!(
                "{COL_ITEM_NAME} is required"
            )));
        }

        let receipt = match cell_non_blank(&draft, COL_ITEM_ID) {
            Some(id) => {
                tracing::info!(%id, "updating wishlist item");
                self.backend.update_wishlist_item(draft)
            }
            None => {
                tracing::info!("creating wishlist item");
                self.backend.create_wishlist_item(draft)
            }
        }
        .inspect_err(|err| tracing::warn!(error = %err, "saving wishlist item failed"))?;

        self.load(view, sink);
        Ok(receipt)
    }

    pub fn delete(
        &self,
        view: &mut WishlistView,
        id: &str,
        sink: &mut dyn ViewSink<WishlistItem>,
    ) -> Result<MutationReceipt, BackendError> {
        if id.trim().is_empty() {
            return Err(BackendError::InvalidPayload(
                "wishlist item id is empty".to_string(),
            ));
        }
        tracing::info!(id, "deleting wishlist item");
        let receipt = self
            .backend
            .delete_wishlist_item(id)
            .inspect_err(|err| tracing::warn!(id, error = %err, "deleting wishlist item failed"))?;
        self.load(view, sink);
        Ok(receipt)
    }
}

/// Rewrites `PrecoEstimado` as text with two decimals; a blank price is dropped.
fn normalize_price(mut draft: SheetRow) -> Result<SheetRow, BackendError> {
    let price = match draft.get(COL_ITEM_PRICE) {
        None | Some(Value::Null) => return Ok(draft),
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) if text.trim().is_empty() => {
            draft.remove(COL_ITEM_PRICE);
            return Ok(draft);
        }
        Some(Value::String(text)) => parse_numeric_text(text),
        Some(_) => None,
    };
    let Some(price) = price.filter(|value| value.is_finite()) else {
        return Err(BackendError::InvalidPayload(format!(
            "{COL_ITEM_PRICE} is not a number"
        )));
    };
    draft.insert(
        COL_ITEM_PRICE.to_string(),
        Value::String(format!("{price:.2}")),
    );
    Ok(draft)
}
