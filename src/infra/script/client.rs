use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use serde_json::{Map, Value};

use crate::domain::entities::sheet::SheetRow;
use crate::domain::entities::spot::{SpotId, COL_ID};
use crate::infra::script::wire::{self, MutationRequest};
use crate::usecase::ports::backend::{BackendError, MutationReceipt, SheetBackend};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Talks to the spreadsheet through its published web script.
pub struct ScriptBackend {
    client: Client,
    url: String,
}

impl ScriptBackend {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| BackendError::Transport(format!("failed to build client: {err}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    fn read(&self, action: &str, params: &[(&str, &str)]) -> Result<Vec<SheetRow>, BackendError> {
        let mut query = vec![("action", action)];
        query.extend_from_slice(params);

        tracing::debug!(action, "script read");
        let response = self
            .client
            .get(&self.url)
            .query(&query)
            .send()
            .map_err(|err| BackendError::Transport(err.to_string()))?;
        let body = checked_body(response)?;
        wire::decode_rows(&body)
    }

    fn mutate(&self, action: &str, data: &SheetRow) -> Result<MutationReceipt, BackendError> {
        let payload = serde_json::to_string(&MutationRequest { action, data })
            .map_err(|err| BackendError::InvalidPayload(err.to_string()))?;

        tracing::debug!(action, "script mutation");
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, wire::MUTATION_CONTENT_TYPE)
            .body(payload)
            .send()
            .map_err(|err| BackendError::Transport(err.to_string()))?;
        let body = checked_body(response)?;
        wire::decode_receipt(&body)
    }
}

fn checked_body(response: Response) -> Result<String, BackendError> {
    let status = response.status();
    if !status.is_success() {
        return Err(BackendError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("unknown").to_string(),
        });
    }
    response
        .text()
        .map_err(|err| BackendError::Transport(format!("failed to read response: {err}")))
}

fn id_payload(id: &str) -> SheetRow {
    let mut data = Map::new();
    data.insert(COL_ID.to_string(), Value::String(id.to_string()));
    data
}

impl SheetBackend for ScriptBackend {
    fn fetch_spots(&self) -> Result<Vec<SheetRow>, BackendError> {
        self.read(wire::ACTION_READ_SPOTS, &[])
    }

    fn create_spot(&self, data: SheetRow) -> Result<MutationReceipt, BackendError> {
        self.mutate(wire::ACTION_CREATE_SPOT, &data)
    }

    fn update_spot(&self, data: SheetRow) -> Result<MutationReceipt, BackendError> {
        self.mutate(wire::ACTION_UPDATE_SPOT, &data)
    }

    fn delete_spot(&self, id: &SpotId) -> Result<MutationReceipt, BackendError> {
        self.mutate(wire::ACTION_DELETE_SPOT, &id_payload(&id.0))
    }

    fn fetch_visits(&self, spot_id: &SpotId) -> Result<Vec<SheetRow>, BackendError> {
        self.read(wire::ACTION_READ_VISITS, &[("pesqueiroId", spot_id.0.as_str())])
    }

    fn fetch_all_visits(&self) -> Result<Vec<SheetRow>, BackendError> {
        self.read(wire::ACTION_READ_ALL_VISITS, &[])
    }

    fn create_visit(&self, data: SheetRow) -> Result<MutationReceipt, BackendError> {
        self.mutate(wire::ACTION_CREATE_VISIT, &data)
    }

    fn fetch_wishlist(&self) -> Result<Vec<SheetRow>, BackendError> {
        self.read(wire::ACTION_READ_WISHLIST, &[])
    }

    fn create_wishlist_item(&self, data: SheetRow) -> Result<MutationReceipt, BackendError> {
        self.mutate(wire::ACTION_CREATE_WISHLIST, &data)
    }

    fn update_wishlist_item(&self, data: SheetRow) -> Result<MutationReceipt, BackendError> {
        self.mutate(wire::ACTION_UPDATE_WISHLIST, &data)
    }

    fn delete_wishlist_item(&self, id: &str) -> Result<MutationReceipt, BackendError> {
        self.mutate(wire::ACTION_DELETE_WISHLIST, &id_payload(id))
    }
}
