//! Payload shapes exchanged with the sheet web script.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::sheet::SheetRow;
use crate::usecase::ports::backend::{BackendError, MutationReceipt};

pub const ACTION_READ_SPOTS: &str = "readAll";
pub const ACTION_READ_VISITS: &str = "readVisitas";
pub const ACTION_READ_ALL_VISITS: &str = "readAllVisitas";
pub const ACTION_READ_WISHLIST: &str = "readAllWishlist";

pub const ACTION_CREATE_SPOT: &str = "create";
pub const ACTION_UPDATE_SPOT: &str = "update";
pub const ACTION_DELETE_SPOT: &str = "delete";
pub const ACTION_CREATE_VISIT: &str = "createVisita";
pub const ACTION_CREATE_WISHLIST: &str = "createWishlist";
pub const ACTION_UPDATE_WISHLIST: &str = "updateWishlist";
pub const ACTION_DELETE_WISHLIST: &str = "deleteWishlist";

/// The script only reads bodies sent as plain text.
pub const MUTATION_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

#[derive(Debug, Serialize)]
pub struct MutationRequest<'a> {
    pub action: &'a str,
    pub data: &'a SheetRow,
}

#[derive(Debug, Deserialize)]
struct MutationResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

/// Decodes a read response: a JSON array of row objects.
///
/// An object carrying `error` is the script reporting a failure.
pub fn decode_rows(body: &str) -> Result<Vec<SheetRow>, BackendError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|err| BackendError::Decode(format!("invalid json: {err}")))?;

    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(row) => Ok(row),
                other => Err(BackendError::Decode(format!(
                    "row {idx} is not an object: {other}"
                ))),
            })
            .collect(),
        Value::Object(object) => match object.get("error") {
            Some(error) => Err(BackendError::Rejected(value_message(error))),
            None => Err(BackendError::Decode(
                "expected an array of rows, got an object".to_string(),
            )),
        },
        other => Err(BackendError::Decode(format!(
            "expected an array of rows, got {other}"
        ))),
    }
}

/// Decodes a mutation response `{status, message}`.
pub fn decode_receipt(body: &str) -> Result<MutationReceipt, BackendError> {
    let response: MutationResponse = serde_json::from_str(body)
        .map_err(|err| BackendError::Decode(format!("invalid mutation response: {err}")))?;

    if response.status.eq_ignore_ascii_case("success") {
        Ok(MutationReceipt {
            message: response.message,
        })
    } else {
        Err(BackendError::Rejected(
            response
                .message
                .unwrap_or_else(|| "unknown error".to_string()),
        ))
    }
}

fn value_message(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
