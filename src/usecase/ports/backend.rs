use crate::domain::entities::sheet::SheetRow;
use crate::domain::entities::spot::SpotId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
    #[error("backend answered HTTP {status}: {reason}")]
    Status { status: u16, reason: String },
    /// The backend parsed the request and reported an error.
    #[error("backend reported an error: {0}")]
    Rejected(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    /// A local sheet export could not be read.
    #[error("sheet source unavailable: {0}")]
    Source(String),
    #[error("this data source is read-only")]
    ReadOnly,
    /// Caught before anything was sent.
    #[error("invalid data: {0}")]
    InvalidPayload(String),
}

/// Acknowledgement of a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MutationReceipt {
    pub message: Option<String>,
}

/// The spreadsheet behind the app. Reads hand back untyped rows; typing
/// happens when the rows enter an entity store.
pub trait SheetBackend: Send + Sync {
    fn fetch_spots(&self) -> Result<Vec<SheetRow>, BackendError>;
    fn create_spot(&self, data: SheetRow) -> Result<MutationReceipt, BackendError>;
    fn update_spot(&self, data: SheetRow) -> Result<MutationReceipt, BackendError>;
    fn delete_spot(&self, id: &SpotId) -> Result<MutationReceipt, BackendError>;

    fn fetch_visits(&self, spot_id: &SpotId) -> Result<Vec<SheetRow>, BackendError>;
    fn fetch_all_visits(&self) -> Result<Vec<SheetRow>, BackendError>;
    fn create_visit(&self, data: SheetRow) -> Result<MutationReceipt, BackendError>;

    fn fetch_wishlist(&self) -> Result<Vec<SheetRow>, BackendError>;
    fn create_wishlist_item(&self, data: SheetRow) -> Result<MutationReceipt, BackendError>;
    fn update_wishlist_item(&self, data: SheetRow) -> Result<MutationReceipt, BackendError>;
    fn delete_wishlist_item(&self, id: &str) -> Result<MutationReceipt, BackendError>;
}
