//! Chain data source
//!
//! The scan only needs two calls from an indexer: the current height and a
//! page of receipts starting at a block. `EventSource` is that seam;
//! `HyperfuelClient` is the HTTP implementation used by `supply_scan`.

pub mod hyperfuel;

use {
    crate::receipts::{Receipt, ReceiptKind},
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
};

pub use hyperfuel::HyperfuelClient;

/// Receipt fields requested from the indexer
pub const RECEIPT_FIELDS: [&str; 13] = [
    "receipt_index",
    "root_contract_id",
    "tx_id",
    "tx_status",
    "to",
    "to_address",
    "amount",
    "asset_id",
    "val",
    "receipt_type",
    "sub_id",
    "sender",
    "recipient",
];

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HyperFuel returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode HyperFuel response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("gave up after {attempts} attempts, last error: {last}")]
    MaxRetries { attempts: u32, last: Box<SourceError> },

    #[error("chain height is unavailable: {0}")]
    HeightUnavailable(String),
}

impl SourceError {
    /// Transport failures and server-side errors are worth retrying
    pub fn is_retryable(&self) -> bool {
        match self {
            SourceError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            SourceError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Receipt selection for one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptSelection {
    pub receipt_type: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSelection {
    pub receipt: Vec<String>,
}

/// A page request: everything matching `receipts` from `from_block` onward
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    pub from_block: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_block: Option<u64>,
    pub receipts: Vec<ReceiptSelection>,
    pub field_selection: FieldSelection,
}

impl Query {
    /// Mint, burn and transfer receipts with the fields the classifier reads
    pub fn asset_receipts(from_block: u64) -> Self {
        Self {
            from_block,
            to_block: None,
            receipts: vec![ReceiptSelection {
                receipt_type: ReceiptKind::ALL.iter().map(|k| k.tag()).collect(),
            }],
            field_selection: FieldSelection {
                receipt: RECEIPT_FIELDS.iter().map(|f| f.to_string()).collect(),
            },
        }
    }
}

/// One page of receipts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResponse {
    pub receipts: Vec<Receipt>,
    /// Where the next query should start
    pub next_block: u64,
    pub archive_height: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawDataBatch {
    #[serde(default)]
    pub receipts: Vec<Receipt>,
}

/// Wire shape of a `/query` response
#[derive(Debug, Deserialize)]
pub(crate) struct RawQueryResponse {
    #[serde(default)]
    pub data: Vec<RawDataBatch>,
    pub next_block: u64,
    #[serde(default)]
    pub archive_height: Option<u64>,
}

impl From<RawQueryResponse> for QueryResponse {
    fn from(raw: RawQueryResponse) -> Self {
        Self {
            receipts: raw.data.into_iter().flat_map(|batch| batch.receipts).collect(),
            next_block: raw.next_block,
            archive_height: raw.archive_height,
        }
    }
}

#[async_trait]
pub trait EventSource {
    /// Highest block the indexer knows about
    async fn get_height(&self) -> Result<u64, SourceError>;

    /// Fetch the next page of receipts for `query`
    async fn get_selected_data(&self, query: &Query) -> Result<QueryResponse, SourceError>;
}

#[async_trait]
impl<S: EventSource + Send + Sync + ?Sized> EventSource for std::sync::Arc<S> {
    async fn get_height(&self) -> Result<u64, SourceError> {
        (**self).get_height().await
    }

    async fn get_selected_data(&self, query: &Query) -> Result<QueryResponse, SourceError> {
        (**self).get_selected_data(query).await
    }
}
