//! Token supply reconstruction for Fuel native assets
//!
//! Pages through HyperFuel mint/burn receipts and folds them into an
//! in-memory [`AssetLedger`] holding per-asset supply and per-holder flow.
//!
//! ## Module Organization
//!
//! - `source` - `EventSource` trait and the HyperFuel HTTP client
//! - `height` - one-shot chain height snapshot the scan runs up to
//! - `driver` - pagination loop
//! - `classifier` - receipt type dispatch into ledger operations
//! - `ledger` - asset ledger and minting-contract index
//! - `report` - supply summary grouped by minting contract
//! - `config` - environment configuration

pub mod classifier;
pub mod config;
pub mod driver;
pub mod error;
pub mod height;
pub mod ledger;
pub mod receipts;
pub mod report;
pub mod source;

pub use classifier::{BurnExclusions, Classifier, Outcome, OutcomeCounts};
pub use config::{ConfigError, ScanConfig};
pub use driver::{run_scan, ScanStats, DEFAULT_START_BLOCK};
pub use error::ScanError;
pub use height::{ChainHeight, PENDING_HEIGHT};
pub use ledger::{Asset, AssetId, AssetLedger, ContractId, FlowRecord, LedgerError, SubId};
pub use receipts::{Receipt, ReceiptKind};
pub use report::{render_report, write_report, ReportError};
pub use source::{EventSource, HyperfuelClient, Query, QueryResponse, SourceError};
