//! Asset ledger: the in-memory state folded from mint/burn receipts
//!
//! - `types` - identifiers, flow records and assets
//! - `asset_id` - deriving an asset identity from its minting contract and sub id
//! - `index` - minting contract → assets, in discovery order
//! - `state` - the `AssetLedger` state machine
//! - `error` - fatal ledger failures

pub mod asset_id;
pub mod error;
pub mod index;
pub mod state;
pub mod types;

pub use asset_id::{minted_asset_id, AssetIdDerivation, FuelAssetId};
pub use error::LedgerError;
pub use index::MintingIndex;
pub use state::AssetLedger;
pub use types::{Asset, AssetId, Bytes32, ContractId, FlowRecord, HolderId, ParseBytes32Error, SubId};
