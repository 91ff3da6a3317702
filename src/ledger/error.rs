use super::types::{AssetId, ContractId, HolderId, SubId};

/// Failures raised while folding receipts into the ledger. All are fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("malformed {kind} receipt from HyperFuel: required field `{field}` is missing")]
    MalformedReceipt {
        kind: &'static str,
        field: &'static str,
    },

    #[error(
        "burn for an asset that was never minted - asset_id: {asset_id}, sub_id: {sub_id}, \
         contract: {contract}"
    )]
    BurnBeforeMint {
        asset_id: AssetId,
        sub_id: SubId,
        contract: ContractId,
    },

    #[error("burn for asset {asset_id} whose holder {holder} has no recorded inflow")]
    UnknownHolder { asset_id: AssetId, holder: HolderId },

    #[error("arithmetic overflow on {what} of asset {asset_id}")]
    Overflow { asset_id: AssetId, what: &'static str },
}
