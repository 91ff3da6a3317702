use {
    super::types::{AssetId, ContractId, SubId},
    sha2::{Digest, Sha256},
};

/// Maps `(minting contract, sub id)` to the asset identity.
///
/// Must be pure: the ledger relies on the same inputs always producing the
/// same identity.
pub trait AssetIdDerivation {
    fn asset_id(&self, contract: &ContractId, sub_id: &SubId) -> AssetId;
}

/// Fuel's minted-asset rule: `sha256(contract_id ‖ sub_id)`
#[derive(Debug, Clone, Copy, Default)]
pub struct FuelAssetId;

impl AssetIdDerivation for FuelAssetId {
    fn asset_id(&self, contract: &ContractId, sub_id: &SubId) -> AssetId {
        let mut hasher = Sha256::new();
        hasher.update(contract.as_bytes());
        hasher.update(sub_id.as_bytes());
        AssetId::new(hasher.finalize().into())
    }
}

/// Free-function form of [`FuelAssetId`]
pub fn minted_asset_id(contract: &ContractId, sub_id: &SubId) -> AssetId {
    FuelAssetId.asset_id(contract, sub_id)
}
