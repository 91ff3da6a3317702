use {
    super::types::{AssetId, ContractId},
    std::collections::HashMap,
};

/// Minting contract → assets it minted, both in discovery order.
///
/// Append-only. Only used for grouped reporting.
#[derive(Debug, Clone, Default)]
pub struct MintingIndex {
    contracts: Vec<ContractId>,
    assets_by_contract: HashMap<ContractId, Vec<AssetId>>,
}

impl MintingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly discovered asset. Callers guarantee each asset is recorded once.
    pub fn record(&mut self, contract: ContractId, asset_id: AssetId) {
        if !self.assets_by_contract.contains_key(&contract) {
            self.contracts.push(contract);
        }
        self.assets_by_contract
            .entry(contract)
            .or_default()
            .push(asset_id);
    }

    pub fn assets_of(&self, contract: &ContractId) -> &[AssetId] {
        self.assets_by_contract
            .get(contract)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate `(contract, assets)` in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&ContractId, &[AssetId])> + '_ {
        self.contracts
            .iter()
            .map(move |contract| (contract, self.assets_of(contract)))
    }

    pub fn contract_count(&self) -> usize {
        self.contracts.len()
    }

    pub fn asset_count(&self) -> usize {
        self.assets_by_contract.values().map(Vec::len).sum()
    }
}
