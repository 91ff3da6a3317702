use {
    super::{
        asset_id::{AssetIdDerivation, FuelAssetId},
        error::LedgerError,
        index::MintingIndex,
        types::{Asset, AssetId, ContractId, FlowRecord, SubId},
    },
    std::collections::{hash_map::Entry, HashMap},
};

#[cfg(feature = "transfers")]
use super::types::HolderId;

/// In-memory supply and ownership state for every minted asset
///
/// Owned by a single writer (the scan loop) and mutated only through
/// `&mut self`. Grows on the first mint of each asset and never shrinks.
/// Every operation validates before mutating, so a failed call leaves the
/// ledger exactly as it was.
#[derive(Debug, Default)]
pub struct AssetLedger<D = FuelAssetId> {
    assets: HashMap<AssetId, Asset>,
    index: MintingIndex,
    derivation: D,
}

impl AssetLedger<FuelAssetId> {
    pub fn new() -> Self {
        Self::with_derivation(FuelAssetId)
    }
}

impl<D: AssetIdDerivation> AssetLedger<D> {
    pub fn with_derivation(derivation: D) -> Self {
        Self {
            assets: HashMap::new(),
            index: MintingIndex::new(),
            derivation,
        }
    }

    pub fn asset_id(&self, contract: &ContractId, sub_id: &SubId) -> AssetId {
        self.derivation.asset_id(contract, sub_id)
    }

    /// Add `val` to the asset's supply, creating the asset on first mint.
    ///
    /// The minting contract is treated as the initial holder and credited
    /// with the minted amount.
    pub fn mint(
        &mut self,
        contract: ContractId,
        sub_id: SubId,
        val: u64,
    ) -> Result<AssetId, LedgerError> {
        let asset_id = self.asset_id(&contract, &sub_id);

        let (supply, holder) = match self.assets.get(&asset_id) {
            Some(asset) => (
                asset
                    .supply
                    .checked_add(i128::from(val))
                    .ok_or(LedgerError::Overflow { asset_id, what: "supply" })?,
                asset.owner(&contract).copied().unwrap_or_default(),
            ),
            None => (i128::from(val), FlowRecord::default()),
        };
        let holder = holder.credited(val).ok_or(LedgerError::Overflow {
            asset_id,
            what: "holder inflow",
        })?;

        let asset = match self.assets.entry(asset_id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                log::debug!(
                    "New asset {} (sub_id {}) minted by {}",
                    asset_id,
                    sub_id,
                    contract
                );
                self.index.record(contract, asset_id);
                entry.insert(Asset::new(contract, sub_id))
            }
        };
        asset.supply = supply;
        asset.owners.insert(contract, holder);

        Ok(asset_id)
    }

    /// Subtract `val` from the asset's supply and debit the minting contract.
    ///
    /// Supply is allowed to go negative.
    pub fn burn(
        &mut self,
        contract: ContractId,
        sub_id: SubId,
        val: u64,
    ) -> Result<AssetId, LedgerError> {
        let asset_id = self.asset_id(&contract, &sub_id);

        let asset = self
            .assets
            .get_mut(&asset_id)
            .ok_or(LedgerError::BurnBeforeMint {
                asset_id,
                sub_id,
                contract,
            })?;

        let holder = asset
            .owner(&contract)
            .copied()
            .ok_or(LedgerError::UnknownHolder {
                asset_id,
                holder: contract,
            })?
            .debited(val)
            .ok_or(LedgerError::Overflow {
                asset_id,
                what: "holder outflow",
            })?;
        let supply = asset
            .supply
            .checked_sub(i128::from(val))
            .ok_or(LedgerError::Overflow { asset_id, what: "supply" })?;

        asset.supply = supply;
        asset.owners.insert(contract, holder);

        Ok(asset_id)
    }

    /// Move `amount` of a tracked asset from `sender` to `recipient`.
    ///
    /// Returns `Ok(false)` when the asset is not tracked. Supply is unchanged.
    #[cfg(feature = "transfers")]
    pub fn transfer(
        &mut self,
        asset_id: &AssetId,
        sender: HolderId,
        recipient: HolderId,
        amount: u64,
    ) -> Result<bool, LedgerError> {
        let Some(asset) = self.assets.get_mut(asset_id) else {
            return Ok(false);
        };
        let overflow = |what| LedgerError::Overflow {
            asset_id: *asset_id,
            what,
        };

        let received = asset
            .owner(&recipient)
            .copied()
            .unwrap_or_default()
            .credited(amount)
            .ok_or_else(|| overflow("holder inflow"))?;
        let sent_from = if sender == recipient {
            received
        } else {
            asset.owner(&sender).copied().unwrap_or_default()
        };
        let sent = sent_from
            .debited(amount)
            .ok_or_else(|| overflow("holder outflow"))?;

        asset.owners.insert(recipient, received);
        asset.owners.insert(sender, sent);

        Ok(true)
    }

    pub fn asset(&self, asset_id: &AssetId) -> Option<&Asset> {
        self.assets.get(asset_id)
    }

    pub fn minting_index(&self) -> &MintingIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Drop an asset while leaving the minting index alone
    #[cfg(test)]
    pub(crate) fn forget_asset(&mut self, asset_id: &AssetId) -> Option<Asset> {
        self.assets.remove(asset_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const C1: ContractId = ContractId::new([0xc1; 32]);
    const C2: ContractId = ContractId::new([0xc2; 32]);
    const S1: SubId = SubId::new([0x51; 32]);
    const S2: SubId = SubId::new([0x52; 32]);

    fn flow(value_in: u128, value_out: u128, count_in: u64, count_out: u64) -> FlowRecord {
        FlowRecord {
            value_in,
            value_out,
            count_in,
            count_out,
        }
    }

    #[test]
    fn test_mint_burn_scenario() {
        let mut ledger = AssetLedger::new();

        let a1 = ledger.mint(C1, S1, 100).unwrap();
        let asset = ledger.asset(&a1).unwrap();
        assert_eq!(asset.supply, 100);
        assert_eq!(asset.minting_contract, C1);
        assert_eq!(asset.sub_id, S1);
        assert_eq!(asset.owner(&C1), Some(&flow(100, 0, 1, 0)));

        assert_eq!(ledger.mint(C1, S1, 50).unwrap(), a1);
        let asset = ledger.asset(&a1).unwrap();
        assert_eq!(asset.supply, 150);
        assert_eq!(asset.owner(&C1), Some(&flow(150, 0, 2, 0)));

        assert_eq!(ledger.burn(C1, S1, 30).unwrap(), a1);
        let asset = ledger.asset(&a1).unwrap();
        assert_eq!(asset.supply, 120);
        assert_eq!(asset.owner(&C1), Some(&flow(150, 30, 2, 1)));

        // No floor check: over-burning drives supply negative
        ledger.burn(C1, S1, 9999).unwrap();
        let asset = ledger.asset(&a1).unwrap();
        assert_eq!(asset.supply, -9879);
        assert_eq!(asset.owner(&C1), Some(&flow(150, 10029, 2, 2)));
    }

    #[test]
    fn test_repeated_mints_sum_under_one_identity() {
        let mut ledger = AssetLedger::new();
        let amounts = [1u64, 7, 0, 1_000_000, u64::MAX];

        let ids: Vec<_> = amounts
            .iter()
            .map(|v| ledger.mint(C2, S2, *v).unwrap())
            .collect();

        assert!(ids.windows(2).all(|w| w[0] == w[1]));
        let expected: i128 = amounts.iter().map(|v| i128::from(*v)).sum();
        assert_eq!(ledger.asset(&ids[0]).unwrap().supply, expected);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_burn_before_mint_leaves_ledger_untouched() {
        let mut ledger = AssetLedger::new();
        ledger.mint(C1, S1, 5).unwrap();

        for val in [0u64, 10, u64::MAX] {
            let err = ledger.burn(C2, S2, val).unwrap_err();
            assert!(matches!(
                err,
                LedgerError::BurnBeforeMint { contract, sub_id, .. } if contract == C2 && sub_id == S2
            ));
        }

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.minting_index().asset_count(), 1);
        assert_eq!(ledger.asset(&ledger.asset_id(&C1, &S1)).unwrap().supply, 5);
    }

    #[test]
    fn test_minting_index_partitions_new_assets() {
        let mut ledger = AssetLedger::new();
        let pairs = [(C1, S1), (C2, S1), (C1, S2), (C1, S1), (C2, S1)];
        for (contract, sub_id) in pairs {
            ledger.mint(contract, sub_id, 1).unwrap();
        }

        let index = ledger.minting_index();
        assert_eq!(index.asset_count(), 3);
        let grouped: Vec<_> = index.iter().map(|(c, a)| (*c, a.to_vec())).collect();
        assert_eq!(
            grouped,
            vec![
                (C1, vec![ledger.asset_id(&C1, &S1), ledger.asset_id(&C1, &S2)]),
                (C2, vec![ledger.asset_id(&C2, &S1)]),
            ]
        );
    }

    #[test]
    fn test_custom_derivation_is_used() {
        struct FirstByte;
        impl AssetIdDerivation for FirstByte {
            fn asset_id(&self, contract: &ContractId, sub_id: &SubId) -> AssetId {
                let mut bytes = [0u8; 32];
                bytes[0] = contract.0[0];
                bytes[1] = sub_id.0[0];
                AssetId::new(bytes)
            }
        }

        let mut ledger = AssetLedger::with_derivation(FirstByte);
        let id = ledger.mint(C1, S2, 3).unwrap();
        assert_eq!(id.0[..2], [0xc1, 0x52]);
    }

    #[cfg(feature = "transfers")]
    #[test]
    fn test_transfer_moves_flow_without_touching_supply() {
        let mut ledger = AssetLedger::new();
        let a1 = ledger.mint(C1, S1, 100).unwrap();
        let holder = HolderId::new([0xee; 32]);

        assert!(ledger.transfer(&a1, C1, holder, 40).unwrap());
        let asset = ledger.asset(&a1).unwrap();
        assert_eq!(asset.supply, 100);
        assert_eq!(asset.owner(&C1), Some(&flow(100, 40, 1, 1)));
        assert_eq!(asset.owner(&holder), Some(&flow(40, 0, 1, 0)));

        let untracked = AssetId::new([0x99; 32]);
        assert!(!ledger.transfer(&untracked, C1, holder, 1).unwrap());
    }
}
