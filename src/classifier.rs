use {
    crate::{
        ledger::{AssetIdDerivation, AssetLedger, ContractId, LedgerError},
        receipts::{Receipt, ReceiptKind},
    },
    std::collections::HashSet,
};

/// Contract whose burns are not counted against supply
pub const DEFAULT_BURN_EXCLUDED_CONTRACT: ContractId = ContractId::new([
    0x35, 0x50, 0xc5, 0x38, 0x90, 0xdb, 0x64, 0xa2, 0x41, 0xd3, 0xcc, 0x65, 0x23, 0xd4, 0x25, 0x5a,
    0x9c, 0x58, 0x8c, 0x4b, 0xd8, 0x50, 0x3f, 0x91, 0x1a, 0x39, 0x44, 0x49, 0x89, 0x62, 0x66, 0x26,
]);

/// Minting contracts whose Burn receipts are skipped entirely
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnExclusions(HashSet<ContractId>);

impl BurnExclusions {
    pub fn none() -> Self {
        Self(HashSet::new())
    }

    pub fn contains(&self, contract: &ContractId) -> bool {
        self.0.contains(contract)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for BurnExclusions {
    fn default() -> Self {
        Self::from_iter([DEFAULT_BURN_EXCLUDED_CONTRACT])
    }
}

impl FromIterator<ContractId> for BurnExclusions {
    fn from_iter<I: IntoIterator<Item = ContractId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// What a single receipt did to the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Minted,
    Burned,
    /// Burn from a contract in [`BurnExclusions`]
    BurnExcluded,
    #[cfg(feature = "transfers")]
    Transferred,
    /// Transfer of an asset this ledger never saw minted
    #[cfg(feature = "transfers")]
    UnknownAsset,
    /// Transfer receipt seen while transfer accounting is compiled out
    TransferUnsupported,
    /// Receipt type outside the four handled kinds
    Ignored,
}

/// Per-outcome tallies for a batch or a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub minted: u64,
    pub burned: u64,
    pub burn_excluded: u64,
    #[cfg(feature = "transfers")]
    pub transferred: u64,
    #[cfg(feature = "transfers")]
    pub unknown_asset: u64,
    pub transfer_unsupported: u64,
    pub ignored: u64,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Minted => self.minted += 1,
            Outcome::Burned => self.burned += 1,
            Outcome::BurnExcluded => self.burn_excluded += 1,
            #[cfg(feature = "transfers")]
            Outcome::Transferred => self.transferred += 1,
            #[cfg(feature = "transfers")]
            Outcome::UnknownAsset => self.unknown_asset += 1,
            Outcome::TransferUnsupported => self.transfer_unsupported += 1,
            Outcome::Ignored => self.ignored += 1,
        }
    }

    pub fn merge(&mut self, other: &OutcomeCounts) {
        self.minted += other.minted;
        self.burned += other.burned;
        self.burn_excluded += other.burn_excluded;
        #[cfg(feature = "transfers")]
        {
            self.transferred += other.transferred;
            self.unknown_asset += other.unknown_asset;
        }
        self.transfer_unsupported += other.transfer_unsupported;
        self.ignored += other.ignored;
    }
}

/// Routes receipts to the ledger operation matching their type tag
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    burn_exclusions: BurnExclusions,
}

impl Classifier {
    pub fn new(burn_exclusions: BurnExclusions) -> Self {
        Self { burn_exclusions }
    }

    pub fn classify<D: AssetIdDerivation>(
        &self,
        ledger: &mut AssetLedger<D>,
        receipt: &Receipt,
    ) -> Result<Outcome, LedgerError> {
        let Some(kind) = receipt.kind() else {
            log::trace!("Ignoring receipt type {}", receipt.receipt_type);
            return Ok(Outcome::Ignored);
        };

        match kind {
            ReceiptKind::Mint => {
                let (contract, sub_id, val) = supply_fields(kind, receipt)?;
                ledger.mint(contract, sub_id, val)?;
                Ok(Outcome::Minted)
            }
            ReceiptKind::Burn => {
                let (contract, sub_id, val) = supply_fields(kind, receipt)?;
                if self.burn_exclusions.contains(&contract) {
                    log::trace!("Skipping burn from excluded contract {}", contract);
                    return Ok(Outcome::BurnExcluded);
                }
                ledger.burn(contract, sub_id, val)?;
                Ok(Outcome::Burned)
            }
            ReceiptKind::Transfer | ReceiptKind::TransferOut => {
                self.classify_transfer(ledger, kind, receipt)
            }
        }
    }

    /// Apply receipts in order, stopping at the first error
    pub fn classify_batch<D: AssetIdDerivation>(
        &self,
        ledger: &mut AssetLedger<D>,
        receipts: &[Receipt],
    ) -> Result<OutcomeCounts, LedgerError> {
        let mut counts = OutcomeCounts::default();
        for receipt in receipts {
            counts.record(self.classify(ledger, receipt)?);
        }
        Ok(counts)
    }

    #[cfg(not(feature = "transfers"))]
    fn classify_transfer<D: AssetIdDerivation>(
        &self,
        _ledger: &mut AssetLedger<D>,
        _kind: ReceiptKind,
        _receipt: &Receipt,
    ) -> Result<Outcome, LedgerError> {
        Ok(Outcome::TransferUnsupported)
    }

    /// Sender is taken from `root_contract_id`, which is not always the
    /// party that actually sent the coins.
    #[cfg(feature = "transfers")]
    fn classify_transfer<D: AssetIdDerivation>(
        &self,
        ledger: &mut AssetLedger<D>,
        kind: ReceiptKind,
        receipt: &Receipt,
    ) -> Result<Outcome, LedgerError> {
        let (recipient, recipient_field) = match kind {
            ReceiptKind::TransferOut => (receipt.to_address, "to_address"),
            _ => (receipt.to, "to"),
        };
        let amount = required(kind, "amount", receipt.amount)?;
        let asset_id = required(kind, "asset_id", receipt.asset_id)?;
        let recipient = required(kind, recipient_field, recipient)?;
        let sender = required(kind, "root_contract_id", receipt.root_contract_id)?;

        if ledger.transfer(&asset_id, sender, recipient, amount)? {
            Ok(Outcome::Transferred)
        } else {
            Ok(Outcome::UnknownAsset)
        }
    }
}

fn required<T>(kind: ReceiptKind, field: &'static str, value: Option<T>) -> Result<T, LedgerError> {
    value.ok_or(LedgerError::MalformedReceipt {
        kind: kind.name(),
        field,
    })
}

/// `(root_contract_id, sub_id, val)` shared by Mint and Burn
fn supply_fields(
    kind: ReceiptKind,
    receipt: &Receipt,
) -> Result<(ContractId, crate::ledger::SubId, u64), LedgerError> {
    Ok((
        required(kind, "root_contract_id", receipt.root_contract_id)?,
        required(kind, "sub_id", receipt.sub_id)?,
        required(kind, "val", receipt.val)?,
    ))
}

#[cfg(test)]
mod tests {
    use {super::*, crate::ledger::SubId};

    const C1: ContractId = ContractId::new([0xc1; 32]);
    const S1: SubId = SubId::new([0x51; 32]);

    fn supply_receipt(kind: ReceiptKind, contract: ContractId, sub_id: SubId, val: u64) -> Receipt {
        Receipt {
            receipt_type: kind.tag(),
            root_contract_id: Some(contract),
            sub_id: Some(sub_id),
            val: Some(val),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_exclusion_matches_known_contract() {
        let expected: ContractId = "0x3550c53890db64a241d3cc6523d4255a9c588c4bd8503f911a39444989626626"
            .parse()
            .unwrap();
        assert_eq!(DEFAULT_BURN_EXCLUDED_CONTRACT, expected);
        assert!(BurnExclusions::default().contains(&expected));
        assert!(BurnExclusions::none().is_empty());
    }

    #[test]
    fn test_mint_and_burn_dispatch() {
        let classifier = Classifier::default();
        let mut ledger = AssetLedger::new();

        let counts = classifier
            .classify_batch(
                &mut ledger,
                &[
                    supply_receipt(ReceiptKind::Mint, C1, S1, 10),
                    supply_receipt(ReceiptKind::Burn, C1, S1, 4),
                    Receipt {
                        receipt_type: 0,
                        ..Default::default()
                    },
                ],
            )
            .unwrap();

        assert_eq!(counts.minted, 1);
        assert_eq!(counts.burned, 1);
        assert_eq!(counts.ignored, 1);
        assert_eq!(counts.burn_excluded, 0);
        assert_eq!(ledger.asset(&ledger.asset_id(&C1, &S1)).unwrap().supply, 6);
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let classifier = Classifier::default();
        let mut ledger = AssetLedger::new();

        let mut receipt = supply_receipt(ReceiptKind::Mint, C1, S1, 10);
        receipt.val = None;
        assert_eq!(
            classifier.classify(&mut ledger, &receipt),
            Err(LedgerError::MalformedReceipt {
                kind: "mint",
                field: "val"
            })
        );

        let mut receipt = supply_receipt(ReceiptKind::Burn, C1, S1, 10);
        receipt.sub_id = None;
        assert_eq!(
            classifier.classify(&mut ledger, &receipt),
            Err(LedgerError::MalformedReceipt {
                kind: "burn",
                field: "sub_id"
            })
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_excluded_burn_changes_nothing() {
        let excluded = DEFAULT_BURN_EXCLUDED_CONTRACT;
        let classifier = Classifier::default();
        let mut ledger = AssetLedger::new();

        classifier
            .classify(&mut ledger, &supply_receipt(ReceiptKind::Mint, excluded, S1, 100))
            .unwrap();
        let asset_id = ledger.asset_id(&excluded, &S1);
        let before = ledger.asset(&asset_id).cloned().unwrap();

        let outcome = classifier
            .classify(&mut ledger, &supply_receipt(ReceiptKind::Burn, excluded, S1, 60))
            .unwrap();

        assert_eq!(outcome, Outcome::BurnExcluded);
        assert_eq!(ledger.asset(&asset_id), Some(&before));
    }

    #[test]
    fn test_excluded_burn_skipped_even_without_mint() {
        let classifier = Classifier::default();
        let mut ledger = AssetLedger::new();
        let receipt = supply_receipt(ReceiptKind::Burn, DEFAULT_BURN_EXCLUDED_CONTRACT, S1, 1);
        assert_eq!(
            classifier.classify(&mut ledger, &receipt),
            Ok(Outcome::BurnExcluded)
        );
    }

    #[test]
    fn test_burn_before_mint_is_fatal() {
        let classifier = Classifier::new(BurnExclusions::none());
        let mut ledger = AssetLedger::new();

        let receipt = supply_receipt(ReceiptKind::Burn, C1, S1, 1);

        match classifier.classify(&mut ledger, &receipt) {
            Err(LedgerError::BurnBeforeMint { contract, sub_id, .. }) => {
                assert_eq!(contract, C1);
                assert_eq!(sub_id, S1);
            }
            other => panic!("expected BurnBeforeMint, got {:?}", other),
        }
        assert!(ledger.is_empty());
    }

    #[cfg(not(feature = "transfers"))]
    #[test]
    fn test_transfers_are_unsupported_by_default() {
        let classifier = Classifier::default();
        let mut ledger = AssetLedger::new();
        for kind in [ReceiptKind::Transfer, ReceiptKind::TransferOut] {
            let receipt = Receipt {
                receipt_type: kind.tag(),
                ..Default::default()
            };
            assert_eq!(
                classifier.classify(&mut ledger, &receipt),
                Ok(Outcome::TransferUnsupported)
            );
        }
    }

    #[cfg(not(feature = "transfers"))]
    #[test]
    fn test_transfer_tallies_without_feature() {
        let classifier = Classifier::default();
        let mut ledger = AssetLedger::new();
        let receipts = [
            supply_receipt(ReceiptKind::Mint, C1, S1, 10),
            Receipt {
                receipt_type: ReceiptKind::Transfer.tag(),
                ..Default::default()
            },
            Receipt {
                receipt_type: ReceiptKind::TransferOut.tag(),
                ..Default::default()
            },
        ];

        let counts = classifier.classify_batch(&mut ledger, &receipts).unwrap();
        assert_eq!(
            counts,
            OutcomeCounts {
                minted: 1,
                transfer_unsupported: 2,
                ..Default::default()
            }
        );
    }

    #[cfg(feature = "transfers")]
    #[test]
    fn test_transfer_out_credits_address() {
        let classifier = Classifier::default();
        let mut ledger = AssetLedger::new();
        classifier
            .classify(&mut ledger, &supply_receipt(ReceiptKind::Mint, C1, S1, 100))
            .unwrap();
        let asset_id = ledger.asset_id(&C1, &S1);
        let address = crate::ledger::HolderId::new([0x0a; 32]);

        let receipt = Receipt {
            receipt_type: ReceiptKind::TransferOut.tag(),
            root_contract_id: Some(C1),
            to_address: Some(address),
            amount: Some(25),
            asset_id: Some(asset_id),
            ..Default::default()
        };
        assert_eq!(
            classifier.classify(&mut ledger, &receipt),
            Ok(Outcome::Transferred)
        );

        let asset = ledger.asset(&asset_id).unwrap();
        assert_eq!(asset.supply, 100);
        assert_eq!(asset.owner(&address).unwrap().value_in, 25);
        assert_eq!(asset.owner(&C1).unwrap().value_out, 25);
    }

    #[cfg(feature = "transfers")]
    #[test]
    fn test_transfer_tallies_with_feature() {
        let classifier = Classifier::default();
        let mut ledger = AssetLedger::new();
        let asset_id = ledger.asset_id(&C1, &S1);
        let transfer = |asset_id| Receipt {
            receipt_type: ReceiptKind::Transfer.tag(),
            root_contract_id: Some(C1),
            to: Some(ContractId::new([2; 32])),
            amount: Some(1),
            asset_id: Some(asset_id),
            ..Default::default()
        };
        let receipts = [
            supply_receipt(ReceiptKind::Mint, C1, S1, 10),
            transfer(asset_id),
            transfer(crate::ledger::AssetId::new([3; 32])),
        ];

        let counts = classifier.classify_batch(&mut ledger, &receipts).unwrap();
        assert_eq!(counts.minted, 1);
        assert_eq!(counts.transferred, 1);
        assert_eq!(counts.unknown_asset, 1);
        assert_eq!(counts.transfer_unsupported, 0);
    }

    #[cfg(feature = "transfers")]
    #[test]
    fn test_transfer_of_untracked_asset_is_ignored() {
        let classifier = Classifier::default();
        let mut ledger = AssetLedger::new();
        let receipt = Receipt {
            receipt_type: ReceiptKind::Transfer.tag(),
            root_contract_id: Some(C1),
            to: Some(ContractId::new([2; 32])),
            amount: Some(5),
            asset_id: Some(crate::ledger::AssetId::new([3; 32])),
            ..Default::default()
        };
        assert_eq!(
            classifier.classify(&mut ledger, &receipt),
            Ok(Outcome::UnknownAsset)
        );

        let mut missing = receipt;
        missing.to = None;
        assert_eq!(
            classifier.classify(&mut ledger, &missing),
            Err(LedgerError::MalformedReceipt {
                kind: "transfer",
                field: "to"
            })
        );
    }
}
