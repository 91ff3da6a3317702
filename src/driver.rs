use {
    crate::{
        classifier::{Classifier, OutcomeCounts},
        error::ScanError,
        height::ChainHeight,
        ledger::{AssetIdDerivation, AssetLedger},
        source::{EventSource, Query},
    },
    std::time::Instant,
};

/// First block with asset activity on Fuel testnet
pub const DEFAULT_START_BLOCK: u64 = 518_152;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub batches: u64,
    pub receipts_processed: u64,
    /// Cursor after the last page; the next scan would start here
    pub next_block: u64,
    pub outcomes: OutcomeCounts,
}

/// Page through `source` from `from_block` until the cursor reaches `height`,
/// folding every receipt into `ledger`.
///
/// The target height is read from the snapshot on every iteration but never
/// re-queried. Any source or ledger error aborts the scan; pages already
/// applied stay in the ledger.
pub async fn run_scan<S, D>(
    source: &S,
    height: &mut ChainHeight,
    classifier: &Classifier,
    ledger: &mut AssetLedger<D>,
    from_block: u64,
) -> Result<ScanStats, ScanError>
where
    S: EventSource + ?Sized,
    D: AssetIdDerivation,
{
    let started = Instant::now();
    let mut stats = ScanStats {
        next_block: from_block,
        ..Default::default()
    };
    let mut cursor = from_block;

    log::info!("🔎 Scanning asset receipts from block {}", cursor);

    while cursor < height.current()? {
        let response = source
            .get_selected_data(&Query::asset_receipts(cursor))
            .await?;

        stats.batches += 1;
        stats.receipts_processed += response.receipts.len() as u64;
        log::info!(
            "Processed {} asset receipts, up to block {}",
            stats.receipts_processed,
            response.next_block.saturating_sub(1)
        );

        let counts = classifier.classify_batch(ledger, &response.receipts)?;
        stats.outcomes.merge(&counts);

        if response.next_block <= cursor {
            // At the indexer tip with the target still unknown: wait for it
            // instead of re-requesting the same empty page.
            if !height.is_resolved() {
                log::info!("⏸️  No progress past block {}, waiting for chain height", cursor);
            }
            let target = height.wait().await?;
            if cursor < target {
                return Err(ScanError::Stalled {
                    block: cursor,
                    height: target,
                });
            }
            continue;
        }

        cursor = response.next_block;
        stats.next_block = cursor;
    }

    log::info!(
        "✅ Scan finished: {} receipts in {} pages, {} assets tracked ({:.1?})",
        stats.receipts_processed,
        stats.batches,
        ledger.len(),
        started.elapsed()
    );

    Ok(stats)
}
