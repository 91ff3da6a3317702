use {
    crate::ledger::{AssetId, AssetIdDerivation, AssetLedger},
    std::io::{self, Write},
};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("minting index lists asset {0} but the ledger has no entry for it")]
    MissingAsset(AssetId),

    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

/// Write the supply summary grouped by minting contract, in discovery order
pub fn write_report<D, W>(ledger: &AssetLedger<D>, out: &mut W) -> Result<(), ReportError>
where
    D: AssetIdDerivation,
    W: Write,
{
    let index = ledger.minting_index();

    for (contract, asset_ids) in index.iter() {
        writeln!(out, "Minting contract {}", contract)?;

        for asset_id in asset_ids {
            let asset = ledger
                .asset(asset_id)
                .ok_or(ReportError::MissingAsset(*asset_id))?;
            writeln!(
                out,
                "  sub_id {}  asset {}  supply {}",
                asset.sub_id, asset_id, asset.supply
            )?;
        }
    }

    writeln!(
        out,
        "{} assets across {} minting contracts",
        index.asset_count(),
        index.contract_count()
    )?;
    out.flush()?;

    Ok(())
}

pub fn render_report<D: AssetIdDerivation>(ledger: &AssetLedger<D>) -> Result<String, ReportError> {
    let mut buf = Vec::new();
    write_report(ledger, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
