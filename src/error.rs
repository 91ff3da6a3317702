use crate::{config::ConfigError, ledger::LedgerError, report::ReportError, source::SourceError};

/// Everything that can abort a scan
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("cursor stuck at block {block} below chain height {height}")]
    Stalled { block: u64, height: u64 },
}
