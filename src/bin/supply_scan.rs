//! Supply Scan - per-asset supply from HyperFuel mint/burn receipts
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin supply_scan
//! ```
//!
//! ## Environment Variables
//!
//! - HYPERFUEL_URL - HyperFuel endpoint (default: https://fuel-testnet.hypersync.xyz)
//! - HYPERFUEL_API_TOKEN - Bearer token (optional)
//! - START_BLOCK - First block to scan (default: 518152)
//! - BURN_EXCLUDED_CONTRACTS - Contracts whose burns are skipped (comma-separated)
//! - AWAIT_HEIGHT - Fetch chain height before scanning instead of in the background (default: false)
//! - HYPERFUEL_TIMEOUT_SECS - Per-request timeout (default: 30)
//! - HYPERFUEL_MAX_RETRIES - Retries per request (default: 5)
//! - RUST_LOG - Logging level (optional, default: info)
//!
//! The summary goes to stdout, logs to stderr.

use std::{sync::Arc, time::Instant};
use supplyflow::{
    run_scan, write_report, AssetLedger, ChainHeight, Classifier, HyperfuelClient, ScanConfig,
    ScanError,
};

#[tokio::main]
async fn main() -> Result<(), ScanError> {
    dotenv::dotenv().ok();

    let config = ScanConfig::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.rust_log))
        .target(env_logger::Target::Stderr)
        .init();

    let started = Instant::now();

    log::info!("🚀 Starting supply scan");
    log::info!("   HyperFuel: {}", config.hyperfuel_url);
    log::info!("   Start block: {}", config.start_block);
    if config.burn_exclusions.is_empty() {
        log::info!("   Burn exclusions: none");
    }
    log::info!(
        "   Height: {}",
        if config.await_height { "fetched up front" } else { "background" }
    );
    if cfg!(feature = "transfers") {
        log::warn!("⚠️  Transfer accounting enabled; sender attribution is not reliable");
    }

    let client = Arc::new(HyperfuelClient::new(
        &config.hyperfuel_url,
        config.api_token.clone(),
        config.request_timeout,
        config.max_retries,
    )?);

    let mut height = if config.await_height {
        ChainHeight::fetch(client.as_ref()).await?
    } else {
        ChainHeight::spawn(client.clone())
    };

    let classifier = Classifier::new(config.burn_exclusions.clone());
    let mut ledger = AssetLedger::new();

    log::info!("📡 Running the query...");
    let stats = run_scan(
        client.as_ref(),
        &mut height,
        &classifier,
        &mut ledger,
        config.start_block,
    )
    .await?;

    log::info!(
        "📊 Outcomes: {} mints, {} burns, {} excluded burns, {} transfers skipped",
        stats.outcomes.minted,
        stats.outcomes.burned,
        stats.outcomes.burn_excluded,
        stats.outcomes.transfer_unsupported
    );
    #[cfg(feature = "transfers")]
    log::info!(
        "📊 Transfers: {} applied, {} for untracked assets",
        stats.outcomes.transferred,
        stats.outcomes.unknown_asset
    );

    write_report(&ledger, &mut std::io::stdout().lock())?;

    log::info!("✅ Done in {:.1?}", started.elapsed());

    Ok(())
}
