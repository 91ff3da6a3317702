//! Scan configuration from environment variables
//!
//! `.env` is loaded by the binary before this runs.

use {
    crate::{
        classifier::BurnExclusions,
        driver::DEFAULT_START_BLOCK,
        ledger::ContractId,
    },
    std::{env, str::FromStr, time::Duration},
};

pub const DEFAULT_HYPERFUEL_URL: &str = "https://fuel-testnet.hypersync.xyz";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub hyperfuel_url: String,
    pub api_token: Option<String>,
    pub start_block: u64,
    pub burn_exclusions: BurnExclusions,
    /// Resolve the chain height before paging instead of in the background
    pub await_height: bool,
    pub request_timeout: Duration,
    pub max_retries: u32,
    pub rust_log: String,
}

impl ScanConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `HYPERFUEL_URL` (default: https://fuel-testnet.hypersync.xyz)
    /// - `HYPERFUEL_API_TOKEN` (optional bearer token)
    /// - `START_BLOCK` (default: 518152)
    /// - `BURN_EXCLUDED_CONTRACTS` (comma-separated contract ids; empty string disables)
    /// - `AWAIT_HEIGHT` (default: false)
    /// - `HYPERFUEL_TIMEOUT_SECS` (default: 30)
    /// - `HYPERFUEL_MAX_RETRIES` (default: 5)
    /// - `RUST_LOG` (default: info)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ScanConfig::from_env`] with an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let hyperfuel_url = lookup("HYPERFUEL_URL")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_HYPERFUEL_URL.to_string());

        if !hyperfuel_url.starts_with("http://") && !hyperfuel_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "HYPERFUEL_URL must start with http:// or https://".to_string(),
            ));
        }

        let api_token = lookup("HYPERFUEL_API_TOKEN").filter(|t| !t.trim().is_empty());

        let burn_exclusions = match lookup("BURN_EXCLUDED_CONTRACTS") {
            Some(list) => parse_contract_list(&list)?,
            None => BurnExclusions::default(),
        };

        Ok(Self {
            hyperfuel_url,
            api_token,
            start_block: parse_or(&lookup, "START_BLOCK", DEFAULT_START_BLOCK)?,
            burn_exclusions,
            await_height: parse_or(&lookup, "AWAIT_HEIGHT", false)?,
            request_timeout: Duration::from_secs(parse_or(&lookup, "HYPERFUEL_TIMEOUT_SECS", 30)?),
            max_retries: parse_or(&lookup, "HYPERFUEL_MAX_RETRIES", 5)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .to_lowercase()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(format!("{} has invalid value '{}'", key, raw))),
        None => Ok(default),
    }
}

fn parse_contract_list(list: &str) -> Result<BurnExclusions, ConfigError> {
    list.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<ContractId>().map_err(|e| {
                ConfigError::InvalidValue(format!("BURN_EXCLUDED_CONTRACTS entry '{}': {}", id, e))
            })
        })
        .collect()
}
