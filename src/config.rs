//! Launcher configuration.

use crate::error::{LaunchError, LaunchResult};
use crate::types::PUMP_SUFFIX;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Layout used for the metadata instruction payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataFormat {
    /// Borsh encoding of the metadata record (length-prefixed strings).
    #[default]
    Borsh,
    /// JSON document behind a u32 length prefix.
    Json,
}

/// Configuration for the token launcher and its RPC collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    /// RPC endpoint
    pub rpc_url: String,
    /// RPC timeout in seconds
    pub rpc_timeout_seconds: u64,
    /// RPC retry attempts for read-only queries
    pub rpc_retry_attempts: usize,
    /// Rate limit for RPC requests per second
    pub rate_limit_requests_per_second: u32,
    /// How long a fetched rent-exemption minimum is reused, in seconds
    pub rent_cache_ttl_seconds: u64,
    /// Case-insensitive suffix the mint address must end with
    pub vanity_suffix: String,
    /// Upper bound on keypairs generated during the vanity search
    pub max_key_search_attempts: u64,
    /// Minimum initial liquidity in lamports
    pub min_initial_liquidity_lamports: u64,
    /// Metadata payload layout
    pub metadata_format: MetadataFormat,
    /// Check the payer balance before building the transaction
    pub preflight_balance_check: bool,
    pub max_name_len: usize,
    pub max_symbol_len: usize,
    pub max_uri_len: usize,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.devnet.solana.com".to_string(),
            rpc_timeout_seconds: 30,
            rpc_retry_attempts: 3,
            rate_limit_requests_per_second: 10,
            rent_cache_ttl_seconds: 300,
            vanity_suffix: PUMP_SUFFIX.to_string(),
            max_key_search_attempts: 50_000_000,
            min_initial_liquidity_lamports: 100_000_000,
            metadata_format: MetadataFormat::Borsh,
            preflight_balance_check: false,
            max_name_len: 32,
            max_symbol_len: 10,
            max_uri_len: 200,
        }
    }
}

impl LaunchConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: LaunchConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Check the configuration for values the launcher cannot work with.
    pub fn validate(&self) -> LaunchResult<()> {
        if self.vanity_suffix.is_empty() {
            return Err(LaunchError::InvalidParameters("vanity suffix must not be empty".to_string()));
        }
        // Base58 has no '0'; every letter has at least one case in the alphabet.
        if let Some(c) = self
            .vanity_suffix
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() || *c == '0')
        {
            return Err(LaunchError::InvalidParameters(format!(
                "vanity suffix contains '{}', which never appears in a base58 address",
                c
            )));
        }
        if self.max_key_search_attempts == 0 {
            return Err(LaunchError::InvalidParameters(
                "max_key_search_attempts must be greater than zero".to_string(),
            ));
        }
        if self.max_name_len == 0 || self.max_symbol_len == 0 || self.max_uri_len == 0 {
            return Err(LaunchError::InvalidParameters("length limits must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Builder for [`LaunchConfig`] starting from the defaults.
pub struct LaunchConfigBuilder {
    config: LaunchConfig,
}

impl LaunchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: LaunchConfig::default(),
        }
    }

    /// Set the RPC endpoint.
    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.config.rpc_url = url.into();
        self
    }

    /// Set the RPC timeout.
    pub fn with_rpc_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.rpc_timeout_seconds = timeout_seconds;
        self
    }

    /// Set retry attempts for read-only RPC queries.
    pub fn with_rpc_retries(mut self, attempts: usize) -> Self {
        self.config.rpc_retry_attempts = attempts;
        self
    }

    /// Set rate limiting.
    pub fn with_rate_limit(mut self, requests_per_second: u32) -> Self {
        self.config.rate_limit_requests_per_second = requests_per_second;
        self
    }

    pub fn with_rent_cache_ttl(mut self, ttl_seconds: u64) -> Self {
        self.config.rent_cache_ttl_seconds = ttl_seconds;
        self
    }

    /// Set the vanity suffix and the attempt cap for the mint search.
    pub fn with_vanity_search(mut self, suffix: impl Into<String>, max_attempts: u64) -> Self {
        self.config.vanity_suffix = suffix.into();
        self.config.max_key_search_attempts = max_attempts;
        self
    }

    /// Set the minimum initial liquidity in lamports.
    pub fn with_min_initial_liquidity(mut self, lamports: u64) -> Self {
        self.config.min_initial_liquidity_lamports = lamports;
        self
    }

    pub fn with_metadata_format(mut self, format: MetadataFormat) -> Self {
        self.config.metadata_format = format;
        self
    }

    pub fn with_preflight_balance_check(mut self, enabled: bool) -> Self {
        self.config.preflight_balance_check = enabled;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> LaunchConfig {
        self.config
    }
}

impl Default for LaunchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
