//! [`ChainConnection`] backed by the Solana nonblocking RPC client.
//!
//! Read-only queries are rate limited and retried with exponential backoff.
//! Rent-exemption minimums are cached per account size.

use super::ChainConnection;
use crate::config::LaunchConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use moka::future::Cache;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, Retry};
use tracing::{debug, instrument};

pub struct RpcConnection {
    rpc: Arc<RpcClient>,
    limiter: DefaultDirectRateLimiter,
    rent_cache: Cache<usize, u64>,
    retry_attempts: usize,
}

impl RpcConnection {
    /// Wrap an existing RPC client.
    pub fn new(rpc: Arc<RpcClient>, config: &LaunchConfig) -> Self {
        let per_second = NonZeroU32::new(config.rate_limit_requests_per_second)
            .unwrap_or(NonZeroU32::MIN);
        let rent_cache = Cache::builder()
            .max_capacity(64)
            .time_to_live(Duration::from_secs(config.rent_cache_ttl_seconds))
            .build();

        Self {
            rpc,
            limiter: RateLimiter::direct(Quota::per_second(per_second)),
            rent_cache,
            retry_attempts: config.rpc_retry_attempts,
        }
    }

    /// Build a client for `config.rpc_url` with the configured timeout.
    pub fn from_config(config: &LaunchConfig) -> Self {
        let rpc = Arc::new(RpcClient::new_with_timeout(
            config.rpc_url.clone(),
            Duration::from_secs(config.rpc_timeout_seconds),
        ));
        Self::new(rpc, config)
    }

    /// The underlying RPC client, shared with the wallet.
    pub fn rpc_client(&self) -> Arc<RpcClient> {
        self.rpc.clone()
    }

    fn retry_strategy(&self) -> impl Iterator<Item = Duration> {
        ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(5))
            .take(self.retry_attempts)
    }
}

#[async_trait]
impl ChainConnection for RpcConnection {
    #[instrument(skip(self))]
    async fn minimum_rent_exempt_balance(&self, data_len: usize) -> Result<u64> {
        if let Some(lamports) = self.rent_cache.get(&data_len).await {
            debug!("Rent exemption for {} bytes served from cache: {}", data_len, lamports);
            return Ok(lamports);
        }

        let lamports = Retry::start(self.retry_strategy(), || async move {
            self.limiter.until_ready().await;
            self.rpc
                .get_minimum_balance_for_rent_exemption(data_len)
                .await
                .context("Failed to fetch rent exemption minimum")
        })
        .await?;

        self.rent_cache.insert(data_len, lamports).await;
        debug!("Rent exemption for {} bytes: {} lamports", data_len, lamports);
        Ok(lamports)
    }

    #[instrument(skip(self))]
    async fn latest_blockhash(&self) -> Result<Hash> {
        Retry::start(self.retry_strategy(), || async move {
            self.limiter.until_ready().await;
            self.rpc
                .get_latest_blockhash()
                .await
                .context("Failed to fetch latest blockhash")
        })
        .await
    }

    #[instrument(skip(self, address), fields(address = %address))]
    async fn get_account_info(&self, address: &Pubkey) -> Result<Option<Vec<u8>>> {
        let response = Retry::start(self.retry_strategy(), || async move {
            self.limiter.until_ready().await;
            self.rpc
                .get_account_with_commitment(address, self.rpc.commitment())
                .await
                .context("Failed to fetch account")
        })
        .await?;

        Ok(response.value.map(|account| account.data))
    }
}
