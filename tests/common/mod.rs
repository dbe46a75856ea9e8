//! Mock wallet and chain connection shared by the integration tests.

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use pumpfun_launcher::{
    ChainConnection, LaunchConfig, LaunchConfigBuilder, TransactionEnvelope, WalletClient,
};
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

pub const MOCK_TX_HASH: &str = "mock-tx-hash";
pub const MOCK_MINT_RENT: u64 = 1_461_600;

pub struct MockWallet {
    pub address: Pubkey,
    pub balance: u64,
    pub reject: bool,
    pub sent: Mutex<Vec<TransactionEnvelope>>,
    pub balance_calls: AtomicUsize,
}

impl MockWallet {
    pub fn new() -> Self {
        Self {
            address: Pubkey::new_unique(),
            balance: 10_000_000_000,
            reject: false,
            sent: Mutex::new(Vec::new()),
            balance_calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::new()
        }
    }

    pub fn with_balance(balance: u64) -> Self {
        Self {
            balance,
            ..Self::new()
        }
    }

    pub async fn send_calls(&self) -> usize {
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl WalletClient for MockWallet {
    fn address(&self) -> Pubkey {
        self.address
    }

    async fn balance(&self) -> Result<u64> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.balance)
    }

    async fn send_transaction(&self, envelope: TransactionEnvelope) -> Result<String> {
        self.sent.lock().await.push(envelope);
        if self.reject {
            return Err(anyhow!("Transaction simulation failed: insufficient lamports"));
        }
        Ok(MOCK_TX_HASH.to_string())
    }
}

pub struct MockConnection {
    pub fail_rent: bool,
    pub fail_blockhash: bool,
    pub existing_accounts: Mutex<HashSet<Pubkey>>,
    pub rent_calls: AtomicUsize,
    pub blockhash_calls: AtomicUsize,
    pub account_calls: AtomicUsize,
}

impl MockConnection {
    pub fn new() -> Self {
        Self {
            fail_rent: false,
            fail_blockhash: false,
            existing_accounts: Mutex::new(HashSet::new()),
            rent_calls: AtomicUsize::new(0),
            blockhash_calls: AtomicUsize::new(0),
            account_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_rent() -> Self {
        Self {
            fail_rent: true,
            ..Self::new()
        }
    }

    pub fn failing_blockhash() -> Self {
        Self {
            fail_blockhash: true,
            ..Self::new()
        }
    }

    pub fn total_calls(&self) -> usize {
        self.rent_calls.load(Ordering::SeqCst)
            + self.blockhash_calls.load(Ordering::SeqCst)
            + self.account_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainConnection for MockConnection {
    async fn minimum_rent_exempt_balance(&self, _data_len: usize) -> Result<u64> {
        self.rent_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_rent {
            return Err(anyhow!("connection refused"));
        }
        Ok(MOCK_MINT_RENT)
    }

    async fn latest_blockhash(&self) -> Result<Hash> {
        self.blockhash_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_blockhash {
            return Err(anyhow!("request timed out"));
        }
        Ok(Hash::new_unique())
    }

    async fn get_account_info(&self, address: &Pubkey) -> Result<Option<Vec<u8>>> {
        self.account_calls.fetch_add(1, Ordering::SeqCst);
        let existing = self.existing_accounts.lock().await;
        Ok(existing.contains(address).then(|| vec![0u8; 8]))
    }
}

/// Config with a one-character suffix so the mint search finishes quickly.
pub fn fast_config() -> LaunchConfig {
    LaunchConfigBuilder::new()
        .with_vanity_search("p", 1_000_000)
        .build()
}
