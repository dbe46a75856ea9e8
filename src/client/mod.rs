//! Collaborator interfaces consumed by the token launcher.
//!
//! The launcher never talks to the network directly. It reads chain state
//! through a [`ChainConnection`] and hands the assembled transaction to a
//! [`WalletClient`] for final signing and submission.

pub mod keypair_wallet;
pub mod rpc;

use crate::token::TransactionEnvelope;
use anyhow::Result;
use async_trait::async_trait;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;

pub use keypair_wallet::KeypairWallet;
pub use rpc::RpcConnection;

/// A wallet able to sign and submit transactions on behalf of its address.
#[async_trait]
pub trait WalletClient: Send + Sync {
    /// Address that pays fees and acts as mint authority.
    fn address(&self) -> Pubkey;

    /// Native balance of the wallet, in lamports.
    async fn balance(&self) -> Result<u64>;

    /// Add the wallet signature to the envelope and submit it.
    /// Returns the confirmation handle (transaction signature).
    async fn send_transaction(&self, envelope: TransactionEnvelope) -> Result<String>;
}

/// Read-only access to chain state.
#[async_trait]
pub trait ChainConnection: Send + Sync {
    /// Minimum lamports for an account of `data_len` bytes to be rent exempt.
    async fn minimum_rent_exempt_balance(&self, data_len: usize) -> Result<u64>;

    /// Most recent blockhash, used as the transaction freshness token.
    async fn latest_blockhash(&self) -> Result<Hash>;

    /// Raw account data, or `None` if the account does not exist.
    async fn get_account_info(&self, address: &Pubkey) -> Result<Option<Vec<u8>>>;
}
