//! Wallet backed by a local keypair that submits through an RPC client.

use super::WalletClient;
use crate::token::TransactionEnvelope;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use std::sync::Arc;
use tracing::{info, instrument};

pub struct KeypairWallet {
    keypair: Keypair,
    rpc: Arc<RpcClient>,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair, rpc: Arc<RpcClient>) -> Self {
        Self { keypair, rpc }
    }
}

#[async_trait]
impl WalletClient for KeypairWallet {
    fn address(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn balance(&self) -> Result<u64> {
        self.rpc
            .get_balance(&self.keypair.pubkey())
            .await
            .context("Failed to fetch wallet balance")
    }

    #[instrument(skip(self, envelope), fields(payer = %self.keypair.pubkey()))]
    async fn send_transaction(&self, envelope: TransactionEnvelope) -> Result<String> {
        let recent_blockhash = envelope.recent_blockhash();
        let mut transaction = envelope.into_transaction();

        transaction
            .try_partial_sign(&[&self.keypair][..], recent_blockhash)
            .context("Failed to sign transaction with wallet keypair")?;

        if !transaction.is_signed() {
            return Err(anyhow!("Transaction is missing required signatures"));
        }

        let signature = self
            .rpc
            .send_and_confirm_transaction(&transaction)
            .await
            .context("Failed to send transaction")?;

        info!("Transaction confirmed: {}", signature);
        Ok(signature.to_string())
    }
}
