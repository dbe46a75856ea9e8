//! Transaction envelope handed from the launcher to the wallet.

use crate::error::{LaunchError, LaunchResult};
use solana_sdk::hash::Hash;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use solana_sdk::transaction::Transaction;

/// An ordered instruction list compiled into a single atomic transaction,
/// with the fee payer and freshness token fixed and co-signers already applied.
#[derive(Debug, Clone)]
pub struct TransactionEnvelope {
    instructions: Vec<Instruction>,
    fee_payer: Pubkey,
    recent_blockhash: Hash,
    transaction: Transaction,
}

impl TransactionEnvelope {
    /// Compile `instructions` and partially sign with `co_signers`.
    /// The fee payer signature is left for the wallet.
    pub fn new(
        instructions: Vec<Instruction>,
        fee_payer: Pubkey,
        recent_blockhash: Hash,
        co_signers: &[&Keypair],
    ) -> LaunchResult<Self> {
        let message = Message::new(&instructions, Some(&fee_payer));
        let mut transaction = Transaction::new_unsigned(message);
        transaction
            .try_partial_sign(co_signers, recent_blockhash)
            .map_err(|e| LaunchError::SubmissionRejected {
                source: anyhow::Error::new(e).context("Failed to co-sign transaction"),
            })?;

        Ok(Self {
            instructions,
            fee_payer,
            recent_blockhash,
            transaction,
        })
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn fee_payer(&self) -> Pubkey {
        self.fee_payer
    }

    pub fn recent_blockhash(&self) -> Hash {
        self.recent_blockhash
    }

    /// The partially signed transaction.
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn into_transaction(self) -> Transaction {
        self.transaction
    }

    /// Whether `signer` has already produced a signature on the transaction.
    pub fn is_signed_by(&self, signer: &Pubkey) -> bool {
        let keys = &self.transaction.message.account_keys;
        let required = self.transaction.message.header.num_required_signatures as usize;
        keys.iter()
            .take(required)
            .position(|key| key == signer)
            .and_then(|index| self.transaction.signatures.get(index))
            .map(|signature| *signature != Default::default())
            .unwrap_or(false)
    }
}
