//! Error types for token launches.
//!
//! Validation failures are raised before any collaborator is touched.
//! Collaborator failures keep their source error and name the step that failed.

use thiserror::Error;

/// Errors returned by the token launcher.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// Name, symbol, URI, liquidity or configuration failed validation.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The vanity mint search hit its attempt cap without a match.
    #[error("no mint keypair ending in the vanity suffix after {attempts} attempts")]
    KeySearchExhausted { attempts: u64 },

    /// The caller cancelled the launch before submission.
    #[error("launch cancelled after {attempts} mint search attempts")]
    Cancelled { attempts: u64 },

    /// No bump seed produced an off-curve program address.
    #[error("could not derive {account} address")]
    DerivationExhausted { account: &'static str },

    /// A read from the chain connection failed.
    #[error("chain query failed during {step}: {source}")]
    ChainQueryFailed {
        step: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// The wallet or network rejected the assembled transaction.
    #[error("transaction submission rejected: {source}")]
    SubmissionRejected {
        #[source]
        source: anyhow::Error,
    },

    /// The payer cannot cover liquidity, rent and fees.
    #[error("insufficient balance: need {required} lamports, wallet holds {available}")]
    InsufficientBalance { required: u64, available: u64 },
}

impl LaunchError {
    pub(crate) fn chain_query(step: &'static str, source: anyhow::Error) -> Self {
        LaunchError::ChainQueryFailed { step, source }
    }

    /// Whether the error was raised before any collaborator call.
    pub fn is_validation(&self) -> bool {
        matches!(self, LaunchError::InvalidParameters(_))
    }
}

pub type LaunchResult<T> = Result<T, LaunchError>;
