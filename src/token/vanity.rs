//! Vanity mint keypair search.
//!
//! Keypairs are generated at random until the base58 address ends with the
//! configured suffix, compared case-insensitively. The search is bounded by an
//! attempt cap and can be cancelled from another task.

use crate::error::{LaunchError, LaunchResult};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use std::sync::atomic::{AtomicBool, Ordering};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Shared flag used to abort a running launch.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A freshly generated mint keypair whose address carries the vanity suffix.
///
/// Not `Clone`, and the secret never leaves the crate: it co-signs one launch.
pub struct MintIdentity {
    keypair: Keypair,
    attempts: u64,
}

impl MintIdentity {
    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    pub(crate) fn keypair(&self) -> &Keypair {
        &self.keypair
    }

    /// Number of keypairs generated to find this one.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }
}

impl fmt::Debug for MintIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MintIdentity")
            .field("pubkey", &self.pubkey())
            .field("attempts", &self.attempts)
            .finish_non_exhaustive()
    }
}

/// Cancels the blocking search if the future awaiting it is dropped.
struct CancelOnDrop {
    cancel: CancelFlag,
    armed: bool,
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        if self.armed {
            self.cancel.cancel();
        }
    }
}

#[derive(Debug, Clone)]
pub struct VanitySearch {
    suffix: String,
    max_attempts: u64,
}

impl VanitySearch {
    pub fn new(suffix: impl Into<String>, max_attempts: u64) -> Self {
        Self {
            suffix: suffix.into().to_ascii_lowercase(),
            max_attempts,
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Whether `address` ends with the suffix, ignoring case.
    pub fn matches(&self, address: &Pubkey) -> bool {
        let encoded = address.to_string();
        encoded.len() >= self.suffix.len()
            && encoded[encoded.len() - self.suffix.len()..].eq_ignore_ascii_case(&self.suffix)
    }

    /// Run the search on the current thread.
    pub fn search_blocking(&self, cancel: &CancelFlag) -> LaunchResult<MintIdentity> {
        let started = Instant::now();
        let mut attempts = 0u64;

        while attempts < self.max_attempts {
            if cancel.is_cancelled() {
                debug!("Vanity search cancelled after {} attempts", attempts);
                return Err(LaunchError::Cancelled { attempts });
            }

            attempts += 1;
            let keypair = Keypair::new();
            if self.matches(&keypair.pubkey()) {
                info!(
                    "Found mint {} after {} attempts in {:?}",
                    keypair.pubkey(),
                    attempts,
                    started.elapsed()
                );
                return Ok(MintIdentity { keypair, attempts });
            }
        }

        Err(LaunchError::KeySearchExhausted { attempts })
    }

    /// Run the search on the blocking thread pool so the async runtime stays responsive.
    ///
    /// Dropping the returned future cancels `cancel`, which stops the blocking
    /// thread at its next attempt.
    #[instrument(skip(self, cancel), fields(suffix = %self.suffix))]
    pub async fn search(&self, cancel: CancelFlag) -> LaunchResult<MintIdentity> {
        let search = self.clone();
        let task_cancel = cancel.clone();
        let mut guard = CancelOnDrop {
            cancel: cancel.clone(),
            armed: true,
        };

        let joined = tokio::task::spawn_blocking(move || search.search_blocking(&task_cancel)).await;
        guard.armed = false;

        match joined {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            // The runtime is shutting down; treat it like a cancellation.
            Err(_) => {
                cancel.cancel();
                Err(LaunchError::Cancelled { attempts: 0 })
            }
        }
    }
}
