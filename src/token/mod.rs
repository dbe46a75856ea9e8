//! Token mint builder.
//!
//! Searches a vanity mint keypair, derives the metadata, liquidity pool and
//! bonding curve accounts, encodes the launch instructions and submits them
//! as one atomic transaction through the injected collaborators.

pub mod builder;
pub mod envelope;
pub mod instructions;
pub mod metadata;
pub mod pda;
pub mod vanity;

pub use builder::{PreparedLaunch, TokenLauncher};
pub use envelope::TransactionEnvelope;
pub use instructions::LaunchStep;
pub use pda::{DerivedAccount, LaunchAccounts};
pub use vanity::{CancelFlag, MintIdentity, VanitySearch};
