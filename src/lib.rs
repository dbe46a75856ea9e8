//! pumpfun-launcher - pump.fun token creation for agent tool frameworks
//!
//! This crate builds and submits the full pump.fun launch transaction: vanity
//! mint search, derived metadata/pool/curve accounts, mint initialization,
//! supply distribution and initial liquidity, behind wallet and chain
//! connection interfaces.

pub mod client;
pub mod config;
pub mod error;
pub mod plugin;
pub mod token;
pub mod types;

// Re-export main types for convenience
pub use client::{ChainConnection, WalletClient};
pub use config::{LaunchConfig, LaunchConfigBuilder, MetadataFormat};
pub use error::{LaunchError, LaunchResult};
pub use token::{CancelFlag, TokenLauncher, TransactionEnvelope};
pub use types::{CreateTokenParams, CreateTokenResult, TokenDistribution};
