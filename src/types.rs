//! Core types and protocol constants for pump.fun token launches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;

/// pump.fun bonding curve program.
pub const PUMP_FUN_PROGRAM_ID: Pubkey = pubkey!("6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P");
/// Metaplex token metadata program.
pub const TOKEN_METADATA_PROGRAM_ID: Pubkey = pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");
/// SPL token program.
pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
/// SPL associated token account program.
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

/// pump.fun tokens always use 6 decimals.
pub const TOKEN_DECIMALS: u8 = 6;

/// Size in bytes of an SPL mint account.
pub const MINT_ACCOUNT_SIZE: usize = 82;

/// Suffix every pump.fun mint address carries.
pub const PUMP_SUFFIX: &str = "pump";

/// Total supply in whole tokens.
pub const TOTAL_SUPPLY: u64 = 1_000_000_000;

/// Split of the minted supply between the liquidity pool and the bonding curve,
/// expressed in base units (whole tokens scaled by `10^TOKEN_DECIMALS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDistribution {
    /// Base units minted into the liquidity pool account
    pub liquidity_pool: u64,
    /// Base units minted into the bonding curve account
    pub bonding_curve: u64,
    /// Total base units issued
    pub total: u64,
}

impl TokenDistribution {
    /// The fixed pump.fun distribution: 965,387,096.774194 tokens to the pool
    /// and 34,612,903.225806 tokens to the curve.
    pub const PUMP: TokenDistribution = TokenDistribution {
        liquidity_pool: 965_387_096_774_194,
        bonding_curve: 34_612_903_225_806,
        total: TOTAL_SUPPLY * 10u64.pow(TOKEN_DECIMALS as u32),
    };

    /// Whether both shares add up to exactly the total supply.
    pub const fn is_balanced(&self) -> bool {
        match self.liquidity_pool.checked_add(self.bonding_curve) {
            Some(sum) => sum == self.total,
            None => false,
        }
    }

    /// Total supply in whole tokens.
    pub fn total_whole_tokens(&self) -> u64 {
        self.total / 10u64.pow(TOKEN_DECIMALS as u32)
    }
}

const _: () = assert!(TokenDistribution::PUMP.is_balanced());

impl Default for TokenDistribution {
    fn default() -> Self {
        Self::PUMP
    }
}

/// Parameters for a single token creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTokenParams {
    /// Token name written to the metadata record
    pub name: String,
    /// Token ticker symbol
    pub symbol: String,
    /// URI of the off-chain metadata JSON (usually IPFS or Arweave)
    pub uri: String,
    /// SOL deposited into the bonding curve, in lamports
    pub initial_liquidity_lamports: u64,
}

impl CreateTokenParams {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        uri: impl Into<String>,
        initial_liquidity_lamports: u64,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            uri: uri.into(),
            initial_liquidity_lamports,
        }
    }
}

/// Everything the caller needs to know about a freshly launched token.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTokenResult {
    /// The new mint, ending in `pump`
    #[serde(serialize_with = "serialize_pubkey")]
    pub mint_address: Pubkey,
    #[serde(serialize_with = "serialize_pubkey")]
    pub bonding_curve_address: Pubkey,
    #[serde(serialize_with = "serialize_pubkey")]
    pub liquidity_pool_address: Pubkey,
    #[serde(serialize_with = "serialize_pubkey")]
    pub metadata_address: Pubkey,
    /// Signature returned by the wallet on submission
    pub confirmation_handle: String,
    pub decimals: u8,
    /// Total supply in whole tokens
    pub total_supply: u64,
    pub initial_liquidity_lamports: u64,
    pub created_at: DateTime<Utc>,
}

fn serialize_pubkey<S: Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(key)
}

/// Convert a SOL amount to lamports, rounding to the nearest lamport.
pub fn sol_to_lamports(sol: f64) -> u64 {
    (sol * LAMPORTS_PER_SOL as f64).round() as u64
}

/// Convert lamports to SOL for display.
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}
