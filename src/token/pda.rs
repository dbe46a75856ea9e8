//! Program-derived addresses for a pump.fun launch.

use crate::error::{LaunchError, LaunchResult};
use crate::types::{PUMP_FUN_PROGRAM_ID, TOKEN_METADATA_PROGRAM_ID};
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

pub const METADATA_SEED: &[u8] = b"metadata";
pub const LIQUIDITY_POOL_SEED: &[u8] = b"liquidity_pool";
pub const BONDING_CURVE_SEED: &[u8] = b"bonding_curve";

/// An off-curve address together with the bump seed that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedAccount {
    pub address: Pubkey,
    pub bump: u8,
}

/// The three accounts a launch derives from its mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchAccounts {
    pub metadata: DerivedAccount,
    pub liquidity_pool: DerivedAccount,
    pub bonding_curve: DerivedAccount,
}

/// Search the bump space for a valid program address.
pub fn derive(
    account: &'static str,
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> LaunchResult<DerivedAccount> {
    let (address, bump) = Pubkey::try_find_program_address(seeds, program_id)
        .ok_or(LaunchError::DerivationExhausted { account })?;
    debug!("Derived {} account {} (bump {})", account, address, bump);
    Ok(DerivedAccount { address, bump })
}

/// `["metadata", metadata_program, mint]` under the metadata program.
pub fn derive_metadata_account(mint: &Pubkey) -> LaunchResult<DerivedAccount> {
    derive(
        "metadata",
        &[METADATA_SEED, TOKEN_METADATA_PROGRAM_ID.as_ref(), mint.as_ref()],
        &TOKEN_METADATA_PROGRAM_ID,
    )
}

/// `["liquidity_pool", mint]` under the pump.fun program.
pub fn derive_liquidity_pool_account(mint: &Pubkey) -> LaunchResult<DerivedAccount> {
    derive(
        "liquidity pool",
        &[LIQUIDITY_POOL_SEED, mint.as_ref()],
        &PUMP_FUN_PROGRAM_ID,
    )
}

/// `["bonding_curve", mint]` under the pump.fun program.
pub fn derive_bonding_curve_account(mint: &Pubkey) -> LaunchResult<DerivedAccount> {
    derive(
        "bonding curve",
        &[BONDING_CURVE_SEED, mint.as_ref()],
        &PUMP_FUN_PROGRAM_ID,
    )
}

pub fn derive_launch_accounts(mint: &Pubkey) -> LaunchResult<LaunchAccounts> {
    Ok(LaunchAccounts {
        metadata: derive_metadata_account(mint)?,
        liquidity_pool: derive_liquidity_pool_account(mint)?,
        bonding_curve: derive_bonding_curve_account(mint)?,
    })
}
