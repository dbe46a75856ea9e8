//! Instruction assembly for a pump.fun launch.
//!
//! The order of [`LaunchStep::ORDER`] is load-bearing: every account an
//! instruction touches is created by an earlier instruction in the same
//! transaction.

use crate::config::MetadataFormat;
use crate::error::LaunchResult;
use crate::token::metadata::{encode_create_metadata, DataV2};
use crate::token::pda::LaunchAccounts;
use crate::types::{
    TokenDistribution, ASSOCIATED_TOKEN_PROGRAM_ID, MINT_ACCOUNT_SIZE, TOKEN_DECIMALS,
    TOKEN_METADATA_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::sysvar;
use solana_system_interface::instruction as system_instruction;
use solana_system_interface::program as system_program;

/// SPL token `InitializeMint` tag.
pub const INITIALIZE_MINT_TAG: u8 = 0;
/// SPL token `MintTo` tag.
pub const MINT_TO_TAG: u8 = 7;

/// One step of the launch transaction, in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStep {
    CreateMintAccount,
    InitializeMint,
    CreateMetadata,
    CreateLiquidityPoolAccount,
    CreateBondingCurveAccount,
    MintToLiquidityPool,
    MintToBondingCurve,
    TransferInitialLiquidity,
}

impl LaunchStep {
    pub const ORDER: [LaunchStep; 8] = [
        LaunchStep::CreateMintAccount,
        LaunchStep::InitializeMint,
        LaunchStep::CreateMetadata,
        LaunchStep::CreateLiquidityPoolAccount,
        LaunchStep::CreateBondingCurveAccount,
        LaunchStep::MintToLiquidityPool,
        LaunchStep::MintToBondingCurve,
        LaunchStep::TransferInitialLiquidity,
    ];

    /// Position of this step in the transaction.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Inputs needed to assemble the launch instructions.
#[derive(Debug, Clone)]
pub struct LaunchPlan<'a> {
    pub payer: Pubkey,
    pub mint: Pubkey,
    pub accounts: LaunchAccounts,
    pub mint_rent_lamports: u64,
    pub distribution: TokenDistribution,
    pub initial_liquidity_lamports: u64,
    pub name: &'a str,
    pub symbol: &'a str,
    pub uri: &'a str,
    pub metadata_format: MetadataFormat,
}

/// Allocate the mint account, owned by the token program.
pub fn create_mint_account(payer: &Pubkey, mint: &Pubkey, rent_lamports: u64) -> Instruction {
    system_instruction::create_account(
        payer,
        mint,
        rent_lamports,
        MINT_ACCOUNT_SIZE as u64,
        &TOKEN_PROGRAM_ID,
    )
}

/// Initialize the mint with `TOKEN_DECIMALS`, `authority` as mint authority and no freeze authority.
pub fn initialize_mint(mint: &Pubkey, authority: &Pubkey) -> Instruction {
    let mut data = Vec::with_capacity(35);
    data.push(INITIALIZE_MINT_TAG);
    data.push(TOKEN_DECIMALS);
    data.extend_from_slice(authority.as_ref());
    // freeze authority: None
    data.push(0);

    Instruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*mint, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
            AccountMeta::new_readonly(*authority, true),
        ],
        data,
    }
}

pub fn create_metadata(
    metadata: &Pubkey,
    mint: &Pubkey,
    payer: &Pubkey,
    data: &DataV2,
    format: MetadataFormat,
) -> LaunchResult<Instruction> {
    Ok(Instruction {
        program_id: TOKEN_METADATA_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*metadata, false),
            AccountMeta::new_readonly(*mint, true),
            // mint authority
            AccountMeta::new_readonly(*payer, true),
            // payer
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
            AccountMeta::new_readonly(TOKEN_METADATA_PROGRAM_ID, false),
        ],
        data: encode_create_metadata(data, format)?,
    })
}

/// Create a token account for `mint` at a derived address.
pub fn create_associated_account(payer: &Pubkey, account: &Pubkey, mint: &Pubkey) -> Instruction {
    Instruction {
        program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(*account, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(sysvar::rent::ID, false),
        ],
        data: Vec::new(),
    }
}

/// Mint `amount` base units into `destination`.
pub fn mint_to(mint: &Pubkey, destination: &Pubkey, authority: &Pubkey, amount: u64) -> Instruction {
    let mut data = Vec::with_capacity(9);
    data.push(MINT_TO_TAG);
    data.extend_from_slice(&amount.to_le_bytes());

    Instruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*mint, false),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(*authority, true),
        ],
        data,
    }
}

/// Assemble every launch instruction in [`LaunchStep::ORDER`].
pub fn build_launch_instructions(plan: &LaunchPlan<'_>) -> LaunchResult<Vec<Instruction>> {
    let LaunchPlan { payer, mint, accounts, .. } = plan;
    let metadata = DataV2::fungible(plan.name, plan.symbol, plan.uri);

    let mut instructions = Vec::with_capacity(LaunchStep::ORDER.len());
    for step in LaunchStep::ORDER {
        let ix = match step {
            LaunchStep::CreateMintAccount => create_mint_account(payer, mint, plan.mint_rent_lamports),
            LaunchStep::InitializeMint => initialize_mint(mint, payer),
            LaunchStep::CreateMetadata => create_metadata(
                &accounts.metadata.address,
                mint,
                payer,
                &metadata,
                plan.metadata_format,
            )?,
            LaunchStep::CreateLiquidityPoolAccount => {
                create_associated_account(payer, &accounts.liquidity_pool.address, mint)
            }
            LaunchStep::CreateBondingCurveAccount => {
                create_associated_account(payer, &accounts.bonding_curve.address, mint)
            }
            LaunchStep::MintToLiquidityPool => mint_to(
                mint,
                &accounts.liquidity_pool.address,
                payer,
                plan.distribution.liquidity_pool,
            ),
            LaunchStep::MintToBondingCurve => mint_to(
                mint,
                &accounts.bonding_curve.address,
                payer,
                plan.distribution.bonding_curve,
            ),
            LaunchStep::TransferInitialLiquidity => system_instruction::transfer(
                payer,
                &accounts.bonding_curve.address,
                plan.initial_liquidity_lamports,
            ),
        };
        instructions.push(ix);
    }

    Ok(instructions)
}
