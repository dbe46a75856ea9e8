//! Token launcher - orchestrates a complete pump.fun token creation.
//!
//! One call owns its mint keypair and transaction envelope. Parameters are
//! validated before any collaborator is touched, collaborator failures are
//! wrapped with the step that failed, and nothing is retried here.

use crate::client::{ChainConnection, WalletClient};
use crate::config::LaunchConfig;
use crate::error::{LaunchError, LaunchResult};
use crate::token::envelope::TransactionEnvelope;
use crate::token::instructions::{build_launch_instructions, LaunchPlan};
use crate::token::pda::{derive_launch_accounts, LaunchAccounts};
use crate::token::vanity::{CancelFlag, MintIdentity, VanitySearch};
use crate::types::{CreateTokenParams, CreateTokenResult, TokenDistribution, MINT_ACCOUNT_SIZE, TOKEN_DECIMALS};
use chrono::Utc;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Lamports kept aside for transaction and account fees in the balance pre-flight.
pub const FEE_MARGIN_LAMPORTS: u64 = 10_000_000;

/// A fully assembled launch that has not been submitted yet.
///
/// The mint secret stays inside; only its address is exposed.
#[derive(Debug)]
pub struct PreparedLaunch {
    mint: MintIdentity,
    pub accounts: LaunchAccounts,
    pub envelope: TransactionEnvelope,
    pub mint_rent_lamports: u64,
}

impl PreparedLaunch {
    pub fn mint_address(&self) -> Pubkey {
        self.mint.pubkey()
    }

    /// Keypairs generated by the vanity search.
    pub fn mint_attempts(&self) -> u64 {
        self.mint.attempts()
    }
}

/// Creates pump.fun tokens through an injected wallet and chain connection.
pub struct TokenLauncher {
    wallet: Arc<dyn WalletClient>,
    connection: Arc<dyn ChainConnection>,
    config: LaunchConfig,
    distribution: TokenDistribution,
}

impl TokenLauncher {
    /// Create a launcher. The configuration is validated once here.
    pub fn new(
        wallet: Arc<dyn WalletClient>,
        connection: Arc<dyn ChainConnection>,
        config: LaunchConfig,
    ) -> LaunchResult<Self> {
        config.validate()?;

        Ok(Self {
            wallet,
            connection,
            config,
            distribution: TokenDistribution::PUMP,
        })
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    pub fn wallet_address(&self) -> Pubkey {
        self.wallet.address()
    }

    /// Validate name, symbol, URI and liquidity against the configured limits.
    pub fn validate_params(&self, params: &CreateTokenParams) -> LaunchResult<()> {
        check_text("name", &params.name, self.config.max_name_len, false)?;
        check_text("symbol", &params.symbol, self.config.max_symbol_len, false)?;
        check_text("uri", &params.uri, self.config.max_uri_len, true)?;

        if params.initial_liquidity_lamports < self.config.min_initial_liquidity_lamports {
            return Err(LaunchError::InvalidParameters(format!(
                "initial liquidity {} lamports is below the minimum of {} lamports",
                params.initial_liquidity_lamports, self.config.min_initial_liquidity_lamports
            )));
        }
        Ok(())
    }

    /// Create a token and submit the launch transaction.
    pub async fn create_token(&self, params: CreateTokenParams) -> LaunchResult<CreateTokenResult> {
        self.create_token_with_cancel(params, CancelFlag::new()).await
    }

    /// Create a token, aborting if `cancel` fires before submission.
    #[instrument(skip(self, params, cancel), fields(symbol = %params.symbol))]
    pub async fn create_token_with_cancel(
        &self,
        params: CreateTokenParams,
        cancel: CancelFlag,
    ) -> LaunchResult<CreateTokenResult> {
        let prepared = self.prepare(&params, cancel.clone()).await?;

        if cancel.is_cancelled() {
            warn!("Launch of {} cancelled before submission", params.symbol);
            return Err(LaunchError::Cancelled {
                attempts: prepared.mint.attempts(),
            });
        }

        let mint_address = prepared.mint.pubkey();
        let accounts = prepared.accounts;
        // Secret half of the mint is dropped here; only the co-signature survives.
        drop(prepared.mint);

        info!("Submitting launch transaction for mint {}", mint_address);
        let confirmation_handle = self
            .wallet
            .send_transaction(prepared.envelope)
            .await
            .map_err(|source| {
                error!("Launch transaction for {} rejected: {:#}", mint_address, source);
                LaunchError::SubmissionRejected { source }
            })?;

        info!(
            "Token {} created: mint={} bonding_curve={} tx={}",
            params.symbol, mint_address, accounts.bonding_curve.address, confirmation_handle
        );

        Ok(CreateTokenResult {
            mint_address,
            bonding_curve_address: accounts.bonding_curve.address,
            liquidity_pool_address: accounts.liquidity_pool.address,
            metadata_address: accounts.metadata.address,
            confirmation_handle,
            decimals: TOKEN_DECIMALS,
            total_supply: self.distribution.total_whole_tokens(),
            initial_liquidity_lamports: params.initial_liquidity_lamports,
            created_at: Utc::now(),
        })
    }

    /// Validate, search the mint, derive accounts, query the chain and build
    /// the co-signed envelope, without submitting it.
    #[instrument(skip(self, params, cancel), fields(symbol = %params.symbol))]
    pub async fn prepare(
        &self,
        params: &CreateTokenParams,
        cancel: CancelFlag,
    ) -> LaunchResult<PreparedLaunch> {
        self.validate_params(params)?;
        let payer = self.wallet.address();

        let search = VanitySearch::new(&self.config.vanity_suffix, self.config.max_key_search_attempts);
        info!("Searching for mint keypair ending in '{}'", search.suffix());
        let mint = search.search(cancel).await?;
        let mint_address = mint.pubkey();

        let accounts = derive_launch_accounts(&mint_address)?;
        debug!(
            "Launch accounts for {}: metadata={} pool={} curve={}",
            mint_address,
            accounts.metadata.address,
            accounts.liquidity_pool.address,
            accounts.bonding_curve.address
        );

        let mint_rent_lamports = self
            .connection
            .minimum_rent_exempt_balance(MINT_ACCOUNT_SIZE)
            .await
            .map_err(|e| {
                warn!("Rent exemption query failed: {:#}", e);
                LaunchError::chain_query("rent exemption", e)
            })?;
        debug!("Mint rent exemption: {} lamports", mint_rent_lamports);

        if self.config.preflight_balance_check {
            self.check_balance(params, mint_rent_lamports).await?;
        }

        let plan = LaunchPlan {
            payer,
            mint: mint_address,
            accounts,
            mint_rent_lamports,
            distribution: self.distribution,
            initial_liquidity_lamports: params.initial_liquidity_lamports,
            name: &params.name,
            symbol: &params.symbol,
            uri: &params.uri,
            metadata_format: self.config.metadata_format,
        };
        let instructions = build_launch_instructions(&plan)?;

        let recent_blockhash = self.connection.latest_blockhash().await.map_err(|e| {
            warn!("Blockhash query failed: {:#}", e);
            LaunchError::chain_query("latest blockhash", e)
        })?;
        debug!("Using blockhash {}", recent_blockhash);

        let envelope =
            TransactionEnvelope::new(instructions, payer, recent_blockhash, &[mint.keypair()])?;

        Ok(PreparedLaunch {
            mint,
            accounts,
            envelope,
            mint_rent_lamports,
        })
    }

    /// Whether the bonding curve account of a launched token exists on chain.
    #[instrument(skip(self, result), fields(mint = %result.mint_address))]
    pub async fn bonding_curve_exists(&self, result: &CreateTokenResult) -> LaunchResult<bool> {
        let account = self
            .connection
            .get_account_info(&result.bonding_curve_address)
            .await
            .map_err(|e| LaunchError::chain_query("account info", e))?;
        Ok(account.is_some())
    }

    async fn check_balance(&self, params: &CreateTokenParams, mint_rent_lamports: u64) -> LaunchResult<()> {
        let available = self
            .wallet
            .balance()
            .await
            .map_err(|e| LaunchError::chain_query("balance", e))?;
        let required = params
            .initial_liquidity_lamports
            .saturating_add(mint_rent_lamports)
            .saturating_add(FEE_MARGIN_LAMPORTS);

        if available < required {
            warn!("Wallet holds {} lamports, launch needs {}", available, required);
            return Err(LaunchError::InsufficientBalance { required, available });
        }
        Ok(())
    }
}

fn check_text(field: &str, value: &str, max_len: usize, allow_empty: bool) -> LaunchResult<()> {
    if !allow_empty && value.trim().is_empty() {
        return Err(LaunchError::InvalidParameters(format!("{} must not be empty", field)));
    }
    if value.len() > max_len {
        return Err(LaunchError::InvalidParameters(format!(
            "{} is {} bytes, limit is {}",
            field,
            value.len(),
            max_len
        )));
    }
    Ok(())
}
