//! Command line launcher for pump.fun tokens.
//!
//! Usage: pumpfun-launcher <name> <symbol> <uri> [initial_liquidity_sol]
//!
//! Environment:
//!   PUMPFUN_KEYPAIR  path to a JSON keypair file (required)
//!   PUMPFUN_RPC_URL  RPC endpoint (defaults to devnet)
//!   PUMPFUN_CONFIG   optional JSON config file

use anyhow::{anyhow, bail, Context, Result};
use pumpfun_launcher::client::{KeypairWallet, RpcConnection, WalletClient};
use pumpfun_launcher::types::{lamports_to_sol, sol_to_lamports};
use pumpfun_launcher::{CancelFlag, CreateTokenParams, LaunchConfig, TokenLauncher};
use solana_sdk::signature::read_keypair_file;
use std::sync::Arc;
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        bail!("usage: pumpfun-launcher <name> <symbol> <uri> [initial_liquidity_sol]");
    }
    let initial_liquidity_sol: f64 = match args.get(3) {
        Some(raw) => raw.parse().with_context(|| format!("Invalid liquidity amount '{}'", raw))?,
        None => 0.1,
    };

    let mut config = match std::env::var("PUMPFUN_CONFIG") {
        Ok(path) => LaunchConfig::from_json_file(path)?,
        Err(_) => LaunchConfig::default(),
    };
    if let Ok(url) = std::env::var("PUMPFUN_RPC_URL") {
        config.rpc_url = url;
    }
    config.preflight_balance_check = true;

    let keypair_path = std::env::var("PUMPFUN_KEYPAIR").context("PUMPFUN_KEYPAIR is not set")?;
    let keypair = read_keypair_file(&keypair_path)
        .map_err(|e| anyhow!("Failed to read keypair {}: {}", keypair_path, e))?;

    info!("Starting pump.fun launcher against {}", config.rpc_url);

    let connection = Arc::new(RpcConnection::from_config(&config));
    let wallet = Arc::new(KeypairWallet::new(keypair, connection.rpc_client()));

    info!("Using wallet: {}", wallet.address());
    let balance = wallet.balance().await?;
    info!("Wallet balance: {} SOL", lamports_to_sol(balance));

    let launcher = TokenLauncher::new(wallet, connection, config)?;

    // Ctrl-C aborts the mint search.
    let cancel = CancelFlag::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, cancelling launch");
                cancel.cancel();
            }
        });
    }

    let params = CreateTokenParams::new(
        args[0].clone(),
        args[1].clone(),
        args[2].clone(),
        sol_to_lamports(initial_liquidity_sol),
    );
    let result = launcher.create_token_with_cancel(params, cancel).await?;

    info!("Token created successfully!");
    println!("{}", serde_json::to_string_pretty(&result)?);

    match launcher.bonding_curve_exists(&result).await {
        Ok(true) => info!("Bonding curve account {} is live", result.bonding_curve_address),
        Ok(false) => warn!("Bonding curve account {} not found yet", result.bonding_curve_address),
        Err(e) => warn!("Could not check bonding curve account: {}", e),
    }

    Ok(())
}
