//! `createPumpToken` tool.

use super::Tool;
use crate::token::TokenLauncher;
use crate::types::{sol_to_lamports, CreateTokenParams};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, instrument};

/// Smallest initial liquidity the tool accepts, in SOL.
pub const MIN_INITIAL_LIQUIDITY_SOL: f64 = 0.1;

fn default_initial_liquidity() -> f64 {
    MIN_INITIAL_LIQUIDITY_SOL
}

/// Arguments as sent by the agent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePumpTokenArgs {
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub uri: String,
    /// In SOL
    #[serde(default = "default_initial_liquidity")]
    pub initial_liquidity: f64,
}

impl CreatePumpTokenArgs {
    pub fn into_params(self) -> Result<CreateTokenParams> {
        if !self.initial_liquidity.is_finite() || self.initial_liquidity < MIN_INITIAL_LIQUIDITY_SOL {
            bail!(
                "initialLiquidity must be at least {} SOL, got {}",
                MIN_INITIAL_LIQUIDITY_SOL,
                self.initial_liquidity
            );
        }

        Ok(CreateTokenParams {
            name: self.name,
            symbol: self.symbol,
            uri: self.uri,
            initial_liquidity_lamports: sol_to_lamports(self.initial_liquidity),
        })
    }
}

pub struct CreatePumpTokenTool {
    launcher: Arc<TokenLauncher>,
}

impl CreatePumpTokenTool {
    pub fn new(launcher: Arc<TokenLauncher>) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl Tool for CreatePumpTokenTool {
    fn name(&self) -> &str {
        "createPumpToken"
    }

    fn description(&self) -> &str {
        "This tool creates a new pump.fun token on Solana with a bonding curve. The token address will end with \"pump\"."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "The name of the token" },
                "symbol": { "type": "string", "description": "The symbol of the token" },
                "uri": { "type": "string", "description": "URI of the token metadata JSON" },
                "initialLiquidity": {
                    "type": "number",
                    "minimum": MIN_INITIAL_LIQUIDITY_SOL,
                    "default": MIN_INITIAL_LIQUIDITY_SOL,
                    "description": "Initial liquidity in SOL to deposit (minimum 0.1 SOL)"
                }
            },
            "required": ["name", "symbol"]
        })
    }

    #[instrument(skip(self, params))]
    async fn execute(&self, params: Value) -> Result<Value> {
        let args: CreatePumpTokenArgs =
            serde_json::from_value(params).context("Invalid createPumpToken parameters")?;
        let initial_liquidity = args.initial_liquidity;
        let params = args.into_params()?;

        let result = self
            .launcher
            .create_token(params)
            .await
            .context("Failed to create pump.fun token")?;

        info!("createPumpToken launched {}", result.mint_address);
        Ok(json!({
            "tokenAddress": result.mint_address.to_string(),
            "bondingCurveAccount": result.bonding_curve_address.to_string(),
            "liquidityPoolAccount": result.liquidity_pool_address.to_string(),
            "metadataAccount": result.metadata_address.to_string(),
            "txHash": result.confirmation_handle,
            "initialLiquidity": initial_liquidity,
            "decimals": result.decimals,
            "totalSupply": result.total_supply,
        }))
    }
}
