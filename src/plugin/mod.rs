//! Agent tool plugin surface.
//!
//! Exposes token creation as a JSON-in/JSON-out tool that an agent framework
//! can register next to its other on-chain tools.

pub mod tools;

use crate::token::TokenLauncher;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub use tools::{CreatePumpTokenArgs, CreatePumpTokenTool};

/// Chain families a plugin can declare support for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainType {
    Solana,
    Evm,
    Sui,
}

/// A tool callable by an agent.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name, unique within the plugin.
    fn name(&self) -> &str;

    /// Description shown to the model.
    fn description(&self) -> &str;

    /// JSON schema for the tool parameters.
    fn parameters_schema(&self) -> Value;

    /// Run the tool.
    async fn execute(&self, params: Value) -> Result<Value>;
}

impl std::fmt::Debug for dyn Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

/// The pump.fun plugin: one tool that launches a token with a bonding curve.
pub struct PumpFunPlugin {
    launcher: Arc<TokenLauncher>,
}

impl PumpFunPlugin {
    pub fn new(launcher: Arc<TokenLauncher>) -> Self {
        Self { launcher }
    }

    pub fn name(&self) -> &'static str {
        "pumpfun"
    }

    pub fn supports_chain(&self, chain: ChainType) -> bool {
        chain == ChainType::Solana
    }

    pub fn supports_smart_wallets(&self) -> bool {
        false
    }

    pub fn tools(&self) -> Vec<Arc<dyn Tool>> {
        vec![Arc::new(CreatePumpTokenTool::new(self.launcher.clone()))]
    }

    /// Find a tool by name.
    pub fn tool(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools().into_iter().find(|tool| tool.name() == name)
    }
}
