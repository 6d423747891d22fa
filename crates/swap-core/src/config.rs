//! Configuration types for swapd
//!
//! The configuration is built once at startup and then shared read-only.

use std::path::Path;

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::types::constants::BPS_DENOMINATOR;
use crate::{Error, Network};

/// Node connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// JSON-RPC URL (e.g., "https://ethereum-sepolia-rpc.publicnode.com")
    pub url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            url: "https://ethereum-sepolia-rpc.publicnode.com".to_string(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Fixed contract addresses of the exchange deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub network: Network,
    pub chain_id: u64,
    /// Pair factory
    pub factory: Address,
    /// Router02
    pub router: Address,
    /// Wrapped native asset (WETH9), the bridge asset for one-hop routes
    pub wrapped_native: Address,
    /// Block explorer transaction URL prefix
    pub explorer_tx_url: String,
}

impl ChainConfig {
    /// Uniswap V2 deployment on Sepolia
    pub fn sepolia() -> Self {
        Self {
            network: Network::Sepolia,
            chain_id: Network::Sepolia.chain_id(),
            factory: address!("F62c03E08ada871A0bEb309762E260a7a6a880E6"),
            router: address!("eE567Fe1712Faf6149d80dA1E6934E354124CfE3"),
            wrapped_native: address!("fFf9976782d46CC05630D1f6eBAb18b2324d6B14"),
            explorer_tx_url: "https://sepolia.etherscan.io/tx/".to_string(),
        }
    }

    /// Explorer link for a transaction hash
    pub fn explorer_link(&self, tx_hash: &str) -> String {
        format!("{}{}", self.explorer_tx_url, tx_hash)
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::sepolia()
    }
}

/// Swap execution policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapPolicy {
    /// Slippage tolerance in basis points (50 = 0.5%)
    #[serde(default = "default_slippage_bps")]
    pub slippage_bps: u64,

    /// Seconds from submission until the router rejects the swap
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
}

fn default_slippage_bps() -> u64 {
    50
}

fn default_deadline_secs() -> u64 {
    600
}

impl Default for SwapPolicy {
    fn default() -> Self {
        Self {
            slippage_bps: default_slippage_bps(),
            deadline_secs: default_deadline_secs(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Node connection settings
    pub node: NodeConfig,

    /// Exchange deployment
    #[serde(default)]
    pub chain: ChainConfig,

    /// Slippage and deadline policy
    #[serde(default)]
    pub policy: SwapPolicy,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Output token preselected in the swap form
    #[serde(default = "default_token_out")]
    pub default_token_out: Address,
}

fn default_api_port() -> u16 {
    18545
}

fn default_token_out() -> Address {
    // USDC on Sepolia
    address!("1c7D4B196Cb0C7B01d743Fbc6116a902379C7238")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node: NodeConfig::default(),
            chain: ChainConfig::default(),
            policy: SwapPolicy::default(),
            api_port: default_api_port(),
            default_token_out: default_token_out(),
        }
    }
}

/// Env var naming a JSON config file
pub const CONFIG_PATH_ENV: &str = "SWAPD_CONFIG";
/// Env var overriding `node.url`
pub const RPC_URL_ENV: &str = "SWAPD_RPC_URL";
/// Env var overriding `api_port`
pub const API_PORT_ENV: &str = "SWAPD_API_PORT";

impl AppConfig {
    /// Load from an optional JSON file, then apply environment overrides and validate.
    pub fn load_with_path(path: Option<&Path>) -> Result<Self, Error> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                Self::from_json(&raw)?
            }
            None => Self::default(),
        };

        if let Ok(url) = std::env::var(RPC_URL_ENV) {
            config.node.url = url;
        }
        if let Ok(port) = std::env::var(API_PORT_ENV) {
            config.api_port = port
                .parse()
                .map_err(|_| Error::Config(format!("Invalid {}: {:?}", API_PORT_ENV, port)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load using the path in `SWAPD_CONFIG`, if set.
    pub fn load() -> Result<Self, Error> {
        let path = std::env::var(CONFIG_PATH_ENV).ok();
        Self::load_with_path(path.as_deref().map(Path::new))
    }

    pub fn from_json(raw: &str) -> Result<Self, Error> {
        serde_json::from_str(raw).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.node.url.trim().is_empty() {
            return Err(Error::Config("node.url must not be empty".to_string()));
        }
        if self.node.request_timeout_secs == 0 {
            return Err(Error::Config(
                "node.request_timeout_secs must be positive".to_string(),
            ));
        }
        if self.policy.slippage_bps > BPS_DENOMINATOR {
            return Err(Error::Config(format!(
                "policy.slippage_bps must be at most {}, got {}",
                BPS_DENOMINATOR, self.policy.slippage_bps
            )));
        }
        if self.policy.deadline_secs == 0 {
            return Err(Error::Config(
                "policy.deadline_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
