//! evm-node-client: JSON-RPC client for EVM nodes with contract bindings
//!
//! This crate provides a high-level client for reading token, factory, and
//! router state from an Ethereum-compatible node, plus node probing.

pub mod capabilities;
pub mod contracts;
pub mod reader;

use std::future::IntoFuture;
use std::time::Duration;

use alloy::network::Ethereum;
use alloy::primitives::{Address, B256, U256};
use alloy::providers::{Provider, RootProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use swap_core::{BlockNumber, NodeConfig, NodeError};
use url::Url;

use contracts::{IUniswapV2Factory, IUniswapV2Router02, IERC20};

pub use capabilities::{CapabilityTier, NodeCapabilities};
pub use reader::ChainReader;

/// HTTP provider type used by the client
pub type HttpProvider = RootProvider<Ethereum>;

/// Result type for node client operations
pub type Result<T> = std::result::Result<T, NodeError>;

/// On-chain state of a submitted transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    /// No receipt yet
    Pending,
    /// Mined and succeeded
    Confirmed { block_number: Option<u64> },
    /// Mined and reverted
    Reverted { block_number: Option<u64> },
}

impl TxStatus {
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// High-level EVM node client
#[derive(Clone)]
pub struct NodeClient {
    provider: HttpProvider,
    config: NodeConfig,
}

impl NodeClient {
    /// Create a client for the configured URL.
    ///
    /// The HTTP transport is lazy; no request is made until the first read.
    pub fn new(config: NodeConfig) -> Result<Self> {
        let url = Url::parse(&config.url).map_err(|e| NodeError::Unreachable {
            url: format!("{}: {}", config.url, e),
        })?;

        Ok(Self {
            provider: RootProvider::new_http(url),
            config,
        })
    }

    /// Get the underlying provider (for advanced usage)
    pub fn provider(&self) -> &HttpProvider {
        &self.provider
    }

    /// Get the current node configuration
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.request_timeout_secs)
    }

    /// Chain id reported by the node
    pub async fn chain_id(&self) -> Result<u64> {
        timed_request(self.timeout(), "eth_chainId", self.provider.get_chain_id()).await
    }

    /// Latest block number
    pub async fn block_number(&self) -> Result<BlockNumber> {
        timed_request(
            self.timeout(),
            "eth_blockNumber",
            self.provider.get_block_number(),
        )
        .await
    }

    /// Check if node is online
    pub async fn is_online(&self) -> bool {
        self.block_number().await.is_ok()
    }

    /// Probe the node for reachability and chain id
    pub async fn probe(&self, expected_chain_id: u64) -> NodeCapabilities {
        capabilities::detect_capabilities(self, expected_chain_id).await
    }

    /// Look up the receipt of a submitted transaction
    pub async fn transaction_status(&self, tx_hash: B256) -> Result<TxStatus> {
        let receipt = timed_request(
            self.timeout(),
            "eth_getTransactionReceipt",
            self.provider.get_transaction_receipt(tx_hash),
        )
        .await?;

        Ok(match receipt {
            None => TxStatus::Pending,
            Some(r) if r.status() => TxStatus::Confirmed {
                block_number: r.block_number,
            },
            Some(r) => TxStatus::Reverted {
                block_number: r.block_number,
            },
        })
    }
}

#[async_trait]
impl ChainReader for NodeClient {
    async fn decimals(&self, token: Address) -> Result<u8> {
        let contract = IERC20::new(token, &self.provider);
        timed_request(self.timeout(), "decimals", contract.decimals().call()).await
    }

    async fn symbol(&self, token: Address) -> Result<String> {
        let contract = IERC20::new(token, &self.provider);
        timed_request(self.timeout(), "symbol", contract.symbol().call()).await
    }

    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        let contract = IERC20::new(token, &self.provider);
        timed_request(self.timeout(), "balanceOf", contract.balanceOf(owner).call()).await
    }

    async fn native_balance(&self, owner: Address) -> Result<U256> {
        timed_request(
            self.timeout(),
            "eth_getBalance",
            self.provider.get_balance(owner),
        )
        .await
    }

    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256> {
        let contract = IERC20::new(token, &self.provider);
        timed_request(
            self.timeout(),
            "allowance",
            contract.allowance(owner, spender).call(),
        )
        .await
    }

    async fn get_pair(&self, factory: Address, a: Address, b: Address) -> Result<Address> {
        let contract = IUniswapV2Factory::new(factory, &self.provider);
        let pair = timed_request(self.timeout(), "getPair", contract.getPair(a, b).call()).await?;
        tracing::debug!(%a, %b, %pair, "getPair");
        Ok(pair)
    }

    async fn get_amounts_out(
        &self,
        router: Address,
        amount_in: U256,
        path: &[Address],
    ) -> Result<Vec<U256>> {
        let contract = IUniswapV2Router02::new(router, &self.provider);
        timed_request(
            self.timeout(),
            "getAmountsOut",
            contract.getAmountsOut(amount_in, path.to_vec()).call(),
        )
        .await
    }

    async fn wrapped_native(&self, router: Address) -> Result<Address> {
        let contract = IUniswapV2Router02::new(router, &self.provider);
        timed_request(self.timeout(), "WETH", contract.WETH().call()).await
    }
}

/// Run a node request with a timeout, mapping both failure modes to `NodeError`.
async fn timed_request<T, E: std::fmt::Display>(
    timeout: Duration,
    method: &'static str,
    fut: impl IntoFuture<Output = std::result::Result<T, E>>,
) -> Result<T> {
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| NodeError::Timeout {
            secs: timeout.as_secs(),
        })?
        .map_err(|e| NodeError::ContractCall {
            method,
            message: e.to_string(),
        })
}
