//! Application state shared across API handlers

use std::sync::Arc;
use std::time::Instant;

use alloy::primitives::{Address, B256};
use evm_node_client::{NodeClient, TxStatus};
use serde::{Deserialize, Serialize};
use swap_core::{parse_address, AppConfig};
use thiserror::Error;
use tokio::sync::RwLock;
use uniswap_v2::{PendingTransaction, Sequenced, SwapQuote};

/// Errors that can occur in the API layer
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid wallet address format
    #[error("Invalid wallet address: {reason}")]
    InvalidAddress { reason: String },
}

/// State representing a connected wallet.
#[derive(Clone, Debug)]
pub struct WalletState {
    pub address: Address,
    /// When the wallet was connected
    pub connected_at: Instant,
}

impl WalletState {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            connected_at: Instant::now(),
        }
    }
}

/// Latest results of the recomputed views
#[derive(Debug, Default)]
pub struct SwapSession {
    pub quote: Sequenced<SwapQuote>,
    pub approval: Sequenced<bool>,
}

/// Watcher-side status of the pending transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingStatus {
    Pending,
    Confirmed { block_number: Option<u64> },
    Reverted { block_number: Option<u64> },
    /// Not mined within the watch window
    Timeout,
}

impl PendingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed { .. } => "confirmed",
            Self::Reverted { .. } => "reverted",
            Self::Timeout => "timeout",
        }
    }

    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl From<TxStatus> for PendingStatus {
    fn from(status: TxStatus) -> Self {
        match status {
            TxStatus::Pending => Self::Pending,
            TxStatus::Confirmed { block_number } => Self::Confirmed { block_number },
            TxStatus::Reverted { block_number } => Self::Reverted { block_number },
        }
    }
}

/// Most recent submission and what the watcher knows about it
#[derive(Debug, Clone)]
pub struct PendingRecord {
    pub tx: PendingTransaction,
    pub status: PendingStatus,
    /// Local clock at the time it was recorded
    pub recorded_at: Instant,
}

/// Validate a `0x` + 40 hex digit account address.
fn validate_account_address(address: &str) -> Result<Address, ApiError> {
    parse_address(address.trim()).ok_or_else(|| ApiError::InvalidAddress {
        reason: format!("expected 0x followed by 40 hex digits, got {:?}", address),
    })
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Arc<AppConfig>,
    node_client: RwLock<Option<NodeClient>>,
    wallet: RwLock<Option<WalletState>>,
    session: SwapSession,
    pending: RwLock<Option<PendingRecord>>,
}

impl AppState {
    /// Create a new application state with default config
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create with a specific config
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config: Arc::new(config),
                node_client: RwLock::new(None),
                wallet: RwLock::new(None),
                session: SwapSession::default(),
                pending: RwLock::new(None),
            }),
        }
    }

    /// Configuration fixed at startup
    pub fn config(&self) -> Arc<AppConfig> {
        self.inner.config.clone()
    }

    /// Get or create node client
    pub async fn node_client(&self) -> Option<NodeClient> {
        {
            let client = self.inner.node_client.read().await;
            if client.is_some() {
                return client.clone();
            }
        }

        let mut cached = self.inner.node_client.write().await;
        if cached.is_some() {
            return cached.clone();
        }

        let config = &self.inner.config;
        tracing::info!("Creating node client for URL: {}", config.node.url);
        match NodeClient::new(config.node.clone()) {
            Ok(client) => {
                *cached = Some(client.clone());
                Some(client)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to create node client for {}: {}",
                    config.node.url,
                    e
                );
                None
            }
        }
    }

    /// Get current wallet state
    pub async fn wallet(&self) -> Option<WalletState> {
        self.inner.wallet.read().await.clone()
    }

    /// Connected account address, if any
    pub async fn account(&self) -> Option<Address> {
        self.inner.wallet.read().await.as_ref().map(|w| w.address)
    }

    /// Set connected wallet with address validation.
    ///
    /// # Errors
    /// Returns `ApiError::InvalidAddress` if the address format is invalid.
    pub async fn set_wallet(&self, address: &str) -> Result<Address, ApiError> {
        let address = validate_account_address(address)?;
        let mut wallet = self.inner.wallet.write().await;
        *wallet = Some(WalletState::new(address));
        drop(wallet);
        // the approval flag belonged to the previous account
        self.inner.session.approval.reset().await;
        Ok(address)
    }

    /// Disconnect wallet (clear wallet state)
    pub async fn disconnect_wallet(&self) {
        let mut wallet = self.inner.wallet.write().await;
        *wallet = None;
        drop(wallet);
        self.inner.session.approval.reset().await;
    }

    /// Sequenced quote and approval slots
    pub fn session(&self) -> &SwapSession {
        &self.inner.session
    }

    /// Replace the tracked transaction with a new submission
    pub async fn set_pending(&self, tx: PendingTransaction) {
        tracing::info!(hash = %tx.hash, kind = ?tx.kind, "Tracking transaction");
        let mut pending = self.inner.pending.write().await;
        *pending = Some(PendingRecord {
            tx,
            status: PendingStatus::Pending,
            recorded_at: Instant::now(),
        });
    }

    pub async fn pending(&self) -> Option<PendingRecord> {
        self.inner.pending.read().await.clone()
    }

    /// Record a status for `hash`; ignored if a newer submission replaced it.
    pub async fn update_pending_status(&self, hash: B256, status: PendingStatus) -> bool {
        let mut pending = self.inner.pending.write().await;
        match pending.as_mut() {
            Some(record) if record.tx.hash == hash => {
                record.status = status;
                true
            }
            _ => false,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
