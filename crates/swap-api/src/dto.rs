//! Data Transfer Objects for API requests and responses
//!
//! Amounts cross the API as decimal strings; raw on-chain integers are sent
//! as base-10 strings so JavaScript clients do not lose precision.

use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use uniswap_v2::{
    format_amount, ApprovalTransaction, AssetInfo, PendingKind, ResolvedPath, SwapKind,
    SwapTransaction,
};

use crate::state::{PendingRecord, PendingStatus};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Node status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeStatusResponse {
    pub connected: bool,
    pub url: String,
    pub network: String,
    pub chain_id: Option<u64>,
    pub expected_chain_id: u64,
    pub block_number: u64,
    pub capability_tier: String,
    /// Router `WETH()` equals the configured bridge asset; unknown when offline
    pub bridge_matches: Option<bool>,
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("not_found", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}

// =============================================================================
// Wallet
// =============================================================================

/// Wallet connect request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectWalletRequest {
    pub address: String,
}

/// Wallet status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletStatusResponse {
    pub connected: bool,
    pub address: Option<String>,
    pub connected_secs: Option<u64>,
}

// =============================================================================
// Swap
// =============================================================================

/// Request naming a single asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRequest {
    pub token: String,
    /// Account whose balance to include (defaults to the connected wallet)
    #[serde(default)]
    pub account: Option<String>,
}

/// Decimal precision of an asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecimalsResponse {
    pub token: String,
    pub decimals: u8,
}

/// Asset metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetInfoResponse {
    pub token: String,
    pub symbol: String,
    pub decimals: u8,
    pub balance: Option<String>,
    pub balance_raw: Option<String>,
}

impl From<AssetInfo> for AssetInfoResponse {
    fn from(info: AssetInfo) -> Self {
        Self {
            token: info.asset.to_string(),
            symbol: info.symbol,
            decimals: info.decimals,
            balance: info.balance.map(|b| format_amount(b, info.decimals)),
            balance_raw: info.balance.map(|b| b.to_string()),
        }
    }
}

/// Path lookup request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathRequest {
    pub token_in: String,
    pub token_out: String,
}

/// Resolved path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathResponse {
    pub path: Vec<String>,
    pub has_route: bool,
    pub bridged: bool,
}

impl From<&ResolvedPath> for PathResponse {
    fn from(path: &ResolvedPath) -> Self {
        Self {
            path: addresses(path.as_slice()),
            has_route: path.is_route(),
            bridged: path.is_bridged(),
        }
    }
}

/// Quote request. Missing decimals are read from the token contracts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteApiRequest {
    pub token_in: String,
    pub token_out: String,
    #[serde(default)]
    pub amount_in: String,
    #[serde(default)]
    pub decimals_in: Option<u8>,
    #[serde(default)]
    pub decimals_out: Option<u8>,
}

/// Quote result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteApiResponse {
    /// Sequence number this quote was computed under
    pub seq: u64,
    /// Displayed quote: a decimal amount or one of "-", "No liquidity", "Quote error"
    pub quote: String,
    pub amount_out_raw: Option<String>,
    pub executable: bool,
    pub path: Vec<String>,
    /// A newer quote was requested before this one finished
    pub stale: bool,
}

/// Allowance check request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalApiRequest {
    pub token_in: String,
    #[serde(default)]
    pub amount_in: String,
    #[serde(default)]
    pub decimals_in: Option<u8>,
}

/// Allowance check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalApiResponse {
    pub seq: u64,
    pub needs_approval: bool,
    pub stale: bool,
}

/// Swap build request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapBuildApiRequest {
    pub token_in: String,
    pub token_out: String,
    pub amount_in: String,
    /// Quote text as displayed
    pub quote: String,
    #[serde(default)]
    pub decimals_in: Option<u8>,
    #[serde(default)]
    pub decimals_out: Option<u8>,
}

/// Unsigned transaction for the wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsignedTxDto {
    pub from: String,
    pub to: String,
    /// Wei, base 10
    pub value: String,
    /// 0x-prefixed calldata
    pub data: String,
}

impl UnsignedTxDto {
    fn new(from: Address, to: Address, value: U256, data: &Bytes) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            value: value.to_string(),
            data: format!("0x{}", hex::encode(data)),
        }
    }
}

/// Swap summary for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapSummaryDto {
    pub kind: SwapKind,
    pub function: String,
    pub path: Vec<String>,
    pub amount_in: String,
    pub amount_out_min: String,
    pub deadline: u64,
}

/// Swap build response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapBuildApiResponse {
    pub unsigned_tx: UnsignedTxDto,
    pub summary: SwapSummaryDto,
}

impl From<&SwapTransaction> for SwapBuildApiResponse {
    fn from(tx: &SwapTransaction) -> Self {
        Self {
            unsigned_tx: UnsignedTxDto::new(tx.recipient, tx.router, tx.value, &tx.calldata),
            summary: SwapSummaryDto {
                kind: tx.kind,
                function: tx.kind.function_name().to_string(),
                path: addresses(tx.path.as_slice()),
                amount_in: tx.amount_in.to_string(),
                amount_out_min: tx.amount_out_min.to_string(),
                deadline: tx.deadline.saturating_to::<u64>(),
            },
        }
    }
}

/// Approval build request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveBuildRequest {
    pub token_in: String,
    #[serde(default)]
    pub amount_in: String,
    #[serde(default)]
    pub decimals_in: Option<u8>,
}

/// Approval build response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveBuildResponse {
    pub unsigned_tx: UnsignedTxDto,
    pub spender: String,
    pub amount: String,
}

impl From<&ApprovalTransaction> for ApproveBuildResponse {
    fn from(tx: &ApprovalTransaction) -> Self {
        Self {
            unsigned_tx: UnsignedTxDto::new(tx.owner, tx.token, U256::ZERO, &tx.calldata),
            spender: tx.spender.to_string(),
            amount: tx.amount.to_string(),
        }
    }
}

/// Values the swap form starts with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapDefaultsResponse {
    pub token_in: String,
    pub token_out: String,
    pub amount_in: String,
}

/// Latest quote and approval state of the session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub quote: Option<SessionQuoteDto>,
    pub approval: Option<SessionApprovalDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionQuoteDto {
    pub seq: u64,
    pub quote: String,
    pub path: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionApprovalDto {
    pub seq: u64,
    pub needs_approval: bool,
}

// =============================================================================
// Transactions
// =============================================================================

/// Hash reported by the wallet after submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxSubmittedRequest {
    pub tx_hash: String,
    pub kind: PendingKind,
}

/// Pending transaction with its last known status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingTxResponse {
    pub tx_hash: String,
    pub kind: PendingKind,
    pub submitted_at: u64,
    /// "pending" | "confirmed" | "reverted" | "timeout"
    pub status: String,
    pub block_number: Option<u64>,
    pub explorer_url: String,
}

impl PendingTxResponse {
    pub fn new(record: &PendingRecord, explorer_url: String) -> Self {
        let block_number = match record.status {
            PendingStatus::Confirmed { block_number } | PendingStatus::Reverted { block_number } => {
                block_number
            }
            _ => None,
        };
        Self {
            tx_hash: record.tx.hash.to_string(),
            kind: record.tx.kind,
            submitted_at: record.tx.submitted_at,
            status: record.status.as_str().to_string(),
            block_number,
            explorer_url,
        }
    }
}

fn addresses(path: &[Address]) -> Vec<String> {
    path.iter().map(|a| a.to_string()).collect()
}
