//! Swap State Types
//!
//! Data structures for routes, quotes, and built transactions.

use std::fmt;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::rpc::types::TransactionRequest;
use serde::{Deserialize, Serialize};
use swap_core::{AssetId, ProtocolError};

use crate::constants::{quote_text, router_functions};
use crate::units::{format_amount, parse_amount};

/// Ordered on-chain path. Two entries for a direct pool, three when bridged
/// through the wrapped native asset, empty when there is no route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedPath(Vec<Address>);

impl ResolvedPath {
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn direct(a: Address, b: Address) -> Self {
        Self(vec![a, b])
    }

    pub fn bridged(a: Address, bridge: Address, b: Address) -> Self {
        Self(vec![a, bridge, b])
    }

    /// A usable route has at least two entries
    pub fn is_route(&self) -> bool {
        self.0.len() >= 2
    }

    pub fn is_bridged(&self) -> bool {
        self.0.len() == 3
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Address] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<Address> {
        self.0.clone()
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(no route)");
        }
        let hops: Vec<String> = self.0.iter().map(|a| a.to_string()).collect();
        write!(f, "{}", hops.join(" -> "))
    }
}

/// Expected output of a swap, or the reason there is none
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quote {
    /// Not attempted
    Idle,
    /// No direct or bridged pool
    NoLiquidity,
    /// Parsing or a chain read failed
    Failed,
    /// Quoted output in smallest units plus its decimal rendering
    Amount { amount_out: U256, display: String },
}

impl Quote {
    pub fn amount(amount_out: U256, decimals: u8) -> Self {
        Self::Amount {
            amount_out,
            display: format_amount(amount_out, decimals),
        }
    }

    /// Read a displayed quote back, recognising the sentinel texts.
    pub fn parse_display(text: &str, decimals: u8) -> Result<Self, ProtocolError> {
        match text.trim() {
            "" | quote_text::IDLE => Ok(Self::Idle),
            quote_text::NO_LIQUIDITY => Ok(Self::NoLiquidity),
            quote_text::ERROR => Ok(Self::Failed),
            amount => {
                let amount_out = parse_amount(amount, decimals)?;
                Ok(Self::Amount {
                    amount_out,
                    display: amount.to_string(),
                })
            }
        }
    }

    pub fn amount_out(&self) -> Option<U256> {
        match self {
            Self::Amount { amount_out, .. } => Some(*amount_out),
            _ => None,
        }
    }

    /// Only a numeric quote can back a swap
    pub fn is_executable(&self) -> bool {
        matches!(self, Self::Amount { .. })
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "{}", quote_text::IDLE),
            Self::NoLiquidity => write!(f, "{}", quote_text::NO_LIQUIDITY),
            Self::Failed => write!(f, "{}", quote_text::ERROR),
            Self::Amount { display, .. } => write!(f, "{}", display),
        }
    }
}

/// Quote together with the path it was computed over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapQuote {
    pub quote: Quote,
    pub path: ResolvedPath,
}

impl SwapQuote {
    pub fn without_path(quote: Quote) -> Self {
        Self {
            quote,
            path: ResolvedPath::none(),
        }
    }
}

/// Router entry point for a swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapKind {
    /// Native in, token out; input attached as value
    ExactEthForTokens,
    /// Token in, native out
    ExactTokensForEth,
    /// Token in, token out
    ExactTokensForTokens,
}

impl SwapKind {
    /// Native input takes precedence over native output
    pub fn for_assets(token_in: &AssetId, token_out: &AssetId) -> Self {
        if token_in.is_native() {
            Self::ExactEthForTokens
        } else if token_out.is_native() {
            Self::ExactTokensForEth
        } else {
            Self::ExactTokensForTokens
        }
    }

    pub fn function_name(&self) -> &'static str {
        match self {
            Self::ExactEthForTokens => router_functions::SWAP_EXACT_ETH_FOR_TOKENS,
            Self::ExactTokensForEth => router_functions::SWAP_EXACT_TOKENS_FOR_ETH,
            Self::ExactTokensForTokens => router_functions::SWAP_EXACT_TOKENS_FOR_TOKENS,
        }
    }
}

impl fmt::Display for SwapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.function_name())
    }
}

/// Unsigned router call ready for the wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapTransaction {
    pub kind: SwapKind,
    pub router: Address,
    pub recipient: Address,
    pub path: ResolvedPath,
    pub amount_in: U256,
    pub amount_out_min: U256,
    pub deadline: U256,
    /// Attached native value (non-zero only for native-in swaps)
    pub value: U256,
    pub calldata: Bytes,
}

impl SwapTransaction {
    pub fn to_request(&self) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(self.recipient)
            .with_to(self.router)
            .with_value(self.value)
            .with_input(self.calldata.clone())
    }
}

/// Unsigned ERC-20 `approve(router, amount)` call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalTransaction {
    pub owner: Address,
    pub token: Address,
    pub spender: Address,
    pub amount: U256,
    pub calldata: Bytes,
}

impl ApprovalTransaction {
    pub fn to_request(&self) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(self.owner)
            .with_to(self.token)
            .with_input(self.calldata.clone())
    }
}

/// What a submitted transaction was for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingKind {
    Approval,
    Swap,
}

/// Hash of the most recent submission; confirmation is tracked elsewhere
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub hash: B256,
    pub kind: PendingKind,
    /// Unix seconds at submission
    pub submitted_at: u64,
}

/// Token metadata for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetInfo {
    pub asset: AssetId,
    pub symbol: String,
    pub decimals: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<U256>,
}
