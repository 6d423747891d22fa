//! Core type definitions for swapd

use std::fmt;
use std::str::FromStr;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// Asset chosen by the user: the chain's native currency or an ERC-20 contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "address", rename_all = "lowercase")]
pub enum AssetId {
    Native,
    Token(Address),
}

impl AssetId {
    /// Parse a user-entered identifier.
    ///
    /// Blank input means the native asset, matching the form's default.
    /// Anything else must be the native sentinel or a `0x` + 40 hex digit address.
    pub fn parse(input: &str) -> Result<Self, ProtocolError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == constants::NATIVE_SENTINEL {
            return Ok(Self::Native);
        }
        parse_address(trimmed)
            .map(Self::Token)
            .ok_or_else(|| ProtocolError::InvalidAsset {
                input: input.to_string(),
            })
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    /// Contract address, if this is a token
    pub fn token_address(&self) -> Option<Address> {
        match self {
            Self::Native => None,
            Self::Token(addr) => Some(*addr),
        }
    }

    /// Address used on-chain; the native asset trades as its wrapped form.
    pub fn on_chain(&self, wrapped_native: Address) -> Address {
        match self {
            Self::Native => wrapped_native,
            Self::Token(addr) => *addr,
        }
    }
}

impl FromStr for AssetId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "{}", constants::NATIVE_SENTINEL),
            Self::Token(addr) => write!(f, "{}", addr),
        }
    }
}

/// Strict `0x`-prefixed, 40 hex digit address check (any letter case).
pub fn parse_address(input: &str) -> Option<Address> {
    let hex = input.strip_prefix("0x")?;
    if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Address::from_str(input).ok()
}

/// Network type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Sepolia,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Sepolia => "sepolia",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Sepolia => 11_155_111,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Block number
pub type BlockNumber = u64;

/// Constants
pub mod constants {
    /// User-facing identifier for the native asset
    pub const NATIVE_SENTINEL: &str = "ETH";

    /// Decimal precision of the native asset
    pub const NATIVE_DECIMALS: u8 = 18;

    /// Fallback precision when a token's decimals cannot be read
    pub const DEFAULT_DECIMALS: u8 = 18;

    /// Amount prefilled in the swap form
    pub const DEFAULT_AMOUNT_IN: &str = "0.01";

    /// Basis-point denominator for slippage math
    pub const BPS_DENOMINATOR: u64 = 10_000;
}
