//! Error types for swapd

use thiserror::Error;

/// Core errors that can occur in swapd
#[derive(Debug, Error)]
pub enum Error {
    #[error("Node error: {0}")]
    Node(#[from] NodeError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] TxError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Node connection and query errors
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("Node unreachable at {url}")]
    Unreachable { url: String },

    #[error("Node request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Contract call {method} failed: {message}")]
    ContractCall {
        method: &'static str,
        message: String,
    },
}

/// Protocol-specific errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Invalid asset identifier: {input:?}")]
    InvalidAsset { input: String },

    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    #[error("No liquidity route between the requested assets")]
    NoRoute,

    #[error("Quote not usable for a swap: {state}")]
    QuoteUnavailable { state: String },

    #[error("No wallet connected")]
    WalletNotConnected,

    #[error("The native asset does not need an approval")]
    NativeAssetApproval,
}

/// Transaction building errors
#[derive(Debug, Error)]
pub enum TxError {
    #[error("Failed to build transaction: {message}")]
    BuildFailed { message: String },

    #[error("Transaction submission failed: {message}")]
    SubmissionFailed { message: String },
}

/// Result type alias for swapd operations
pub type Result<T> = std::result::Result<T, Error>;

impl ProtocolError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAsset { .. } => "invalid_asset",
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::NoRoute => "no_route",
            Self::QuoteUnavailable { .. } => "quote_unavailable",
            Self::WalletNotConnected => "wallet_not_connected",
            Self::NativeAssetApproval => "native_asset_approval",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAsset { .. } | Self::InvalidAmount { .. } => 400,
            Self::NoRoute | Self::QuoteUnavailable { .. } => 422,
            Self::WalletNotConnected | Self::NativeAssetApproval => 422,
        }
    }
}

impl Error {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Protocol(e) => e.error_code(),
            Self::Node(_) => "node_error",
            Self::Transaction(_) => "transaction_error",
            Self::Config(_) => "config_error",
            Self::Serialization(_) => "serialization_error",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Protocol(e) => e.status_code(),
            Self::Node(_) => 503,
            Self::Transaction(_) | Self::Config(_) | Self::Serialization(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_codes() {
        let err = ProtocolError::InvalidAmount {
            message: "test".into(),
        };
        assert_eq!(err.error_code(), "invalid_amount");
        assert_eq!(err.status_code(), 400);

        let err = ProtocolError::QuoteUnavailable {
            state: "No liquidity".into(),
        };
        assert_eq!(err.error_code(), "quote_unavailable");
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_wrapped_error_codes() {
        let err: Error = ProtocolError::NoRoute.into();
        assert_eq!(err.error_code(), "no_route");
        assert_eq!(err.status_code(), 422);

        let err: Error = NodeError::Timeout { secs: 30 }.into();
        assert_eq!(err.error_code(), "node_error");
        assert_eq!(err.status_code(), 503);
        assert_eq!(
            err.to_string(),
            "Node error: Node request timed out after 30s"
        );
    }
}
