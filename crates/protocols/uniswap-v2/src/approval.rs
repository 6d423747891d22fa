//! Approval Checker

use alloy::primitives::Address;
use evm_node_client::ChainReader;
use swap_core::{AssetId, ChainConfig};

use crate::units::parse_amount;

/// Whether `account` must approve the router before swapping `amount_in` of `token_in`.
///
/// False without a reader or account, for the native asset, and for a
/// malformed identifier. A failed allowance read or an unparseable amount
/// yields true so an under-approved swap is never attempted.
pub async fn needs_approval<R: ChainReader + ?Sized>(
    reader: Option<&R>,
    chain: &ChainConfig,
    account: Option<Address>,
    token_in: &str,
    amount_in: &str,
    decimals_in: u8,
) -> bool {
    let (Some(reader), Some(owner)) = (reader, account) else {
        return false;
    };
    let token = match AssetId::parse(token_in) {
        Ok(AssetId::Token(token)) => token,
        _ => return false,
    };

    let allowance = match reader.allowance(token, owner, chain.router).await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(%token, %owner, "allowance read failed, requiring approval: {}", e);
            return true;
        }
    };

    let amount = if amount_in.trim().is_empty() { "0" } else { amount_in };
    match parse_amount(amount, decimals_in) {
        Ok(required) => allowance < required,
        Err(e) => {
            tracing::warn!("{}; requiring approval", e);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{chain, MockReader, USDC, USER};
    use alloy::primitives::U256;

    fn usdc() -> String {
        USDC.to_string()
    }

    #[tokio::test]
    async fn test_allowance_comparison() {
        let reader = MockReader::new().with_allowance(U256::from(5_000_000u64));
        let chain = chain();

        assert!(!needs_approval(Some(&reader), &chain, Some(USER), &usdc(), "5", 6).await);
        assert!(needs_approval(Some(&reader), &chain, Some(USER), &usdc(), "5.000001", 6).await);
        assert!(!needs_approval(Some(&reader), &chain, Some(USER), &usdc(), "", 6).await);
    }

    #[tokio::test]
    async fn test_native_never_needs_approval() {
        let reader = MockReader::new().with_allowance(U256::ZERO);
        assert!(!needs_approval(Some(&reader), &chain(), Some(USER), "ETH", "100", 18).await);
        assert_eq!(reader.allowance_calls(), 0);
    }

    #[tokio::test]
    async fn test_no_account_or_bad_token() {
        let reader = MockReader::new().with_allowance(U256::ZERO);
        assert!(!needs_approval(Some(&reader), &chain(), None, &usdc(), "1", 6).await);
        assert!(!needs_approval(Some(&reader), &chain(), Some(USER), "0x12", "1", 6).await);
        assert!(!needs_approval::<MockReader>(None, &chain(), Some(USER), &usdc(), "1", 6).await);
    }

    #[tokio::test]
    async fn test_failed_read_requires_approval() {
        // no allowance configured: the read fails
        let reader = MockReader::new();
        assert!(needs_approval(Some(&reader), &chain(), Some(USER), &usdc(), "0.000001", 6).await);
        assert!(needs_approval(Some(&reader), &chain(), Some(USER), &usdc(), "0", 6).await);
    }

    #[tokio::test]
    async fn test_bad_amount_requires_approval() {
        let reader = MockReader::new().with_allowance(U256::MAX);
        assert!(needs_approval(Some(&reader), &chain(), Some(USER), &usdc(), "lots", 6).await);
    }
}
