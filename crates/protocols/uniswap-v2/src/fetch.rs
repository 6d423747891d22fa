//! Token Metadata Fetching
//!
//! Decimal precision and display metadata for user-entered asset identifiers.

use alloy::primitives::Address;
use evm_node_client::ChainReader;
use swap_core::constants::{DEFAULT_DECIMALS, NATIVE_DECIMALS, NATIVE_SENTINEL};
use swap_core::{AssetId, Result};

use crate::state::AssetInfo;

/// Decimal precision for an identifier.
///
/// The native sentinel is 18 without a read. A malformed identifier, a
/// missing node, or a failed read all fall back to 18.
pub async fn fetch_decimals<R: ChainReader + ?Sized>(reader: Option<&R>, identifier: &str) -> u8 {
    let token = match AssetId::parse(identifier) {
        Ok(AssetId::Native) => return NATIVE_DECIMALS,
        Ok(AssetId::Token(addr)) => addr,
        Err(_) => return DEFAULT_DECIMALS,
    };
    let Some(reader) = reader else {
        return DEFAULT_DECIMALS;
    };

    match reader.decimals(token).await {
        Ok(decimals) => decimals,
        Err(e) => {
            tracing::warn!(%token, "decimals() failed, assuming {}: {}", DEFAULT_DECIMALS, e);
            DEFAULT_DECIMALS
        }
    }
}

/// Symbol, decimals, and (with an account) balance for an asset.
pub async fn fetch_asset_info<R: ChainReader + ?Sized>(
    reader: &R,
    asset: &AssetId,
    account: Option<Address>,
) -> Result<AssetInfo> {
    match asset {
        AssetId::Native => {
            let balance = match account {
                Some(owner) => Some(reader.native_balance(owner).await?),
                None => None,
            };
            Ok(AssetInfo {
                asset: *asset,
                symbol: NATIVE_SENTINEL.to_string(),
                decimals: NATIVE_DECIMALS,
                balance,
            })
        }
        AssetId::Token(token) => {
            let symbol = reader.symbol(*token).await?;
            let decimals = reader.decimals(*token).await?;
            let balance = match account {
                Some(owner) => Some(reader.balance_of(*token, owner).await?),
                None => None,
            };
            Ok(AssetInfo {
                asset: *asset,
                symbol,
                decimals,
                balance,
            })
        }
    }
}
