//! Path Resolution
//!
//! Finds a pool route between two assets: the direct pair if one exists,
//! otherwise a single hop through the wrapped native asset.

use alloy::primitives::Address;
use evm_node_client::{ChainReader, Result};
use swap_core::{AssetId, ChainConfig};

use crate::state::ResolvedPath;

/// Resolve the on-chain path for `token_in -> token_out`.
///
/// Native identifiers are normalized to the wrapped native address first.
/// Identical endpoints, or no direct and no bridged pool, give an empty path.
/// Read failures propagate.
pub async fn resolve_path<R: ChainReader + ?Sized>(
    reader: &R,
    chain: &ChainConfig,
    token_in: &AssetId,
    token_out: &AssetId,
) -> Result<ResolvedPath> {
    let bridge = chain.wrapped_native;
    let a = token_in.on_chain(bridge);
    let b = token_out.on_chain(bridge);

    if a == b {
        tracing::debug!(%a, "same asset on both sides, no route");
        return Ok(ResolvedPath::none());
    }

    if pool_exists(reader, chain.factory, a, b).await? {
        tracing::debug!(%a, %b, "direct pool");
        return Ok(ResolvedPath::direct(a, b));
    }

    // A pair that already includes the bridge has nowhere else to go
    if a == bridge || b == bridge {
        return Ok(ResolvedPath::none());
    }

    let (first_leg, second_leg) = tokio::try_join!(
        pool_exists(reader, chain.factory, a, bridge),
        pool_exists(reader, chain.factory, bridge, b),
    )?;

    if first_leg && second_leg {
        tracing::debug!(%a, %bridge, %b, "bridged route");
        Ok(ResolvedPath::bridged(a, bridge, b))
    } else {
        tracing::debug!(%a, %b, first_leg, second_leg, "no route");
        Ok(ResolvedPath::none())
    }
}

/// Whether the router's `WETH()` is the configured bridge asset.
///
/// A mismatch means bridged routes and native swaps are built against the
/// wrong token.
pub async fn check_bridge<R: ChainReader + ?Sized>(
    reader: &R,
    chain: &ChainConfig,
) -> Result<bool> {
    let on_router = reader.wrapped_native(chain.router).await?;
    if on_router != chain.wrapped_native {
        tracing::warn!(
            configured = %chain.wrapped_native,
            %on_router,
            "Router reports a different wrapped native asset than configured"
        );
        return Ok(false);
    }
    Ok(true)
}

async fn pool_exists<R: ChainReader + ?Sized>(
    reader: &R,
    factory: Address,
    a: Address,
    b: Address,
) -> Result<bool> {
    let pair = reader.get_pair(factory, a, b).await?;
    Ok(pair != Address::ZERO)
}
