//! Quote Engine
//!
//! Expected swap output via router `getAmountsOut`. Every failure on this
//! path is reported through the quote sentinels rather than as an error.

use evm_node_client::ChainReader;
use serde::{Deserialize, Serialize};
use swap_core::constants::NATIVE_DECIMALS;
use swap_core::{AssetId, ChainConfig};

use crate::router::resolve_path;
use crate::state::{Quote, SwapQuote};
use crate::units::parse_amount;

/// User inputs a quote is computed from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub token_in: String,
    pub token_out: String,
    pub amount_in: String,
    /// Precision of the input token; ignored for the native asset
    pub decimals_in: u8,
    /// Precision of the output token; ignored for the native asset
    pub decimals_out: u8,
}

impl QuoteRequest {
    pub fn new(token_in: &str, token_out: &str, amount_in: &str) -> Self {
        Self {
            token_in: token_in.to_string(),
            token_out: token_out.to_string(),
            amount_in: amount_in.to_string(),
            decimals_in: NATIVE_DECIMALS,
            decimals_out: NATIVE_DECIMALS,
        }
    }

    pub fn with_decimals(mut self, decimals_in: u8, decimals_out: u8) -> Self {
        self.decimals_in = decimals_in;
        self.decimals_out = decimals_out;
        self
    }
}

/// Decimals that actually apply to `asset`: 18 for native, else the given value
pub(crate) fn effective_decimals(asset: &AssetId, decimals: u8) -> u8 {
    if asset.is_native() {
        NATIVE_DECIMALS
    } else {
        decimals
    }
}

/// Quote `request` from scratch.
///
/// No reader or an empty amount gives [`Quote::Idle`]; an empty path gives
/// [`Quote::NoLiquidity`]; any parse or read failure gives [`Quote::Failed`].
pub async fn quote<R: ChainReader + ?Sized>(
    reader: Option<&R>,
    chain: &ChainConfig,
    request: &QuoteRequest,
) -> SwapQuote {
    let Some(reader) = reader else {
        return SwapQuote::without_path(Quote::Idle);
    };
    if request.amount_in.trim().is_empty() {
        return SwapQuote::without_path(Quote::Idle);
    }

    let (token_in, token_out) = match (
        AssetId::parse(&request.token_in),
        AssetId::parse(&request.token_out),
    ) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!("Quote failed: {}", e);
            return SwapQuote::without_path(Quote::Failed);
        }
    };

    let path = match resolve_path(reader, chain, &token_in, &token_out).await {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!("Path resolution failed: {}", e);
            return SwapQuote::without_path(Quote::Failed);
        }
    };
    if !path.is_route() {
        return SwapQuote {
            quote: Quote::NoLiquidity,
            path,
        };
    }

    let decimals_in = effective_decimals(&token_in, request.decimals_in);
    let decimals_out = effective_decimals(&token_out, request.decimals_out);

    let amount_in = match parse_amount(&request.amount_in, decimals_in) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("Quote failed: {}", e);
            return SwapQuote {
                quote: Quote::Failed,
                path,
            };
        }
    };

    let quote = match reader
        .get_amounts_out(chain.router, amount_in, path.as_slice())
        .await
    {
        Ok(amounts) => match amounts.last() {
            Some(out) => Quote::amount(*out, decimals_out),
            None => {
                tracing::warn!("getAmountsOut returned no amounts");
                Quote::Failed
            }
        },
        Err(e) => {
            tracing::warn!("Quote failed: {}", e);
            Quote::Failed
        }
    };

    tracing::debug!(%path, %quote, "quoted");
    SwapQuote { quote, path }
}
