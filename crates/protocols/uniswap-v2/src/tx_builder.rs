//! Swap Transaction Builder
//!
//! Builds unsigned router and approval calls for the external signer.
//!
//! A swap is only built when a wallet is connected, the quote is a numeric
//! amount, and the path has at least two entries. Each unmet precondition is
//! reported as an error; nothing is built or submitted in that case.
//!
//! Three router entry points are used:
//! - `swapExactETHForTokens`: native in, value = amountIn at 18 decimals
//! - `swapExactTokensForETH`: token in, native out
//! - `swapExactTokensForTokens`: token in, token out

use std::time::{SystemTime, UNIX_EPOCH};

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use evm_node_client::contracts::{IUniswapV2Router02, IERC20};
use evm_node_client::ChainReader;
use serde::{Deserialize, Serialize};
use swap_core::constants::BPS_DENOMINATOR;
use swap_core::{AssetId, ChainConfig, ProtocolError, Result, SwapPolicy, TxError};

use crate::quote::effective_decimals;
use crate::router::resolve_path;
use crate::state::{ApprovalTransaction, Quote, ResolvedPath, SwapKind, SwapTransaction};
use crate::units::parse_amount;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything needed to build a swap once the path is known
#[derive(Debug, Clone)]
pub struct SwapParams {
    pub token_in: AssetId,
    pub token_out: AssetId,
    pub amount_in: String,
    pub decimals_in: u8,
    pub decimals_out: u8,
    pub quote: Quote,
    pub path: ResolvedPath,
    pub account: Option<Address>,
    /// Unix seconds the deadline is counted from
    pub now_unix: u64,
}

/// Swap request as entered by the user, with the quote text on display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapRequest {
    pub token_in: String,
    pub token_out: String,
    pub amount_in: String,
    pub decimals_in: u8,
    pub decimals_out: u8,
    pub quote: String,
}

// ---------------------------------------------------------------------------
// Swap
// ---------------------------------------------------------------------------

/// Current unix time in seconds
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Minimum acceptable output after slippage, rounded down.
///
/// At the default 50 bps this is `floor(out * 995 / 1000)`.
pub fn min_output(amount_out: U256, slippage_bps: u64) -> Result<U256> {
    let keep = BPS_DENOMINATOR.saturating_sub(slippage_bps);
    let scaled = amount_out
        .checked_mul(U256::from(keep))
        .ok_or_else(|| TxError::BuildFailed {
            message: format!("amount out {} overflows slippage math", amount_out),
        })?;
    Ok(scaled / U256::from(BPS_DENOMINATOR))
}

/// Check swap preconditions in order: wallet, quote, path.
fn check_preconditions(params: &SwapParams) -> Result<(Address, U256)> {
    let recipient = params.account.ok_or(ProtocolError::WalletNotConnected)?;
    let amount_out = params
        .quote
        .amount_out()
        .ok_or_else(|| ProtocolError::QuoteUnavailable {
            state: params.quote.to_string(),
        })?;
    if !params.path.is_route() {
        return Err(ProtocolError::NoRoute.into());
    }
    Ok((recipient, amount_out))
}

/// Build the router call for a quoted swap.
pub fn build_swap_tx(
    chain: &ChainConfig,
    policy: &SwapPolicy,
    params: &SwapParams,
) -> Result<SwapTransaction> {
    let (recipient, amount_out) = check_preconditions(params)?;

    let deadline = U256::from(params.now_unix.saturating_add(policy.deadline_secs));
    let amount_out_min = min_output(amount_out, policy.slippage_bps)?;
    let kind = SwapKind::for_assets(&params.token_in, &params.token_out);
    let amount_in = parse_amount(
        &params.amount_in,
        effective_decimals(&params.token_in, params.decimals_in),
    )?;
    let path = params.path.to_vec();

    let (calldata, value) = match kind {
        SwapKind::ExactEthForTokens => (
            IUniswapV2Router02::swapExactETHForTokensCall {
                amountOutMin: amount_out_min,
                path,
                to: recipient,
                deadline,
            }
            .abi_encode(),
            amount_in,
        ),
        SwapKind::ExactTokensForEth => (
            IUniswapV2Router02::swapExactTokensForETHCall {
                amountIn: amount_in,
                amountOutMin: amount_out_min,
                path,
                to: recipient,
                deadline,
            }
            .abi_encode(),
            U256::ZERO,
        ),
        SwapKind::ExactTokensForTokens => (
            IUniswapV2Router02::swapExactTokensForTokensCall {
                amountIn: amount_in,
                amountOutMin: amount_out_min,
                path,
                to: recipient,
                deadline,
            }
            .abi_encode(),
            U256::ZERO,
        ),
    };

    tracing::debug!(
        %kind,
        %amount_in,
        %amount_out,
        %amount_out_min,
        %deadline,
        "Built swap"
    );

    Ok(SwapTransaction {
        kind,
        router: chain.router,
        recipient,
        path: params.path.clone(),
        amount_in,
        amount_out_min,
        deadline,
        value,
        calldata: Bytes::from(calldata),
    })
}

/// Re-resolve the path for a request and build its swap.
///
/// The displayed quote text is read back at the output precision; sentinel
/// texts fail the quote precondition.
pub async fn prepare_swap<R: ChainReader + ?Sized>(
    reader: &R,
    chain: &ChainConfig,
    policy: &SwapPolicy,
    request: &SwapRequest,
    account: Option<Address>,
) -> Result<SwapTransaction> {
    let account = Some(account.ok_or(ProtocolError::WalletNotConnected)?);
    let token_in = AssetId::parse(&request.token_in)?;
    let token_out = AssetId::parse(&request.token_out)?;
    let quote = Quote::parse_display(
        &request.quote,
        effective_decimals(&token_out, request.decimals_out),
    )?;
    if !quote.is_executable() {
        return Err(ProtocolError::QuoteUnavailable {
            state: quote.to_string(),
        }
        .into());
    }

    let path = resolve_path(reader, chain, &token_in, &token_out).await?;

    build_swap_tx(
        chain,
        policy,
        &SwapParams {
            token_in,
            token_out,
            amount_in: request.amount_in.clone(),
            decimals_in: request.decimals_in,
            decimals_out: request.decimals_out,
            quote,
            path,
            account,
            now_unix: unix_now(),
        },
    )
}

// ---------------------------------------------------------------------------
// Approval
// ---------------------------------------------------------------------------

/// Build `approve(router, amount_in)` on the input token.
///
/// An empty amount approves zero.
pub fn build_approval_tx(
    chain: &ChainConfig,
    account: Option<Address>,
    token_in: &AssetId,
    amount_in: &str,
    decimals_in: u8,
) -> Result<ApprovalTransaction> {
    let owner = account.ok_or(ProtocolError::WalletNotConnected)?;
    let token = token_in
        .token_address()
        .ok_or(ProtocolError::NativeAssetApproval)?;

    let amount_text = if amount_in.trim().is_empty() { "0" } else { amount_in };
    let amount = parse_amount(amount_text, decimals_in)?;

    let calldata = IERC20::approveCall {
        spender: chain.router,
        amount,
    }
    .abi_encode();

    tracing::debug!(%token, %owner, %amount, "Built approval");

    Ok(ApprovalTransaction {
        owner,
        token,
        spender: chain.router,
        amount,
        calldata: Bytes::from(calldata),
    })
}
