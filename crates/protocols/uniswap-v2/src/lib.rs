//! Uniswap V2 Protocol Implementation
//!
//! This crate resolves pool routes, quotes swaps, checks router allowances,
//! and builds the unsigned router and approval calls a wallet submits.

pub mod approval;
pub mod constants;
pub mod fetch;
pub mod quote;
pub mod router;
pub mod sequence;
pub mod signer;
pub mod state;
pub mod tx_builder;
pub mod units;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use approval::needs_approval;
pub use constants::{quote_text, router_functions};
pub use fetch::{fetch_asset_info, fetch_decimals};
pub use quote::{quote, QuoteRequest};
pub use router::{check_bridge, resolve_path};
pub use sequence::{Sequenced, Ticket};
pub use signer::{submission_failed, submit_approval, submit_swap, TransactionSigner};
pub use state::{
    ApprovalTransaction, AssetInfo, PendingKind, PendingTransaction, Quote, ResolvedPath,
    SwapKind, SwapQuote, SwapTransaction,
};
pub use tx_builder::{
    build_approval_tx, build_swap_tx, min_output, prepare_swap, unix_now, SwapParams, SwapRequest,
};
pub use units::{format_amount, parse_amount};
