//! Uniswap V2 Constants
//!
//! Display sentinels for quote states and router function names.

/// Quote display text
pub mod quote_text {
    /// No quote attempted (no node or no amount)
    pub const IDLE: &str = "-";

    /// No direct or bridged pool exists
    pub const NO_LIQUIDITY: &str = "No liquidity";

    /// Amount parsing or a chain read failed
    pub const ERROR: &str = "Quote error";
}

/// Router02 swap entry points
pub mod router_functions {
    pub const SWAP_EXACT_ETH_FOR_TOKENS: &str = "swapExactETHForTokens";
    pub const SWAP_EXACT_TOKENS_FOR_ETH: &str = "swapExactTokensForETH";
    pub const SWAP_EXACT_TOKENS_FOR_TOKENS: &str = "swapExactTokensForTokens";
}
