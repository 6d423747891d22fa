//! Read-only chain access used by the swap logic
//!
//! All methods are pure reads. Implementations must not retry; a failed read
//! is reported once and the caller decides how to degrade.

use alloy::primitives::{Address, U256};
use async_trait::async_trait;

use crate::Result;

#[async_trait]
pub trait ChainReader: Send + Sync {
    /// ERC-20 `decimals()`
    async fn decimals(&self, token: Address) -> Result<u8>;

    /// ERC-20 `symbol()`
    async fn symbol(&self, token: Address) -> Result<String>;

    /// ERC-20 `balanceOf(owner)`
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256>;

    /// Native balance of `owner`
    async fn native_balance(&self, owner: Address) -> Result<U256>;

    /// ERC-20 `allowance(owner, spender)`
    async fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<U256>;

    /// Factory `getPair(a, b)`; the zero address when no pool exists
    async fn get_pair(&self, factory: Address, a: Address, b: Address) -> Result<Address>;

    /// Router `getAmountsOut(amountIn, path)`; one entry per path element
    async fn get_amounts_out(
        &self,
        router: Address,
        amount_in: U256,
        path: &[Address],
    ) -> Result<Vec<U256>>;

    /// Router `WETH()`
    async fn wrapped_native(&self, router: Address) -> Result<Address>;
}
