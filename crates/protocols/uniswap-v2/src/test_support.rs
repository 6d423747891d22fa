//! In-memory chain reader and signer for tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use alloy::primitives::{address, Address, B256, U256};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use evm_node_client::ChainReader;
use swap_core::{ChainConfig, NodeError};

use crate::signer::{submission_failed, TransactionSigner};

pub const WETH: Address = address!("fFf9976782d46CC05630D1f6eBAb18b2324d6B14");
pub const USDC: Address = address!("1c7D4B196Cb0C7B01d743Fbc6116a902379C7238");
pub const DAI: Address = address!("3e622317f8C93f7328350cF0B56d9eD4C620C5d6");
pub const USER: Address = address!("00000000000000000000000000000000000000a1");

const POOL: Address = address!("00000000000000000000000000000000000000b0");

pub fn chain() -> ChainConfig {
    ChainConfig::sepolia()
}

fn mock_failure(method: &'static str) -> NodeError {
    NodeError::ContractCall {
        method,
        message: "mock failure".to_string(),
    }
}

/// Pools, hop rates, and token metadata held in memory
#[derive(Default)]
pub struct MockReader {
    pairs: HashSet<(Address, Address)>,
    /// out = in * num / den per directed hop
    rates: HashMap<(Address, Address), (U256, U256)>,
    decimals: HashMap<Address, u8>,
    symbols: HashMap<Address, String>,
    balances: HashMap<(Address, Address), U256>,
    native_balances: HashMap<Address, U256>,
    /// `None` makes `allowance` fail
    allowance: Option<U256>,
    fail_pairs: bool,
    fail_amounts: bool,
    /// Router `WETH()` answer; `WETH` when unset
    router_weth: Option<Address>,
    get_pair_calls: AtomicUsize,
    decimals_calls: AtomicUsize,
    allowance_calls: AtomicUsize,
}

impl MockReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pair(mut self, a: Address, b: Address) -> Self {
        self.pairs.insert((a, b));
        self.pairs.insert((b, a));
        self
    }

    pub fn with_rate(mut self, from: Address, to: Address, num: U256, den: U256) -> Self {
        self.rates.insert((from, to), (num, den));
        self
    }

    pub fn with_router_weth(mut self, weth: Address) -> Self {
        self.router_weth = Some(weth);
        self
    }

    pub fn with_decimals(mut self, token: Address, decimals: u8) -> Self {
        self.decimals.insert(token, decimals);
        self
    }

    pub fn with_symbol(mut self, token: Address, symbol: &str) -> Self {
        self.symbols.insert(token, symbol.to_string());
        self
    }

    pub fn with_balance(mut self, token: Address, owner: Address, amount: U256) -> Self {
        self.balances.insert((token, owner), amount);
        self
    }

    pub fn with_native_balance(mut self, owner: Address, amount: U256) -> Self {
        self.native_balances.insert(owner, amount);
        self
    }

    pub fn with_allowance(mut self, amount: U256) -> Self {
        self.allowance = Some(amount);
        self
    }

    pub fn failing_pairs(mut self) -> Self {
        self.fail_pairs = true;
        self
    }

    pub fn failing_amounts(mut self) -> Self {
        self.fail_amounts = true;
        self
    }

    pub fn get_pair_calls(&self) -> usize {
        self.get_pair_calls.load(Ordering::SeqCst)
    }

    pub fn decimals_calls(&self) -> usize {
        self.decimals_calls.load(Ordering::SeqCst)
    }

    pub fn allowance_calls(&self) -> usize {
        self.allowance_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainReader for MockReader {
    async fn decimals(&self, token: Address) -> evm_node_client::Result<u8> {
        self.decimals_calls.fetch_add(1, Ordering::SeqCst);
        self.decimals
            .get(&token)
            .copied()
            .ok_or_else(|| mock_failure("decimals"))
    }

    async fn symbol(&self, token: Address) -> evm_node_client::Result<String> {
        self.symbols
            .get(&token)
            .cloned()
            .ok_or_else(|| mock_failure("symbol"))
    }

    async fn balance_of(&self, token: Address, owner: Address) -> evm_node_client::Result<U256> {
        Ok(self.balances.get(&(token, owner)).copied().unwrap_or_default())
    }

    async fn native_balance(&self, owner: Address) -> evm_node_client::Result<U256> {
        Ok(self.native_balances.get(&owner).copied().unwrap_or_default())
    }

    async fn allowance(
        &self,
        _token: Address,
        _owner: Address,
        _spender: Address,
    ) -> evm_node_client::Result<U256> {
        self.allowance_calls.fetch_add(1, Ordering::SeqCst);
        self.allowance.ok_or_else(|| mock_failure("allowance"))
    }

    async fn get_pair(
        &self,
        _factory: Address,
        a: Address,
        b: Address,
    ) -> evm_node_client::Result<Address> {
        self.get_pair_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_pairs {
            return Err(mock_failure("getPair"));
        }
        Ok(if self.pairs.contains(&(a, b)) {
            POOL
        } else {
            Address::ZERO
        })
    }

    async fn get_amounts_out(
        &self,
        _router: Address,
        amount_in: U256,
        path: &[Address],
    ) -> evm_node_client::Result<Vec<U256>> {
        if self.fail_amounts {
            return Err(mock_failure("getAmountsOut"));
        }
        let mut amounts = vec![amount_in];
        let mut current = amount_in;
        for hop in path.windows(2) {
            let (num, den) = self
                .rates
                .get(&(hop[0], hop[1]))
                .copied()
                .ok_or_else(|| mock_failure("getAmountsOut"))?;
            current = current * num / den;
            amounts.push(current);
        }
        Ok(amounts)
    }

    async fn wrapped_native(&self, _router: Address) -> evm_node_client::Result<Address> {
        Ok(self.router_weth.unwrap_or(WETH))
    }
}

/// Signer that records every request
pub struct RecordingSigner {
    sent: Mutex<Vec<TransactionRequest>>,
    reject_with: Option<String>,
}

impl RecordingSigner {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject_with: None,
        }
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject_with: Some(message.to_string()),
        }
    }

    /// Hash returned for every accepted request
    pub fn next_hash(&self) -> B256 {
        B256::repeat_byte(0x11)
    }

    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionSigner for RecordingSigner {
    async fn send_transaction(&self, request: TransactionRequest) -> swap_core::Result<B256> {
        self.sent.lock().unwrap().push(request);
        match &self.reject_with {
            Some(message) => Err(submission_failed(message.clone())),
            None => Ok(self.next_hash()),
        }
    }
}
