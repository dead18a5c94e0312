//! In-memory stand-ins for the nitro services and an EVM chain

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use nitro_constants::NATIVE_TOKEN_ADDRESS;
use nitro_sdk::{models::QuoteParams, ApiError, NitroApi};
use nitro_types::{ChainEntry, ChainFamily, Quote, TokenConfig, TxnPayload};
use serde_json::json;

use crate::common::{ProtocolError, Result};
use crate::config::ApprovalPolicy;
use crate::evm::EvmRpc;
use crate::executor::{ensure_executable, EvmSwapExecutor, ExecutorFactory, SwapExecutor};
use crate::quote::QuoteClient;

pub const USDC_POLYGON: &str = "0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359";
pub const USDC_ARBITRUM: &str = "0xaf88d065e77c8cC2239327C5EDb3A432268e5831";
pub const SPENDER: &str = "0x00000000000000000000000000000000000000aa";
pub const SIGNER: &str = "0x00000000000000000000000000000000000000bb";
pub const SWAP_TARGET: &str = "0x00000000000000000000000000000000000000cc";

/// Registry snapshot in the order the live registry lists these chains.
pub fn sample_chains() -> Vec<ChainEntry> {
    vec![
        ChainEntry::new("Ethereum", "1", "evm", true).with_gas_token("ETH", NATIVE_TOKEN_ADDRESS),
        ChainEntry::new("Arbitrum One", "42161", "evm", true),
        ChainEntry::new("Polygon", "137", "evm", true).with_gas_token("POL", NATIVE_TOKEN_ADDRESS),
        ChainEntry::new("Avalanche C-Chain", "43114", "evm", true),
        ChainEntry::new("BNB Smart Chain", "56", "evm", true),
        ChainEntry::new("OP Mainnet", "10", "evm", true),
        ChainEntry::new("Base", "8453", "evm", true),
        ChainEntry::new("zkSync Era", "324", "evm", true),
        ChainEntry::new("Polygon zkEVM", "1101", "evm", true),
        ChainEntry::new("Manta Pacific", "169", "evm", true),
        ChainEntry::new("Mantle", "5000", "evm", true),
        ChainEntry::new("Linea", "59144", "evm", true),
        ChainEntry::new("Scroll", "534352", "evm", true),
        ChainEntry::new("Blast", "81457", "evm", true),
        ChainEntry::new("Boba Network", "288", "evm", false),
        ChainEntry::new("Solana", "solana", "solana", true),
    ]
}

/// Tokens known to [`MockNitroApi`], keyed by (chain id, exact symbol).
pub fn sample_tokens() -> HashMap<(String, String), TokenConfig> {
    let mut tokens = HashMap::new();
    tokens.insert(
        ("137".to_string(), "USDC".to_string()),
        TokenConfig::new(USDC_POLYGON, "USD Coin", 6, "137"),
    );
    tokens.insert(
        ("42161".to_string(), "USDC".to_string()),
        TokenConfig::new(USDC_ARBITRUM, "USD Coin", 6, "42161"),
    );
    tokens.insert(
        ("1".to_string(), "eth".to_string()),
        TokenConfig::new(NATIVE_TOKEN_ADDRESS, "Ether", 18, "1"),
    );
    tokens.insert(
        ("8453".to_string(), "eth".to_string()),
        TokenConfig::new(NATIVE_TOKEN_ADDRESS, "Ether", 18, "8453"),
    );
    tokens
}

/// Quote paying out 99.8% of the input. Both tokens are assumed to share
/// the same decimals.
pub fn sample_quote(params: &QuoteParams, decimals: u8, from_symbol: &str, to_symbol: &str) -> Quote {
    let amount_in: u128 = params.amount.parse().unwrap_or(0);
    let raw = json!({
        "allowanceTo": SPENDER,
        "source": {
            "tokenAmount": params.amount,
            "asset": { "decimals": decimals, "symbol": from_symbol, "address": params.from_token_address }
        },
        "destination": {
            "tokenAmount": (amount_in * 998 / 1000).to_string(),
            "asset": { "decimals": decimals, "symbol": to_symbol, "address": params.to_token_address }
        },
        "partnerId": params.partner_id
    });
    Quote::from_json(raw).unwrap_or_else(|e| panic!("sample quote must parse: {e}"))
}

/// Call counters exposed by [`MockNitroApi`]
#[derive(Debug, Default)]
pub struct ApiCalls {
    pub chains: AtomicUsize,
    pub tokens: AtomicUsize,
    pub quotes: AtomicUsize,
    pub transactions: AtomicUsize,
}

impl ApiCalls {
    pub fn chains(&self) -> usize {
        self.chains.load(Ordering::SeqCst)
    }
    pub fn tokens(&self) -> usize {
        self.tokens.load(Ordering::SeqCst)
    }
    pub fn quotes(&self) -> usize {
        self.quotes.load(Ordering::SeqCst)
    }
    pub fn transactions(&self) -> usize {
        self.transactions.load(Ordering::SeqCst)
    }
}

/// Scripted [`NitroApi`] that records every request.
pub struct MockNitroApi {
    pub chains: Vec<ChainEntry>,
    pub tokens: HashMap<(String, String), TokenConfig>,
    /// When set, quote requests fail with this status and body
    pub quote_failure: Option<(u16, String)>,
    /// Symbols whose lookups fail with a transport error
    pub failing_symbols: Vec<String>,
    pub calls: Arc<ApiCalls>,
    pub token_queries: Mutex<Vec<(String, String)>>,
    pub last_quote_params: Mutex<Option<QuoteParams>>,
    pub last_transaction: Mutex<Option<(String, String)>>,
}

impl Default for MockNitroApi {
    fn default() -> Self {
        Self {
            chains: sample_chains(),
            tokens: sample_tokens(),
            quote_failure: None,
            failing_symbols: Vec::new(),
            calls: Arc::new(ApiCalls::default()),
            token_queries: Mutex::new(Vec::new()),
            last_quote_params: Mutex::new(None),
            last_transaction: Mutex::new(None),
        }
    }
}

impl MockNitroApi {
    pub fn token_queries(&self) -> Vec<(String, String)> {
        self.token_queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }

    pub fn last_quote_params(&self) -> Option<QuoteParams> {
        self.last_quote_params.lock().ok().and_then(|p| p.clone())
    }

    pub fn last_transaction(&self) -> Option<(String, String)> {
        self.last_transaction.lock().ok().and_then(|t| t.clone())
    }

    /// Decimals and upper-cased symbol of a known token.
    fn describe(&self, address: &str) -> (u8, String) {
        self.tokens
            .iter()
            .find(|(_, t)| t.address.eq_ignore_ascii_case(address))
            .map(|((_, symbol), t)| (t.decimals, symbol.to_uppercase()))
            .unwrap_or((18, "TOKEN".to_string()))
    }
}

#[async_trait]
impl NitroApi for MockNitroApi {
    async fn fetch_chains(&self) -> std::result::Result<Vec<ChainEntry>, ApiError> {
        self.calls.chains.fetch_add(1, Ordering::SeqCst);
        Ok(self.chains.clone())
    }

    async fn fetch_tokens(
        &self,
        chain_id: &str,
        symbol: &str,
    ) -> std::result::Result<Vec<TokenConfig>, ApiError> {
        self.calls.tokens.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut queries) = self.token_queries.lock() {
            queries.push((chain_id.to_string(), symbol.to_string()));
        }
        if self.failing_symbols.iter().any(|s| s == symbol) {
            return Err(ApiError::Transport("connection reset".to_string()));
        }
        Ok(self
            .tokens
            .get(&(chain_id.to_string(), symbol.to_string()))
            .cloned()
            .into_iter()
            .collect())
    }

    async fn fetch_quote(&self, params: &QuoteParams) -> std::result::Result<Quote, ApiError> {
        self.calls.quotes.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_quote_params.lock() {
            *last = Some(params.clone());
        }
        if let Some((status, body)) = &self.quote_failure {
            return Err(ApiError::Status {
                status: *status,
                body: body.clone(),
            });
        }
        let (decimals, from_symbol) = self.describe(&params.from_token_address);
        let (_, to_symbol) = self.describe(&params.to_token_address);
        Ok(sample_quote(params, decimals, &from_symbol, &to_symbol))
    }

    async fn build_transaction(
        &self,
        quote: &Quote,
        sender: &str,
        receiver: &str,
    ) -> std::result::Result<Quote, ApiError> {
        self.calls.transactions.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_transaction.lock() {
            *last = Some((sender.to_string(), receiver.to_string()));
        }
        let mut raw = quote.raw.clone();
        raw["senderAddress"] = json!(sender);
        raw["receiverAddress"] = json!(receiver);
        raw["txn"] = json!({
            "from": sender,
            "to": SWAP_TARGET,
            "data": "0x1234abcd",
            "value": "0x0",
            "gasLimit": "350000"
        });
        Ok(Quote::from_json(raw)?)
    }
}

/// Calls recorded by [`FakeEvmRpc`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcCall {
    NativeBalance(Address),
    Erc20Balance(Address),
    Allowance(Address, Address),
    Approve { token: Address, spender: Address, amount: U256 },
    Send(TxnPayload),
}

/// Chain state held in memory. Approvals update the allowance.
pub struct FakeEvmRpc {
    pub signer: Address,
    pub native_balance: U256,
    pub token_balances: HashMap<Address, U256>,
    pub allowances: Mutex<HashMap<(Address, Address), U256>>,
    pub revert_swap: bool,
    pub calls: Mutex<Vec<RpcCall>>,
}

impl Default for FakeEvmRpc {
    fn default() -> Self {
        Self {
            signer: address(SIGNER),
            native_balance: U256::ZERO,
            token_balances: HashMap::new(),
            allowances: Mutex::new(HashMap::new()),
            revert_swap: false,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeEvmRpc {
    pub fn with_native_balance(mut self, balance: U256) -> Self {
        self.native_balance = balance;
        self
    }

    pub fn with_token_balance(mut self, token: &str, balance: U256) -> Self {
        self.token_balances.insert(address(token), balance);
        self
    }

    pub fn with_allowance(self, token: &str, spender: &str, amount: U256) -> Self {
        if let Ok(mut allowances) = self.allowances.lock() {
            allowances.insert((address(token), address(spender)), amount);
        }
        self
    }

    pub fn reverting(mut self) -> Self {
        self.revert_swap = true;
        self
    }

    pub fn calls(&self) -> Vec<RpcCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn approvals(&self) -> Vec<RpcCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, RpcCall::Approve { .. }))
            .collect()
    }

    pub fn sends(&self) -> Vec<RpcCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, RpcCall::Send(_)))
            .collect()
    }

    fn record(&self, call: RpcCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

pub fn address(value: &str) -> Address {
    value
        .parse()
        .unwrap_or_else(|e| panic!("test address {value} must parse: {e}"))
}

#[async_trait]
impl EvmRpc for FakeEvmRpc {
    fn signer_address(&self) -> Address {
        self.signer
    }

    async fn native_balance(&self, owner: Address) -> Result<U256> {
        self.record(RpcCall::NativeBalance(owner));
        Ok(self.native_balance)
    }

    async fn erc20_balance(&self, token: Address, _owner: Address) -> Result<U256> {
        self.record(RpcCall::Erc20Balance(token));
        Ok(self.token_balances.get(&token).copied().unwrap_or_default())
    }

    async fn erc20_allowance(
        &self,
        token: Address,
        _owner: Address,
        spender: Address,
    ) -> Result<U256> {
        self.record(RpcCall::Allowance(token, spender));
        Ok(self
            .allowances
            .lock()
            .ok()
            .and_then(|a| a.get(&(token, spender)).copied())
            .unwrap_or_default())
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash> {
        self.record(RpcCall::Approve {
            token,
            spender,
            amount,
        });
        if let Ok(mut allowances) = self.allowances.lock() {
            allowances.insert((token, spender), amount);
        }
        Ok(TxHash::repeat_byte(0xa1))
    }

    async fn send_transaction(&self, txn: &TxnPayload) -> Result<TxHash> {
        self.record(RpcCall::Send(txn.clone()));
        if self.revert_swap {
            return Err(ProtocolError::ChainExecution(
                "swap transaction reverted".to_string(),
            ));
        }
        Ok(TxHash::repeat_byte(0x5e))
    }
}

/// Hands out one shared [`EvmSwapExecutor`] over a [`FakeEvmRpc`].
pub struct FakeExecutorFactory {
    pub rpc: Arc<FakeEvmRpc>,
    pub quotes: QuoteClient,
    pub approval_policy: ApprovalPolicy,
    pub explorer_base: Option<String>,
}

#[async_trait]
impl ExecutorFactory for FakeExecutorFactory {
    async fn executor_for(
        &self,
        family: &ChainFamily,
        _chain_id: &str,
    ) -> Result<Arc<dyn SwapExecutor>> {
        ensure_executable(family)?;
        Ok(Arc::new(EvmSwapExecutor::new(
            self.rpc.clone(),
            self.quotes.clone(),
            self.approval_policy,
            self.explorer_base.clone(),
        )))
    }
}
