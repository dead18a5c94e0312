//! EVM chain access
//!
//! [`EvmRpc`] is the narrow surface the swap executor needs from a chain:
//! balances, ERC-20 allowance handling and submission of the service-built
//! transaction. [`AlloyEvmRpc`] implements it over JSON-RPC with a local
//! signer.

use std::str::FromStr;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use nitro_types::TxnPayload;

use crate::common::{ProtocolError, Result};

pub mod alloy_rpc;

pub use alloy_rpc::AlloyEvmRpc;

/// Signed access to one EVM chain.
///
/// Writes wait for one confirmation and fail with `ChainExecution` when the
/// transaction reverts.
#[async_trait]
pub trait EvmRpc: Send + Sync {
    /// Address of the local signer; the swap sender.
    fn signer_address(&self) -> Address;

    async fn native_balance(&self, owner: Address) -> Result<U256>;

    async fn erc20_balance(&self, token: Address, owner: Address) -> Result<U256>;

    async fn erc20_allowance(&self, token: Address, owner: Address, spender: Address)
        -> Result<U256>;

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash>;

    async fn send_transaction(&self, txn: &TxnPayload) -> Result<TxHash>;
}

pub fn parse_address(value: &str, what: &str) -> Result<Address> {
    Address::from_str(value.trim())
        .map_err(|_| ProtocolError::Validation(format!("Invalid {what} address: {value}")))
}

/// Hex (`0x…`) or decimal quantity.
pub fn parse_quantity(value: &str, what: &str) -> Result<U256> {
    U256::from_str(value.trim())
        .map_err(|_| ProtocolError::ChainExecution(format!("Invalid {what} in transaction: {value}")))
}

/// Converts the service's unsigned transaction into an alloy request. Nonce,
/// chain id and any missing gas fields are filled by the provider.
pub fn transaction_request(txn: &TxnPayload) -> Result<TransactionRequest> {
    let to = parse_address(&txn.to, "transaction target")?;
    let input = Bytes::from_str(txn.data.trim()).map_err(|_| {
        ProtocolError::ChainExecution("Transaction data is not valid hex".to_string())
    })?;

    let mut request = TransactionRequest::default().with_to(to).with_input(input);

    if let Some(value) = txn.value.as_deref() {
        request = request.with_value(parse_quantity(value, "value")?);
    }
    if let Some(gas_limit) = txn.gas_limit.as_deref() {
        let gas_limit = u64::try_from(parse_quantity(gas_limit, "gas limit")?).map_err(|_| {
            ProtocolError::ChainExecution(format!("Gas limit out of range: {gas_limit}"))
        })?;
        request = request.with_gas_limit(gas_limit);
    }
    if let Some(gas_price) = txn.gas_price.as_deref() {
        let gas_price = u128::try_from(parse_quantity(gas_price, "gas price")?).map_err(|_| {
            ProtocolError::ChainExecution(format!("Gas price out of range: {gas_price}"))
        })?;
        request = request.with_gas_price(gas_price);
    }

    Ok(request)
}
