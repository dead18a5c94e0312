use std::fmt::Display;
use std::future::{Future, IntoFuture};
use std::time::Duration;

use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use async_trait::async_trait;
use nitro_types::TxnPayload;
use tracing::{debug, info, instrument};

use super::{transaction_request, EvmRpc};
use crate::common::{ProtocolError, Result};
use crate::config::SecretKey;

sol! {
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address owner) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

/// JSON-RPC backed [`EvmRpc`] signing with a local private key
pub struct AlloyEvmRpc {
    provider: DynProvider,
    signer_address: Address,
    rpc_timeout: Duration,
    confirmation_timeout: Duration,
}

impl AlloyEvmRpc {
    pub fn connect(
        rpc_url: &str,
        key: &SecretKey,
        rpc_timeout: Duration,
        confirmation_timeout: Duration,
    ) -> Result<Self> {
        let signer: PrivateKeySigner = key
            .expose()
            .parse()
            .map_err(|_| ProtocolError::Config("EVM private key could not be parsed".to_string()))?;
        let signer_address = signer.address();
        let url = rpc_url
            .parse()
            .map_err(|e| ProtocolError::Config(format!("Invalid RPC URL {rpc_url}: {e}")))?;

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();

        debug!("Connected EVM signer {} to {}", signer_address, rpc_url);
        Ok(Self {
            provider,
            signer_address,
            rpc_timeout,
            confirmation_timeout,
        })
    }

    /// Runs one RPC call, or a fill-sign-broadcast, under the per-call timeout.
    async fn timed<T, E, F>(&self, operation: &str, call: F) -> Result<T>
    where
        F: IntoFuture<Output = std::result::Result<T, E>>,
        E: Display,
    {
        match tokio::time::timeout(self.rpc_timeout, call.into_future()).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(ProtocolError::ChainExecution(format!(
                "{operation} failed: {e}"
            ))),
            Err(_) => Err(ProtocolError::Timeout {
                operation: operation.to_string(),
                after: self.rpc_timeout,
            }),
        }
    }

    async fn await_receipt<E, F>(
        &self,
        operation: &str,
        tx_hash: TxHash,
        receipt: F,
    ) -> Result<TxHash>
    where
        F: Future<Output = std::result::Result<TransactionReceipt, E>>,
        E: Display,
    {
        let receipt = match tokio::time::timeout(self.confirmation_timeout, receipt).await {
            Ok(Ok(receipt)) => receipt,
            Ok(Err(e)) => {
                return Err(ProtocolError::ChainExecution(format!(
                    "{operation} transaction {tx_hash} was not confirmed: {e}"
                )))
            }
            Err(_) => {
                return Err(ProtocolError::Timeout {
                    operation: format!("{operation} confirmation"),
                    after: self.confirmation_timeout,
                })
            }
        };

        if !receipt.status() {
            return Err(ProtocolError::ChainExecution(format!(
                "{operation} transaction {tx_hash} reverted"
            )));
        }
        info!("{} transaction {} confirmed", operation, tx_hash);
        Ok(receipt.transaction_hash)
    }
}

#[async_trait]
impl EvmRpc for AlloyEvmRpc {
    fn signer_address(&self) -> Address {
        self.signer_address
    }

    async fn native_balance(&self, owner: Address) -> Result<U256> {
        self.timed("eth_getBalance", async { self.provider.get_balance(owner).await })
            .await
    }

    async fn erc20_balance(&self, token: Address, owner: Address) -> Result<U256> {
        let contract = IERC20::new(token, &self.provider);
        self.timed("balanceOf", contract.balanceOf(owner).call()).await
    }

    async fn erc20_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Result<U256> {
        let contract = IERC20::new(token, &self.provider);
        self.timed("allowance", contract.allowance(owner, spender).call())
            .await
    }

    #[instrument(skip(self), fields(token = %token, spender = %spender))]
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxHash> {
        let contract = IERC20::new(token, &self.provider);
        let pending = self
            .timed("approve broadcast", contract.approve(spender, amount).send())
            .await?;
        let tx_hash = *pending.tx_hash();
        info!("Submitted approval {}", tx_hash);
        self.await_receipt("approve", tx_hash, pending.get_receipt())
            .await
    }

    #[instrument(skip(self, txn), fields(to = %txn.to))]
    async fn send_transaction(&self, txn: &TxnPayload) -> Result<TxHash> {
        let request = transaction_request(txn)?.with_from(self.signer_address);
        let pending = self
            .timed("swap broadcast", self.provider.send_transaction(request))
            .await?;
        let tx_hash = *pending.tx_hash();
        info!("Broadcast swap transaction {}", tx_hash);
        self.await_receipt("swap", tx_hash, pending.get_receipt())
            .await
    }
}
