//! Swap execution
//!
//! Runs after the user confirmed a quote. Each step is a hard failure point
//! and nothing is retried or rolled back:
//!
//! 1. balance check (native or ERC-20);
//! 2. ERC-20 allowance top-up for the quote's spender;
//! 3. transaction build through the quote service;
//! 4. sign, broadcast, wait for one confirmation.

use std::sync::Arc;

use alloy::primitives::{TxHash, U256};
use async_trait::async_trait;
use nitro_constants::is_native_token;
use nitro_types::{ChainFamily, Quote, TokenConfig};
use tracing::{info, instrument, warn};

use crate::common::{ProtocolError, Result};
use crate::config::{ApprovalPolicy, NitroConfig};
use crate::evm::{parse_address, AlloyEvmRpc, EvmRpc};
use crate::quote::QuoteClient;

/// Everything needed to execute one confirmed swap
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    pub source_chain_id: String,
    pub from_token: TokenConfig,
    pub amount_in: U256,
    pub quote: Quote,
    /// Destination-chain recipient
    pub recipient: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReceipt {
    pub tx_hash: String,
    pub approval_tx_hash: Option<String>,
    /// `<explorer>/tx/<hash>` when the source chain has a known explorer
    pub explorer_url: Option<String>,
}

#[async_trait]
pub trait SwapExecutor: Send + Sync {
    async fn execute(&self, plan: &ExecutionPlan) -> Result<ExecutionReceipt>;
}

/// Hands out an executor for the source chain of a swap
#[async_trait]
pub trait ExecutorFactory: Send + Sync {
    async fn executor_for(
        &self,
        family: &ChainFamily,
        chain_id: &str,
    ) -> Result<Arc<dyn SwapExecutor>>;
}

/// Fails for chain families this crate cannot sign for.
pub fn ensure_executable(family: &ChainFamily) -> Result<()> {
    match family {
        ChainFamily::Evm => Ok(()),
        ChainFamily::Other(kind) => Err(ProtocolError::Validation(format!(
            "Swap execution is not supported for {kind} chains"
        ))),
    }
}

pub fn explorer_tx_url(explorer_base: Option<&str>, tx_hash: &str) -> Option<String> {
    explorer_base.map(|base| format!("{}/tx/{}", base.trim_end_matches('/'), tx_hash))
}

pub struct EvmSwapExecutor {
    rpc: Arc<dyn EvmRpc>,
    quotes: QuoteClient,
    approval_policy: ApprovalPolicy,
    explorer_base: Option<String>,
}

impl EvmSwapExecutor {
    pub fn new(
        rpc: Arc<dyn EvmRpc>,
        quotes: QuoteClient,
        approval_policy: ApprovalPolicy,
        explorer_base: Option<String>,
    ) -> Self {
        Self {
            rpc,
            quotes,
            approval_policy,
            explorer_base,
        }
    }

    fn approval_amount(&self, required: U256) -> U256 {
        match self.approval_policy {
            ApprovalPolicy::Exact => required,
            ApprovalPolicy::Unlimited => U256::MAX,
        }
    }

    async fn ensure_allowance(&self, plan: &ExecutionPlan) -> Result<Option<TxHash>> {
        let spender_raw = plan.quote.allowance_to.as_deref().ok_or_else(|| {
            ProtocolError::Upstream("Quote does not name an allowance spender".to_string())
        })?;
        let spender = parse_address(spender_raw, "allowance spender")?;
        let token = parse_address(&plan.from_token.address, "token")?;
        let owner = self.rpc.signer_address();

        let allowance = self.rpc.erc20_allowance(token, owner, spender).await?;
        if allowance >= plan.amount_in {
            info!("Allowance {} already covers {}", allowance, plan.amount_in);
            return Ok(None);
        }

        let amount = self.approval_amount(plan.amount_in);
        info!(
            "Allowance {} below {}, approving {} for {}",
            allowance, plan.amount_in, amount, spender
        );
        let tx_hash = self.rpc.approve(token, spender, amount).await?;
        Ok(Some(tx_hash))
    }
}

#[async_trait]
impl SwapExecutor for EvmSwapExecutor {
    #[instrument(skip(self, plan), fields(
        chain_id = %plan.source_chain_id,
        token = %plan.from_token.address,
        amount_in = %plan.amount_in
    ))]
    async fn execute(&self, plan: &ExecutionPlan) -> Result<ExecutionReceipt> {
        let owner = self.rpc.signer_address();
        let native = is_native_token(&plan.from_token.address);

        let available = if native {
            self.rpc.native_balance(owner).await?
        } else {
            let token = parse_address(&plan.from_token.address, "token")?;
            self.rpc.erc20_balance(token, owner).await?
        };
        if available < plan.amount_in {
            warn!("Insufficient balance: have {}, need {}", available, plan.amount_in);
            return Err(ProtocolError::InsufficientFunds {
                required: plan.amount_in,
                available,
            });
        }

        let approval_tx_hash = if native {
            None
        } else {
            self.ensure_allowance(plan).await?
        };

        let sender = owner.to_string();
        let built = self
            .quotes
            .build_transaction(&plan.quote, &sender, &plan.recipient)
            .await?;
        let txn = built.txn.as_ref().ok_or_else(|| {
            ProtocolError::Upstream("Unable to build transaction: no payload".to_string())
        })?;

        let tx_hash = self.rpc.send_transaction(txn).await?.to_string();
        let explorer_url = explorer_tx_url(self.explorer_base.as_deref(), &tx_hash);
        info!("Swap confirmed: {}", tx_hash);

        Ok(ExecutionReceipt {
            tx_hash,
            approval_tx_hash: approval_tx_hash.map(|h| h.to_string()),
            explorer_url,
        })
    }
}

/// Builds alloy-backed executors from configuration
pub struct EvmExecutorFactory {
    config: Arc<NitroConfig>,
    quotes: QuoteClient,
}

impl EvmExecutorFactory {
    pub fn new(config: Arc<NitroConfig>, quotes: QuoteClient) -> Self {
        Self { config, quotes }
    }
}

#[async_trait]
impl ExecutorFactory for EvmExecutorFactory {
    async fn executor_for(
        &self,
        family: &ChainFamily,
        chain_id: &str,
    ) -> Result<Arc<dyn SwapExecutor>> {
        ensure_executable(family)?;

        let rpc_url = self.config.endpoints.rpc_url(chain_id).ok_or_else(|| {
            ProtocolError::Config(format!(
                "No RPC URL configured for chain {chain_id}; set NITRO_RPC_URL_{chain_id}"
            ))
        })?;
        let key = self.config.signing_key()?;
        let rpc = AlloyEvmRpc::connect(
            &rpc_url,
            key,
            self.config.rpc_timeout,
            self.config.confirmation_timeout,
        )?;

        Ok(Arc::new(EvmSwapExecutor::new(
            Arc::new(rpc),
            self.quotes.clone(),
            self.config.approval_policy,
            self.config.endpoints.explorer_url(chain_id),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_evm_execution_is_refused() {
        assert!(ensure_executable(&ChainFamily::Evm).is_ok());
        let err = ensure_executable(&ChainFamily::from("solana")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Swap execution is not supported for solana chains"
        );
    }

    #[test]
    fn test_explorer_tx_url() {
        assert_eq!(
            explorer_tx_url(Some("https://polygonscan.com/"), "0xabc").as_deref(),
            Some("https://polygonscan.com/tx/0xabc")
        );
        assert!(explorer_tx_url(None, "0xabc").is_none());
    }
}
