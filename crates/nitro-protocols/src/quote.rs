//! Pathfinder quotes and transaction building

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::U256;
use nitro_sdk::{models::QuoteParams, NitroApi};
use nitro_types::{Quote, TokenConfig};
use tracing::{info, instrument};

use crate::common::{ProtocolError, Result};

#[derive(Clone)]
pub struct QuoteClient {
    api: Arc<dyn NitroApi>,
    partner_id: u32,
    request_timeout: Duration,
}

impl QuoteClient {
    pub fn new(api: Arc<dyn NitroApi>, partner_id: u32, request_timeout: Duration) -> Self {
        Self {
            api,
            partner_id,
            request_timeout,
        }
    }

    /// Requests a quote for `amount_in` base units of `from_token`. No retry.
    #[instrument(skip(self, from_token, to_token), fields(
        from_token = %from_token.address,
        to_token = %to_token.address,
        amount_in = %amount_in
    ))]
    pub async fn quote(
        &self,
        from_token: &TokenConfig,
        to_token: &TokenConfig,
        amount_in: U256,
        from_chain_id: &str,
        to_chain_id: &str,
    ) -> Result<Quote> {
        let params = QuoteParams {
            from_token_address: from_token.address.clone(),
            to_token_address: to_token.address.clone(),
            amount: amount_in.to_string(),
            from_token_chain_id: from_chain_id.to_string(),
            to_token_chain_id: to_chain_id.to_string(),
            partner_id: self.partner_id,
        };

        let quote = self
            .api
            .fetch_quote(&params)
            .await
            .map_err(|e| ProtocolError::upstream("get quote", e, self.request_timeout))?;

        info!(
            "Quote: {} {}",
            quote.normalized_amount_out(),
            quote.destination_symbol()
        );
        Ok(quote)
    }

    /// Asks the service for the unsigned transaction behind `quote`.
    #[instrument(skip(self, quote))]
    pub async fn build_transaction(
        &self,
        quote: &Quote,
        sender: &str,
        receiver: &str,
    ) -> Result<Quote> {
        let built = self
            .api
            .build_transaction(quote, sender, receiver)
            .await
            .map_err(|e| ProtocolError::upstream("build transaction", e, self.request_timeout))?;

        if built.txn.is_none() {
            return Err(ProtocolError::Upstream(
                "Unable to build transaction: response has no transaction payload".to_string(),
            ));
        }
        Ok(built)
    }
}
