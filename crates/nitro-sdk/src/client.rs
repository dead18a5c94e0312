use async_trait::async_trait;
use nitro_types::{ChainEntry, Quote, TokenConfig};
use tracing::{debug, instrument};

use crate::{api, api_client, config::ApiConfig, error::ApiError, models::QuoteParams};

/// Remote operations the swap flow needs from the nitro services.
#[async_trait]
pub trait NitroApi: Send + Sync {
    async fn fetch_chains(&self) -> Result<Vec<ChainEntry>, ApiError>;

    async fn fetch_tokens(&self, chain_id: &str, symbol: &str)
        -> Result<Vec<TokenConfig>, ApiError>;

    async fn fetch_quote(&self, params: &QuoteParams) -> Result<Quote, ApiError>;

    async fn build_transaction(
        &self,
        quote: &Quote,
        sender: &str,
        receiver: &str,
    ) -> Result<Quote, ApiError>;
}

/// reqwest-backed [`NitroApi`].
#[derive(Debug, Clone)]
pub struct NitroClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl NitroClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = api_client::api_client(&config)?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl NitroApi for NitroClient {
    #[instrument(skip(self))]
    async fn fetch_chains(&self) -> Result<Vec<ChainEntry>, ApiError> {
        api::fetch_chains(&self.http, &self.config).await
    }

    #[instrument(skip(self))]
    async fn fetch_tokens(
        &self,
        chain_id: &str,
        symbol: &str,
    ) -> Result<Vec<TokenConfig>, ApiError> {
        api::fetch_tokens(&self.http, &self.config, chain_id, symbol).await
    }

    #[instrument(skip(self, params), fields(
        from_chain = %params.from_token_chain_id,
        to_chain = %params.to_token_chain_id,
        amount = %params.amount
    ))]
    async fn fetch_quote(&self, params: &QuoteParams) -> Result<Quote, ApiError> {
        debug!("Requesting quote: {:?}", params);
        api::get_quote(&self.http, &self.config, params).await
    }

    #[instrument(skip(self, quote))]
    async fn build_transaction(
        &self,
        quote: &Quote,
        sender: &str,
        receiver: &str,
    ) -> Result<Quote, ApiError> {
        api::build_transaction(&self.http, &self.config, quote, sender, receiver).await
    }
}
