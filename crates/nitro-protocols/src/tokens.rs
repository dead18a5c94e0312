//! Token registry lookups with a TTL cache keyed by (chain id, lowercased symbol)

use std::sync::Arc;
use std::time::Duration;

use nitro_sdk::NitroApi;
use nitro_types::TokenConfig;
use tracing::{debug, instrument, warn};

use crate::common::{ProtocolError, Result, TtlCache};
use crate::config::SymbolCasePolicy;

pub struct TokenResolver {
    api: Arc<dyn NitroApi>,
    cache: TtlCache<(String, String), TokenConfig>,
    cases: SymbolCasePolicy,
}

impl TokenResolver {
    pub fn new(
        api: Arc<dyn NitroApi>,
        cases: SymbolCasePolicy,
        capacity: usize,
        ttl: Duration,
    ) -> Self {
        Self {
            api,
            cache: TtlCache::new(capacity, ttl),
            cases,
        }
    }

    /// Address and decimals of `symbol` on `chain_id`.
    ///
    /// Each spelling of the symbol allowed by the case policy is tried in
    /// order; the first registry result of the first spelling that returns
    /// one wins. Failed requests are logged and the next spelling is tried.
    #[instrument(skip(self))]
    pub async fn resolve(&self, chain_id: &str, symbol: &str) -> Result<TokenConfig> {
        let symbol = symbol.trim();
        let key = (chain_id.to_string(), symbol.to_lowercase());
        if let Some(token) = self.cache.get(&key).await {
            debug!("Token cache hit for {}-{}", key.0, key.1);
            return Ok(token);
        }

        for variant in self.cases.variants(symbol) {
            match self.api.fetch_tokens(chain_id, &variant).await {
                Ok(tokens) => {
                    if let Some(token) = tokens.into_iter().next() {
                        debug!(
                            "Resolved {} on chain {} to {} ({} decimals)",
                            variant, chain_id, token.address, token.decimals
                        );
                        self.cache.insert(key, token.clone()).await;
                        return Ok(token);
                    }
                    debug!("No token named {} on chain {}", variant, chain_id);
                }
                Err(e) => {
                    warn!("Token lookup for {} on chain {} failed: {}", variant, chain_id, e);
                }
            }
        }

        Err(ProtocolError::Validation(format!(
            "Failed to fetch token config for \"{symbol}\" on chainId \"{chain_id}\""
        )))
    }

    pub async fn cached_entries(&self) -> usize {
        self.cache.len().await
    }
}
