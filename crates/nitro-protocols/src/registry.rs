//! Chain registry resolution
//!
//! Free-text chain names ("arb", "BSC", "polygon pos") are mapped onto the
//! registry's canonical names in three passes:
//!
//! 1. the static alias table, in declaration order; a key whose aliases
//!    contain the input picks the first registry entry whose lowercased name
//!    is one of those aliases or contains the key;
//! 2. a bidirectional substring match against every registry name;
//! 3. the raw input, which the exact-name lookup then rejects.
//!
//! Ties always go to the first registry entry in the order the registry
//! returned them. The snapshot never reorders entries.

use std::sync::Arc;
use std::time::Duration;

use nitro_constants::CHAIN_NAME_ALIASES;
use nitro_sdk::NitroApi;
use nitro_types::{ChainEntry, ChainValidation, GasToken, ResolvedSwap};
use tracing::{debug, info, instrument};

use crate::common::{ProtocolError, Result, TtlCache};

const SNAPSHOT_KEY: &str = "chains";

/// Immutable view of one registry fetch
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: Vec<ChainEntry>,
}

impl ChainRegistry {
    pub fn new(chains: Vec<ChainEntry>) -> Self {
        Self { chains }
    }

    pub fn chains(&self) -> &[ChainEntry] {
        &self.chains
    }

    pub fn live_chains(&self) -> impl Iterator<Item = &ChainEntry> {
        self.chains.iter().filter(|c| c.is_live)
    }

    /// Canonical registry name for `input`, or the input itself when nothing
    /// matches.
    pub fn normalize_name(&self, input: &str) -> String {
        let normalized = input.trim().to_lowercase();

        for (key, aliases) in CHAIN_NAME_ALIASES {
            if !aliases.contains(&normalized.as_str()) {
                continue;
            }
            let hit = self.chains.iter().find(|chain| {
                let name = chain.name.to_lowercase();
                aliases.contains(&name.as_str()) || name.contains(*key)
            });
            if let Some(chain) = hit {
                return chain.name.clone();
            }
        }

        if !normalized.is_empty() {
            let partial = self.chains.iter().find(|chain| {
                let name = chain.name.to_lowercase();
                !name.is_empty() && (name.contains(&normalized) || normalized.contains(&name))
            });
            if let Some(chain) = partial {
                return chain.name.clone();
            }
        }

        input.to_string()
    }

    /// Case-insensitive exact lookup of a canonical name.
    pub fn find_exact(&self, name: &str) -> Option<&ChainEntry> {
        let name = name.trim();
        self.chains
            .iter()
            .find(|chain| chain.name.eq_ignore_ascii_case(name))
    }

    pub fn resolve(&self, name: &str) -> Option<&ChainEntry> {
        if name.trim().is_empty() {
            return None;
        }
        self.find_exact(&self.normalize_name(name))
    }

    pub fn chain_id(&self, name: &str) -> Option<&str> {
        self.resolve(name).map(|c| c.chain_id.as_str())
    }

    pub fn chain_type(&self, name: &str) -> Option<&str> {
        self.resolve(name).map(|c| c.chain_type.as_str())
    }

    pub fn is_chain_live(&self, name: &str) -> bool {
        self.resolve(name).is_some_and(|c| c.is_live)
    }

    pub fn gas_token(&self, name: &str) -> Option<&GasToken> {
        self.resolve(name).and_then(|c| c.gas_token.as_ref())
    }

    /// Validation record for one chain name. Never fails.
    pub fn validate(&self, name: &str) -> ChainValidation {
        if name.trim().is_empty() {
            return ChainValidation {
                is_valid: false,
                chain_id: None,
                is_live: false,
                chain_type: None,
                normalized_name: String::new(),
                message: Some("Chain name is required".to_string()),
            };
        }

        let normalized_name = self.normalize_name(name);
        match self.find_exact(&normalized_name) {
            Some(chain) => ChainValidation {
                is_valid: true,
                chain_id: Some(chain.chain_id.clone()),
                is_live: chain.is_live,
                chain_type: Some(chain.chain_type.clone()),
                normalized_name,
                message: None,
            },
            None => ChainValidation {
                is_valid: false,
                chain_id: None,
                is_live: false,
                chain_type: None,
                normalized_name,
                message: Some(format!("Invalid chain name: {name}")),
            },
        }
    }

    /// Validates both sides of a swap. Unknown chains are reported before
    /// inactive ones, source before destination.
    pub fn process_chain_swap(&self, from_chain: &str, to_chain: &str) -> Result<ResolvedSwap> {
        let source = self.validate(from_chain);
        let destination = self.validate(to_chain);

        if !source.is_valid {
            return Err(ProtocolError::Validation(format!(
                "Invalid source chain: {from_chain}"
            )));
        }
        if !destination.is_valid {
            return Err(ProtocolError::Validation(format!(
                "Invalid destination chain: {to_chain}"
            )));
        }
        if !source.is_live {
            return Err(ProtocolError::Validation(format!(
                "Source chain {} is not currently active",
                source.normalized_name
            )));
        }
        if !destination.is_live {
            return Err(ProtocolError::Validation(format!(
                "Destination chain {} is not currently active",
                destination.normalized_name
            )));
        }

        Ok(ResolvedSwap {
            from_chain_id: source.chain_id.unwrap_or_default(),
            to_chain_id: destination.chain_id.unwrap_or_default(),
            from_chain_id_type: source.chain_type.unwrap_or_default(),
            to_chain_id_type: destination.chain_type.unwrap_or_default(),
        })
    }
}

/// Fetches registry snapshots and keeps the latest one for a TTL
pub struct ChainRegistryResolver {
    api: Arc<dyn NitroApi>,
    cache: TtlCache<&'static str, Arc<ChainRegistry>>,
    request_timeout: Duration,
}

impl ChainRegistryResolver {
    pub fn new(api: Arc<dyn NitroApi>, ttl: Duration, request_timeout: Duration) -> Self {
        Self {
            api,
            cache: TtlCache::new(1, ttl),
            request_timeout,
        }
    }

    /// Current registry snapshot, refetched once the cached one expires.
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<Arc<ChainRegistry>> {
        if let Some(registry) = self.cache.get(&SNAPSHOT_KEY).await {
            debug!("Chain registry cache hit ({} chains)", registry.chains.len());
            return Ok(registry);
        }

        let chains = self.api.fetch_chains().await.map_err(|e| {
            ProtocolError::upstream("fetch chain registry", e, self.request_timeout)
        })?;
        info!("Fetched chain registry with {} chains", chains.len());

        let registry = Arc::new(ChainRegistry::new(chains));
        self.cache.insert(SNAPSHOT_KEY, registry.clone()).await;
        Ok(registry)
    }

    pub async fn process_chain_swap(&self, from_chain: &str, to_chain: &str) -> Result<ResolvedSwap> {
        let registry = self.snapshot().await?;
        let resolved = registry.process_chain_swap(from_chain, to_chain)?;
        debug!(?resolved, "Resolved swap chains");
        Ok(resolved)
    }

    pub async fn invalidate(&self) {
        self.cache.clear().await;
    }
}
