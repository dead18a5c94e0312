//! Per-chain RPC and block explorer endpoints

use std::collections::HashMap;

use nitro_constants::{default_explorer_url, default_rpc_url};

const RPC_URL_PREFIX: &str = "NITRO_RPC_URL_";
const EXPLORER_URL_PREFIX: &str = "NITRO_EXPLORER_URL_";

/// Endpoint lookup: explicit overrides first, then the built-in table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainEndpoints {
    rpc_overrides: HashMap<String, String>,
    explorer_overrides: HashMap<String, String>,
}

impl ChainEndpoints {
    /// Collects `NITRO_RPC_URL_<chainId>` and `NITRO_EXPLORER_URL_<chainId>`.
    pub fn from_env() -> Self {
        Self::from_vars(dotenvy::vars())
    }

    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut endpoints = Self::default();
        for (key, value) in vars {
            if value.trim().is_empty() {
                continue;
            }
            if let Some(chain_id) = key.strip_prefix(RPC_URL_PREFIX) {
                endpoints.rpc_overrides.insert(chain_id.to_string(), value);
            } else if let Some(chain_id) = key.strip_prefix(EXPLORER_URL_PREFIX) {
                endpoints
                    .explorer_overrides
                    .insert(chain_id.to_string(), value);
            }
        }
        endpoints
    }

    pub fn with_rpc_url(mut self, chain_id: &str, url: &str) -> Self {
        self.rpc_overrides
            .insert(chain_id.to_string(), url.to_string());
        self
    }

    pub fn with_explorer_url(mut self, chain_id: &str, url: &str) -> Self {
        self.explorer_overrides
            .insert(chain_id.to_string(), url.to_string());
        self
    }

    pub fn rpc_url(&self, chain_id: &str) -> Option<String> {
        self.rpc_overrides
            .get(chain_id)
            .cloned()
            .or_else(|| default_rpc_url(chain_id).map(str::to_string))
    }

    /// Explorer base URL without a trailing slash.
    pub fn explorer_url(&self, chain_id: &str) -> Option<String> {
        self.explorer_overrides
            .get(chain_id)
            .cloned()
            .or_else(|| default_explorer_url(chain_id).map(str::to_string))
            .map(|url| url.trim_end_matches('/').to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win_over_builtin_table() {
        let endpoints = ChainEndpoints::from_vars(vec![
            ("NITRO_RPC_URL_137".to_string(), "http://localhost:8545".to_string()),
            ("NITRO_EXPLORER_URL_42161".to_string(), "https://arbiscan.example/".to_string()),
            ("NITRO_RPC_URL_10".to_string(), " ".to_string()),
            ("UNRELATED".to_string(), "x".to_string()),
        ]);

        assert_eq!(endpoints.rpc_url("137").as_deref(), Some("http://localhost:8545"));
        assert_eq!(
            endpoints.explorer_url("42161").as_deref(),
            Some("https://arbiscan.example")
        );
        assert_eq!(endpoints.rpc_url("10").as_deref(), default_rpc_url("10"));
        assert!(endpoints.rpc_url("999999").is_none());
    }
}
