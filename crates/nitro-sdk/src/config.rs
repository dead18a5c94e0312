use std::time::Duration;

use nitro_constants::{DEFAULT_PATHFINDER_BASE_URL, DEFAULT_REGISTRY_BASE_URL};

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Endpoints and HTTP settings for the nitro services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub registry_base_url: String,
    pub pathfinder_base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            registry_base_url: DEFAULT_REGISTRY_BASE_URL.to_string(),
            pathfinder_base_url: DEFAULT_PATHFINDER_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            registry_base_url: dotenvy::var("NITRO_REGISTRY_BASE_URL")
                .unwrap_or(defaults.registry_base_url),
            pathfinder_base_url: dotenvy::var("NITRO_PATHFINDER_BASE_URL")
                .unwrap_or(defaults.pathfinder_base_url),
            timeout: dotenvy::var("NITRO_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            user_agent: dotenvy::var("NITRO_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }

    /// Points both services at the same base URL. Used by tests running a
    /// local mock server.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            registry_base_url: base_url.trim_end_matches('/').to_string(),
            pathfinder_base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn default_user_agent() -> String {
    format!("nitro-agent/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_overrides_defaults() {
        std::env::set_var("NITRO_PATHFINDER_BASE_URL", "http://localhost:9000/api/v2");
        std::env::set_var("NITRO_TIMEOUT_SECONDS", "5");
        std::env::remove_var("NITRO_REGISTRY_BASE_URL");

        let config = ApiConfig::from_env();
        assert_eq!(config.pathfinder_base_url, "http://localhost:9000/api/v2");
        assert_eq!(config.registry_base_url, DEFAULT_REGISTRY_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(5));

        std::env::remove_var("NITRO_PATHFINDER_BASE_URL");
        std::env::remove_var("NITRO_TIMEOUT_SECONDS");
    }

    #[test]
    #[serial]
    fn test_unparsable_timeout_falls_back() {
        std::env::set_var("NITRO_TIMEOUT_SECONDS", "soon");
        assert_eq!(ApiConfig::from_env().timeout, Duration::from_secs(30));
        std::env::remove_var("NITRO_TIMEOUT_SECONDS");
    }
}
