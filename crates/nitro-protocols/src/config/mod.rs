//! Configuration for the swap pipeline
//!
//! Loaded from environment variables (a `.env` file is honoured by callers
//! that run `dotenvy::dotenv()` first) with defaults for everything except
//! the signing credentials.

pub mod endpoints;
pub mod policy;
pub mod secret;

use std::time::Duration;

use nitro_constants::{DEFAULT_PARTNER_ID, EVM_ADDRESS_SETTING, EVM_PRIVATE_KEY_SETTING};
use nitro_sdk::ApiConfig;
use tracing::warn;

pub use endpoints::ChainEndpoints;
pub use policy::{ApprovalPolicy, SymbolCase, SymbolCasePolicy};
pub use secret::SecretKey;

use crate::address::is_evm_address;
use crate::common::{ProtocolError, Result};

/// Settings for resolution, quoting and execution
#[derive(Debug, Clone)]
pub struct NitroConfig {
    /// HTTP endpoints and request timeout
    pub api: ApiConfig,
    pub partner_id: u32,
    /// Per-call timeout for RPC reads
    pub rpc_timeout: Duration,
    /// How long to wait for a transaction receipt
    pub confirmation_timeout: Duration,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
    pub symbol_cases: SymbolCasePolicy,
    pub approval_policy: ApprovalPolicy,
    pub private_key: Option<SecretKey>,
    /// Recipient used when the request carries no usable address
    pub default_recipient: Option<String>,
    pub endpoints: ChainEndpoints,
}

impl Default for NitroConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            partner_id: DEFAULT_PARTNER_ID,
            rpc_timeout: Duration::from_secs(30),
            confirmation_timeout: Duration::from_secs(180),
            cache_ttl: Duration::from_secs(300),
            cache_capacity: 256,
            symbol_cases: SymbolCasePolicy::default(),
            approval_policy: ApprovalPolicy::default(),
            private_key: None,
            default_recipient: None,
            endpoints: ChainEndpoints::default(),
        }
    }
}

impl NitroConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let api = ApiConfig::from_env();
        let rpc_timeout = api.timeout;

        let symbol_cases = match get_env_string("NITRO_SYMBOL_CASES", "lower,upper").parse() {
            Ok(policy) => policy,
            Err(e) => {
                warn!("Ignoring NITRO_SYMBOL_CASES: {e}");
                SymbolCasePolicy::default()
            }
        };

        Self {
            api,
            partner_id: get_env_var("NITRO_PARTNER_ID", DEFAULT_PARTNER_ID),
            rpc_timeout,
            confirmation_timeout: Duration::from_secs(get_env_var(
                "NITRO_CONFIRMATION_TIMEOUT_SECONDS",
                180,
            )),
            cache_ttl: Duration::from_secs(get_env_var("NITRO_CACHE_TTL_SECONDS", 300)),
            cache_capacity: get_env_var("NITRO_CACHE_CAPACITY", 256),
            symbol_cases,
            approval_policy: get_env_var("NITRO_APPROVAL_POLICY", ApprovalPolicy::Exact),
            private_key: non_empty_var(EVM_PRIVATE_KEY_SETTING).map(SecretKey::new),
            default_recipient: non_empty_var(EVM_ADDRESS_SETTING),
            endpoints: ChainEndpoints::from_env(),
        }
    }

    /// Checks the settings every swap needs.
    pub fn validate(&self) -> Result<()> {
        match self.default_recipient.as_deref() {
            None => {
                return Err(ProtocolError::Config(format!(
                    "{EVM_ADDRESS_SETTING} is required"
                )))
            }
            Some(address) if !is_evm_address(address) => {
                return Err(ProtocolError::Config(format!(
                    "{EVM_ADDRESS_SETTING} is not a valid EVM address: {address}"
                )))
            }
            Some(_) => {}
        }
        self.signing_key().map(|_| ())
    }

    /// The signing key, or a `Config` error when it is missing or malformed.
    pub fn signing_key(&self) -> Result<&SecretKey> {
        let key = self.private_key.as_ref().ok_or_else(|| {
            ProtocolError::Config(format!("{EVM_PRIVATE_KEY_SETTING} is required"))
        })?;
        if !key.is_well_formed() {
            return Err(ProtocolError::Config(format!(
                "{EVM_PRIVATE_KEY_SETTING} must be 32 bytes of hex"
            )));
        }
        Ok(key)
    }
}

/// Helper function to get environment variable with default value
pub fn get_env_var<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    dotenvy::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Helper function to get environment variable as string with default value
pub fn get_env_string(key: &str, default: &str) -> String {
    dotenvy::var(key).unwrap_or_else(|_| default.to_string())
}

fn non_empty_var(key: &str) -> Option<String> {
    dotenvy::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;
    use serial_test::serial;

    const ADDRESS: &str = "0x00000000000000000000000000000000000000bb";

    fn clear_env() {
        for key in [
            EVM_PRIVATE_KEY_SETTING,
            EVM_ADDRESS_SETTING,
            "NITRO_APPROVAL_POLICY",
            "NITRO_SYMBOL_CASES",
            "NITRO_CACHE_TTL_SECONDS",
            "NITRO_PARTNER_ID",
            "NITRO_RPC_URL_999999",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = NitroConfig::from_env();
        assert_eq!(config.partner_id, 127);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.approval_policy, ApprovalPolicy::Exact);
        assert_eq!(config.symbol_cases, SymbolCasePolicy::default());
        assert!(config.private_key.is_none());
        assert!(matches!(config.validate(), Err(ProtocolError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_from_env_reads_settings() {
        clear_env();
        env::set_var(EVM_PRIVATE_KEY_SETTING, format!("0x{}", "11".repeat(32)));
        env::set_var(EVM_ADDRESS_SETTING, ADDRESS);
        env::set_var("NITRO_APPROVAL_POLICY", "unlimited");
        env::set_var("NITRO_SYMBOL_CASES", "upper");
        env::set_var("NITRO_PARTNER_ID", "not-a-number");
        env::set_var("NITRO_RPC_URL_999999", "http://127.0.0.1:8545");

        let config = NitroConfig::from_env();
        assert_eq!(config.approval_policy, ApprovalPolicy::Unlimited);
        assert_eq!(config.symbol_cases.variants("usdc"), vec!["USDC"]);
        assert_eq!(config.partner_id, 127);
        assert_eq!(config.default_recipient.as_deref(), Some(ADDRESS));
        assert_eq!(
            config.endpoints.rpc_url("999999").as_deref(),
            Some("http://127.0.0.1:8545")
        );
        assert!(config.validate().is_ok());
        assert!(!format!("{config:?}").contains("1111"));

        clear_env();
    }

    #[test]
    fn test_validate_rejects_malformed_settings() {
        let config = NitroConfig {
            default_recipient: Some("0x1234".to_string()),
            private_key: Some(SecretKey::new(format!("0x{}", "11".repeat(32)))),
            ..NitroConfig::default()
        };
        assert!(config.validate().is_err());

        let config = NitroConfig {
            default_recipient: Some(ADDRESS.to_string()),
            private_key: Some(SecretKey::new("not-hex")),
            ..NitroConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains(EVM_PRIVATE_KEY_SETTING));
    }
}
