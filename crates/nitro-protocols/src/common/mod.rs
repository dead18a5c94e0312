//! Common protocol abstractions and utilities
//!
//! Error taxonomy shared by every swap stage plus the TTL cache used by the
//! resolvers.

use std::time::Duration;

use alloy::primitives::U256;
use nitro_sdk::ApiError;
use thiserror::Error;

pub mod cache;

pub use cache::TtlCache;

pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Message shown to the user when the source balance cannot cover the swap
pub const INSUFFICIENT_BALANCE_MESSAGE: &str = "Insufficient balance to perform the swap";

/// Common error types for all swap stages
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Upstream(String),
    #[error("{INSUFFICIENT_BALANCE_MESSAGE}: required {required}, available {available}")]
    InsufficientFunds { required: U256, available: U256 },
    #[error("{0}")]
    ChainExecution(String),
    #[error("{operation} timed out after {after:?}")]
    Timeout { operation: String, after: Duration },
}

impl ProtocolError {
    /// Maps an HTTP failure while trying to `action` (e.g. "get quote").
    pub fn upstream(action: &str, err: ApiError, after: Duration) -> Self {
        match err {
            ApiError::Status { status, body } => Self::Upstream(format!(
                "Unable to {action}, failed with status {status}: {body}"
            )),
            ApiError::Timeout { .. } => Self::Timeout {
                operation: action.to_string(),
                after,
            },
            other => Self::Upstream(format!("Unable to {action}: {other}")),
        }
    }

    /// Text shown to the end user for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::InsufficientFunds { .. } => INSUFFICIENT_BALANCE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InsufficientFunds { .. })
    }
}
