//! Chain registry types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::serde_helpers::string_or_number;

/// Gas token advertised by the registry for a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasToken {
    pub symbol: String,
    pub address: String,
}

/// One entry of the remote chain registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainEntry {
    /// Canonical name, as the registry spells it
    pub name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub chain_id: String,
    #[serde(rename = "type")]
    pub chain_type: String,
    #[serde(default)]
    pub is_live: bool,
    #[serde(default)]
    pub gas_token: Option<GasToken>,
}

impl ChainEntry {
    pub fn new(name: &str, chain_id: &str, chain_type: &str, is_live: bool) -> Self {
        Self {
            name: name.to_string(),
            chain_id: chain_id.to_string(),
            chain_type: chain_type.to_string(),
            is_live,
            gas_token: None,
        }
    }

    pub fn with_gas_token(mut self, symbol: &str, address: &str) -> Self {
        self.gas_token = Some(GasToken {
            symbol: symbol.to_string(),
            address: address.to_string(),
        });
        self
    }

    pub fn family(&self) -> ChainFamily {
        ChainFamily::from(self.chain_type.as_str())
    }
}

/// Execution family of a chain, derived from the registry `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainFamily {
    Evm,
    Other(String),
}

impl From<&str> for ChainFamily {
    fn from(chain_type: &str) -> Self {
        if chain_type.trim().eq_ignore_ascii_case("evm") {
            Self::Evm
        } else {
            Self::Other(chain_type.trim().to_lowercase())
        }
    }
}

impl fmt::Display for ChainFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Evm => write!(f, "evm"),
            Self::Other(kind) => write!(f, "{kind}"),
        }
    }
}

/// Result record of validating a single chain name. Never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainValidation {
    pub is_valid: bool,
    pub chain_id: Option<String>,
    pub is_live: bool,
    #[serde(rename = "type")]
    pub chain_type: Option<String>,
    pub normalized_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Validated view of both chain fields of a swap request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSwap {
    pub from_chain_id: String,
    pub to_chain_id: String,
    pub from_chain_id_type: String,
    pub to_chain_id_type: String,
}

impl ResolvedSwap {
    pub fn source_family(&self) -> ChainFamily {
        ChainFamily::from(self.from_chain_id_type.as_str())
    }

    pub fn destination_family(&self) -> ChainFamily {
        ChainFamily::from(self.to_chain_id_type.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_entry_accepts_numeric_chain_id() {
        let entry: ChainEntry = serde_json::from_value(serde_json::json!({
            "name": "Polygon",
            "chainId": 137,
            "type": "evm",
            "isLive": true,
            "gasToken": { "symbol": "POL", "address": "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE" },
            "icon": "ignored"
        }))
        .unwrap();
        assert_eq!(entry.chain_id, "137");
        assert_eq!(entry.family(), ChainFamily::Evm);
        assert_eq!(entry.gas_token.unwrap().symbol, "POL");
    }

    #[test]
    fn test_chain_family_from_type() {
        assert_eq!(ChainFamily::from("EVM"), ChainFamily::Evm);
        assert_eq!(
            ChainFamily::from("Solana"),
            ChainFamily::Other("solana".to_string())
        );
        assert_eq!(ChainFamily::from("tron").to_string(), "tron");
    }
}
