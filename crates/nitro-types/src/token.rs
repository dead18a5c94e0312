use serde::{Deserialize, Serialize};

use crate::serde_helpers::string_or_number;

/// Address and precision of a token on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenConfig {
    pub address: String,
    #[serde(default)]
    pub name: String,
    pub decimals: u8,
    #[serde(deserialize_with = "string_or_number")]
    pub chain_id: String,
}

impl TokenConfig {
    pub fn new(address: &str, name: &str, decimals: u8, chain_id: &str) -> Self {
        Self {
            address: address.to_string(),
            name: name.to_string(),
            decimals,
            chain_id: chain_id.to_string(),
        }
    }
}
