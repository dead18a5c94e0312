use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope shared by the registry list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct DataResponse {
    #[serde(default)]
    pub data: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChainListParams {
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenQueryParams {
    pub chain_id: String,
    pub symbol: String,
}

/// Query string of the pathfinder quote endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteParams {
    pub from_token_address: String,
    pub to_token_address: String,
    /// Input amount in base units
    pub amount: String,
    pub from_token_chain_id: String,
    pub to_token_chain_id: String,
    pub partner_id: u32,
}
