//! Token registry endpoint.

use nitro_types::TokenConfig;
use tracing::warn;

use crate::{
    api_client::send_json,
    config::ApiConfig,
    error::ApiError,
    models::{DataResponse, TokenQueryParams},
};

/// Looks up tokens by exact symbol on one chain.
///
/// The registry matches symbols case-sensitively, so callers decide which
/// spellings to try. Malformed entries are skipped with a warning.
pub async fn fetch_tokens(
    client: &reqwest::Client,
    config: &ApiConfig,
    chain_id: &str,
    symbol: &str,
) -> Result<Vec<TokenConfig>, ApiError> {
    let params = TokenQueryParams {
        chain_id: chain_id.to_string(),
        symbol: symbol.to_string(),
    };
    let response: DataResponse = send_json(
        client
            .get(format!("{}/token", config.registry_base_url))
            .query(&params),
    )
    .await?;

    Ok(response
        .data
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<TokenConfig>(value) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("Skipping malformed token registry entry for {symbol}: {e}");
                None
            }
        })
        .collect())
}
