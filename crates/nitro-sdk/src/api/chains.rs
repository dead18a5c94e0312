//! Chain registry endpoint.

use nitro_constants::CHAIN_REGISTRY_PAGE_LIMIT;
use nitro_types::ChainEntry;
use tracing::{debug, warn};

use crate::{
    api_client::send_json,
    config::ApiConfig,
    error::ApiError,
    models::{ChainListParams, DataResponse},
};

/// Fetches the whole chain registry in one page.
///
/// Entries are returned in the order the registry sent them; resolution
/// tie-breaks depend on that order. Entries that do not match the expected
/// shape are skipped with a warning.
pub async fn fetch_chains(
    client: &reqwest::Client,
    config: &ApiConfig,
) -> Result<Vec<ChainEntry>, ApiError> {
    let params = ChainListParams {
        page: 0,
        limit: CHAIN_REGISTRY_PAGE_LIMIT,
    };
    let response: DataResponse = send_json(
        client
            .get(format!("{}/chain", config.registry_base_url))
            .query(&params),
    )
    .await?;

    let total = response.data.len();
    let chains: Vec<ChainEntry> = response
        .data
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<ChainEntry>(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping malformed chain registry entry: {e}");
                None
            }
        })
        .collect();

    debug!("Fetched {} of {} chain registry entries", chains.len(), total);
    Ok(chains)
}
