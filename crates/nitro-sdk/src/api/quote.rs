//! Pathfinder quote and transaction endpoints.

use nitro_types::Quote;
use serde_json::{json, Value};

use crate::{api_client::send_json, config::ApiConfig, error::ApiError, models::QuoteParams};

/// Fetches a cross-chain quote.
pub async fn get_quote(
    client: &reqwest::Client,
    config: &ApiConfig,
    params: &QuoteParams,
) -> Result<Quote, ApiError> {
    let body: Value = send_json(
        client
            .get(format!("{}/quote", config.pathfinder_base_url))
            .query(params),
    )
    .await?;

    Ok(Quote::from_json(body)?)
}

/// Turns a quote into an unsigned transaction for `sender`, paying out to
/// `receiver` on the destination chain.
pub async fn build_transaction(
    client: &reqwest::Client,
    config: &ApiConfig,
    quote: &Quote,
    sender: &str,
    receiver: &str,
) -> Result<Quote, ApiError> {
    let mut request = match &quote.raw {
        Value::Object(map) => Value::Object(map.clone()),
        _ => json!({}),
    };
    request["senderAddress"] = json!(sender);
    request["receiverAddress"] = json!(receiver);

    let body: Value = send_json(
        client
            .post(format!("{}/transaction", config.pathfinder_base_url))
            .json(&request),
    )
    .await?;

    Ok(Quote::from_json(body)?)
}
