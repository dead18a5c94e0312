//! Token resolution, amount scaling and quoting against the mock services

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::U256;
use nitro_protocols::amount::scale_amount;
use nitro_protocols::config::{SymbolCase, SymbolCasePolicy};
use nitro_protocols::testing::{MockNitroApi, SPENDER, USDC_ARBITRUM, USDC_POLYGON};
use nitro_protocols::{ProtocolError, QuoteClient, TokenResolver};

fn resolver(api: Arc<MockNitroApi>) -> TokenResolver {
    TokenResolver::new(api, SymbolCasePolicy::default(), 16, Duration::from_secs(300))
}

#[tokio::test]
async fn test_token_lookup_tries_lowercase_then_uppercase() {
    let api = Arc::new(MockNitroApi::default());
    let tokens = resolver(api.clone());

    let usdc = tokens.resolve("137", "Usdc").await.unwrap();
    assert_eq!(usdc.address, USDC_POLYGON);
    assert_eq!(usdc.decimals, 6);
    assert_eq!(
        api.token_queries(),
        vec![
            ("137".to_string(), "usdc".to_string()),
            ("137".to_string(), "USDC".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_second_lookup_is_served_from_cache() {
    let api = Arc::new(MockNitroApi::default());
    let tokens = resolver(api.clone());

    tokens.resolve("137", "USDC").await.unwrap();
    let network_calls = api.calls.tokens();

    let again = tokens.resolve("137", "usdc").await.unwrap();
    assert_eq!(again.address, USDC_POLYGON);
    assert_eq!(api.calls.tokens(), network_calls);
    assert_eq!(tokens.cached_entries().await, 1);
}

#[tokio::test]
async fn test_cache_is_keyed_by_chain() {
    let api = Arc::new(MockNitroApi::default());
    let tokens = resolver(api.clone());

    let polygon = tokens.resolve("137", "USDC").await.unwrap();
    let arbitrum = tokens.resolve("42161", "USDC").await.unwrap();
    assert_eq!(polygon.address, USDC_POLYGON);
    assert_eq!(arbitrum.address, USDC_ARBITRUM);
    assert_eq!(tokens.cached_entries().await, 2);
}

#[tokio::test]
async fn test_failed_variant_falls_through_to_next() {
    let api = Arc::new(MockNitroApi {
        failing_symbols: vec!["usdc".to_string()],
        ..MockNitroApi::default()
    });
    let tokens = resolver(api.clone());

    let usdc = tokens.resolve("137", "usdc").await.unwrap();
    assert_eq!(usdc.address, USDC_POLYGON);
    assert_eq!(api.calls.tokens(), 2);
}

#[tokio::test]
async fn test_unknown_token_reports_symbol_and_chain() {
    let api = Arc::new(MockNitroApi::default());
    let tokens = resolver(api.clone());

    let err = tokens.resolve("137", "DOGE").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to fetch token config for \"DOGE\" on chainId \"137\""
    );
    assert_eq!(tokens.cached_entries().await, 0);
}

#[tokio::test]
async fn test_case_policy_controls_variants() {
    let api = Arc::new(MockNitroApi::default());
    let tokens = TokenResolver::new(
        api.clone(),
        SymbolCasePolicy::new(vec![SymbolCase::Lower]),
        16,
        Duration::from_secs(300),
    );

    assert!(tokens.resolve("137", "USDC").await.is_err());
    assert_eq!(api.calls.tokens(), 1);
}

#[tokio::test]
async fn test_quote_sends_scaled_amount_and_partner_id() {
    let api = Arc::new(MockNitroApi::default());
    let tokens = resolver(api.clone());
    let quotes = QuoteClient::new(api.clone(), 127, Duration::from_secs(30));

    let from = tokens.resolve("137", "USDC").await.unwrap();
    let to = tokens.resolve("42161", "USDC").await.unwrap();
    let amount_in = scale_amount("100", from.decimals).unwrap();
    assert_eq!(amount_in, U256::from(100_000_000u64));

    let quote = quotes.quote(&from, &to, amount_in, "137", "42161").await.unwrap();
    assert_eq!(quote.allowance_to.as_deref(), Some(SPENDER));
    assert_eq!(quote.normalized_amount_out(), 99.8);
    assert_eq!(quote.destination_symbol(), "USDC");

    let params = api.last_quote_params().unwrap();
    assert_eq!(params.amount, "100000000");
    assert_eq!(params.partner_id, 127);
    assert_eq!(params.from_token_chain_id, "137");
    assert_eq!(params.to_token_address, USDC_ARBITRUM);
}

#[tokio::test]
async fn test_quote_failure_carries_status_and_body() {
    let api = Arc::new(MockNitroApi {
        quote_failure: Some((400, "{\"error\":\"no route\"}".to_string())),
        ..MockNitroApi::default()
    });
    let tokens = resolver(api.clone());
    let quotes = QuoteClient::new(api.clone(), 127, Duration::from_secs(30));

    let from = tokens.resolve("137", "USDC").await.unwrap();
    let to = tokens.resolve("42161", "USDC").await.unwrap();
    let err = quotes
        .quote(&from, &to, U256::from(1u64), "137", "42161")
        .await
        .unwrap_err();

    assert!(matches!(err, ProtocolError::Upstream(_)));
    assert_eq!(
        err.to_string(),
        "Unable to get quote, failed with status 400: {\"error\":\"no route\"}"
    );
}
