//! Quote and transaction payloads returned by the pathfinder service

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::serde_helpers::{opt_string_or_number, string_or_number};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteAsset {
    pub decimals: u8,
    pub symbol: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// One side of a quote: an integer amount in base units plus its asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLeg {
    #[serde(deserialize_with = "string_or_number")]
    pub token_amount: String,
    pub asset: QuoteAsset,
}

/// Unsigned EVM transaction returned by the transaction endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxnPayload {
    #[serde(default)]
    pub from: Option<String>,
    pub to: String,
    pub data: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub gas_limit: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub gas_price: Option<String>,
}

/// Routing service quote.
///
/// The service expects the exact body it returned when a transaction is
/// built, so the raw JSON is kept next to the typed view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub destination: QuoteLeg,
    #[serde(default)]
    pub source: Option<QuoteLeg>,
    #[serde(default)]
    pub allowance_to: Option<String>,
    #[serde(default)]
    pub txn: Option<TxnPayload>,
    #[serde(skip)]
    pub raw: Value,
}

impl Quote {
    /// Parses a quote body, keeping the original JSON.
    pub fn from_json(raw: Value) -> Result<Self, serde_json::Error> {
        let mut quote: Quote = serde_json::from_value(raw.clone())?;
        quote.raw = raw;
        Ok(quote)
    }

    /// Output amount in display units. Display only; never used for arithmetic.
    pub fn normalized_amount_out(&self) -> f64 {
        let amount = self.destination.token_amount.parse::<f64>().unwrap_or(0.0);
        amount / 10f64.powi(i32::from(self.destination.asset.decimals))
    }

    pub fn destination_symbol(&self) -> &str {
        &self.destination.asset.symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quote_keeps_raw_body() {
        let body = json!({
            "flowType": "trustless",
            "allowanceTo": "0x00000000000000000000000000000000000000aa",
            "source": {
                "tokenAmount": "100000000",
                "asset": { "decimals": 6, "symbol": "USDC", "address": "0x2791bca1f2de4661ed88a30c99a7a9449aa84174" }
            },
            "destination": {
                "tokenAmount": 99500000,
                "asset": { "decimals": 6, "symbol": "USDC" }
            }
        });
        let quote = Quote::from_json(body.clone()).unwrap();
        assert_eq!(quote.raw, body);
        assert_eq!(quote.destination.token_amount, "99500000");
        assert_eq!(quote.normalized_amount_out(), 99.5);
        assert_eq!(quote.destination_symbol(), "USDC");
        assert!(quote.txn.is_none());
    }

    #[test]
    fn test_txn_payload_accepts_numeric_fields() {
        let txn: TxnPayload = serde_json::from_value(json!({
            "from": "0x00000000000000000000000000000000000000bb",
            "to": "0x00000000000000000000000000000000000000cc",
            "data": "0xdeadbeef",
            "value": "0x0",
            "gasLimit": 350000,
            "gasPrice": null
        }))
        .unwrap();
        assert_eq!(txn.value.as_deref(), Some("0x0"));
        assert_eq!(txn.gas_limit.as_deref(), Some("350000"));
        assert!(txn.gas_price.is_none());
    }
}
