//! JSON-RPC adapter against a node that accepts connections but never answers

use std::time::Duration;

use alloy::primitives::{address, U256};
use axum::{routing::post, Json, Router};
use nitro_protocols::config::SecretKey;
use nitro_protocols::evm::{AlloyEvmRpc, EvmRpc};
use nitro_protocols::ProtocolError;
use nitro_types::TxnPayload;
use serde_json::{json, Value};

const SIGNING_KEY: &str = "0x0101010101010101010101010101010101010101010101010101010101010101";

async fn stalled_node() -> String {
    let app = Router::new().route(
        "/",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Json::<Value>(json!({}))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn connect() -> AlloyEvmRpc {
    AlloyEvmRpc::connect(
        &stalled_node().await,
        &SecretKey::new(SIGNING_KEY),
        Duration::from_millis(200),
        Duration::from_secs(1),
    )
    .unwrap()
}

fn assert_timeout(result: nitro_protocols::Result<impl std::fmt::Debug>, expected: &str) {
    match result {
        Err(ProtocolError::Timeout { operation, after }) => {
            assert_eq!(operation, expected);
            assert_eq!(after, Duration::from_millis(200));
        }
        other => panic!("expected {expected} timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_erc20_reads_time_out() {
    let rpc = connect().await;
    let token = address!("0x2791bca1f2de4661ed88a30c99a7a9449aa84174");
    let owner = rpc.signer_address();

    assert_timeout(rpc.erc20_balance(token, owner).await, "balanceOf");
    assert_timeout(rpc.erc20_allowance(token, owner, owner).await, "allowance");
    assert_timeout(rpc.native_balance(owner).await, "eth_getBalance");
}

#[tokio::test]
async fn test_broadcasts_time_out() {
    let rpc = connect().await;
    let token = address!("0x2791bca1f2de4661ed88a30c99a7a9449aa84174");
    let spender = address!("0x00000000000000000000000000000000000000aa");

    assert_timeout(
        rpc.approve(token, spender, U256::from(1u64)).await,
        "approve broadcast",
    );

    let txn = TxnPayload {
        from: None,
        to: "0x00000000000000000000000000000000000000aa".to_string(),
        data: "0xdeadbeef".to_string(),
        value: Some("0x0".to_string()),
        gas_limit: Some("400000".to_string()),
        gas_price: None,
    };
    assert_timeout(rpc.send_transaction(&txn).await, "swap broadcast");
}
