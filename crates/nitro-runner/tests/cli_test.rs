use std::sync::Arc;

use alloy::primitives::U256;
use clap::Parser;
use nitro_protocols::config::ApprovalPolicy;
use nitro_protocols::testing::{FakeEvmRpc, FakeExecutorFactory, MockNitroApi};
use nitro_protocols::{NitroConfig, QuoteClient};
use nitro_runner::cli::{Cli, Command};
use nitro_runner::{run_command, FixedReply};
use nitro_tools::SwapFlow;
use rstest::rstest;

fn flow(api: Arc<MockNitroApi>, rpc: Arc<FakeEvmRpc>) -> SwapFlow {
    let config = NitroConfig {
        default_recipient: Some("0x00000000000000000000000000000000000000dd".to_string()),
        ..NitroConfig::default()
    };
    let executors = Arc::new(FakeExecutorFactory {
        rpc,
        quotes: QuoteClient::new(api.clone(), config.partner_id, config.api.timeout),
        approval_policy: ApprovalPolicy::Exact,
        explorer_base: None,
    });
    SwapFlow::new(api, executors, &config).unwrap()
}

const SWAP_ARGS: &[&str] = &[
    "nitro-runner",
    "swap",
    "--from-chain",
    "ethereum",
    "--to-chain",
    "base",
    "--from-token",
    "eth",
    "--to-token",
    "eth",
    "--amount",
    "0.5",
];

#[test]
fn test_swap_arguments_parse() {
    let cli = Cli::try_parse_from(SWAP_ARGS.iter().chain(&["--yes", "--to-address", "0xabc"]))
        .unwrap();
    match cli.command {
        Command::Swap {
            swap,
            to_address,
            yes,
        } => {
            assert!(yes);
            let request = swap.into_request(to_address);
            assert_eq!(request.from_chain, "ethereum");
            assert_eq!(request.amount, "0.5");
            assert_eq!(request.to_address.as_deref(), Some("0xabc"));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_quote_requires_every_field() {
    let err = Cli::try_parse_from(["nitro-runner", "quote", "--from-chain", "polygon"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[tokio::test]
async fn test_chains_lists_live_entries_unless_all() {
    let flow = flow(Arc::new(MockNitroApi::default()), Arc::new(FakeEvmRpc::default()));
    let mut replies = FixedReply(String::new());

    let live = run_command(&flow, Command::Chains { all: false }, false, &mut replies)
        .await
        .unwrap();
    assert!(live.success);
    assert!(!live.output[0].contains("Boba Network"));
    assert!(live.output[0].contains("Polygon"));

    let all = run_command(&flow, Command::Chains { all: true }, false, &mut replies)
        .await
        .unwrap();
    assert!(all.output[0].contains("Boba Network"));
}

#[rstest]
#[case("yes", true)]
#[case("no", false)]
#[tokio::test]
async fn test_swap_follows_the_reply(#[case] reply: &str, #[case] success: bool) {
    let rpc = Arc::new(
        FakeEvmRpc::default().with_native_balance(U256::from(1_000_000_000_000_000_000u128)),
    );
    let flow = flow(Arc::new(MockNitroApi::default()), rpc.clone());
    let cli = Cli::try_parse_from(SWAP_ARGS).unwrap();

    let report = run_command(&flow, cli.command, false, &mut FixedReply(reply.to_string()))
        .await
        .unwrap();

    assert_eq!(report.success, success, "{:?}", report.output);
    assert_eq!(rpc.sends().len(), usize::from(success));
}

#[tokio::test]
async fn test_unknown_chain_fails_without_prompting() {
    let flow = flow(Arc::new(MockNitroApi::default()), Arc::new(FakeEvmRpc::default()));
    let cli = Cli::try_parse_from([
        "nitro-runner",
        "--json",
        "swap",
        "--from-chain",
        "fooland",
        "--to-chain",
        "base",
        "--from-token",
        "eth",
        "--to-token",
        "eth",
        "--amount",
        "1",
    ])
    .unwrap();
    assert!(cli.json);

    let report = run_command(&flow, cli.command, cli.json, &mut FixedReply("yes".to_string()))
        .await
        .unwrap();
    assert!(!report.success);
    let value: serde_json::Value = serde_json::from_str(&report.output[0]).unwrap();
    assert_eq!(value["message"], "Error during swap: Invalid source chain: fooland");
}
