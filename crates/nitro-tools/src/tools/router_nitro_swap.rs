//! `ROUTER_NITRO_SWAP` tool
//!
//! First half of the swap conversation: resolves the request and returns
//! the confirmation prompt together with the proposal the host must hand
//! back to [`SwapConfirmTool`](super::SwapConfirmTool).

use std::sync::Arc;

use nitro_constants::ROUTER_NITRO_SWAP;
use nitro_types::{ActionName, SwapRequest};
use rig::{completion::ToolDefinition, tool::Tool};
use serde_json::json;
use thiserror::Error;
use tracing::{info, instrument};

use crate::flow::SwapFlow;

#[derive(Debug, Error)]
pub enum RouterNitroSwapError {
    #[error("Failed to serialize swap outcome: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct RouterNitroSwapTool {
    flow: Arc<SwapFlow>,
}

impl RouterNitroSwapTool {
    pub fn new(flow: Arc<SwapFlow>) -> Self {
        Self { flow }
    }
}

impl Tool for RouterNitroSwapTool {
    const NAME: &'static str = ROUTER_NITRO_SWAP;
    type Error = RouterNitroSwapError;
    type Args = SwapRequest;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: ActionName::RouterNitroSwap.description().to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "fromChain": {
                        "type": "string",
                        "description": "Source chain name as the user wrote it (e.g. 'Polygon', 'arb', 'eth')."
                    },
                    "toChain": {
                        "type": "string",
                        "description": "Destination chain name as the user wrote it."
                    },
                    "fromToken": {
                        "type": "string",
                        "description": "Symbol of the token to send (e.g. 'USDC', 'ETH')."
                    },
                    "toToken": {
                        "type": "string",
                        "description": "Symbol of the token to receive on the destination chain."
                    },
                    "amount": {
                        "type": "string",
                        "description": "Human-readable amount of fromToken, e.g. '1.5'. Not in base units."
                    },
                    "toAddress": {
                        "type": "string",
                        "description": "Optional recipient on the destination chain. Omit to use the configured wallet."
                    }
                },
                "required": ["fromChain", "toChain", "fromToken", "toToken", "amount"],
            }),
        }
    }

    #[instrument(
        name = "router_nitro_swap_tool_call",
        skip(self, args),
        fields(
            tool_name = ROUTER_NITRO_SWAP,
            from_chain = %args.from_chain,
            to_chain = %args.to_chain,
            amount = %args.amount
        )
    )]
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let outcome = self.flow.propose(args).await;
        info!(stage = %outcome.stage, success = outcome.success, "Swap proposal finished");
        Ok(serde_json::to_string(&outcome)?)
    }
}
