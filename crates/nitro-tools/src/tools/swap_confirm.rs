//! `SWAP_CONFIRM` tool

use std::sync::Arc;

use nitro_constants::SWAP_CONFIRM;
use nitro_types::{ActionName, SwapProposal};
use rig::{completion::ToolDefinition, tool::Tool};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{info, instrument};

use crate::flow::SwapFlow;

/// The proposal returned by `ROUTER_NITRO_SWAP` plus the user's answer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SwapConfirmArgs {
    pub proposal: SwapProposal,
    pub reply: String,
}

#[derive(Debug, Error)]
pub enum SwapConfirmError {
    #[error("Missing user reply")]
    EmptyReply,
    #[error("Failed to serialize swap outcome: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct SwapConfirmTool {
    flow: Arc<SwapFlow>,
}

impl SwapConfirmTool {
    pub fn new(flow: Arc<SwapFlow>) -> Self {
        Self { flow }
    }
}

impl Tool for SwapConfirmTool {
    const NAME: &'static str = SWAP_CONFIRM;
    type Error = SwapConfirmError;
    type Args = SwapConfirmArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: format!(
                "{}. Executes on-chain only when the reply is an explicit yes.",
                ActionName::SwapConfirm.description()
            ),
            parameters: json!({
                "type": "object",
                "properties": {
                    "proposal": {
                        "type": "object",
                        "description": "The `proposal` object returned by ROUTER_NITRO_SWAP, unchanged."
                    },
                    "reply": {
                        "type": "string",
                        "description": "The user's answer to the confirmation prompt, verbatim (e.g. 'Yes', 'no')."
                    }
                },
                "required": ["proposal", "reply"],
            }),
        }
    }

    #[instrument(
        name = "swap_confirm_tool_call",
        skip(self, args),
        fields(tool_name = SWAP_CONFIRM, session_id = %args.proposal.session_id)
    )]
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        if args.reply.trim().is_empty() {
            return Err(SwapConfirmError::EmptyReply);
        }
        let outcome = self.flow.confirm(&args.proposal, &args.reply).await;
        info!(stage = %outcome.stage, success = outcome.success, "Swap confirmation finished");
        Ok(serde_json::to_string(&outcome)?)
    }
}
