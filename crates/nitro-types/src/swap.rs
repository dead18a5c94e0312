//! Swap request, proposal and outcome types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::chain::ResolvedSwap;
use crate::serde_helpers::string_number_or_null;

/// Swap parameters extracted from a user turn.
///
/// Fields default to empty so a partially extracted request still parses and
/// can be reported back via [`SwapRequest::missing_params`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    #[serde(default, deserialize_with = "string_number_or_null")]
    pub from_chain: String,
    #[serde(default, deserialize_with = "string_number_or_null")]
    pub to_chain: String,
    #[serde(default, deserialize_with = "string_number_or_null")]
    pub from_token: String,
    #[serde(default, deserialize_with = "string_number_or_null")]
    pub to_token: String,
    /// Decimal amount in display units, e.g. "1.5"
    #[serde(default, deserialize_with = "string_number_or_null")]
    pub amount: String,
    #[serde(default)]
    pub to_address: Option<String>,
}

impl SwapRequest {
    pub fn new(from_chain: &str, to_chain: &str, from_token: &str, to_token: &str, amount: &str) -> Self {
        Self {
            from_chain: from_chain.to_string(),
            to_chain: to_chain.to_string(),
            from_token: from_token.to_string(),
            to_token: to_token.to_string(),
            amount: amount.to_string(),
            to_address: None,
        }
    }

    pub fn with_to_address(mut self, to_address: &str) -> Self {
        self.to_address = Some(to_address.to_string());
        self
    }

    /// Names of the required fields that are empty, in reporting order.
    pub fn missing_params(&self) -> Vec<&'static str> {
        [
            ("fromChain", &self.from_chain),
            ("toChain", &self.to_chain),
            ("fromToken", &self.from_token),
            ("toToken", &self.to_token),
            ("amount", &self.amount),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Position of a swap attempt in the confirmation state machine
#[derive(
    Debug, Clone, Copy, Display, EnumString, IntoStaticStr, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SwapStage {
    /// Request validated, awaiting a yes/no reply
    Proposed,
    /// Quote fetched without execution
    Quoted,
    Confirmed,
    Executing,
    Succeeded,
    Failed,
}

/// State kept by the host between the propose and confirm turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapProposal {
    pub session_id: Uuid,
    /// The request with its effective recipient filled in
    pub request: SwapRequest,
    pub resolved: ResolvedSwap,
    pub created_at: DateTime<Utc>,
}

impl SwapProposal {
    pub fn new(request: SwapRequest, resolved: ResolvedSwap) -> Self {
        Self {
            session_id: Uuid::now_v7(),
            request,
            resolved,
            created_at: Utc::now(),
        }
    }
}

/// Result of any swap entry point: user text plus a structured success flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapOutcome {
    pub success: bool,
    pub stage: SwapStage,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_out: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposal: Option<SwapProposal>,
}

impl SwapOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::at_stage(SwapStage::Failed, false, message)
    }

    pub fn at_stage(stage: SwapStage, success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            stage,
            message: message.into(),
            tx_hash: None,
            explorer_url: None,
            amount_out: None,
            proposal: None,
        }
    }

    pub fn with_proposal(mut self, proposal: SwapProposal) -> Self {
        self.proposal = Some(proposal);
        self
    }
}

/// Classification of the user's answer to a confirmation prompt
#[derive(Debug, Clone, Copy, Display, PartialEq, Eq)]
pub enum ConfirmationReply {
    Confirm,
    Decline,
    Unclear,
}

const CONFIRM_WORDS: &[&str] = &[
    "yes", "y", "yeah", "yep", "sure", "ok", "okay", "confirm", "confirmed", "proceed", "go",
];
const DECLINE_WORDS: &[&str] = &["no", "n", "nope", "cancel", "stop", "abort", "decline"];

impl ConfirmationReply {
    /// Classifies a reply by its first word, so "Yes, proceed with the swap"
    /// confirms and "no thanks" declines.
    pub fn parse(reply: &str) -> Self {
        let lowered = reply.trim().to_lowercase();
        let first = lowered
            .split(|c: char| !c.is_alphanumeric())
            .find(|word| !word.is_empty())
            .unwrap_or_default();

        if CONFIRM_WORDS.contains(&first) {
            Self::Confirm
        } else if DECLINE_WORDS.contains(&first) {
            Self::Decline
        } else {
            Self::Unclear
        }
    }
}
