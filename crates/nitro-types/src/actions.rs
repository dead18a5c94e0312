//! Agent action names with type-safe enums

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Actions the swap plugin exposes to an agent host
#[derive(
    Debug,
    Clone,
    Copy,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum ActionName {
    /// Propose a cross-chain swap and ask for confirmation
    #[strum(serialize = "ROUTER_NITRO_SWAP")]
    RouterNitroSwap,

    /// Execute the proposed swap after the user replied
    #[strum(serialize = "SWAP_CONFIRM")]
    SwapConfirm,
}

impl ActionName {
    /// Whether the action can sign and broadcast transactions
    pub fn executes_on_chain(&self) -> bool {
        matches!(self, ActionName::SwapConfirm)
    }

    pub fn similes(&self) -> &'static [&'static str] {
        match self {
            ActionName::RouterNitroSwap => nitro_constants::ROUTER_NITRO_SWAP_SIMILES,
            ActionName::SwapConfirm => nitro_constants::SWAP_CONFIRM_SIMILES,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ActionName::RouterNitroSwap => nitro_constants::ROUTER_NITRO_SWAP_DESCRIPTION,
            ActionName::SwapConfirm => nitro_constants::SWAP_CONFIRM_DESCRIPTION,
        }
    }

    /// Resolve an action from its name or any of its similes
    pub fn from_name_or_simile(name: &str) -> Option<Self> {
        nitro_constants::normalize_action_name(name).and_then(|n| n.parse().ok())
    }
}
