//! Agent action names and metadata

/// Proposes a cross-chain swap and asks the user to confirm it.
pub const ROUTER_NITRO_SWAP: &str = "ROUTER_NITRO_SWAP";

/// Executes a previously proposed swap after the user replied.
pub const SWAP_CONFIRM: &str = "SWAP_CONFIRM";

pub const ROUTER_NITRO_SWAP_DESCRIPTION: &str = "Swaps tokens across chains from the agent's wallet to a recipient wallet. \
By default the sender's configured wallet receives the assets on the destination chain, unless a recipient address is clearly provided. \
Supports bridging, cross chain swaps and normal swaps.";

pub const SWAP_CONFIRM_DESCRIPTION: &str =
    "Confirms and executes a cross-chain swap after user validation";

pub const ROUTER_NITRO_SWAP_SIMILES: &[&str] = &[
    "CROSS_CHAIN_SWAP",
    "CROSS_CHAIN_BRIDGE",
    "NITRO_BRIDGE",
    "SWAP",
    "BRIDGE",
    "TRANSFER",
];

pub const SWAP_CONFIRM_SIMILES: &[&str] = &["CONTINUE_SWAP", "CONFIRM_SWAP", "PROCEED_SWAP"];

/// Map a simile back to the action it stands for
pub fn normalize_action_name(name: &str) -> Option<&'static str> {
    let upper = name.trim().to_ascii_uppercase();
    if upper == ROUTER_NITRO_SWAP || ROUTER_NITRO_SWAP_SIMILES.contains(&upper.as_str()) {
        Some(ROUTER_NITRO_SWAP)
    } else if upper == SWAP_CONFIRM || SWAP_CONFIRM_SIMILES.contains(&upper.as_str()) {
        Some(SWAP_CONFIRM)
    } else {
        None
    }
}
