//! Agent-facing layer for Router Nitro swaps
//!
//! [`SwapFlow`] is the two-step propose/confirm contract. The [`tools`]
//! module wraps it as `rig` tools for the `ROUTER_NITRO_SWAP` and
//! `SWAP_CONFIRM` actions.

pub mod flow;
pub mod messages;
pub mod tools;

pub use flow::{FlowError, SwapFlow};
pub use messages::MessageRenderer;
pub use tools::{RouterNitroSwapTool, SwapConfirmTool};
