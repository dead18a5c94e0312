pub mod router_nitro_swap;
pub mod swap_confirm;

pub use router_nitro_swap::{RouterNitroSwapError, RouterNitroSwapTool};
pub use swap_confirm::{SwapConfirmArgs, SwapConfirmError, SwapConfirmTool};
