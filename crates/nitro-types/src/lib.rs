pub mod actions;
pub mod chain;
pub mod quote;
pub mod serde_helpers;
pub mod swap;
pub mod token;

pub use actions::*;
pub use chain::*;
pub use quote::*;
pub use swap::*;
pub use token::*;
