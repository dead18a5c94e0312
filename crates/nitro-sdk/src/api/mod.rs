pub mod chains;
pub mod quote;
pub mod tokens;

pub use chains::fetch_chains;
pub use quote::{build_transaction, get_quote};
pub use tokens::fetch_tokens;
