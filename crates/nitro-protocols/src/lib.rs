//! Cross-chain swap building blocks
//!
//! Everything between a plain `SwapRequest` and a broadcast transaction:
//! chain and token resolution against the Router Nitro registry, amount
//! scaling, pathfinder quoting and EVM execution.

pub mod address;
pub mod amount;
pub mod common;
pub mod config;
pub mod evm;
pub mod executor;
pub mod quote;
pub mod registry;
pub mod tokens;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use common::{ProtocolError, Result};
pub use config::NitroConfig;
pub use executor::{
    EvmExecutorFactory, EvmSwapExecutor, ExecutionPlan, ExecutionReceipt, ExecutorFactory,
    SwapExecutor,
};
pub use quote::QuoteClient;
pub use registry::{ChainRegistry, ChainRegistryResolver};
pub use tokens::TokenResolver;
