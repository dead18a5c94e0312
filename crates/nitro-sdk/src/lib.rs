//! # nitro-sdk
//!
//! A thin client for the two HTTP services a cross-chain swap needs:
//! 1. The Router Nitro registry (chains and tokens).
//! 2. The Pathfinder service (quotes and unsigned transactions).
//!
//! The free functions under [`api`] map one-to-one onto endpoints; the
//! [`NitroApi`] trait bundles them behind a seam the orchestration layer can
//! fake in tests.

pub mod api;
pub mod api_client;
pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::{NitroApi, NitroClient};
pub use config::ApiConfig;
pub use error::ApiError;
