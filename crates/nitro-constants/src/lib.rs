//! Constants for the nitro ecosystem
//!
//! This crate provides centralized constants that can be used across
//! multiple crates without creating circular dependencies.

pub mod actions;
pub mod chains;

pub use actions::*;
pub use chains::*;

/// Address the registry uses for a chain's gas token.
pub const NATIVE_TOKEN_ADDRESS: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";

/// Partner id attributed to every quote request.
pub const DEFAULT_PARTNER_ID: u32 = 127;

/// Chain/token registry base URL
pub const DEFAULT_REGISTRY_BASE_URL: &str = "https://api.nitroswap.routernitro.com";

/// Pathfinder quote service base URL
pub const DEFAULT_PATHFINDER_BASE_URL: &str = "https://api-beta.pathfinder.routerprotocol.com/api/v2";

/// Page size used when pulling the whole chain registry in one request
pub const CHAIN_REGISTRY_PAGE_LIMIT: u32 = 10_000;

/// Settings key holding the EVM signing key
pub const EVM_PRIVATE_KEY_SETTING: &str = "ROUTER_NITRO_EVM_PRIVATE_KEY";

/// Settings key holding the default recipient address
pub const EVM_ADDRESS_SETTING: &str = "ROUTER_NITRO_EVM_ADDRESS";

/// Returns true when `address` is the native gas token sentinel.
pub fn is_native_token(address: &str) -> bool {
    address.eq_ignore_ascii_case(NATIVE_TOKEN_ADDRESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_sentinel_is_case_insensitive() {
        assert!(is_native_token("0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee"));
        assert!(is_native_token("0xEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEEE"));
        assert!(!is_native_token(
            "0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174"
        ));
    }
}
