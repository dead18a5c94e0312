//! Recipient address validation per chain family

use std::str::FromStr;

use alloy::primitives::Address;
use nitro_types::ChainFamily;

/// Decides whether a string is a usable recipient on some chain family
pub trait AddressValidator: Send + Sync {
    fn is_valid(&self, address: &str) -> bool;
}

/// `0x` followed by 40 hex characters. Checksums are not enforced.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvmAddressValidator;

impl AddressValidator for EvmAddressValidator {
    fn is_valid(&self, address: &str) -> bool {
        is_evm_address(address)
    }
}

/// Accepts any non-empty token without whitespace. Used for families the
/// crate cannot execute on, where the address only needs to round-trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpaqueAddressValidator;

impl AddressValidator for OpaqueAddressValidator {
    fn is_valid(&self, address: &str) -> bool {
        !address.is_empty() && !address.chars().any(char::is_whitespace)
    }
}

pub fn is_evm_address(address: &str) -> bool {
    address.starts_with("0x") && address.len() == 42 && Address::from_str(address).is_ok()
}

pub fn validator_for(family: &ChainFamily) -> Box<dyn AddressValidator> {
    match family {
        ChainFamily::Evm => Box::new(EvmAddressValidator),
        ChainFamily::Other(_) => Box::new(OpaqueAddressValidator),
    }
}

/// Keeps `requested` when it is valid for `family`, otherwise falls back to
/// `default`.
pub fn effective_recipient(
    family: &ChainFamily,
    requested: Option<&str>,
    default: Option<&str>,
) -> Option<String> {
    let validator = validator_for(family);
    requested
        .map(str::trim)
        .filter(|address| validator.is_valid(address))
        .or(default)
        .map(str::to_string)
}
