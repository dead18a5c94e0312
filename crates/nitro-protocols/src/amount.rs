//! Decimal amount scaling
//!
//! Amounts arrive as decimal strings in display units and leave as integer
//! base units. The conversion is exact string arithmetic; floats are only
//! used for the display value of a quoted output.

use alloy::primitives::U256;

use crate::common::{ProtocolError, Result};

/// `floor(amount * 10^decimals)` as a 256-bit integer.
///
/// Fractional digits beyond `decimals` are truncated. Signs, exponents,
/// separators and a zero result are rejected.
pub fn scale_amount(amount: &str, decimals: u8) -> Result<U256> {
    let trimmed = amount.trim();
    let invalid = || ProtocolError::Validation(format!("Invalid amount: {amount}"));

    if trimmed.is_empty() {
        return Err(invalid());
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let decimals = usize::from(decimals);
    let kept = &fraction[..fraction.len().min(decimals)];
    let digits = format!("{whole}{kept:0<decimals$}");
    let digits = digits.trim_start_matches('0');

    if digits.is_empty() {
        return Err(ProtocolError::Validation(format!(
            "Amount must be greater than zero: {amount}"
        )));
    }

    U256::from_str_radix(digits, 10)
        .map_err(|_| ProtocolError::Validation(format!("Amount is too large: {amount}")))
}

/// Display value of a base-unit amount.
pub fn normalize_amount(base_units: &str, decimals: u8) -> f64 {
    base_units.trim().parse::<f64>().unwrap_or(0.0) / 10f64.powi(i32::from(decimals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_amount() {
        assert_eq!(scale_amount("1.5", 6).unwrap(), U256::from(1_500_000u64));
        assert_eq!(scale_amount("0.000001", 6).unwrap(), U256::from(1u64));
        assert_eq!(scale_amount("100", 6).unwrap(), U256::from(100_000_000u64));
        assert_eq!(scale_amount(" 2. ", 0).unwrap(), U256::from(2u64));
        assert_eq!(scale_amount(".5", 1).unwrap(), U256::from(5u64));
        assert_eq!(
            scale_amount("1", 18).unwrap(),
            U256::from(1_000_000_000_000_000_000u128)
        );
    }

    #[test]
    fn test_scale_amount_truncates_extra_digits() {
        assert_eq!(scale_amount("1.23456789", 6).unwrap(), U256::from(1_234_567u64));
        assert_eq!(scale_amount("0.9999999", 6).unwrap(), U256::from(999_999u64));
    }

    #[test]
    fn test_scale_amount_rejects_bad_input() {
        for input in ["", "   ", ".", "-1", "+1", "1e6", "abc", "1,000", "1.2.3", "0x10"] {
            assert!(
                matches!(scale_amount(input, 6), Err(ProtocolError::Validation(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_scale_amount_rejects_zero() {
        for input in ["0", "0.0", "0.0000001"] {
            let err = scale_amount(input, 6).unwrap_err();
            assert!(err.to_string().contains("greater than zero"), "{input}");
        }
    }

    #[test]
    fn test_numeric_request_amount_scales() {
        let request: nitro_types::SwapRequest = serde_json::from_str(
            r#"{"fromChain": "polygon", "toChain": "arbitrum", "fromToken": "USDC", "toToken": "USDC", "amount": 0.000001}"#,
        )
        .unwrap();
        assert_eq!(scale_amount(&request.amount, 6).unwrap(), U256::from(1u64));
    }

    #[test]
    fn test_normalize_amount() {
        assert_eq!(normalize_amount("99500000", 6), 99.5);
        assert_eq!(normalize_amount("garbage", 6), 0.0);
    }
}
