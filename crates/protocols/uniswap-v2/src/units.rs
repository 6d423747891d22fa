//! Decimal amount conversion
//!
//! Thin wrappers over alloy's unit helpers: user text to smallest units and back.

use alloy::primitives::utils::{format_units, parse_units, ParseUnits};
use alloy::primitives::U256;
use swap_core::ProtocolError;

/// Parse a decimal string (e.g. "0.01") into smallest units at `decimals` precision.
///
/// Fractional digits beyond `decimals` round half up at the last kept digit,
/// the way wallet front-ends parse the same text. Empty, negative, or
/// non-numeric input is rejected.
pub fn parse_amount(text: &str, decimals: u8) -> Result<U256, ProtocolError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ProtocolError::InvalidAmount {
            message: "amount is empty".to_string(),
        });
    }

    let (kept, round_up) = split_excess_precision(trimmed, decimals);
    let value = match parse_units(kept, decimals) {
        Ok(ParseUnits::U256(value)) => value,
        Ok(ParseUnits::I256(_)) => {
            return Err(ProtocolError::InvalidAmount {
                message: format!("amount must not be negative: {}", trimmed),
            })
        }
        Err(e) => {
            return Err(ProtocolError::InvalidAmount {
                message: format!("{:?}: {}", trimmed, e),
            })
        }
    };

    if !round_up {
        return Ok(value);
    }
    value
        .checked_add(U256::from(1u8))
        .ok_or_else(|| ProtocolError::InvalidAmount {
            message: format!("amount too large: {}", trimmed),
        })
}

/// Cut the fraction to `decimals` digits; report whether the first dropped
/// digit rounds the rest up. Non-digit fractions are left for `parse_units`
/// to reject.
fn split_excess_precision(text: &str, decimals: u8) -> (&str, bool) {
    let Some(dot) = text.find('.') else {
        return (text, false);
    };
    let fraction = &text[dot + 1..];
    if fraction.len() <= decimals as usize || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return (text, false);
    }

    let round_up = fraction.as_bytes()[decimals as usize] >= b'5';
    let kept = if decimals == 0 {
        match &text[..dot] {
            "" => "0",
            int => int,
        }
    } else {
        &text[..dot + 1 + decimals as usize]
    };
    (kept, round_up)
}

/// Format smallest units as a decimal string, without trailing fractional zeros.
pub fn format_amount(raw: U256, decimals: u8) -> String {
    match format_units(raw, decimals) {
        Ok(text) => trim_fraction(text),
        Err(_) => raw.to_string(),
    }
}

fn trim_fraction(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_ether() {
        assert_eq!(
            parse_amount("0.01", 18).unwrap(),
            U256::from(10_000_000_000_000_000u64)
        );
        assert_eq!(parse_amount("1", 6).unwrap(), U256::from(1_000_000u64));
        assert_eq!(parse_amount(" 2.5 ", 6).unwrap(), U256::from(2_500_000u64));
    }

    #[test]
    fn test_parse_amount_rejects_bad_input() {
        assert!(parse_amount("", 18).is_err());
        assert!(parse_amount("   ", 18).is_err());
        assert!(parse_amount("abc", 18).is_err());
        assert!(parse_amount("-1", 18).is_err());
    }

    #[test]
    fn test_parse_amount_rounds_excess_digits() {
        assert_eq!(parse_amount("1.0000005", 6).unwrap(), U256::from(1_000_001u64));
        assert_eq!(parse_amount("1.0000004", 6).unwrap(), U256::from(1_000_000u64));
        assert_eq!(parse_amount("0.9999995", 6).unwrap(), U256::from(1_000_000u64));
        assert_eq!(parse_amount("2.5", 0).unwrap(), U256::from(3u64));
        assert_eq!(parse_amount(".4", 0).unwrap(), U256::ZERO);
        assert!(parse_amount("1.00000x5", 6).is_err());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(format_amount(U256::from(2_000_000u64), 6), "2");
        assert_eq!(format_amount(U256::from(30_000_000u64), 6), "30");
        assert_eq!(
            format_amount(U256::from(10_000_000_000_000_000u64), 18),
            "0.01"
        );
        assert_eq!(format_amount(U256::ZERO, 6), "0");
    }

    #[test]
    fn test_format_then_parse_is_exact() {
        let raw = U256::from(123_456_789u64);
        let text = format_amount(raw, 6);
        assert_eq!(text, "123.456789");
        assert_eq!(parse_amount(&text, 6).unwrap(), raw);
    }
}
