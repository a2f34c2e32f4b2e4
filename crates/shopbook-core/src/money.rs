//! Money and fixed-point display

use crate::CURRENCY_SYMBOL;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a number with a fixed number of decimals
///
/// Ties round away from zero on the exact binary value, so `1.005` (stored
/// just below 1.005) gives `"1.00"` while `0.125` gives `"0.13"`.
pub fn format_fixed(value: f64, decimals: u32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    // -0 prints as 0
    let value = if value == 0.0 { 0.0 } else { value };

    match Decimal::from_f64_retain(value) {
        Some(decimal) => {
            let mut rounded =
                decimal.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(decimals);
            rounded.to_string()
        }
        // Beyond Decimal's range
        None => format!("{:.*}", decimals as usize, value),
    }
}

/// Format an amount as money, e.g. `₹1250.50`
pub fn format_currency(value: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, format_fixed(value, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(85.0, 2), "85.00");
        assert_eq!(format_fixed(8.5, 2), "8.50");
        assert_eq!(format_fixed(1.005, 2), "1.00");
        assert_eq!(format_fixed(0.125, 2), "0.13");
        assert_eq!(format_fixed(2.5, 0), "3");
        assert_eq!(format_fixed(-2.5, 0), "-3");
        assert_eq!(format_fixed(-0.0, 2), "0.00");
    }

    #[test]
    fn test_format_fixed_non_finite() {
        assert_eq!(format_fixed(f64::NAN, 2), "NaN");
        assert_eq!(format_fixed(f64::INFINITY, 2), "Infinity");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(192.5), "\u{20b9}192.50");
        assert_eq!(format_currency(-5.0), "\u{20b9}-5.00");
        assert_eq!(format_currency(0.0), "\u{20b9}0.00");
    }
}
