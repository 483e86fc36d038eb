//! Currency display precision
//!
//! Only used to format underlying prices for display; pricing itself never
//! depends on it.

use super::price::round_display;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Decimal places used to display a price quoted in `currency`
pub fn currency_decimals(currency: &str) -> u32 {
    match currency.trim().to_ascii_uppercase().as_str() {
        "JPY" | "CNY" | "TWD" | "SGD" | "DKK" => 4,
        "VND" => 6,
        _ => 2,
    }
}

/// Display-rounded price as a fixed-point decimal
///
/// Returns `None` for values that cannot be represented (NaN, infinities).
pub fn price_decimal(value: f64, currency: &str) -> Option<Decimal> {
    let decimals = currency_decimals(currency);
    Decimal::from_f64(round_display(value, decimals)).map(|d| d.round_dp(decimals))
}

/// Format a price with the display precision of its currency
pub fn format_price(value: f64, currency: &str) -> Option<String> {
    let decimals = currency_decimals(currency) as usize;
    price_decimal(value, currency).map(|d| format!("{:.*}", decimals, d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_decimals() {
        assert_eq!(currency_decimals("JPY"), 4);
        assert_eq!(currency_decimals("cny"), 4);
        assert_eq!(currency_decimals("TWD"), 4);
        assert_eq!(currency_decimals("SGD"), 4);
        assert_eq!(currency_decimals("DKK"), 4);
        assert_eq!(currency_decimals("VND"), 6);
        assert_eq!(currency_decimals("USD"), 2);
        assert_eq!(currency_decimals("HKD"), 2);
        assert_eq!(currency_decimals("EUR"), 2);
        assert_eq!(currency_decimals(""), 2);
    }

    #[test]
    fn test_price_decimal() {
        assert_eq!(price_decimal(99.995, "USD"), Some(dec!(100.00)));
        assert_eq!(price_decimal(1.23456789, "JPY"), Some(dec!(1.2346)));
        assert_eq!(price_decimal(0.000_012_345_6, "VND"), Some(dec!(0.000012)));
        assert_eq!(price_decimal(f64::NAN, "USD"), None);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(150.0, "USD").as_deref(), Some("150.00"));
        assert_eq!(format_price(99.995, "USD").as_deref(), Some("100.00"));
        assert_eq!(format_price(2_718.123_456, "JPY").as_deref(), Some("2718.1235"));
        assert_eq!(format_price(0.5, "VND").as_deref(), Some("0.500000"));
    }

    #[test]
    fn test_format_price_non_finite() {
        assert!(format_price(f64::NAN, "USD").is_none());
        assert!(format_price(f64::INFINITY, "USD").is_none());
    }
}
