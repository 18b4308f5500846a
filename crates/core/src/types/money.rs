//! Money formatting helpers.
//!
//! Prices are carried as [`rust_decimal::Decimal`] throughout the system
//! (single currency, USD). Formatting lives here so storefront and admin
//! views render amounts identically.

use rust_decimal::Decimal;

/// Format an amount as a US-dollar display string, e.g. `$2,450.00`.
///
/// The amount is rounded to two decimal places and the integer part is
/// grouped with thousands separators.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp(2).abs();
    let text = format!("{rounded:.2}");

    // Split into integer and fractional parts; `{:.2}` guarantees both exist.
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    let digits: Vec<char> = int_part.chars().collect();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts() {
        assert_eq!(format_usd(Decimal::ZERO), "$0.00");
        assert_eq!(format_usd(Decimal::from(240)), "$240.00");
        assert_eq!(format_usd(Decimal::new(1250, 2)), "$12.50");
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_usd(Decimal::from(2450)), "$2,450.00");
        assert_eq!(format_usd(Decimal::from(1_234_567)), "$1,234,567.00");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(format_usd(Decimal::new(19995, 3)), "$20.00");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_usd(Decimal::from(-150)), "-$150.00");
    }
}
