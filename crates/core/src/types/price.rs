//! Decimal money rounding.
//!
//! Prices are `rust_decimal::Decimal` throughout and serialize as plain JSON
//! numbers (via `rust_decimal::serde::float` on the fields that carry them),
//! matching the backend wire format.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a currency amount to 2 decimal places, half-up.
///
/// Half-away-from-zero on a decimal value is the exact arithmetic that the
/// usual `round(x * 100 + epsilon) / 100` float idiom approximates, without
/// the binary-float truncation it works around.
#[must_use]
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_round2_half_up() {
        assert_eq!(round2(dec!(19.495)), dec!(19.50));
        assert_eq!(round2(dec!(19.494)), dec!(19.49));
        assert_eq!(round2(dec!(0.005)), dec!(0.01));
    }

    #[test]
    fn test_round2_exact_values_unchanged() {
        assert_eq!(round2(dec!(130)), dec!(130.00));
        assert_eq!(round2(dec!(164.50)), dec!(164.50));
    }

    #[test]
    fn test_round2_no_float_artifacts() {
        // 1.005 is the classic binary-float rounding trap
        assert_eq!(round2(dec!(1.005)), dec!(1.01));
    }
}
