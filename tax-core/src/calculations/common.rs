//! Common utility functions for tax calculations.
//!
//! This module provides shared functionality used across the federal phases
//! and the state dispatcher: cent and rate rounding, plus the currency and
//! percentage formatting used when results are displayed.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Arguments
///
/// * `value` - The decimal value to round
///
/// # Returns
///
/// The value rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(123.456)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a ratio (effective or marginal rate) to four decimal places using
/// half-up rounding, i.e. to the hundredth of a percent.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_rate;
///
/// assert_eq!(round_rate(dec!(0.082355)), dec!(0.0824));
/// assert_eq!(round_rate(dec!(0.08234)), dec!(0.0823));
/// ```
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}

/// Divides `numerator` by `denominator` and rounds with [`round_rate`].
///
/// Returns zero when the denominator is zero or negative, which is how an
/// effective rate on zero income is reported.
pub fn ratio(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_rate(numerator / denominator)
}

/// Formats a currency amount as dollars with thousands separators and two
/// decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::format_currency;
///
/// assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
/// assert_eq!(format_currency(dec!(-42.5)), "-$42.50");
/// assert_eq!(format_currency(dec!(0)), "$0.00");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{cents}")
}

/// Formats a ratio as a percentage with two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::format_rate;
///
/// assert_eq!(format_rate(dec!(0.22)), "22.00%");
/// assert_eq!(format_rate(dec!(0.0495)), "4.95%");
/// ```
pub fn format_rate(rate: Decimal) -> String {
    format!("{:.2}%", round_half_up(rate * Decimal::ONE_HUNDRED))
}

/// Returns the maximum of two decimal values.
///
/// # Arguments
///
/// * `a` - First decimal value
/// * `b` - Second decimal value
///
/// # Returns
///
/// The larger of the two values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(200.00), dec!(100.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_midpoint_away_from_zero() {
        assert_eq!(round_half_up(dec!(535.625)), dec!(535.63));
        assert_eq!(round_half_up(dec!(-1412.955)), dec!(-1412.96));
    }

    #[test]
    fn round_half_up_truncates_below_midpoint() {
        let result = round_half_up(dec!(2290.2804));

        assert_eq!(result, dec!(2290.28));
    }

    #[test]
    fn round_half_up_carries_into_whole_dollars() {
        let result = round_half_up(dec!(999999.999));

        assert_eq!(result, dec!(1000000.00));
    }

    // =========================================================================
    // round_rate / ratio tests
    // =========================================================================

    #[test]
    fn round_rate_keeps_four_places() {
        let result = round_rate(dec!(0.123456));

        assert_eq!(result, dec!(0.1235));
    }

    #[test]
    fn ratio_divides_and_rounds() {
        let result = ratio(dec!(4118.00), dec!(50000.00));

        assert_eq!(result, dec!(0.0824));
    }

    #[test]
    fn ratio_is_zero_for_zero_denominator() {
        let result = ratio(dec!(100.00), dec!(0.00));

        assert_eq!(result, dec!(0));
    }

    // =========================================================================
    // format_currency / format_rate tests
    // =========================================================================

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(36150)), "$36,150.00");
        assert_eq!(format_currency(dec!(999.999)), "$1,000.00");
        assert_eq!(format_currency(dec!(100)), "$100.00");
    }

    #[test]
    fn format_currency_marks_negative_values() {
        assert_eq!(format_currency(dec!(-1412.955)), "-$1,412.96");
    }

    #[test]
    fn format_currency_does_not_sign_negative_zero() {
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn format_rate_renders_percentage() {
        assert_eq!(format_rate(dec!(0.0824)), "8.24%");
        assert_eq!(format_rate(dec!(0)), "0.00%");
    }

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_floors_negative_amounts_at_zero() {
        assert_eq!(max(dec!(-250.00), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(max(dec!(36150.00), Decimal::ZERO), dec!(36150.00));
    }
}
