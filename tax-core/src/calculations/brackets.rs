//! Progressive bracket tax with a per-bracket audit trail.
//!
//! Income is sliced across the ascending brackets of a [`BracketTable`]; each
//! slice is taxed at its bracket's rate. The exact (unrounded) running total
//! is carried through every bracket and only the final figure is rounded to
//! the cent, so a schedule with many brackets never accumulates rounding
//! drift.
//!
//! Each breakdown row reports the rounded running total, and the row's own
//! tax is the difference between consecutive rounded running totals. The
//! rows therefore always sum to exactly the reported tax.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::compute_bracket_tax;
//! use tax_core::models::BracketTable;
//!
//! let table = BracketTable::new(&[
//!     (dec!(0), dec!(0.10)),
//!     (dec!(11000), dec!(0.12)),
//!     (dec!(44725), dec!(0.22)),
//! ])
//! .unwrap();
//!
//! let result = compute_bracket_tax(dec!(36150.00), &table);
//!
//! assert_eq!(result.tax, dec!(4118.00));
//! assert_eq!(result.marginal_rate, dec!(0.12));
//! assert_eq!(result.breakdown.len(), 2);
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{format_currency, round_half_up};
use crate::models::{BracketBreakdown, BracketTable, BracketTaxResult, TaxBracket};

/// Computes tax on `taxable_income` against `table`.
///
/// Negative income is treated as zero. Zero income yields zero tax, a zero
/// marginal rate and an empty breakdown.
pub fn compute_bracket_tax(
    taxable_income: Decimal,
    table: &BracketTable,
) -> BracketTaxResult {
    if taxable_income < Decimal::ZERO {
        warn!(
            taxable_income = %taxable_income,
            "Negative taxable income passed to bracket engine; treating as zero"
        );
    }
    if taxable_income <= Decimal::ZERO {
        return BracketTaxResult::default();
    }

    let mut breakdown = Vec::new();
    let mut exact_total = Decimal::ZERO;
    let mut previous_rounded = Decimal::ZERO;
    let mut marginal_rate = Decimal::ZERO;

    for bracket in table.brackets() {
        let in_bracket = taxable_in_bracket(taxable_income, bracket);
        if in_bracket <= Decimal::ZERO {
            break;
        }

        exact_total += in_bracket * bracket.tax_rate;
        let cumulative_tax = round_half_up(exact_total);
        marginal_rate = bracket.tax_rate;

        breakdown.push(BracketBreakdown {
            bracket_range: bracket_range(bracket),
            lower: bracket.min_income,
            upper: bracket.max_income,
            rate: bracket.tax_rate,
            taxable_in_bracket: in_bracket,
            tax_from_bracket: cumulative_tax - previous_rounded,
            cumulative_tax,
        });
        previous_rounded = cumulative_tax;
    }

    let tax = round_half_up(exact_total);
    debug!(
        taxable_income = %taxable_income,
        tax = %tax,
        marginal_rate = %marginal_rate,
        brackets_used = breakdown.len(),
        "Computed bracket tax"
    );

    BracketTaxResult {
        taxable_income,
        tax,
        marginal_rate,
        breakdown,
    }
}

/// Portion of `income` that falls inside `bracket`.
fn taxable_in_bracket(
    income: Decimal,
    bracket: &TaxBracket,
) -> Decimal {
    let capped = match bracket.max_income {
        Some(upper) => income.min(upper),
        None => income,
    };
    (capped - bracket.min_income).max(Decimal::ZERO)
}

fn bracket_range(bracket: &TaxBracket) -> String {
    match bracket.max_income {
        Some(upper) => format!(
            "{} - {}",
            format_currency(bracket.min_income),
            format_currency(upper)
        ),
        None => format!("{}+", format_currency(bracket.min_income)),
    }
}
