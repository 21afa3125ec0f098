use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{max, round_half_up};
use crate::models::{AdjustedGrossIncome, TaxableIncome};

/// AGI: total income less the above-the-line SE tax deduction, floored at 0.
pub fn compute_agi(
    total_income: Decimal,
    se_tax_deduction: Decimal,
) -> AdjustedGrossIncome {
    let total_adjustments = round_half_up(se_tax_deduction);
    let adjusted_gross_income = max(round_half_up(total_income - total_adjustments), Decimal::ZERO);

    debug!(agi = %adjusted_gross_income, adjustments = %total_adjustments, "Computed AGI");

    AdjustedGrossIncome {
        total_income,
        se_tax_deduction,
        total_adjustments,
        adjusted_gross_income,
    }
}

/// Taxable income: AGI less the selected deduction, floored at 0.
pub fn compute_taxable_income(
    adjusted_gross_income: Decimal,
    deduction: Decimal,
) -> TaxableIncome {
    let taxable_income = max(round_half_up(adjusted_gross_income - deduction), Decimal::ZERO);

    debug!(taxable_income = %taxable_income, "Computed taxable income");

    TaxableIncome {
        adjusted_gross_income,
        deduction,
        taxable_income,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn agi_subtracts_se_deduction() {
        let result = compute_agi(dec!(20000.00), dec!(1412.96));

        assert_eq!(result.adjusted_gross_income, dec!(18587.04));
        assert_eq!(result.total_adjustments, dec!(1412.96));
    }

    #[test]
    fn agi_without_adjustments_equals_total_income() {
        let result = compute_agi(dec!(50000.00), dec!(0));

        assert_eq!(result.adjusted_gross_income, dec!(50000.00));
    }

    #[test]
    fn taxable_income_subtracts_deduction() {
        let result = compute_taxable_income(dec!(50000.00), dec!(13850));

        assert_eq!(result.taxable_income, dec!(36150.00));
    }

    #[test]
    fn taxable_income_floors_at_zero() {
        let result = compute_taxable_income(dec!(10000.00), dec!(13850));

        assert_eq!(result.taxable_income, dec!(0));
    }
}
