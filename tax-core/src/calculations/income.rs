use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::models::{IncomeRecord, IncomeSummary};

/// Sums every income category into total ordinary income.
pub fn aggregate_income(income: &IncomeRecord) -> IncomeSummary {
    let categories = [
        income.wages,
        income.interest,
        income.dividends,
        income.nonemployee_compensation,
        income.miscellaneous_income,
        income.rental_royalties,
        income.other,
    ];
    let total_income = round_half_up(categories.iter().copied().sum::<Decimal>());

    debug!(total_income = %total_income, "Aggregated income");

    IncomeSummary {
        wages: income.wages,
        interest: income.interest,
        dividends: income.dividends,
        nonemployee_compensation: income.nonemployee_compensation,
        miscellaneous_income: income.miscellaneous_income,
        rental_royalties: income.rental_royalties,
        other: income.other,
        total_income,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn aggregate_income_sums_all_categories() {
        let income = IncomeRecord {
            wages: dec!(50000.00),
            interest: dec!(125.50),
            dividends: dec!(800.25),
            nonemployee_compensation: dec!(20000.00),
            miscellaneous_income: dec!(300.00),
            rental_royalties: dec!(1200.00),
            other: dec!(74.25),
        };

        let summary = aggregate_income(&income);

        assert_eq!(summary.total_income, dec!(72500.00));
        assert_eq!(summary.nonemployee_compensation, dec!(20000.00));
    }

    #[test]
    fn aggregate_income_of_empty_record_is_zero() {
        let summary = aggregate_income(&IncomeRecord::default());

        assert_eq!(summary, IncomeSummary::default());
    }
}
