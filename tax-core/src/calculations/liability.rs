use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{max, ratio, round_half_up};
use crate::models::TotalLiability;

/// Combines regular income tax and SE tax and derives the headline rates.
///
/// The effective rate is liability over AGI (zero when AGI is zero); the
/// marginal rate is passed through from the bracket engine.
pub fn aggregate_liability(
    ordinary_income_tax: Decimal,
    self_employment_tax: Decimal,
    adjusted_gross_income: Decimal,
    marginal_tax_rate: Decimal,
) -> TotalLiability {
    let total_tax_liability = max(
        round_half_up(ordinary_income_tax + self_employment_tax),
        Decimal::ZERO,
    );
    let effective_tax_rate = ratio(total_tax_liability, adjusted_gross_income);

    debug!(
        total_tax_liability = %total_tax_liability,
        effective_tax_rate = %effective_tax_rate,
        "Aggregated total liability"
    );

    TotalLiability {
        ordinary_income_tax,
        self_employment_tax,
        total_tax_liability,
        effective_tax_rate,
        marginal_tax_rate,
    }
}
