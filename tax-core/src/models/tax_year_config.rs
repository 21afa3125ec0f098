use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ByFilingStatus;

/// Per-year payroll and self-employment parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    /// Social Security wage base.
    pub ss_wage_max: Decimal,
    pub ss_tax_rate: Decimal,
    pub medicare_tax_rate: Decimal,
    /// Share of SE income treated as net earnings (92.35%).
    pub net_earnings_factor: Decimal,
    /// Deductible share of SE tax (50%).
    pub se_deduction_factor: Decimal,
    pub additional_medicare_rate: Decimal,
    pub additional_medicare_thresholds: ByFilingStatus<Decimal>,
}
