//! Phase results produced by the federal pipeline.
//!
//! Each phase owns its sub-totals so a reviewer (or a form filler) can show
//! exactly how a figure was reached. All amounts are non-negative except
//! [`Reconciliation::balance`], which is negative for a refund.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::FilingStatus;

/// Income aggregation phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeSummary {
    pub wages: Decimal,
    pub interest: Decimal,
    pub dividends: Decimal,
    pub nonemployee_compensation: Decimal,
    pub miscellaneous_income: Decimal,
    pub rental_royalties: Decimal,
    pub other: Decimal,
    pub total_income: Decimal,
}

/// Self-employment tax phase (Schedule SE).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfEmploymentTax {
    /// Net earnings subject to SE tax: income × 92.35%.
    pub net_earnings: Decimal,
    pub social_security_tax: Decimal,
    pub medicare_tax: Decimal,
    pub additional_medicare_tax: Decimal,
    pub total_se_tax: Decimal,
    /// Deductible half of SE tax, taken above the line.
    pub se_deduction: Decimal,
}

impl SelfEmploymentTax {
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Adjustments phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustedGrossIncome {
    pub total_income: Decimal,
    pub se_tax_deduction: Decimal,
    pub total_adjustments: Decimal,
    pub adjusted_gross_income: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeductionMode {
    Standard,
    Itemized,
}

/// Deduction phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSelection {
    pub standard_deduction: Decimal,
    pub itemized_deduction: Decimal,
    pub selected_deduction: Decimal,
    pub use_standard_deduction: bool,
}

impl DeductionSelection {
    pub fn mode(&self) -> DeductionMode {
        if self.use_standard_deduction {
            DeductionMode::Standard
        } else {
            DeductionMode::Itemized
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxableIncome {
    pub adjusted_gross_income: Decimal,
    pub deduction: Decimal,
    pub taxable_income: Decimal,
}

/// One row of the bracket audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketBreakdown {
    /// Human-readable range such as `$11,000 - $44,725` or `$578,125+`.
    pub bracket_range: String,
    pub lower: Decimal,
    pub upper: Option<Decimal>,
    pub rate: Decimal,
    pub taxable_in_bracket: Decimal,
    pub tax_from_bracket: Decimal,
    /// Running total, rounded to the cent.
    pub cumulative_tax: Decimal,
}

/// Output of the progressive bracket computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTaxResult {
    pub taxable_income: Decimal,
    pub tax: Decimal,
    pub marginal_rate: Decimal,
    pub breakdown: Vec<BracketBreakdown>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalLiability {
    pub ordinary_income_tax: Decimal,
    pub self_employment_tax: Decimal,
    pub total_tax_liability: Decimal,
    pub effective_tax_rate: Decimal,
    pub marginal_tax_rate: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinalStatus {
    Refund,
    Owed,
    Even,
}

/// Balance after payments. Only one of `refund_amount` and `balance_due`
/// is ever non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub total_tax_liability: Decimal,
    pub tax_withheld: Decimal,
    pub estimated_tax_payments: Decimal,
    pub total_payments: Decimal,
    /// Liability minus payments; negative means a refund.
    pub balance: Decimal,
    pub final_status: FinalStatus,
    pub refund_amount: Decimal,
    pub balance_due: Decimal,
}

/// Withholding carried for display only. None of it offsets the federal
/// income-tax balance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InformationalWithholding {
    pub social_security_tax: Decimal,
    pub medicare_tax: Decimal,
    pub state_tax: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSummary {
    pub adjusted_gross_income: Decimal,
    pub taxable_income: Decimal,
    pub total_tax_liability: Decimal,
    pub effective_tax_rate: Decimal,
    pub marginal_tax_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub tax_year: i32,
    pub filing_status: FilingStatus,
    pub deduction_mode: DeductionMode,
}

/// The complete federal computation for one return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComprehensiveTaxResult {
    pub income: IncomeSummary,
    pub self_employment: SelfEmploymentTax,
    pub adjustments: AdjustedGrossIncome,
    pub deduction: DeductionSelection,
    pub taxable_income: TaxableIncome,
    pub income_tax: BracketTaxResult,
    pub liability: TotalLiability,
    pub reconciliation: Reconciliation,
    pub informational_withholding: InformationalWithholding,
    pub summary: TaxSummary,
    pub metadata: ResultMetadata,
}
