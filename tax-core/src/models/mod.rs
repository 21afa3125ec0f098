mod filing_status;
mod tax_bracket;
mod tax_result;
mod tax_return;
mod tax_year_config;

pub use filing_status::{ByFilingStatus, FilingStatus};
pub use tax_bracket::{BracketTable, BracketTableError, TaxBracket};
pub use tax_result::{
    AdjustedGrossIncome, BracketBreakdown, BracketTaxResult, ComprehensiveTaxResult,
    DeductionMode, DeductionSelection, FinalStatus, IncomeSummary, InformationalWithholding,
    Reconciliation, ResultMetadata, SelfEmploymentTax, TaxSummary, TaxableIncome, TotalLiability,
};
pub use tax_return::{FilingParameters, IncomeRecord, TaxReturnInput, WithholdingRecord};
pub use tax_year_config::TaxYearConfig;
