use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{InvalidInputError, ensure_amount};
use crate::models::FilingStatus;

/// Raw income by category, as reported on W-2 and 1099 forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeRecord {
    pub wages: Decimal,
    pub interest: Decimal,
    pub dividends: Decimal,
    /// Box 1 of Form 1099-NEC; the only income subject to SE tax.
    pub nonemployee_compensation: Decimal,
    pub miscellaneous_income: Decimal,
    pub rental_royalties: Decimal,
    pub other: Decimal,
}

impl IncomeRecord {
    fn validate(&self) -> Result<(), InvalidInputError> {
        ensure_amount("wages", self.wages)?;
        ensure_amount("interest", self.interest)?;
        ensure_amount("dividends", self.dividends)?;
        ensure_amount("nonemployee_compensation", self.nonemployee_compensation)?;
        ensure_amount("miscellaneous_income", self.miscellaneous_income)?;
        ensure_amount("rental_royalties", self.rental_royalties)?;
        ensure_amount("other", self.other)
    }
}

/// Amounts already withheld during the year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WithholdingRecord {
    pub federal_tax: Decimal,
    pub state_tax: Decimal,
    pub social_security_tax: Decimal,
    pub medicare_tax: Decimal,
}

impl WithholdingRecord {
    fn validate(&self) -> Result<(), InvalidInputError> {
        ensure_amount("federal_tax_withheld", self.federal_tax)?;
        ensure_amount("state_tax_withheld", self.state_tax)?;
        ensure_amount("social_security_tax_withheld", self.social_security_tax)?;
        ensure_amount("medicare_tax_withheld", self.medicare_tax)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingParameters {
    pub filing_status: FilingStatus,
    /// Explicit election; the engine never switches modes on its own.
    pub use_itemized_deduction: bool,
    /// Total itemized deductions, already capped by the caller.
    pub itemized_deduction_amount: Decimal,
    pub estimated_tax_payments: Decimal,
    pub tax_year: i32,
}

impl FilingParameters {
    pub fn new(
        filing_status: FilingStatus,
        tax_year: i32,
    ) -> Self {
        Self {
            filing_status,
            use_itemized_deduction: false,
            itemized_deduction_amount: Decimal::ZERO,
            estimated_tax_payments: Decimal::ZERO,
            tax_year,
        }
    }

    fn validate(&self) -> Result<(), InvalidInputError> {
        ensure_amount("itemized_deduction_amount", self.itemized_deduction_amount)?;
        ensure_amount("estimated_tax_payments", self.estimated_tax_payments)
    }
}

/// Everything the federal pipeline needs for one return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxReturnInput {
    pub income: IncomeRecord,
    pub withholding: WithholdingRecord,
    pub filing: FilingParameters,
}

impl TaxReturnInput {
    pub fn new(
        income: IncomeRecord,
        withholding: WithholdingRecord,
        filing: FilingParameters,
    ) -> Self {
        Self {
            income,
            withholding,
            filing,
        }
    }

    /// Rejects negative or out-of-range amounts anywhere in the return.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::NegativeAmount`] or
    /// [`InvalidInputError::AmountTooLarge`] naming the first offending field.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        self.income.validate()?;
        self.withholding.validate()?;
        self.filing.validate()
    }
}
