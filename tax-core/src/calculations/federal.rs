//! The federal pipeline.
//!
//! | Phase | Description |
//! |-------|-------------|
//! | 1     | Validate input; look up the tax year's tables |
//! | 2     | Aggregate income categories into total income |
//! | 3     | Self-employment tax on nonemployee compensation |
//! | 4     | AGI: total income less the SE tax deduction |
//! | 5     | Deduction: standard or itemized per the caller's election |
//! | 6     | Taxable income: AGI less the deduction |
//! | 7     | Regular tax from the filing status's bracket schedule |
//! | 8     | Total liability: regular tax + SE tax; effective/marginal rates |
//! | 9     | Reconciliation: liability against withholding and estimated payments |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::FederalTaxEngine;
//! use tax_core::models::{
//!     FilingParameters, FilingStatus, FinalStatus, IncomeRecord, TaxReturnInput,
//!     WithholdingRecord,
//! };
//!
//! let input = TaxReturnInput::new(
//!     IncomeRecord {
//!         wages: dec!(50000.00),
//!         ..IncomeRecord::default()
//!     },
//!     WithholdingRecord {
//!         federal_tax: dec!(5000.00),
//!         ..WithholdingRecord::default()
//!     },
//!     FilingParameters::new(FilingStatus::Single, 2023),
//! );
//!
//! let result = FederalTaxEngine::builtin().calculate(&input).unwrap();
//!
//! assert_eq!(result.summary.taxable_income, dec!(36150.00));
//! assert_eq!(result.summary.total_tax_liability, dec!(4118.00));
//! assert_eq!(result.reconciliation.final_status, FinalStatus::Refund);
//! assert_eq!(result.reconciliation.refund_amount, dec!(882.00));
//! ```

use tracing::{debug, warn};

use crate::calculations::brackets::compute_bracket_tax;
use crate::calculations::deduction::select_deduction;
use crate::calculations::income::aggregate_income;
use crate::calculations::liability::aggregate_liability;
use crate::calculations::self_emp::{SeTaxConfig, SelfEmploymentTaxCalculator};
use crate::calculations::taxable_income::{compute_agi, compute_taxable_income};
use crate::calculations::withholding::reconcile;
use crate::error::{InvalidInputError, TaxError};
use crate::models::{
    ComprehensiveTaxResult, InformationalWithholding, ResultMetadata, TaxReturnInput, TaxSummary,
};
use crate::tables::TaxTables;

/// Runs the federal phases against a set of tables.
#[derive(Debug, Clone, Copy)]
pub struct FederalTaxEngine<'a> {
    tables: &'a TaxTables,
}

impl FederalTaxEngine<'static> {
    /// Engine over the compiled-in tables.
    pub fn builtin() -> Self {
        Self::new(TaxTables::builtin())
    }
}

impl<'a> FederalTaxEngine<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    /// Computes the complete federal result for one return.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidInput`] if any amount is negative or the
    /// tax year has no tables; nothing is computed in that case.
    pub fn calculate(
        &self,
        input: &TaxReturnInput,
    ) -> Result<ComprehensiveTaxResult, TaxError> {
        // Phase 1
        input.validate().inspect_err(|err| {
            warn!(error = %err, "Rejected tax return input");
        })?;

        let filing = &input.filing;
        let status = filing.filing_status;
        let year = self
            .tables
            .year(filing.tax_year)
            .ok_or(InvalidInputError::UnsupportedTaxYear(filing.tax_year))?;

        debug!(tax_year = filing.tax_year, filing_status = %status, "Starting federal computation");

        // Phase 2
        let income = aggregate_income(&input.income);

        // Phase 3
        let se_config = SeTaxConfig::from_tax_year_config(&year.config, status);
        let se_calculator = SelfEmploymentTaxCalculator::new(se_config);
        let self_employment = se_calculator.calculate(income.nonemployee_compensation)?;

        // Phase 4
        let adjustments = compute_agi(income.total_income, self_employment.se_deduction);
        let agi = adjustments.adjusted_gross_income;

        // Phase 5
        let deduction = select_deduction(
            status,
            filing.use_itemized_deduction,
            filing.itemized_deduction_amount,
            year.standard_deduction(status),
        );

        // Phase 6
        let taxable_income = compute_taxable_income(agi, deduction.selected_deduction);

        // Phase 7
        let income_tax =
            compute_bracket_tax(taxable_income.taxable_income, year.bracket_table(status));

        // Phase 8
        let liability = aggregate_liability(
            income_tax.tax,
            self_employment.total_se_tax,
            agi,
            income_tax.marginal_rate,
        );

        // Phase 9
        let reconciliation = reconcile(
            liability.total_tax_liability,
            input.withholding.federal_tax,
            filing.estimated_tax_payments,
        );

        let summary = TaxSummary {
            adjusted_gross_income: agi,
            taxable_income: taxable_income.taxable_income,
            total_tax_liability: liability.total_tax_liability,
            effective_tax_rate: liability.effective_tax_rate,
            marginal_tax_rate: liability.marginal_tax_rate,
        };
        let metadata = ResultMetadata {
            tax_year: filing.tax_year,
            filing_status: status,
            deduction_mode: deduction.mode(),
        };

        Ok(ComprehensiveTaxResult {
            income,
            self_employment,
            adjustments,
            deduction,
            taxable_income,
            income_tax,
            liability,
            reconciliation,
            informational_withholding: InformationalWithholding {
                social_security_tax: input.withholding.social_security_tax,
                medicare_tax: input.withholding.medicare_tax,
                state_tax: input.withholding.state_tax,
            },
            summary,
            metadata,
        })
    }
}

/// Computes the federal result with the compiled-in tables.
pub fn calculate_federal_tax(
    input: &TaxReturnInput,
) -> Result<ComprehensiveTaxResult, TaxError> {
    FederalTaxEngine::builtin().calculate(input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::SeTaxConfigError;
    use crate::models::{
        DeductionMode, FilingParameters, FilingStatus, FinalStatus, IncomeRecord,
        WithholdingRecord,
    };

    fn wage_earner(
        wages: Decimal,
        tax_year: i32,
    ) -> TaxReturnInput {
        TaxReturnInput::new(
            IncomeRecord {
                wages,
                ..IncomeRecord::default()
            },
            WithholdingRecord::default(),
            FilingParameters::new(FilingStatus::Single, tax_year),
        )
    }

    #[test]
    fn rejects_negative_amount_before_computing() {
        let mut input = wage_earner(dec!(50000.00), 2023);
        input.income.rental_royalties = dec!(-10.00);

        let result = calculate_federal_tax(&input);

        assert_eq!(
            result,
            Err(TaxError::InvalidInput(
                InvalidInputError::NegativeAmount {
                    field: "rental_royalties",
                    value: dec!(-10.00),
                }
            ))
        );
    }

    #[test]
    fn rejects_amount_that_would_overflow_income_total() {
        let mut input = wage_earner(Decimal::MAX, 2023);
        input.income.interest = dec!(1.00);

        let result = calculate_federal_tax(&input);

        assert_eq!(
            result,
            Err(TaxError::InvalidInput(
                InvalidInputError::AmountTooLarge {
                    field: "wages",
                    value: Decimal::MAX,
                }
            ))
        );
    }

    #[test]
    fn rejects_unsupported_tax_year() {
        let input = wage_earner(dec!(50000.00), 2019);

        let result = calculate_federal_tax(&input);

        assert_eq!(
            result,
            Err(TaxError::InvalidInput(
                InvalidInputError::UnsupportedTaxYear(2019)
            ))
        );
    }

    #[test]
    fn wage_only_single_filer_2023() {
        let result = calculate_federal_tax(&wage_earner(dec!(50000.00), 2023)).unwrap();

        assert_eq!(result.summary.adjusted_gross_income, dec!(50000.00));
        assert_eq!(result.summary.taxable_income, dec!(36150.00));
        assert_eq!(result.income_tax.tax, dec!(4118.00));
        assert_eq!(result.summary.marginal_tax_rate, dec!(0.12));
        assert_eq!(result.summary.effective_tax_rate, dec!(0.0824));
        assert_eq!(result.self_employment.total_se_tax, dec!(0));
        assert_eq!(result.metadata.deduction_mode, DeductionMode::Standard);
    }

    #[test]
    fn zero_income_owes_nothing() {
        let result = calculate_federal_tax(&wage_earner(dec!(0), 2024)).unwrap();

        assert_eq!(result.summary.total_tax_liability, dec!(0));
        assert_eq!(result.summary.effective_tax_rate, dec!(0));
        assert_eq!(result.reconciliation.final_status, FinalStatus::Even);
        assert!(result.income_tax.breakdown.is_empty());
    }

    #[test]
    fn payroll_withholding_does_not_offset_balance() {
        let mut input = wage_earner(dec!(50000.00), 2023);
        input.withholding = WithholdingRecord {
            federal_tax: dec!(4000.00),
            state_tax: dec!(1500.00),
            social_security_tax: dec!(3100.00),
            medicare_tax: dec!(725.00),
        };

        let result = calculate_federal_tax(&input).unwrap();

        assert_eq!(result.reconciliation.total_payments, dec!(4000.00));
        assert_eq!(result.reconciliation.balance_due, dec!(118.00));
        assert_eq!(result.informational_withholding.social_security_tax, dec!(3100.00));
        assert_eq!(result.informational_withholding.state_tax, dec!(1500.00));
    }

    #[test]
    fn itemized_election_is_honoured() {
        let mut input = wage_earner(dec!(80000.00), 2024);
        input.filing.use_itemized_deduction = true;
        input.filing.itemized_deduction_amount = dec!(20000.00);

        let result = calculate_federal_tax(&input).unwrap();

        assert_eq!(result.deduction.selected_deduction, dec!(20000.00));
        assert_eq!(result.summary.taxable_income, dec!(60000.00));
        assert_eq!(result.metadata.deduction_mode, DeductionMode::Itemized);
    }

    #[test]
    fn estimated_payments_offset_balance() {
        let mut input = wage_earner(dec!(50000.00), 2023);
        input.filing.estimated_tax_payments = dec!(4118.00);

        let result = calculate_federal_tax(&input).unwrap();

        assert_eq!(result.reconciliation.final_status, FinalStatus::Even);
    }

    #[test]
    fn custom_tables_are_used_instead_of_builtin() {
        let mut tables = TaxTables::builtin().clone();
        let year = tables.year_mut(2023).unwrap();
        year.standard_deductions.single = dec!(20000);

        let result = FederalTaxEngine::new(&tables)
            .calculate(&wage_earner(dec!(50000.00), 2023))
            .unwrap();

        assert_eq!(result.summary.taxable_income, dec!(30000.00));
    }

    #[test]
    fn invalid_custom_se_config_is_reported() {
        let mut tables = TaxTables::builtin().clone();
        tables.year_mut(2023).unwrap().config.ss_wage_max = dec!(0);
        let mut input = wage_earner(dec!(0), 2023);
        input.income.nonemployee_compensation = dec!(1000.00);

        let result = FederalTaxEngine::new(&tables).calculate(&input);

        assert_eq!(
            result,
            Err(TaxError::InvalidConfiguration(
                SeTaxConfigError::InvalidSsWageMax(dec!(0))
            ))
        );
    }
}
