//! Self-employment tax (Schedule SE) and its above-the-line deduction.
//!
//! # Computation
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Net earnings: nonemployee compensation × 92.35% |
//! | 2    | Social security tax: min(step 1, wage base) × 12.4% |
//! | 3    | Medicare tax: step 1 × 2.9% |
//! | 4    | Additional Medicare tax: max(0, step 1 − status threshold) × 0.9% |
//! | 5    | Total SE tax: steps 2 + 3 + 4 |
//! | 6    | SE tax deduction: step 5 × 50% |
//!
//! Each step is rounded to the cent. When net self-employment income is zero
//! or negative every output is zero.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::{SeTaxConfig, SelfEmploymentTaxCalculator};
//!
//! let config = SeTaxConfig {
//!     ss_wage_max: dec!(160200.00),
//!     ss_tax_rate: dec!(0.124),
//!     medicare_tax_rate: dec!(0.029),
//!     net_earnings_factor: dec!(0.9235),
//!     deduction_factor: dec!(0.50),
//!     additional_medicare_rate: dec!(0.009),
//!     additional_medicare_threshold: dec!(200000.00),
//! };
//!
//! let calculator = SelfEmploymentTaxCalculator::new(config);
//! let result = calculator.calculate(dec!(20000.00)).unwrap();
//!
//! assert_eq!(result.net_earnings, dec!(18470.00));
//! assert_eq!(result.total_se_tax, dec!(2825.91));
//! assert_eq!(result.se_deduction, dec!(1412.96));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::TaxYearConfig;
use crate::calculations::common::{max, round_half_up};
use crate::models::{FilingStatus, SelfEmploymentTax};

/// Errors raised by an out-of-range SE configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SeTaxConfigError {
    /// The net earnings factor must be between 0 and 1 (exclusive of 0).
    #[error("net earnings factor must be between 0 and 1, got {0}")]
    InvalidNetEarningsFactor(Decimal),

    #[error("social security tax rate must be between 0 and 1, got {0}")]
    InvalidSocialSecurityRate(Decimal),

    #[error("medicare tax rate must be between 0 and 1, got {0}")]
    InvalidMedicareRate(Decimal),

    #[error("additional medicare tax rate must be between 0 and 1, got {0}")]
    InvalidAdditionalMedicareRate(Decimal),

    #[error("deduction factor must be between 0 and 1, got {0}")]
    InvalidDeductionFactor(Decimal),

    #[error("social security wage maximum must be positive, got {0}")]
    InvalidSsWageMax(Decimal),

    #[error("additional medicare threshold must be non-negative, got {0}")]
    InvalidAdditionalMedicareThreshold(Decimal),
}

/// SE parameters for one tax year and filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeTaxConfig {
    /// Maximum earnings subject to social security tax.
    ///
    /// For 2023 this is $160,200.
    pub ss_wage_max: Decimal,

    /// Combined employer and employee social security rate, 12.4%.
    pub ss_tax_rate: Decimal,

    /// Combined employer and employee Medicare rate, 2.9%.
    pub medicare_tax_rate: Decimal,

    /// Share of SE income subject to SE tax after the employer-equivalent
    /// adjustment, 92.35%.
    pub net_earnings_factor: Decimal,

    /// Deductible share of SE tax, 50%.
    pub deduction_factor: Decimal,

    /// Additional Medicare rate on earnings over the threshold, 0.9%.
    pub additional_medicare_rate: Decimal,

    /// Filing-status threshold for additional Medicare tax.
    pub additional_medicare_threshold: Decimal,
}

impl SeTaxConfig {
    /// Picks the year's SE parameters and the threshold for `status`.
    pub fn from_tax_year_config(
        config: &TaxYearConfig,
        status: FilingStatus,
    ) -> Self {
        Self {
            ss_wage_max: config.ss_wage_max,
            ss_tax_rate: config.ss_tax_rate,
            medicare_tax_rate: config.medicare_tax_rate,
            net_earnings_factor: config.net_earnings_factor,
            deduction_factor: config.se_deduction_factor,
            additional_medicare_rate: config.additional_medicare_rate,
            additional_medicare_threshold: *config.additional_medicare_thresholds.get(status),
        }
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`SeTaxConfigError`] if:
    /// - `net_earnings_factor` is not in (0, 1]
    /// - any rate or the deduction factor is not in [0, 1]
    /// - `ss_wage_max` is not positive
    /// - `additional_medicare_threshold` is negative
    pub fn validate(&self) -> Result<(), SeTaxConfigError> {
        if self.net_earnings_factor <= Decimal::ZERO || self.net_earnings_factor > Decimal::ONE {
            return Err(SeTaxConfigError::InvalidNetEarningsFactor(
                self.net_earnings_factor,
            ));
        }
        if !is_unit_interval(self.ss_tax_rate) {
            return Err(SeTaxConfigError::InvalidSocialSecurityRate(self.ss_tax_rate));
        }
        if !is_unit_interval(self.medicare_tax_rate) {
            return Err(SeTaxConfigError::InvalidMedicareRate(self.medicare_tax_rate));
        }
        if !is_unit_interval(self.additional_medicare_rate) {
            return Err(SeTaxConfigError::InvalidAdditionalMedicareRate(
                self.additional_medicare_rate,
            ));
        }
        if !is_unit_interval(self.deduction_factor) {
            return Err(SeTaxConfigError::InvalidDeductionFactor(self.deduction_factor));
        }
        if self.ss_wage_max <= Decimal::ZERO {
            return Err(SeTaxConfigError::InvalidSsWageMax(self.ss_wage_max));
        }
        if self.additional_medicare_threshold < Decimal::ZERO {
            return Err(SeTaxConfigError::InvalidAdditionalMedicareThreshold(
                self.additional_medicare_threshold,
            ));
        }
        Ok(())
    }
}

fn is_unit_interval(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
}

/// Calculator for self-employment tax.
#[derive(Debug, Clone)]
pub struct SelfEmploymentTaxCalculator {
    config: SeTaxConfig,
}

impl SelfEmploymentTaxCalculator {
    pub fn new(config: SeTaxConfig) -> Self {
        Self { config }
    }

    /// Computes SE tax on `net_se_income` (nonemployee compensation).
    ///
    /// # Errors
    ///
    /// Returns [`SeTaxConfigError`] if the configuration is invalid.
    pub fn calculate(
        &self,
        net_se_income: Decimal,
    ) -> Result<SelfEmploymentTax, SeTaxConfigError> {
        self.config.validate()?;

        if net_se_income <= Decimal::ZERO {
            if net_se_income < Decimal::ZERO {
                warn!(
                    net_se_income = %net_se_income,
                    "Net self-employment income is negative; SE tax will be zero"
                );
            }
            return Ok(SelfEmploymentTax::zero());
        }

        // Step 1
        let net_earnings = self.net_earnings(net_se_income);

        // Steps 2-4
        let social_security_tax = self.social_security_tax(net_earnings);
        let medicare_tax = self.medicare_tax(net_earnings);
        let additional_medicare_tax = self.additional_medicare_tax(net_earnings);

        // Step 5
        let total_se_tax =
            round_half_up(social_security_tax + medicare_tax + additional_medicare_tax);

        // Step 6
        let se_deduction = self.se_deduction(total_se_tax);

        debug!(
            net_earnings = %net_earnings,
            total_se_tax = %total_se_tax,
            se_deduction = %se_deduction,
            "Computed self-employment tax"
        );

        Ok(SelfEmploymentTax {
            net_earnings,
            social_security_tax,
            medicare_tax,
            additional_medicare_tax,
            total_se_tax,
            se_deduction,
        })
    }

    /// Multiplies SE income by the net earnings factor (92.35%).
    fn net_earnings(
        &self,
        net_se_income: Decimal,
    ) -> Decimal {
        round_half_up(net_se_income * self.config.net_earnings_factor)
    }

    /// Social security tax on earnings up to the wage base.
    fn social_security_tax(
        &self,
        net_earnings: Decimal,
    ) -> Decimal {
        if net_earnings > self.config.ss_wage_max {
            warn!(
                net_earnings = %net_earnings,
                ss_wage_max = %self.config.ss_wage_max,
                "Net earnings exceed the social security wage base; capping"
            );
        }
        let ss_taxable = net_earnings.min(self.config.ss_wage_max);
        round_half_up(ss_taxable * self.config.ss_tax_rate)
    }

    /// Medicare tax on all net earnings; there is no wage base.
    fn medicare_tax(
        &self,
        net_earnings: Decimal,
    ) -> Decimal {
        round_half_up(net_earnings * self.config.medicare_tax_rate)
    }

    /// Additional Medicare tax on earnings above the filing-status threshold.
    fn additional_medicare_tax(
        &self,
        net_earnings: Decimal,
    ) -> Decimal {
        let excess = max(
            net_earnings - self.config.additional_medicare_threshold,
            Decimal::ZERO,
        );
        round_half_up(excess * self.config.additional_medicare_rate)
    }

    fn se_deduction(
        &self,
        total_se_tax: Decimal,
    ) -> Decimal {
        round_half_up(total_se_tax * self.config.deduction_factor)
    }
}
