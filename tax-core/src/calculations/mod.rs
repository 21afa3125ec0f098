//! The federal calculation phases.
//!
//! Each phase is a pure function over plain values; [`FederalTaxEngine`]
//! runs them in order against a set of [`TaxTables`](crate::tables::TaxTables).

pub mod brackets;
pub mod common;
pub mod deduction;
pub mod federal;
pub mod income;
pub mod liability;
pub mod self_emp;
pub mod taxable_income;
pub mod withholding;

pub use brackets::compute_bracket_tax;
pub use deduction::{DeductionRecommendation, recommend_deduction, select_deduction};
pub use federal::{FederalTaxEngine, calculate_federal_tax};
pub use income::aggregate_income;
pub use liability::aggregate_liability;
pub use self_emp::{SeTaxConfig, SeTaxConfigError, SelfEmploymentTaxCalculator};
pub use taxable_income::{compute_agi, compute_taxable_income};
pub use withholding::{reconcile, reconcile_state};
