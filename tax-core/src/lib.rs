//! US individual income-tax engine.
//!
//! [`FederalTaxEngine`] runs the federal pipeline for one return and
//! [`StateTaxDispatcher`] applies a state's rule to the federal AGI. The two
//! are independent; callers combine their balances.

pub mod calculations;
pub mod error;
pub mod models;
pub mod state;
pub mod tables;

pub use calculations::{FederalTaxEngine, calculate_federal_tax};
pub use error::{InvalidInputError, TaxError};
pub use models::*;
pub use state::{StateTaxDispatcher, StateTaxInput, StateTaxResult, calculate_state_tax};
pub use tables::{TaxTables, TaxYearTables};
