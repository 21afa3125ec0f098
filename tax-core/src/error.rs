//! Error types surfaced by the tax engine.
//!
//! Only two kinds of failure exist once tables are loaded: input that must
//! be corrected before anything is computed, and a state code for which no
//! rule is defined. Every phase after validation is plain arithmetic.
//! Caller-supplied tables can additionally carry an invalid SE configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::calculations::SeTaxConfigError;

/// Largest amount accepted in any input field. Every phase stays far inside
/// `Decimal` range below this.
pub const MAX_AMOUNT: Decimal = dec!(1_000_000_000_000);

/// Input rejected at the boundary, before any phase runs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidInputError {
    /// A currency amount was negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// A currency amount exceeded [`MAX_AMOUNT`].
    #[error("{field} must not exceed 1000000000000, got {value}")]
    AmountTooLarge { field: &'static str, value: Decimal },

    /// The filing status text matched none of the known statuses.
    #[error("unrecognized filing status '{0}'")]
    UnknownFilingStatus(String),

    /// No federal tables exist for the requested tax year.
    #[error("no tax tables available for tax year {0}")]
    UnsupportedTaxYear(i32),
}

/// Errors returned by the federal pipeline and the state dispatcher.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The state code has no rule in the jurisdiction table. Callers must
    /// report the state tax as unavailable rather than as zero.
    #[error("no state computation available for '{0}'")]
    UnsupportedState(String),

    /// A year table installed by the caller has out-of-range SE parameters.
    /// The compiled-in tables never produce this.
    #[error("invalid self-employment configuration: {0}")]
    InvalidConfiguration(#[from] SeTaxConfigError),
}

/// Checks that `value` lies in `0..=MAX_AMOUNT`, naming `field` otherwise.
pub(crate) fn ensure_amount(
    field: &'static str,
    value: Decimal,
) -> Result<(), InvalidInputError> {
    if value < Decimal::ZERO {
        return Err(InvalidInputError::NegativeAmount { field, value });
    }
    if value > MAX_AMOUNT {
        return Err(InvalidInputError::AmountTooLarge { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn ensure_amount_accepts_zero_and_the_limit() {
        assert_eq!(ensure_amount("wages", dec!(0.00)), Ok(()));
        assert_eq!(ensure_amount("wages", MAX_AMOUNT), Ok(()));
    }

    #[test]
    fn ensure_amount_rejects_values_past_the_limit() {
        let result = ensure_amount("wages", Decimal::MAX);

        assert_eq!(
            result,
            Err(InvalidInputError::AmountTooLarge {
                field: "wages",
                value: Decimal::MAX,
            })
        );
    }

    #[test]
    fn ensure_amount_names_the_field() {
        let result = ensure_amount("interest", dec!(-0.01));

        assert_eq!(
            result,
            Err(InvalidInputError::NegativeAmount {
                field: "interest",
                value: dec!(-0.01),
            })
        );
    }

    #[test]
    fn unsupported_state_message_names_the_code() {
        let err = TaxError::UnsupportedState("ZZ".to_string());

        assert_eq!(err.to_string(), "no state computation available for 'ZZ'");
    }

    #[test]
    fn invalid_input_converts_into_tax_error() {
        let err: TaxError = InvalidInputError::UnsupportedTaxYear(1999).into();

        assert_eq!(
            err.to_string(),
            "invalid input: no tax tables available for tax year 1999"
        );
    }
}
