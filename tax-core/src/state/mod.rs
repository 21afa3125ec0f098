//! State income tax, computed independently of the federal pipeline.
//!
//! The only federal figure a state computation consumes is the AGI, passed in
//! on [`StateTaxInput`]. Each of the 50 states and DC maps to exactly one
//! [`StateRule`]; a code with no rule is an error, never a zero tax.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::models::FilingStatus;
//! use tax_core::state::{StateTaxInput, calculate_state_tax};
//!
//! let input = StateTaxInput::new("tx", FilingStatus::Single, dec!(75000));
//! let result = calculate_state_tax(&input).unwrap();
//!
//! assert_eq!(result.state, "TX");
//! assert_eq!(result.state_tax, dec!(0));
//!
//! let input = StateTaxInput::new("ZZ", FilingStatus::Single, dec!(75000));
//! assert!(calculate_state_tax(&input).is_err());
//! ```

mod jurisdictions;
pub mod rules;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{InvalidInputError, TaxError, ensure_amount};
use crate::models::{BracketBreakdown, FilingStatus};

pub use rules::{
    CreditBasis, FilingAmounts, StateCredit, StateRule, StateSchedule, StateTaxKind, Surtax,
};

static BUILTIN: LazyLock<StateTaxDispatcher> =
    LazyLock::new(|| StateTaxDispatcher::from_rules(jurisdictions::all()));

/// Inputs to one state computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTaxInput {
    pub state: String,
    pub filing_status: FilingStatus,
    pub federal_agi: Decimal,
    #[serde(default)]
    pub dependents: u32,
    #[serde(default)]
    pub age_65_or_older: bool,
    #[serde(default)]
    pub blind: bool,
    #[serde(default)]
    pub spouse_age_65_or_older: bool,
    #[serde(default)]
    pub spouse_blind: bool,
    /// Already part of `federal_agi`. Carried for jurisdictions that tax
    /// investment income separately; no built-in rule reads it (New
    /// Hampshire's interest and dividends tax is noted, not computed).
    #[serde(default)]
    pub dividends: Decimal,
    /// Same treatment as `dividends`.
    #[serde(default)]
    pub interest: Decimal,
    /// Portion of `federal_agi` eligible for a state's capital-gains maximum
    /// rate.
    #[serde(default)]
    pub capital_gains: Decimal,
}

impl StateTaxInput {
    /// Input with no dependents, flags or investment income.
    pub fn new(
        state: impl Into<String>,
        filing_status: FilingStatus,
        federal_agi: Decimal,
    ) -> Self {
        Self {
            state: state.into(),
            filing_status,
            federal_agi,
            dependents: 0,
            age_65_or_older: false,
            blind: false,
            spouse_age_65_or_older: false,
            spouse_blind: false,
            dividends: Decimal::ZERO,
            interest: Decimal::ZERO,
            capital_gains: Decimal::ZERO,
        }
    }

    pub fn validate(&self) -> Result<(), InvalidInputError> {
        ensure_amount("federal_agi", self.federal_agi)?;
        ensure_amount("dividends", self.dividends)?;
        ensure_amount("interest", self.interest)?;
        ensure_amount("capital_gains", self.capital_gains)
    }

    /// Age-65 and blind flags that count for this return. Spouse flags only
    /// count on a joint return.
    pub fn age_blind_flags(&self) -> u32 {
        let mut flags = u32::from(self.age_65_or_older) + u32::from(self.blind);
        if self.filing_status == FilingStatus::MarriedFilingJointly {
            flags += u32::from(self.spouse_age_65_or_older) + u32::from(self.spouse_blind);
        }
        flags
    }
}

/// A credit as actually applied, after capping at the remaining tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedCredit {
    pub label: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxResult {
    pub state: String,
    pub state_name: String,
    pub tax_type: String,
    pub federal_agi: Decimal,
    pub state_tax: Decimal,
    pub effective_rate: Decimal,
    pub marginal_rate: Decimal,
    pub taxable_income: Decimal,
    pub standard_deduction: Decimal,
    pub exemptions: Decimal,
    /// Tax before surtax and credits.
    pub base_tax: Decimal,
    /// Surtax, if any.
    pub additional_taxes: Decimal,
    pub credits: Vec<AppliedCredit>,
    pub breakdown: Vec<BracketBreakdown>,
    pub notes: Vec<String>,
}

impl StateTaxResult {
    pub fn total_credits(&self) -> Decimal {
        self.credits.iter().map(|credit| credit.amount).sum()
    }
}

/// Routes a state code to its rule.
#[derive(Debug, Clone, Default)]
pub struct StateTaxDispatcher {
    rules: BTreeMap<&'static str, StateRule>,
}

impl StateTaxDispatcher {
    /// Dispatcher over the compiled-in jurisdiction table.
    pub fn builtin() -> &'static StateTaxDispatcher {
        &BUILTIN
    }

    pub fn from_rules(rules: impl IntoIterator<Item = StateRule>) -> Self {
        Self {
            rules: rules.into_iter().map(|rule| (rule.code, rule)).collect(),
        }
    }

    /// Looks up the rule for `code`, ignoring case and surrounding
    /// whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::UnsupportedState`] when no rule exists.
    pub fn rule_for(
        &self,
        code: &str,
    ) -> Result<&StateRule, TaxError> {
        let normalized = code.trim().to_ascii_uppercase();
        self.rules.get(normalized.as_str()).ok_or_else(|| {
            warn!(state = %normalized, "No state computation available");
            TaxError::UnsupportedState(normalized)
        })
    }

    /// Supported codes in alphabetical order.
    pub fn supported_states(&self) -> Vec<&'static str> {
        self.rules.keys().copied().collect()
    }

    pub fn rules(&self) -> impl Iterator<Item = &StateRule> {
        self.rules.values()
    }

    /// Computes the state result for one return.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::InvalidInput`] for a negative amount and
    /// [`TaxError::UnsupportedState`] for a code with no rule.
    pub fn calculate(
        &self,
        input: &StateTaxInput,
    ) -> Result<StateTaxResult, TaxError> {
        input.validate()?;
        let rule = self.rule_for(&input.state)?;

        let result = rule.evaluate(input);

        debug!(
            state = rule.code,
            taxable_income = %result.taxable_income,
            state_tax = %result.state_tax,
            "Computed state tax"
        );

        Ok(result)
    }
}

/// Computes state tax with the compiled-in jurisdiction table.
pub fn calculate_state_tax(input: &StateTaxInput) -> Result<StateTaxResult, TaxError> {
    StateTaxDispatcher::builtin().calculate(input)
}
