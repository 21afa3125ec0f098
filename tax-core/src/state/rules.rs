//! Declarative per-jurisdiction rules and their evaluation.
//!
//! A [`StateRule`] pairs one [`StateTaxKind`] with the deduction, exemption,
//! credit, surtax and capital-gains parameters the jurisdiction applies on
//! top of the federal AGI. Evaluation is a single pass:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Standard deduction and exemptions for the filing status |
//! | 2    | Taxable income: AGI less deduction and exemptions, floored at 0 |
//! | 3    | Base tax from the rule's kind (flat rate or bracket schedule) |
//! | 4    | Capital-gains maximum rate, when lower than the regular tax |
//! | 5    | Surtax on taxable income above a threshold |
//! | 6    | Credits as flat reductions; the result is floored at 0 |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::brackets::compute_bracket_tax;
use crate::calculations::common::{format_currency, format_rate, max, ratio, round_half_up};
use crate::models::{BracketBreakdown, BracketTable, BracketTaxResult, FilingStatus};
use crate::state::{AppliedCredit, StateTaxInput, StateTaxResult};

/// An amount that differs between single-type and joint-type returns.
///
/// Married filing separately uses the single amount and a qualifying widow
/// the joint amount. Head of household uses its own amount when one is set,
/// otherwise the single amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilingAmounts {
    pub single: Decimal,
    pub joint: Decimal,
    pub head_of_household: Option<Decimal>,
}

impl FilingAmounts {
    pub fn new(
        single: Decimal,
        joint: Decimal,
    ) -> Self {
        Self {
            single,
            joint,
            head_of_household: None,
        }
    }

    pub fn for_status(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        match status {
            FilingStatus::Single | FilingStatus::MarriedFilingSeparately => self.single,
            FilingStatus::MarriedFilingJointly | FilingStatus::QualifyingWidow => self.joint,
            FilingStatus::HeadOfHousehold => self.head_of_household.unwrap_or(self.single),
        }
    }
}

/// Bracket tables for a state, mapped onto filing statuses the same way as
/// [`FilingAmounts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSchedule {
    pub single: BracketTable,
    pub joint: BracketTable,
    pub head_of_household: Option<BracketTable>,
}

impl StateSchedule {
    pub fn new(
        single: BracketTable,
        joint: BracketTable,
    ) -> Self {
        Self {
            single,
            joint,
            head_of_household: None,
        }
    }

    /// One schedule for every filing status.
    pub fn uniform(table: BracketTable) -> Self {
        Self::new(table.clone(), table)
    }

    /// Joint thresholds are twice the single thresholds.
    pub fn doubled(single: BracketTable) -> Self {
        let joint = single.scaled(Decimal::TWO);
        Self::new(single, joint)
    }

    pub fn with_head_of_household(
        mut self,
        table: BracketTable,
    ) -> Self {
        self.head_of_household = Some(table);
        self
    }

    pub fn table_for(
        &self,
        status: FilingStatus,
    ) -> &BracketTable {
        match status {
            FilingStatus::Single | FilingStatus::MarriedFilingSeparately => &self.single,
            FilingStatus::MarriedFilingJointly | FilingStatus::QualifyingWidow => &self.joint,
            FilingStatus::HeadOfHousehold => {
                self.head_of_household.as_ref().unwrap_or(&self.single)
            }
        }
    }

    fn tables(&self) -> impl Iterator<Item = &BracketTable> {
        [&self.single, &self.joint]
            .into_iter()
            .chain(self.head_of_household.as_ref())
    }
}

/// How a jurisdiction computes its base tax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateTaxKind {
    FlatRate { rate: Decimal },
    BracketSchedule(StateSchedule),
    NoIncomeTax,
}

impl StateTaxKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FlatRate { .. } => "Flat Rate",
            Self::BracketSchedule(_) => "Progressive Brackets",
            Self::NoIncomeTax => "No State Income Tax",
        }
    }
}

/// What a credit is multiplied by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CreditBasis {
    /// Taxpayer, plus the spouse on a joint return.
    PerFiler,
    PerDependent,
    /// Each age-65 or blind flag that counts for the return.
    PerAgeOrBlindFlag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateCredit {
    pub label: &'static str,
    pub basis: CreditBasis,
    pub amount: Decimal,
}

/// Additional tax at `rate` on taxable income above `threshold`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surtax {
    pub label: &'static str,
    pub threshold: Decimal,
    pub rate: Decimal,
}

/// One jurisdiction's complete rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRule {
    pub code: &'static str,
    pub name: &'static str,
    pub kind: StateTaxKind,
    pub standard_deduction: FilingAmounts,
    pub personal_exemption: FilingAmounts,
    pub dependent_exemption: Decimal,
    pub age_blind_exemption: Decimal,
    pub credits: Vec<StateCredit>,
    pub surtax: Option<Surtax>,
    pub capital_gains_max_rate: Option<Decimal>,
    pub notes: Vec<&'static str>,
}

impl StateRule {
    fn with_kind(
        code: &'static str,
        name: &'static str,
        kind: StateTaxKind,
    ) -> Self {
        Self {
            code,
            name,
            kind,
            standard_deduction: FilingAmounts::default(),
            personal_exemption: FilingAmounts::default(),
            dependent_exemption: Decimal::ZERO,
            age_blind_exemption: Decimal::ZERO,
            credits: Vec::new(),
            surtax: None,
            capital_gains_max_rate: None,
            notes: Vec::new(),
        }
    }

    pub fn flat(
        code: &'static str,
        name: &'static str,
        rate: Decimal,
    ) -> Self {
        Self::with_kind(code, name, StateTaxKind::FlatRate { rate })
    }

    pub fn brackets(
        code: &'static str,
        name: &'static str,
        schedule: StateSchedule,
    ) -> Self {
        Self::with_kind(code, name, StateTaxKind::BracketSchedule(schedule))
    }

    pub fn no_income_tax(
        code: &'static str,
        name: &'static str,
    ) -> Self {
        Self::with_kind(code, name, StateTaxKind::NoIncomeTax)
    }

    pub fn standard_deduction(
        mut self,
        single: Decimal,
        joint: Decimal,
    ) -> Self {
        self.standard_deduction = FilingAmounts::new(single, joint);
        self
    }

    pub fn standard_deduction_hoh(
        mut self,
        amount: Decimal,
    ) -> Self {
        self.standard_deduction.head_of_household = Some(amount);
        self
    }

    pub fn personal_exemption(
        mut self,
        single: Decimal,
        joint: Decimal,
    ) -> Self {
        self.personal_exemption = FilingAmounts::new(single, joint);
        self
    }

    pub fn personal_exemption_hoh(
        mut self,
        amount: Decimal,
    ) -> Self {
        self.personal_exemption.head_of_household = Some(amount);
        self
    }

    pub fn dependent_exemption(
        mut self,
        amount: Decimal,
    ) -> Self {
        self.dependent_exemption = amount;
        self
    }

    pub fn age_blind_exemption(
        mut self,
        amount: Decimal,
    ) -> Self {
        self.age_blind_exemption = amount;
        self
    }

    pub fn credit(
        mut self,
        label: &'static str,
        basis: CreditBasis,
        amount: Decimal,
    ) -> Self {
        self.credits.push(StateCredit {
            label,
            basis,
            amount,
        });
        self
    }

    pub fn surtax(
        mut self,
        label: &'static str,
        threshold: Decimal,
        rate: Decimal,
    ) -> Self {
        self.surtax = Some(Surtax {
            label,
            threshold,
            rate,
        });
        self
    }

    pub fn capital_gains_max_rate(
        mut self,
        rate: Decimal,
    ) -> Self {
        self.capital_gains_max_rate = Some(rate);
        self
    }

    pub fn note(
        mut self,
        text: &'static str,
    ) -> Self {
        self.notes.push(text);
        self
    }

    /// Bracket tables carried by this rule; empty unless it is a
    /// [`StateTaxKind::BracketSchedule`].
    pub fn bracket_tables(&self) -> Vec<&BracketTable> {
        match &self.kind {
            StateTaxKind::BracketSchedule(schedule) => schedule.tables().collect(),
            StateTaxKind::FlatRate { .. } | StateTaxKind::NoIncomeTax => Vec::new(),
        }
    }

    /// Computes the state result for an already-validated input.
    pub fn evaluate(
        &self,
        input: &StateTaxInput,
    ) -> StateTaxResult {
        match &self.kind {
            StateTaxKind::NoIncomeTax => self.evaluate_no_income_tax(input),
            StateTaxKind::FlatRate { rate } => {
                let table = BracketTable::from_thresholds(&[(Decimal::ZERO, *rate)]);
                self.evaluate_taxed(input, &table)
            }
            StateTaxKind::BracketSchedule(schedule) => {
                self.evaluate_taxed(input, schedule.table_for(input.filing_status))
            }
        }
    }

    fn evaluate_no_income_tax(
        &self,
        input: &StateTaxInput,
    ) -> StateTaxResult {
        let mut notes = vec![format!("{} does not tax wage income", self.name)];
        notes.extend(self.notes.iter().map(|note| note.to_string()));

        StateTaxResult {
            state: self.code.to_string(),
            state_name: self.name.to_string(),
            tax_type: self.kind.label().to_string(),
            federal_agi: input.federal_agi,
            notes,
            ..StateTaxResult::default()
        }
    }

    fn evaluate_taxed(
        &self,
        input: &StateTaxInput,
        table: &BracketTable,
    ) -> StateTaxResult {
        let status = input.filing_status;
        let mut notes: Vec<String> = self.notes.iter().map(|note| note.to_string()).collect();

        // Step 1
        let standard_deduction = self.standard_deduction.for_status(status);
        let exemptions = self.exemptions(input);

        // Step 2
        let taxable_income = max(
            round_half_up(input.federal_agi - standard_deduction - exemptions),
            Decimal::ZERO,
        );

        // Step 3
        let mut computed = compute_bracket_tax(taxable_income, table);

        // Step 4
        if let Some(cg_rate) = self.capital_gains_max_rate {
            if let Some(alternative) =
                capital_gains_alternative(taxable_income, input.capital_gains, cg_rate, table)
            {
                if alternative.tax < computed.tax {
                    notes.push(format!(
                        "Capital gains taxed at the {} maximum rate",
                        format_rate(cg_rate)
                    ));
                    computed = alternative;
                }
            }
        }
        let base_tax = computed.tax;
        let mut marginal_rate = computed.marginal_rate;

        // Step 5
        let mut additional_taxes = Decimal::ZERO;
        if let Some(surtax) = &self.surtax {
            if taxable_income > surtax.threshold {
                additional_taxes = round_half_up((taxable_income - surtax.threshold) * surtax.rate);
                marginal_rate += surtax.rate;
                notes.push(format!(
                    "{} of {} applied above {}",
                    surtax.label,
                    format_rate(surtax.rate),
                    format_currency(surtax.threshold)
                ));
            }
        }

        // Step 6
        let mut remaining = base_tax + additional_taxes;
        let mut credits = Vec::new();
        for credit in &self.credits {
            let nominal = credit.amount * Decimal::from(self.credit_count(credit.basis, input));
            let applied = nominal.min(remaining);
            if applied > Decimal::ZERO {
                remaining -= applied;
                credits.push(AppliedCredit {
                    label: credit.label.to_string(),
                    amount: applied,
                });
            }
        }
        let state_tax = max(round_half_up(remaining), Decimal::ZERO);

        StateTaxResult {
            state: self.code.to_string(),
            state_name: self.name.to_string(),
            tax_type: self.kind.label().to_string(),
            federal_agi: input.federal_agi,
            state_tax,
            effective_rate: ratio(state_tax, input.federal_agi),
            marginal_rate,
            taxable_income,
            standard_deduction,
            exemptions,
            base_tax,
            additional_taxes,
            credits,
            breakdown: computed.breakdown,
            notes,
        }
    }

    fn exemptions(
        &self,
        input: &StateTaxInput,
    ) -> Decimal {
        self.personal_exemption.for_status(input.filing_status)
            + self.dependent_exemption * Decimal::from(input.dependents)
            + self.age_blind_exemption * Decimal::from(input.age_blind_flags())
    }

    fn credit_count(
        &self,
        basis: CreditBasis,
        input: &StateTaxInput,
    ) -> u32 {
        match basis {
            CreditBasis::PerFiler => input.filing_status.filer_count(),
            CreditBasis::PerDependent => input.dependents,
            CreditBasis::PerAgeOrBlindFlag => input.age_blind_flags(),
        }
    }
}

/// Ordinary income through the brackets plus capital gains at `cg_rate`.
///
/// Returns `None` when there are no capital gains in taxable income. The
/// capital-gains slice is appended as its own breakdown row so the rows
/// still sum to the tax. Gains sit on top of ordinary income, so the last
/// dollar is taxed at `cg_rate`.
fn capital_gains_alternative(
    taxable_income: Decimal,
    capital_gains: Decimal,
    cg_rate: Decimal,
    table: &BracketTable,
) -> Option<BracketTaxResult> {
    let gains = capital_gains.min(taxable_income);
    if gains <= Decimal::ZERO {
        return None;
    }

    let ordinary_income = taxable_income - gains;
    let mut result = compute_bracket_tax(ordinary_income, table);
    let gains_tax = round_half_up(gains * cg_rate);
    let tax = result.tax + gains_tax;

    result.breakdown.push(BracketBreakdown {
        bracket_range: "Capital gains".to_string(),
        lower: ordinary_income,
        upper: Some(taxable_income),
        rate: cg_rate,
        taxable_in_bracket: gains,
        tax_from_bracket: gains_tax,
        cumulative_tax: tax,
    });

    Some(BracketTaxResult {
        taxable_income,
        tax,
        marginal_rate: cg_rate,
        breakdown: result.breakdown,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn input(
        status: FilingStatus,
        agi: Decimal,
    ) -> StateTaxInput {
        StateTaxInput::new("XX", status, agi)
    }

    fn two_bracket_table() -> BracketTable {
        BracketTable::new(&[(dec!(0), dec!(0.02)), (dec!(10000), dec!(0.05))]).unwrap()
    }

    // ===== FilingAmounts / StateSchedule tests =====

    #[test]
    fn filing_amounts_map_statuses() {
        let amounts = FilingAmounts::new(dec!(100), dec!(200));

        assert_eq!(amounts.for_status(FilingStatus::Single), dec!(100));
        assert_eq!(amounts.for_status(FilingStatus::MarriedFilingSeparately), dec!(100));
        assert_eq!(amounts.for_status(FilingStatus::MarriedFilingJointly), dec!(200));
        assert_eq!(amounts.for_status(FilingStatus::QualifyingWidow), dec!(200));
        assert_eq!(amounts.for_status(FilingStatus::HeadOfHousehold), dec!(100));
    }

    #[test]
    fn head_of_household_amount_overrides_single() {
        let amounts = FilingAmounts {
            head_of_household: Some(dec!(150)),
            ..FilingAmounts::new(dec!(100), dec!(200))
        };

        assert_eq!(amounts.for_status(FilingStatus::HeadOfHousehold), dec!(150));
    }

    #[test]
    fn doubled_schedule_doubles_joint_thresholds() {
        let schedule = StateSchedule::doubled(two_bracket_table());

        let joint = schedule.table_for(FilingStatus::MarriedFilingJointly);

        assert_eq!(joint.brackets()[1].min_income, dec!(20000));
        assert_eq!(
            schedule.table_for(FilingStatus::HeadOfHousehold),
            &two_bracket_table()
        );
    }

    // ===== evaluation tests =====

    #[test]
    fn no_income_tax_returns_zero_with_note() {
        let rule = StateRule::no_income_tax("XX", "Nowhere");

        let result = rule.evaluate(&input(FilingStatus::Single, dec!(90000)));

        assert_eq!(result.state_tax, dec!(0));
        assert_eq!(result.tax_type, "No State Income Tax");
        assert_eq!(result.notes, vec!["Nowhere does not tax wage income".to_string()]);
    }

    #[test]
    fn flat_rate_applies_after_deduction_and_exemptions() {
        let rule = StateRule::flat("XX", "Flatland", dec!(0.05))
            .standard_deduction(dec!(2000), dec!(4000))
            .personal_exemption(dec!(1000), dec!(2000))
            .dependent_exemption(dec!(500));
        let mut state_input = input(FilingStatus::Single, dec!(50000));
        state_input.dependents = 2;

        let result = rule.evaluate(&state_input);

        assert_eq!(result.exemptions, dec!(2000));
        assert_eq!(result.taxable_income, dec!(46000));
        assert_eq!(result.state_tax, dec!(2300.00));
        assert_eq!(result.marginal_rate, dec!(0.05));
        assert_eq!(result.effective_rate, dec!(0.046));
        assert_eq!(result.tax_type, "Flat Rate");
    }

    #[test]
    fn bracket_schedule_uses_table_for_status() {
        let rule = StateRule::brackets(
            "XX",
            "Bracketland",
            StateSchedule::doubled(two_bracket_table()),
        );

        let single = rule.evaluate(&input(FilingStatus::Single, dec!(30000)));
        let joint = rule.evaluate(&input(FilingStatus::MarriedFilingJointly, dec!(30000)));

        assert_eq!(single.state_tax, dec!(1200.00));
        assert_eq!(joint.state_tax, dec!(900.00));
        assert_eq!(single.breakdown.len(), 2);
    }

    #[test]
    fn spouse_flags_only_count_on_joint_returns() {
        let rule = StateRule::flat("XX", "Flatland", dec!(0.05)).age_blind_exemption(dec!(1000));
        let mut state_input = input(FilingStatus::Single, dec!(50000));
        state_input.age_65_or_older = true;
        state_input.spouse_age_65_or_older = true;
        state_input.spouse_blind = true;

        let single = rule.evaluate(&state_input);
        state_input.filing_status = FilingStatus::MarriedFilingJointly;
        let joint = rule.evaluate(&state_input);

        assert_eq!(single.exemptions, dec!(1000));
        assert_eq!(joint.exemptions, dec!(3000));
    }

    #[test]
    fn surtax_applies_above_threshold() {
        let rule = StateRule::flat("XX", "Flatland", dec!(0.05)).surtax(
            "Millionaire surtax",
            dec!(1000000),
            dec!(0.04),
        );

        let below = rule.evaluate(&input(FilingStatus::Single, dec!(1000000)));
        let above = rule.evaluate(&input(FilingStatus::Single, dec!(1500000)));

        assert_eq!(below.additional_taxes, dec!(0));
        assert_eq!(below.marginal_rate, dec!(0.05));
        assert_eq!(above.additional_taxes, dec!(20000.00));
        assert_eq!(above.state_tax, dec!(95000.00));
        assert_eq!(above.marginal_rate, dec!(0.09));
    }

    #[test]
    fn credits_reduce_tax_and_floor_at_zero() {
        let rule = StateRule::flat("XX", "Flatland", dec!(0.01))
            .credit("Personal credit", CreditBasis::PerFiler, dec!(50))
            .credit("Dependent credit", CreditBasis::PerDependent, dec!(100));
        let mut state_input = input(FilingStatus::MarriedFilingJointly, dec!(20000));
        state_input.dependents = 3;

        let result = rule.evaluate(&state_input);

        assert_eq!(result.base_tax, dec!(200.00));
        assert_eq!(
            result.credits,
            vec![
                AppliedCredit {
                    label: "Personal credit".to_string(),
                    amount: dec!(100),
                },
                AppliedCredit {
                    label: "Dependent credit".to_string(),
                    amount: dec!(100.00),
                },
            ]
        );
        assert_eq!(result.state_tax, dec!(0));
    }

    #[test]
    fn capital_gains_max_rate_lowers_tax() {
        let rule = StateRule::brackets(
            "XX",
            "Gainsland",
            StateSchedule::uniform(two_bracket_table()),
        )
        .capital_gains_max_rate(dec!(0.03));
        let mut state_input = input(FilingStatus::Single, dec!(30000));
        state_input.capital_gains = dec!(10000);

        let result = rule.evaluate(&state_input);

        // 10000 * 2% + 10000 * 5% + 10000 * 3%
        assert_eq!(result.base_tax, dec!(1000.00));
        assert_eq!(result.marginal_rate, dec!(0.03));
        assert_eq!(result.breakdown.last().unwrap().bracket_range, "Capital gains");
        let row_total: Decimal = result.breakdown.iter().map(|row| row.tax_from_bracket).sum();
        assert_eq!(row_total, result.base_tax);
    }

    #[test]
    fn capital_gains_max_rate_ignored_when_not_lower() {
        let rule = StateRule::brackets(
            "XX",
            "Gainsland",
            StateSchedule::uniform(two_bracket_table()),
        )
        .capital_gains_max_rate(dec!(0.09));
        let mut state_input = input(FilingStatus::Single, dec!(30000));
        state_input.capital_gains = dec!(10000);

        let result = rule.evaluate(&state_input);

        assert_eq!(result.base_tax, dec!(1200.00));
        assert_eq!(result.marginal_rate, dec!(0.05));
        assert_eq!(result.breakdown.len(), 2);
    }

    #[test]
    fn income_below_deduction_has_no_tax() {
        let rule = StateRule::flat("XX", "Flatland", dec!(0.05))
            .standard_deduction(dec!(10000), dec!(20000));

        let result = rule.evaluate(&input(FilingStatus::Single, dec!(5000)));

        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.state_tax, dec!(0));
        assert_eq!(result.marginal_rate, dec!(0));
    }
}
