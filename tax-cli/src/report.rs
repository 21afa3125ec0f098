//! Combines federal and state results for one return and renders them.
//!
//! The engine never merges the two balances; this is the caller that does.

use std::fmt::Write;

use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::TaxError;
use tax_core::calculations::common::{format_currency, format_rate};
use tax_core::calculations::{
    DeductionRecommendation, FederalTaxEngine, recommend_deduction, reconcile_state,
};
use tax_core::models::{
    BracketBreakdown, BracketTable, ComprehensiveTaxResult, DeductionMode, FilingStatus,
    FinalStatus, Reconciliation,
};
use tax_core::state::{StateRule, StateTaxDispatcher, StateTaxKind, StateTaxResult};
use tax_data::ReturnRecord;
use tracing::warn;

/// What happened to the state side of a return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateOutcome {
    /// The row named no state.
    NotRequested,
    Computed {
        result: StateTaxResult,
        reconciliation: Reconciliation,
    },
    /// The dispatcher refused the state; shown as unavailable, never as $0.
    Unavailable { state: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnReport {
    pub row: usize,
    pub federal: ComprehensiveTaxResult,
    pub state: StateOutcome,
    pub recommendation: DeductionRecommendation,
}

impl ReturnReport {
    /// Runs the federal pipeline, then the state dispatcher on the federal
    /// AGI. A state failure is kept in the report; a federal one is returned.
    pub fn build(
        record: &ReturnRecord,
        engine: &FederalTaxEngine<'_>,
        dispatcher: &StateTaxDispatcher,
    ) -> Result<Self, TaxError> {
        let federal = engine.calculate(&record.input)?;

        let state = match &record.state {
            None => StateOutcome::NotRequested,
            Some(profile) => {
                let state_input =
                    profile.to_state_input(&record.input, federal.summary.adjusted_gross_income);
                match dispatcher.calculate(&state_input) {
                    Ok(result) => {
                        let reconciliation =
                            reconcile_state(&result, record.input.withholding.state_tax);
                        StateOutcome::Computed {
                            result,
                            reconciliation,
                        }
                    }
                    Err(err) => {
                        warn!(
                            row = record.row,
                            state = %profile.state,
                            error = %err,
                            "State tax unavailable"
                        );
                        StateOutcome::Unavailable {
                            state: profile.state.clone(),
                            reason: err.to_string(),
                        }
                    }
                }
            }
        };

        let recommendation = recommend_deduction(
            federal.deduction.standard_deduction,
            record.input.filing.itemized_deduction_amount,
        );

        Ok(Self {
            row: record.row,
            federal,
            state,
            recommendation,
        })
    }

    /// Federal balance plus the state balance when one was computed.
    /// Positive is owed, negative is a refund. `None` when the requested
    /// state could not be computed, since a federal-only figure would
    /// understate the total.
    pub fn combined_balance(&self) -> Option<Decimal> {
        let state_balance = match &self.state {
            StateOutcome::Computed { reconciliation, .. } => reconciliation.balance,
            StateOutcome::NotRequested => Decimal::ZERO,
            StateOutcome::Unavailable { .. } => return None,
        };
        Some(self.federal.reconciliation.balance + state_balance)
    }
}

/// One line of `--format csv` output.
#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub row: usize,
    pub tax_year: i32,
    pub filing_status: &'static str,
    pub adjusted_gross_income: Decimal,
    pub taxable_income: Decimal,
    pub federal_tax: Decimal,
    pub effective_rate: Decimal,
    pub marginal_rate: Decimal,
    pub federal_balance: Decimal,
    pub state: Option<String>,
    /// Empty when the state was not requested or is unavailable.
    pub state_tax: Option<Decimal>,
    pub state_balance: Option<Decimal>,
    /// Empty when the state is unavailable.
    pub combined_balance: Option<Decimal>,
    pub recommended_deduction: DeductionMode,
}

impl From<&ReturnReport> for SummaryRow {
    fn from(report: &ReturnReport) -> Self {
        let federal = &report.federal;
        let (state, state_tax, state_balance) = match &report.state {
            StateOutcome::NotRequested => (None, None, None),
            StateOutcome::Computed {
                result,
                reconciliation,
            } => (
                Some(result.state.clone()),
                Some(result.state_tax),
                Some(reconciliation.balance),
            ),
            StateOutcome::Unavailable { state, .. } => (Some(state.clone()), None, None),
        };

        Self {
            row: report.row,
            tax_year: federal.metadata.tax_year,
            filing_status: federal.metadata.filing_status.as_str(),
            adjusted_gross_income: federal.summary.adjusted_gross_income,
            taxable_income: federal.summary.taxable_income,
            federal_tax: federal.summary.total_tax_liability,
            effective_rate: federal.summary.effective_tax_rate,
            marginal_rate: federal.summary.marginal_tax_rate,
            federal_balance: federal.reconciliation.balance,
            state,
            state_tax,
            state_balance,
            combined_balance: report.combined_balance(),
            recommended_deduction: report.recommendation.recommended,
        }
    }
}

fn status_line(reconciliation: &Reconciliation) -> String {
    match reconciliation.final_status {
        FinalStatus::Refund => {
            format!("Refund {}", format_currency(reconciliation.refund_amount))
        }
        FinalStatus::Owed => format!("Owed {}", format_currency(reconciliation.balance_due)),
        FinalStatus::Even => "Even".to_string(),
    }
}

fn mode_name(mode: DeductionMode) -> &'static str {
    match mode {
        DeductionMode::Standard => "standard",
        DeductionMode::Itemized => "itemized",
    }
}

fn write_breakdown(
    out: &mut String,
    rows: &[BracketBreakdown],
) {
    for row in rows {
        let _ = writeln!(
            out,
            "    {:<28} {:>7}  {:>14}  {:>12}",
            row.bracket_range,
            format_rate(row.rate),
            format_currency(row.taxable_in_bracket),
            format_currency(row.tax_from_bracket)
        );
    }
}

fn write_amount(
    out: &mut String,
    label: &str,
    value: Decimal,
) {
    let _ = writeln!(out, "    {label:<22}{:>14}", format_currency(value));
}

fn balance_text(balance: Decimal) -> String {
    if balance < Decimal::ZERO {
        format!("Refund {}", format_currency(-balance))
    } else if balance > Decimal::ZERO {
        format!("Owed {}", format_currency(balance))
    } else {
        "Even".to_string()
    }
}

/// Human-readable report for one return.
pub fn render_text(report: &ReturnReport) -> String {
    let federal = &report.federal;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Return {} | {} | {}",
        report.row,
        federal.metadata.tax_year,
        federal.metadata.filing_status.display_name()
    );

    let _ = writeln!(out, "  Federal");
    write_amount(&mut out, "Total income", federal.income.total_income);
    if !federal.self_employment.total_se_tax.is_zero() {
        write_amount(
            &mut out,
            "SE tax deduction",
            federal.adjustments.se_tax_deduction,
        );
    }
    write_amount(&mut out, "AGI", federal.summary.adjusted_gross_income);
    let _ = writeln!(
        out,
        "    Deduction ({:<8})  {:>14}",
        mode_name(federal.metadata.deduction_mode),
        format_currency(federal.deduction.selected_deduction)
    );
    write_amount(&mut out, "Taxable income", federal.summary.taxable_income);
    write_breakdown(&mut out, &federal.income_tax.breakdown);
    write_amount(&mut out, "Income tax", federal.income_tax.tax);
    write_amount(
        &mut out,
        "Self-employment tax",
        federal.self_employment.total_se_tax,
    );
    write_amount(
        &mut out,
        "Total liability",
        federal.summary.total_tax_liability,
    );
    let _ = writeln!(
        out,
        "    Effective / marginal  {:>7} / {}",
        format_rate(federal.summary.effective_tax_rate),
        format_rate(federal.summary.marginal_tax_rate)
    );
    write_amount(&mut out, "Payments", federal.reconciliation.total_payments);
    let _ = writeln!(
        out,
        "    Federal balance       {}",
        status_line(&federal.reconciliation)
    );

    match &report.state {
        StateOutcome::NotRequested => {}
        StateOutcome::Computed {
            result,
            reconciliation,
        } => {
            let _ = writeln!(
                out,
                "  State: {} ({})",
                result.state_name, result.tax_type
            );
            if result.tax_type != StateTaxKind::NoIncomeTax.label() {
                write_amount(&mut out, "Taxable income", result.taxable_income);
                write_breakdown(&mut out, &result.breakdown);
                if !result.additional_taxes.is_zero() {
                    write_amount(&mut out, "Surtax", result.additional_taxes);
                }
                for credit in &result.credits {
                    write_amount(&mut out, &credit.label, -credit.amount);
                }
            }
            write_amount(&mut out, "State tax", result.state_tax);
            for note in &result.notes {
                let _ = writeln!(out, "    Note: {note}");
            }
            let _ = writeln!(
                out,
                "    State balance         {}",
                status_line(reconciliation)
            );
        }
        StateOutcome::Unavailable { state, reason } => {
            let _ = writeln!(
                out,
                "  State: {state}: state tax unavailable ({reason})"
            );
        }
    }

    let combined_text = match report.combined_balance() {
        Some(balance) => balance_text(balance),
        None => "unavailable (state tax not computed)".to_string(),
    };
    let _ = writeln!(out, "  Combined balance        {combined_text}");

    let rec = &report.recommendation;
    let _ = writeln!(
        out,
        "  Recommendation: {} deduction is larger by {} (display only)",
        mode_name(rec.recommended),
        format_currency(rec.difference)
    );

    out
}

/// Lists every supported jurisdiction.
pub fn render_states<'a>(rules: impl IntoIterator<Item = &'a StateRule>) -> String {
    let mut out = String::new();
    for rule in rules {
        let detail = match &rule.kind {
            StateTaxKind::FlatRate { rate } => format_rate(*rate),
            StateTaxKind::BracketSchedule(schedule) => {
                let top = schedule.single.top_rate();
                format!("top rate {}", format_rate(top))
            }
            StateTaxKind::NoIncomeTax => String::new(),
        };
        let _ = writeln!(
            out,
            "{}  {:<22} {:<22} {}",
            rule.code,
            rule.name,
            rule.kind.label(),
            detail
        );
    }
    out
}

/// Prints one federal bracket schedule.
pub fn render_brackets(
    tax_year: i32,
    status: FilingStatus,
    table: &BracketTable,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {} brackets", tax_year, status.display_name());
    for bracket in table.brackets() {
        let upper = bracket
            .max_income
            .map_or_else(|| "and up".to_string(), format_currency);
        let _ = writeln!(
            out,
            "  {:>14} - {:<14} {:>7}",
            format_currency(bracket.min_income),
            upper,
            format_rate(bracket.tax_rate)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tax_core::tables::TaxTables;
    use tax_data::load_from_str;

    use super::*;

    fn report_for(state: Option<&str>) -> ReturnReport {
        let mut csv = String::from(
            "tax_year,filing_status,wages,federal_withholding,state_withholding,state\n",
        );
        csv.push_str(&format!(
            "2023,S,50000.00,5000.00,1000.00,{}\n",
            state.unwrap_or("")
        ));
        let records = load_from_str(&csv).unwrap();

        ReturnReport::build(
            &records[0],
            &FederalTaxEngine::builtin(),
            StateTaxDispatcher::builtin(),
        )
        .unwrap()
    }

    #[test]
    fn combined_balance_adds_state_balance() {
        let report = report_for(Some("PA"));

        // federal refund 882.00; PA owes 1535.00 - 1000.00
        assert_eq!(report.combined_balance(), Some(dec!(-347.00)));
    }

    #[test]
    fn combined_balance_is_federal_only_without_state() {
        let report = report_for(None);

        assert_eq!(report.combined_balance(), Some(dec!(-882.00)));
    }

    #[test]
    fn combined_balance_is_withheld_when_state_unavailable() {
        let report = report_for(Some("ZZ"));

        assert_eq!(report.combined_balance(), None);
    }

    #[test]
    fn text_report_marks_unavailable_state() {
        let text = render_text(&report_for(Some("ZZ")));

        assert!(text.contains("ZZ: state tax unavailable"));
        assert!(!text.contains("State tax  "));
        let combined = text
            .lines()
            .find(|line| line.contains("Combined balance"))
            .unwrap();
        assert!(combined.contains("unavailable"));
        assert!(!combined.contains("$"));
    }

    #[test]
    fn text_report_shows_federal_totals() {
        let text = render_text(&report_for(None));

        assert!(text.contains("Return 1 | 2023 | Single"));
        assert!(text.contains("$36,150.00"));
        assert!(text.contains("Refund $882.00"));
        assert!(text.contains("(display only)"));
    }

    #[test]
    fn summary_row_leaves_state_empty_when_unavailable() {
        let row = SummaryRow::from(&report_for(Some("ZZ")));

        assert_eq!(row.state, Some("ZZ".to_string()));
        assert_eq!(row.state_tax, None);
        assert_eq!(row.combined_balance, None);
        assert_eq!(row.federal_balance, dec!(-882.00));
        assert_eq!(row.federal_tax, dec!(4118.00));
        assert_eq!(row.filing_status, "S");
    }

    #[test]
    fn states_listing_covers_every_jurisdiction() {
        let text = render_states(StateTaxDispatcher::builtin().rules());

        assert_eq!(text.lines().count(), 51);
        assert!(
            text.lines()
                .any(|line| line.starts_with("TX") && line.contains("No State Income Tax"))
        );
    }

    #[test]
    fn brackets_listing_ends_open() {
        let table = TaxTables::builtin()
            .year(2023)
            .unwrap()
            .bracket_table(FilingStatus::Single);

        let text = render_brackets(2023, FilingStatus::Single, table);

        assert_eq!(text.lines().count(), 8);
        assert!(text.lines().last().unwrap().contains("and up"));
        assert!(text.contains("$11,000.00"));
    }
}
