//! Integration tests for CSV loading against the engine's tables.

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_core::calculations::FederalTaxEngine;
use tax_core::models::{FilingStatus, FinalStatus};
use tax_core::state::calculate_state_tax;
use tax_core::tables::TaxTables;
use tax_core::TaxError;
use tax_data::{TaxBracketLoader, TaxBracketLoaderError, load_from_str};

const TEST_CSV_2025: &str = include_str!("../test-data/tax_brackets_2025.csv");
const RETURNS_CSV: &str = include_str!("../test-data/returns.csv");

#[test]
fn test_load_all_2025_brackets() {
    let mut tables = TaxTables::builtin().clone();

    let records = TaxBracketLoader::parse(TEST_CSV_2025.as_bytes()).expect("Failed to parse CSV");
    // 28 records in CSV, but Y-1 maps to both MFJ and QW, so 28 + 7 = 35
    let inserted = TaxBracketLoader::load(&mut tables, &records).expect("Failed to load brackets");

    assert_eq!(inserted, 35);
}

#[test]
fn test_published_2025_schedules_match_builtin() {
    let mut tables = TaxTables::builtin().clone();
    let records = TaxBracketLoader::parse(TEST_CSV_2025.as_bytes()).expect("Failed to parse CSV");

    TaxBracketLoader::load(&mut tables, &records).expect("Failed to load brackets");

    assert_eq!(&tables, TaxTables::builtin());
}

#[test]
fn test_loaded_brackets_drive_the_engine() {
    let mut tables = TaxTables::builtin().clone();
    let csv = "\
tax_year,schedule,min_income,max_income,base_tax,rate
2024,X,0,,0,0.10
";
    let records = TaxBracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");
    TaxBracketLoader::load(&mut tables, &records).expect("Failed to load brackets");
    let returns = load_from_str(
        "\
tax_year,filing_status,wages
2024,S,64600.00
2024,MFJ,64600.00
",
    )
    .expect("Failed to load returns");

    let engine = FederalTaxEngine::new(&tables);
    let single = engine.calculate(&returns[0].input).unwrap();
    let joint = engine.calculate(&returns[1].input).unwrap();

    // 64,600 less the 14,600 standard deduction at a flat 10%
    assert_eq!(single.summary.total_tax_liability, dec!(5000.00));
    assert_eq!(
        joint.summary.total_tax_liability,
        FederalTaxEngine::builtin()
            .calculate(&returns[1].input)
            .unwrap()
            .summary
            .total_tax_liability
    );
}

#[test]
fn test_load_rejects_year_without_tables() {
    let mut tables = TaxTables::builtin().clone();
    let records =
        TaxBracketLoader::parse(TEST_CSV_2025.replace("2025,", "2031,").as_bytes()).unwrap();

    let result = TaxBracketLoader::load(&mut tables, &records);

    assert_eq!(result, Err(TaxBracketLoaderError::TaxYearNotFound(2031)));
}

#[test]
fn test_returns_fixture_end_to_end() {
    let returns = load_from_str(RETURNS_CSV).expect("Failed to load returns");
    assert_eq!(returns.len(), 5);

    // Row 1: single wage earner, 2023
    let first = &returns[0];
    let federal = tax_core::calculate_federal_tax(&first.input).unwrap();
    assert_eq!(federal.summary.total_tax_liability, dec!(4118.00));
    assert_eq!(federal.reconciliation.final_status, FinalStatus::Refund);
    assert_eq!(federal.reconciliation.refund_amount, dec!(882.00));
    let profile = first.state.as_ref().unwrap();
    let state = calculate_state_tax(
        &profile.to_state_input(&first.input, federal.summary.adjusted_gross_income),
    )
    .unwrap();
    assert_eq!(state.state_tax, dec!(0));

    // Row 2: self-employed, estimated payments only
    let second = &returns[1];
    let federal = tax_core::calculate_federal_tax(&second.input).unwrap();
    assert_eq!(federal.self_employment.se_deduction, dec!(1412.96));
    assert_eq!(federal.reconciliation.total_payments, dec!(1500.00));

    // Row 3: joint itemizer in California
    let third = &returns[2];
    assert_eq!(third.input.filing.filing_status, FilingStatus::MarriedFilingJointly);
    let federal = tax_core::calculate_federal_tax(&third.input).unwrap();
    assert_eq!(federal.deduction.selected_deduction, dec!(34500.00));

    // Row 5: unknown state is reported, not zero
    let fifth = &returns[4];
    let federal = tax_core::calculate_federal_tax(&fifth.input).unwrap();
    let profile = fifth.state.as_ref().unwrap();
    let result = calculate_state_tax(
        &profile.to_state_input(&fifth.input, federal.summary.adjusted_gross_income),
    );
    assert_eq!(result, Err(TaxError::UnsupportedState("ZZ".to_string())));
}
