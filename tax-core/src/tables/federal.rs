//! IRS rate schedules X, Y-1, Y-2 and Z, standard deductions and payroll
//! parameters, by tax year.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::TaxYearTables;
use crate::models::{BracketTable, ByFilingStatus, TaxYearConfig};

fn statutory_rates() -> [Decimal; 7] {
    [
        dec!(0.10),
        dec!(0.12),
        dec!(0.22),
        dec!(0.24),
        dec!(0.32),
        dec!(0.35),
        dec!(0.37),
    ]
}

/// Pairs the seven statutory rates with one schedule's thresholds.
fn schedule(thresholds: [Decimal; 7]) -> BracketTable {
    let pairs: Vec<_> = thresholds.into_iter().zip(statutory_rates()).collect();
    BracketTable::from_thresholds(&pairs)
}

fn payroll_config(
    tax_year: i32,
    ss_wage_max: Decimal,
) -> TaxYearConfig {
    TaxYearConfig {
        tax_year,
        ss_wage_max,
        ss_tax_rate: dec!(0.124),
        medicare_tax_rate: dec!(0.029),
        net_earnings_factor: dec!(0.9235),
        se_deduction_factor: dec!(0.50),
        additional_medicare_rate: dec!(0.009),
        additional_medicare_thresholds: ByFilingStatus {
            single: dec!(200000),
            married_filing_jointly: dec!(250000),
            married_filing_separately: dec!(125000),
            head_of_household: dec!(200000),
            qualifying_widow: dec!(200000),
        },
    }
}

fn year_tables(
    config: TaxYearConfig,
    standard: [Decimal; 3],
    single: [Decimal; 7],
    joint: [Decimal; 7],
    separate: [Decimal; 7],
    head_of_household: [Decimal; 7],
) -> TaxYearTables {
    let [single_deduction, joint_deduction, hoh_deduction] = standard;
    let joint = schedule(joint);
    TaxYearTables {
        config,
        standard_deductions: ByFilingStatus {
            single: single_deduction,
            married_filing_jointly: joint_deduction,
            married_filing_separately: single_deduction,
            head_of_household: hoh_deduction,
            qualifying_widow: joint_deduction,
        },
        brackets: ByFilingStatus {
            single: schedule(single),
            married_filing_jointly: joint.clone(),
            married_filing_separately: schedule(separate),
            head_of_household: schedule(head_of_household),
            qualifying_widow: joint,
        },
    }
}

pub(super) fn tax_year_2023() -> TaxYearTables {
    year_tables(
        payroll_config(2023, dec!(160200)),
        [dec!(13850), dec!(27700), dec!(20800)],
        [
            dec!(0),
            dec!(11000),
            dec!(44725),
            dec!(95375),
            dec!(182100),
            dec!(231250),
            dec!(578125),
        ],
        [
            dec!(0),
            dec!(22000),
            dec!(89450),
            dec!(190750),
            dec!(364200),
            dec!(462500),
            dec!(693750),
        ],
        [
            dec!(0),
            dec!(11000),
            dec!(44725),
            dec!(95375),
            dec!(182100),
            dec!(231250),
            dec!(346875),
        ],
        [
            dec!(0),
            dec!(15700),
            dec!(59850),
            dec!(95350),
            dec!(182100),
            dec!(231250),
            dec!(578100),
        ],
    )
}

pub(super) fn tax_year_2024() -> TaxYearTables {
    year_tables(
        payroll_config(2024, dec!(168600)),
        [dec!(14600), dec!(29200), dec!(21900)],
        [
            dec!(0),
            dec!(11600),
            dec!(47150),
            dec!(100525),
            dec!(191950),
            dec!(243725),
            dec!(609350),
        ],
        [
            dec!(0),
            dec!(23200),
            dec!(94300),
            dec!(201050),
            dec!(383900),
            dec!(487450),
            dec!(731200),
        ],
        [
            dec!(0),
            dec!(11600),
            dec!(47150),
            dec!(100525),
            dec!(191950),
            dec!(243725),
            dec!(365600),
        ],
        [
            dec!(0),
            dec!(16550),
            dec!(63100),
            dec!(100500),
            dec!(191950),
            dec!(243700),
            dec!(609350),
        ],
    )
}

// Standard deductions reflect the mid-2025 increase (P.L. 119-21).
pub(super) fn tax_year_2025() -> TaxYearTables {
    year_tables(
        payroll_config(2025, dec!(176100)),
        [dec!(15750), dec!(31500), dec!(23625)],
        [
            dec!(0),
            dec!(11925),
            dec!(48475),
            dec!(103350),
            dec!(197300),
            dec!(250525),
            dec!(626350),
        ],
        [
            dec!(0),
            dec!(23850),
            dec!(96950),
            dec!(206700),
            dec!(394600),
            dec!(501050),
            dec!(751600),
        ],
        [
            dec!(0),
            dec!(11925),
            dec!(48475),
            dec!(103350),
            dec!(197300),
            dec!(250525),
            dec!(375800),
        ],
        [
            dec!(0),
            dec!(17000),
            dec!(64850),
            dec!(103350),
            dec!(197300),
            dec!(250500),
            dec!(626350),
        ],
    )
}
