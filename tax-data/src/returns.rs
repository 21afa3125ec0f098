//! CSV loader for batches of tax returns.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Only
//! `tax_year` and `filing_status` are required; every other column may be
//! omitted entirely or left empty, in which case it counts as zero (or
//! `false` for flags).
//!
//! | Column                         | Type    | Notes |
//! |--------------------------------|---------|-------|
//! | `tax_year`                     | integer | e.g. `2024` |
//! | `filing_status`                | string  | `S`, `MFJ`, `MFS`, `HOH`, `QW` (or `QSS`) |
//! | `wages`                        | decimal | W-2 box 1 |
//! | `interest`                     | decimal | |
//! | `dividends`                    | decimal | |
//! | `nonemployee_compensation`     | decimal | 1099-NEC; subject to SE tax |
//! | `miscellaneous_income`         | decimal | |
//! | `rental_royalties`             | decimal | |
//! | `other_income`                 | decimal | |
//! | `federal_withholding`          | decimal | |
//! | `state_withholding`            | decimal | |
//! | `social_security_withholding`  | decimal | informational only |
//! | `medicare_withholding`         | decimal | informational only |
//! | `estimated_tax_payments`       | decimal | |
//! | `use_itemized`                 | bool    | explicit election |
//! | `itemized_deductions`          | decimal | already capped |
//! | `state`                        | string  | two-letter code; empty for none |
//! | `dependents`                   | integer | |
//! | `age_65_or_older`, `blind`     | bool    | |
//! | `spouse_age_65_or_older`, `spouse_blind` | bool | joint returns only |
//! | `capital_gains`                | decimal | used by states with a capital-gains rate |
//!
//! ### Minimal example
//!
//! ```csv
//! tax_year,filing_status,wages
//! 2024,MFJ,150000.00
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::InvalidInputError;
use tax_core::models::{
    FilingParameters, FilingStatus, IncomeRecord, TaxReturnInput, WithholdingRecord,
};
use tax_core::state::StateTaxInput;
use tracing::debug;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    tax_year: i32,
    filing_status: String,
    #[serde(default)]
    wages: Option<Decimal>,
    #[serde(default)]
    interest: Option<Decimal>,
    #[serde(default)]
    dividends: Option<Decimal>,
    #[serde(default)]
    nonemployee_compensation: Option<Decimal>,
    #[serde(default)]
    miscellaneous_income: Option<Decimal>,
    #[serde(default)]
    rental_royalties: Option<Decimal>,
    #[serde(default)]
    other_income: Option<Decimal>,
    #[serde(default)]
    federal_withholding: Option<Decimal>,
    #[serde(default)]
    state_withholding: Option<Decimal>,
    #[serde(default)]
    social_security_withholding: Option<Decimal>,
    #[serde(default)]
    medicare_withholding: Option<Decimal>,
    #[serde(default)]
    estimated_tax_payments: Option<Decimal>,
    #[serde(default)]
    use_itemized: Option<bool>,
    #[serde(default)]
    itemized_deductions: Option<Decimal>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    dependents: Option<u32>,
    #[serde(default)]
    age_65_or_older: Option<bool>,
    #[serde(default)]
    blind: Option<bool>,
    #[serde(default)]
    spouse_age_65_or_older: Option<bool>,
    #[serde(default)]
    spouse_blind: Option<bool>,
    #[serde(default)]
    capital_gains: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// State-specific facts from a row; combined with the federal AGI once the
/// federal computation has run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateProfile {
    pub state: String,
    pub dependents: u32,
    pub age_65_or_older: bool,
    pub blind: bool,
    pub spouse_age_65_or_older: bool,
    pub spouse_blind: bool,
    pub capital_gains: Decimal,
}

impl StateProfile {
    /// Builds the dispatcher input for this profile.
    pub fn to_state_input(
        &self,
        federal: &TaxReturnInput,
        federal_agi: Decimal,
    ) -> StateTaxInput {
        StateTaxInput {
            dependents: self.dependents,
            age_65_or_older: self.age_65_or_older,
            blind: self.blind,
            spouse_age_65_or_older: self.spouse_age_65_or_older,
            spouse_blind: self.spouse_blind,
            dividends: federal.income.dividends,
            interest: federal.income.interest,
            capital_gains: self.capital_gains,
            ..StateTaxInput::new(
                self.state.clone(),
                federal.filing.filing_status,
                federal_agi,
            )
        }
    }
}

/// One return from the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnRecord {
    /// 1-based data row (the header is row 0).
    pub row: usize,
    pub input: TaxReturnInput,
    /// `None` when the `state` cell is absent or empty.
    pub state: Option<StateProfile>,
}

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error on row {row}: {source}")]
    Parse {
        row: usize,
        #[source]
        source: csv::Error,
    },

    /// A `filing_status` cell contained a value that is not one of the
    /// recognised codes.
    #[error("unrecognised filing status '{status}' on row {row}")]
    InvalidFilingStatus { status: String, row: usize },

    /// A row parsed but holds an amount the engine rejects.
    #[error("invalid amount on row {row}: {source}")]
    InvalidInput {
        row: usize,
        #[source]
        source: InvalidInputError,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Convert a single CSV row into a [`ReturnRecord`].
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<ReturnRecord, CsvLoadError> {
    let filing_status = FilingStatus::parse(&row.filing_status).ok_or_else(|| {
        CsvLoadError::InvalidFilingStatus {
            status: row.filing_status.clone(),
            row: row_number,
        }
    })?;

    let input = TaxReturnInput::new(
        IncomeRecord {
            wages: row.wages.unwrap_or_default(),
            interest: row.interest.unwrap_or_default(),
            dividends: row.dividends.unwrap_or_default(),
            nonemployee_compensation: row.nonemployee_compensation.unwrap_or_default(),
            miscellaneous_income: row.miscellaneous_income.unwrap_or_default(),
            rental_royalties: row.rental_royalties.unwrap_or_default(),
            other: row.other_income.unwrap_or_default(),
        },
        WithholdingRecord {
            federal_tax: row.federal_withholding.unwrap_or_default(),
            state_tax: row.state_withholding.unwrap_or_default(),
            social_security_tax: row.social_security_withholding.unwrap_or_default(),
            medicare_tax: row.medicare_withholding.unwrap_or_default(),
        },
        FilingParameters {
            filing_status,
            use_itemized_deduction: row.use_itemized.unwrap_or(false),
            itemized_deduction_amount: row.itemized_deductions.unwrap_or_default(),
            estimated_tax_payments: row.estimated_tax_payments.unwrap_or_default(),
            tax_year: row.tax_year,
        },
    );
    input
        .validate()
        .map_err(|source| CsvLoadError::InvalidInput {
            row: row_number,
            source,
        })?;

    let capital_gains = row.capital_gains.unwrap_or_default();
    if capital_gains < Decimal::ZERO {
        return Err(CsvLoadError::InvalidInput {
            row: row_number,
            source: InvalidInputError::NegativeAmount {
                field: "capital_gains",
                value: capital_gains,
            },
        });
    }

    let state = row
        .state
        .map(|code| code.trim().to_ascii_uppercase())
        .filter(|code| !code.is_empty())
        .map(|state| StateProfile {
            state,
            dependents: row.dependents.unwrap_or(0),
            age_65_or_older: row.age_65_or_older.unwrap_or(false),
            blind: row.blind.unwrap_or(false),
            spouse_age_65_or_older: row.spouse_age_65_or_older.unwrap_or(false),
            spouse_blind: row.spouse_blind.unwrap_or(false),
            capital_gains,
        });

    Ok(ReturnRecord {
        row: row_number,
        input,
        state,
    })
}

/// Parse CSV text and return the returns in file order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [`CsvLoadError::InvalidFilingStatus`] if any row contains an
///   unrecognised filing-status code.
/// * [`CsvLoadError::InvalidInput`] if any amount is negative.
pub fn load_from_str(input: &str) -> Result<Vec<ReturnRecord>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let records = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row_number = idx + 1;
            let row = result.map_err(|source| CsvLoadError::Parse {
                row: row_number,
                source,
            })?;
            convert_row(row, row_number)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(returns = records.len(), "Loaded returns CSV");
    Ok(records)
}

/// Read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<ReturnRecord>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
