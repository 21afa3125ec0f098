use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::calculations::common::round_half_up;
use tax_core::models::{BracketTable, BracketTableError, FilingStatus};
use tax_core::tables::TaxTables;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading tax bracket data.
#[derive(Debug, Error, PartialEq)]
pub enum TaxBracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Tax year {0} has no tables to replace brackets in")]
    TaxYearNotFound(i32),

    #[error("Schedule {schedule} for {tax_year} is not a valid bracket table: {source}")]
    InvalidTable {
        tax_year: i32,
        schedule: String,
        #[source]
        source: BracketTableError,
    },

    #[error(
        "Schedule {schedule} for {tax_year}: bracket starting at {min_income} \
         ends at {actual:?}, expected {expected:?}"
    )]
    UpperBoundMismatch {
        tax_year: i32,
        schedule: String,
        min_income: Decimal,
        expected: Option<Decimal>,
        actual: Option<Decimal>,
    },

    #[error(
        "Schedule {schedule} for {tax_year}: base tax at {min_income} is {actual}, \
         brackets below sum to {expected}"
    )]
    BaseTaxMismatch {
        tax_year: i32,
        schedule: String,
        min_income: Decimal,
        expected: Decimal,
        actual: Decimal,
    },
}

impl From<csv::Error> for TaxBracketLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxBracketLoaderError::CsvParse(err.to_string())
    }
}

/// Maps IRS schedule codes to filing statuses.
///
/// - Schedule X → Single
/// - Schedule Y-1 → Married Filing Jointly and Qualifying Widow(er)
/// - Schedule Y-2 → Married Filing Separately
/// - Schedule Z → Head of Household
fn schedule_to_filing_statuses(
    schedule: &str
) -> Result<&'static [FilingStatus], TaxBracketLoaderError> {
    match schedule.trim() {
        "X" => Ok(&[FilingStatus::Single]),
        "Y-1" => Ok(&[
            FilingStatus::MarriedFilingJointly,
            FilingStatus::QualifyingWidow,
        ]),
        "Y-2" => Ok(&[FilingStatus::MarriedFilingSeparately]),
        "Z" => Ok(&[FilingStatus::HeadOfHousehold]),
        _ => Err(TaxBracketLoaderError::InvalidSchedule(schedule.to_string())),
    }
}

/// A single record from the tax brackets CSV file.
///
/// The CSV format uses IRS schedule designations:
/// - `tax_year`: The tax year (e.g., 2025)
/// - `schedule`: The IRS schedule code (X, Y-1, Y-2, Z)
/// - `min_income`: The minimum income for this bracket
/// - `max_income`: The maximum income for this bracket (empty for unlimited)
/// - `base_tax`: Tax on all income below `min_income`
/// - `rate`: The marginal tax rate as a decimal (e.g., 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub tax_year: i32,
    pub schedule: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub base_tax: Decimal,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for federal bracket schedules in CSV form.
///
/// The CSV uses IRS schedule codes (X, Y-1, Y-2, Z) which are mapped to the
/// filing statuses they cover. Loading replaces the bracket tables of an
/// existing year in a [`TaxTables`]; standard deductions and payroll
/// parameters are left untouched.
pub struct TaxBracketLoader;

impl TaxBracketLoader {
    /// Parse tax bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxBracketRecord>, TaxBracketLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBracketRecord = result?;
            records.push(record);
        }

        debug!(records = records.len(), "Parsed tax bracket CSV");
        Ok(records)
    }

    /// Install bracket records into `tables`.
    ///
    /// Records are grouped by (tax_year, schedule) and each group is checked
    /// before anything is replaced:
    /// 1. The schedule code must be known and the year must already exist
    /// 2. The brackets must form a valid table with contiguous bounds
    /// 3. Each `base_tax` must equal the tax on the brackets below it
    ///
    /// Nothing is changed if any group fails. Returns the number of brackets
    /// installed; schedule Y-1 is installed for both joint filers and
    /// qualifying widow(er)s, so its brackets count twice.
    pub fn load(
        tables: &mut TaxTables,
        records: &[TaxBracketRecord],
    ) -> Result<usize, TaxBracketLoaderError> {
        let mut groups: BTreeMap<(i32, &str), Vec<&TaxBracketRecord>> = BTreeMap::new();
        for record in records {
            groups
                .entry((record.tax_year, record.schedule.trim()))
                .or_default()
                .push(record);
        }

        let mut prepared = Vec::with_capacity(groups.len());
        for ((tax_year, schedule), mut group) in groups {
            let statuses = schedule_to_filing_statuses(schedule)?;
            if tables.year(tax_year).is_none() {
                return Err(TaxBracketLoaderError::TaxYearNotFound(tax_year));
            }

            group.sort_by(|a, b| a.min_income.cmp(&b.min_income));
            let table = build_table(tax_year, schedule, &group)?;
            prepared.push((tax_year, statuses, table));
        }

        let mut installed = 0;
        for (tax_year, statuses, table) in prepared {
            let year = tables
                .year_mut(tax_year)
                .ok_or(TaxBracketLoaderError::TaxYearNotFound(tax_year))?;
            for &status in statuses {
                installed += table.brackets().len();
                year.brackets.set(status, table.clone());
            }
        }

        info!(brackets = installed, "Installed tax brackets");
        Ok(installed)
    }
}

/// Validates one schedule's sorted records and builds its table.
fn build_table(
    tax_year: i32,
    schedule: &str,
    records: &[&TaxBracketRecord],
) -> Result<BracketTable, TaxBracketLoaderError> {
    let pairs: Vec<_> = records.iter().map(|r| (r.min_income, r.rate)).collect();
    let table = BracketTable::new(&pairs).map_err(|source| TaxBracketLoaderError::InvalidTable {
        tax_year,
        schedule: schedule.to_string(),
        source,
    })?;

    let mut expected_base = Decimal::ZERO;
    for (record, bracket) in records.iter().zip(table.brackets()) {
        if record.max_income != bracket.max_income {
            return Err(TaxBracketLoaderError::UpperBoundMismatch {
                tax_year,
                schedule: schedule.to_string(),
                min_income: record.min_income,
                expected: bracket.max_income,
                actual: record.max_income,
            });
        }

        if round_half_up(expected_base) != round_half_up(record.base_tax) {
            return Err(TaxBracketLoaderError::BaseTaxMismatch {
                tax_year,
                schedule: schedule.to_string(),
                min_income: record.min_income,
                expected: round_half_up(expected_base),
                actual: record.base_tax,
            });
        }

        if let Some(upper) = bracket.max_income {
            expected_base += (upper - bracket.min_income) * bracket.tax_rate;
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = r#"tax_year,schedule,min_income,max_income,base_tax,rate
2025,X,0,11925,0,0.10
2025,X,11925,48475,1192.50,0.12
2025,X,48475,103350,5578.50,0.22
2025,X,103350,197300,17651.00,0.24
2025,X,197300,250525,40199.00,0.32
2025,X,250525,626350,57231.00,0.35
2025,X,626350,,188769.75,0.37
2025,Y-1,0,23850,0,0.10
2025,Y-1,23850,96950,2385.00,0.12
2025,Y-1,96950,206700,11157.00,0.22
2025,Y-1,206700,394600,35302.00,0.24
2025,Y-1,394600,501050,80398.00,0.32
2025,Y-1,501050,751600,114462.00,0.35
2025,Y-1,751600,,202154.50,0.37
2025,Y-2,0,11925,0,0.10
2025,Y-2,11925,48475,1192.50,0.12
2025,Y-2,48475,103350,5578.50,0.22
2025,Y-2,103350,197300,17651.00,0.24
2025,Y-2,197300,250525,40199.00,0.32
2025,Y-2,250525,375800,57231.00,0.35
2025,Y-2,375800,,101077.25,0.37
2025,Z,0,17000,0,0.10
2025,Z,17000,64850,1700.00,0.12
2025,Z,64850,103350,7442.00,0.22
2025,Z,103350,197300,15912.00,0.24
2025,Z,197300,250500,38460.00,0.32
2025,Z,250500,626350,55484.00,0.35
2025,Z,626350,,187031.50,0.37
"#;

    const HEADER: &str = "tax_year,schedule,min_income,max_income,base_tax,rate\n";

    fn parse(body: &str) -> Vec<TaxBracketRecord> {
        TaxBracketLoader::parse(format!("{HEADER}{body}").as_bytes()).expect("Failed to parse CSV")
    }

    // =========================================================================
    // parse tests
    // =========================================================================

    #[test]
    fn test_parse_csv_single_bracket() {
        let records = parse("2025,X,0,11925,0,0.10");

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            TaxBracketRecord {
                tax_year: 2025,
                schedule: "X".to_string(),
                min_income: dec!(0),
                max_income: Some(dec!(11925)),
                base_tax: dec!(0),
                rate: dec!(0.10),
            }
        );
    }

    #[test]
    fn test_parse_csv_unlimited_max_income() {
        let records = parse("2025,X,626350,,188769.75,0.37");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].max_income, None);
        assert_eq!(records[0].base_tax, dec!(188769.75));
    }

    #[test]
    fn test_parse_csv_all_schedules() {
        let records = TaxBracketLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 28);
        for schedule in ["X", "Y-1", "Y-2", "Z"] {
            let count = records.iter().filter(|r| r.schedule == schedule).count();
            assert_eq!(count, 7, "Expected 7 brackets for schedule {}", schedule);
        }
    }

    #[test]
    fn test_parse_invalid_csv_missing_column() {
        let csv = "tax_year,schedule,min_income\n2025,X,0";

        let err =
            TaxBracketLoader::parse(csv.as_bytes()).expect_err("Should fail for missing column");

        let TaxBracketLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("missing field"), "got: {}", msg);
    }

    #[test]
    fn test_parse_invalid_csv_bad_decimal() {
        let result = TaxBracketLoader::parse(format!("{HEADER}2025,X,abc,11925,0,0.10").as_bytes());

        assert!(matches!(result, Err(TaxBracketLoaderError::CsvParse(_))));
    }

    #[test]
    fn test_parse_empty_csv() {
        let records = TaxBracketLoader::parse(HEADER.as_bytes()).expect("Failed to parse CSV");

        assert!(records.is_empty());
    }

    // =========================================================================
    // schedule mapping tests
    // =========================================================================

    #[test]
    fn test_schedule_mapping() {
        assert_eq!(schedule_to_filing_statuses("X"), Ok(&[FilingStatus::Single][..]));
        assert_eq!(
            schedule_to_filing_statuses("Y-1"),
            Ok(&[FilingStatus::MarriedFilingJointly, FilingStatus::QualifyingWidow][..])
        );
        assert_eq!(
            schedule_to_filing_statuses("Y-2"),
            Ok(&[FilingStatus::MarriedFilingSeparately][..])
        );
        assert_eq!(
            schedule_to_filing_statuses("Z"),
            Ok(&[FilingStatus::HeadOfHousehold][..])
        );
    }

    #[test]
    fn test_schedule_mapping_invalid() {
        assert_eq!(
            schedule_to_filing_statuses("INVALID"),
            Err(TaxBracketLoaderError::InvalidSchedule("INVALID".to_string()))
        );
    }

    // =========================================================================
    // load tests
    // =========================================================================

    #[test]
    fn test_load_counts_y1_twice() {
        let mut tables = TaxTables::builtin().clone();
        let records = TaxBracketLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        let installed = TaxBracketLoader::load(&mut tables, &records).expect("Failed to load");

        assert_eq!(installed, 35);
    }

    #[test]
    fn test_load_accepts_unsorted_records() {
        let mut tables = TaxTables::builtin().clone();
        let records = parse("2025,X,11925,,1192.50,0.12\n2025,X,0,11925,0,0.10");

        TaxBracketLoader::load(&mut tables, &records).expect("Failed to load");

        let table = tables.year(2025).unwrap().bracket_table(FilingStatus::Single);
        assert_eq!(table.brackets().len(), 2);
        assert_eq!(table.top_rate(), dec!(0.12));
    }

    #[test]
    fn test_load_unknown_year() {
        let mut tables = TaxTables::builtin().clone();
        let records = parse("1999,X,0,,0,0.10");

        let result = TaxBracketLoader::load(&mut tables, &records);

        assert_eq!(result, Err(TaxBracketLoaderError::TaxYearNotFound(1999)));
    }

    #[test]
    fn test_load_rejects_decreasing_rates() {
        let mut tables = TaxTables::builtin().clone();
        let records = parse("2025,X,0,10000,0,0.20\n2025,X,10000,,2000,0.10");

        let result = TaxBracketLoader::load(&mut tables, &records);

        assert_eq!(
            result,
            Err(TaxBracketLoaderError::InvalidTable {
                tax_year: 2025,
                schedule: "X".to_string(),
                source: BracketTableError::RatesNotIncreasing {
                    index: 1,
                    rate: dec!(0.10),
                },
            })
        );
    }

    #[test]
    fn test_load_rejects_gap_between_brackets() {
        let mut tables = TaxTables::builtin().clone();
        let records = parse("2025,X,0,9000,0,0.10\n2025,X,10000,,1000,0.12");

        let result = TaxBracketLoader::load(&mut tables, &records);

        assert!(matches!(
            result,
            Err(TaxBracketLoaderError::UpperBoundMismatch { .. })
        ));
    }

    #[test]
    fn test_load_rejects_wrong_base_tax() {
        let mut tables = TaxTables::builtin().clone();
        let records = parse("2025,X,0,10000,0,0.10\n2025,X,10000,,1500,0.12");

        let result = TaxBracketLoader::load(&mut tables, &records);

        assert_eq!(
            result,
            Err(TaxBracketLoaderError::BaseTaxMismatch {
                tax_year: 2025,
                schedule: "X".to_string(),
                min_income: dec!(10000),
                expected: dec!(1000.00),
                actual: dec!(1500),
            })
        );
    }

    #[test]
    fn test_failed_load_changes_nothing() {
        let mut tables = TaxTables::builtin().clone();
        let records = parse("2025,X,0,,0,0.50\n2025,Z,0,,0,0.10\n2025,BAD,0,,0,0.10");

        let result = TaxBracketLoader::load(&mut tables, &records);

        assert!(result.is_err());
        assert_eq!(&tables, TaxTables::builtin());
    }
}
