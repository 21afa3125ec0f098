//! Tax-year-versioned federal tables.
//!
//! The compiled-in tables are built once on first use and shared read-only
//! by every computation. A caller that needs different brackets (a future
//! year, a what-if schedule) clones [`TaxTables::builtin`] and replaces the
//! pieces it needs; the engine only ever reads from a `&TaxTables`.

mod federal;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{BracketTable, ByFilingStatus, FilingStatus, TaxYearConfig};

static BUILTIN: LazyLock<TaxTables> = LazyLock::new(|| {
    TaxTables::from_years([
        federal::tax_year_2023(),
        federal::tax_year_2024(),
        federal::tax_year_2025(),
    ])
});

/// Everything that varies by tax year for the federal computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearTables {
    pub config: TaxYearConfig,
    pub standard_deductions: ByFilingStatus<Decimal>,
    pub brackets: ByFilingStatus<BracketTable>,
}

impl TaxYearTables {
    pub fn tax_year(&self) -> i32 {
        self.config.tax_year
    }

    pub fn standard_deduction(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        *self.standard_deductions.get(status)
    }

    pub fn bracket_table(
        &self,
        status: FilingStatus,
    ) -> &BracketTable {
        self.brackets.get(status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTables {
    years: BTreeMap<i32, TaxYearTables>,
}

impl TaxTables {
    /// The compiled-in tables (2023 through 2025).
    pub fn builtin() -> &'static TaxTables {
        &BUILTIN
    }

    pub fn from_years(years: impl IntoIterator<Item = TaxYearTables>) -> Self {
        Self {
            years: years
                .into_iter()
                .map(|tables| (tables.tax_year(), tables))
                .collect(),
        }
    }

    pub fn year(
        &self,
        tax_year: i32,
    ) -> Option<&TaxYearTables> {
        self.years.get(&tax_year)
    }

    pub fn year_mut(
        &mut self,
        tax_year: i32,
    ) -> Option<&mut TaxYearTables> {
        self.years.get_mut(&tax_year)
    }

    /// Adds or replaces a whole year.
    pub fn insert_year(
        &mut self,
        tables: TaxYearTables,
    ) {
        self.years.insert(tables.tax_year(), tables);
    }

    /// Supported years in ascending order.
    pub fn supported_years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }
}
