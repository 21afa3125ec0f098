use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    /// `None` for the top bracket.
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

/// Errors raised when a bracket table violates its ordering invariants.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table has no brackets")]
    Empty,

    #[error("first bracket must start at 0, got {0}")]
    FirstThresholdNotZero(Decimal),

    #[error("bracket {index} threshold {threshold} does not exceed the previous threshold")]
    ThresholdsNotIncreasing { index: usize, threshold: Decimal },

    #[error("bracket {index} rate {rate} does not exceed the previous rate")]
    RatesNotIncreasing { index: usize, rate: Decimal },

    #[error("bracket {index} rate {rate} must be between 0 and 1")]
    RateOutOfRange { index: usize, rate: Decimal },

    #[error("bracket {index} upper bound does not match the next bracket's threshold")]
    UpperBoundMismatch { index: usize },
}

/// An ordered progressive schedule.
///
/// Thresholds start at 0 and strictly increase, rates strictly increase and
/// the last bracket is unbounded. Upper bounds are derived from the next
/// bracket's threshold, so gaps and overlaps cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedBracketTable")]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

/// Serialized form of [`BracketTable`]; validated on the way in.
#[derive(Deserialize)]
struct UncheckedBracketTable {
    brackets: Vec<TaxBracket>,
}

impl TryFrom<UncheckedBracketTable> for BracketTable {
    type Error = BracketTableError;

    fn try_from(unchecked: UncheckedBracketTable) -> Result<Self, Self::Error> {
        let pairs: Vec<_> = unchecked
            .brackets
            .iter()
            .map(|b| (b.min_income, b.tax_rate))
            .collect();
        let table = Self::new(&pairs)?;

        let bounds = unchecked.brackets.iter().zip(&table.brackets);
        for (index, (given, derived)) in bounds.enumerate() {
            if given.max_income != derived.max_income {
                return Err(BracketTableError::UpperBoundMismatch { index });
            }
        }
        Ok(table)
    }
}

impl BracketTable {
    /// Builds a table from `(threshold, rate)` pairs in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`BracketTableError`] if the pairs are empty, the first
    /// threshold is not zero, or thresholds/rates are not strictly
    /// increasing.
    pub fn new(thresholds: &[(Decimal, Decimal)]) -> Result<Self, BracketTableError> {
        let (first, _) = thresholds.first().ok_or(BracketTableError::Empty)?;
        if !first.is_zero() {
            return Err(BracketTableError::FirstThresholdNotZero(*first));
        }

        for (index, &(threshold, rate)) in thresholds.iter().enumerate() {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(BracketTableError::RateOutOfRange { index, rate });
            }
            if index == 0 {
                continue;
            }
            let (prev_threshold, prev_rate) = thresholds[index - 1];
            if threshold <= prev_threshold {
                return Err(BracketTableError::ThresholdsNotIncreasing { index, threshold });
            }
            if rate <= prev_rate {
                return Err(BracketTableError::RatesNotIncreasing { index, rate });
            }
        }

        Ok(Self::from_thresholds(thresholds))
    }

    /// Builds a table without checking invariants. Only used for the
    /// compiled-in tables, which are checked by tests.
    pub(crate) fn from_thresholds(thresholds: &[(Decimal, Decimal)]) -> Self {
        let brackets = thresholds
            .iter()
            .enumerate()
            .map(|(index, &(min_income, tax_rate))| TaxBracket {
                min_income,
                max_income: thresholds.get(index + 1).map(|(next, _)| *next),
                tax_rate,
            })
            .collect();
        Self { brackets }
    }

    /// Same schedule with every threshold multiplied by `factor`.
    ///
    /// Many joint schedules are exactly twice the single schedule.
    pub(crate) fn scaled(
        &self,
        factor: Decimal,
    ) -> Self {
        let brackets = self
            .brackets
            .iter()
            .map(|b| TaxBracket {
                min_income: b.min_income * factor,
                max_income: b.max_income.map(|max| max * factor),
                tax_rate: b.tax_rate,
            })
            .collect();
        Self { brackets }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Rate of the unbounded top bracket.
    pub fn top_rate(&self) -> Decimal {
        self.brackets
            .last()
            .map_or(Decimal::ZERO, |bracket| bracket.tax_rate)
    }

    /// Re-checks the ordering invariants of an already-built table.
    pub fn validate(&self) -> Result<(), BracketTableError> {
        let pairs: Vec<_> = self
            .brackets
            .iter()
            .map(|b| (b.min_income, b.tax_rate))
            .collect();
        Self::new(&pairs).map(|_| ())
    }
}
