use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum FilingStatus {
    Single,
    MarriedFilingJointly,
    MarriedFilingSeparately,
    HeadOfHousehold,
    QualifyingWidow,
}

impl FilingStatus {
    pub const ALL: [FilingStatus; 5] = [
        Self::Single,
        Self::MarriedFilingJointly,
        Self::MarriedFilingSeparately,
        Self::HeadOfHousehold,
        Self::QualifyingWidow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
            Self::MarriedFilingSeparately => "MFS",
            Self::HeadOfHousehold => "HOH",
            Self::QualifyingWidow => "QW",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
            Self::MarriedFilingSeparately => "Married Filing Separately",
            Self::HeadOfHousehold => "Head of Household",
            Self::QualifyingWidow => "Qualifying Widow(er)",
        }
    }

    /// Accepts the short codes (`S`, `MFJ`, `MFS`, `HOH`, `QW`/`QSS`) and the
    /// camelCase names, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "single" => Some(Self::Single),
            "mfj" | "marriedfilingjointly" => Some(Self::MarriedFilingJointly),
            "mfs" | "marriedfilingseparately" => Some(Self::MarriedFilingSeparately),
            "hoh" | "headofhousehold" => Some(Self::HeadOfHousehold),
            "qw" | "qss" | "qualifyingwidow" => Some(Self::QualifyingWidow),
            _ => None,
        }
    }

    /// Number of taxpayers covered by the return (not counting dependents).
    pub fn filer_count(&self) -> u32 {
        match self {
            Self::MarriedFilingJointly => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for FilingStatus {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidInputError::UnknownFilingStatus(s.to_string()))
    }
}

impl TryFrom<String> for FilingStatus {
    type Error = InvalidInputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One value per filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByFilingStatus<T> {
    pub single: T,
    pub married_filing_jointly: T,
    pub married_filing_separately: T,
    pub head_of_household: T,
    pub qualifying_widow: T,
}

impl<T> ByFilingStatus<T> {
    pub fn get(
        &self,
        status: FilingStatus,
    ) -> &T {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedFilingJointly => &self.married_filing_jointly,
            FilingStatus::MarriedFilingSeparately => &self.married_filing_separately,
            FilingStatus::HeadOfHousehold => &self.head_of_household,
            FilingStatus::QualifyingWidow => &self.qualifying_widow,
        }
    }

    pub fn set(
        &mut self,
        status: FilingStatus,
        value: T,
    ) {
        let slot = match status {
            FilingStatus::Single => &mut self.single,
            FilingStatus::MarriedFilingJointly => &mut self.married_filing_jointly,
            FilingStatus::MarriedFilingSeparately => &mut self.married_filing_separately,
            FilingStatus::HeadOfHousehold => &mut self.head_of_household,
            FilingStatus::QualifyingWidow => &mut self.qualifying_widow,
        };
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn by_filing_status_set_replaces_only_that_status() {
        let mut values = ByFilingStatus {
            single: 1,
            married_filing_jointly: 2,
            married_filing_separately: 3,
            head_of_household: 4,
            qualifying_widow: 5,
        };

        values.set(FilingStatus::HeadOfHousehold, 40);

        assert_eq!(*values.get(FilingStatus::HeadOfHousehold), 40);
        assert_eq!(*values.get(FilingStatus::QualifyingWidow), 5);
    }

    #[test]
    fn parse_accepts_short_codes() {
        assert_eq!(FilingStatus::parse("S"), Some(FilingStatus::Single));
        assert_eq!(
            FilingStatus::parse("MFJ"),
            Some(FilingStatus::MarriedFilingJointly)
        );
        assert_eq!(
            FilingStatus::parse("MFS"),
            Some(FilingStatus::MarriedFilingSeparately)
        );
        assert_eq!(FilingStatus::parse("HOH"), Some(FilingStatus::HeadOfHousehold));
        assert_eq!(FilingStatus::parse("QW"), Some(FilingStatus::QualifyingWidow));
    }

    #[test]
    fn parse_accepts_qss_alias() {
        assert_eq!(FilingStatus::parse("QSS"), Some(FilingStatus::QualifyingWidow));
    }

    #[test]
    fn parse_accepts_camel_case_names_case_insensitively() {
        assert_eq!(
            FilingStatus::parse("marriedFilingJointly"),
            Some(FilingStatus::MarriedFilingJointly)
        );
        assert_eq!(
            FilingStatus::parse("HeadOfHousehold"),
            Some(FilingStatus::HeadOfHousehold)
        );
        assert_eq!(FilingStatus::parse(" single "), Some(FilingStatus::Single));
    }

    #[test]
    fn from_str_rejects_unknown_status() {
        let result = "widowed".parse::<FilingStatus>();

        assert_eq!(
            result,
            Err(InvalidInputError::UnknownFilingStatus("widowed".to_string()))
        );
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for status in FilingStatus::ALL {
            assert_eq!(FilingStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn only_joint_returns_have_two_filers() {
        assert_eq!(FilingStatus::MarriedFilingJointly.filer_count(), 2);
        assert_eq!(FilingStatus::QualifyingWidow.filer_count(), 1);
        assert_eq!(FilingStatus::Single.filer_count(), 1);
    }
}
