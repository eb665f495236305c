//! Analysis period resolution
//!
//! Maps a requested period to a month count and the comparison window
//! boundaries derived from it.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Requested analysis period
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisPeriod {
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "6months")]
    #[default]
    SixMonths,
    #[serde(rename = "12months")]
    TwelveMonths,
    #[serde(rename = "24months")]
    TwentyFourMonths,
}

impl AnalysisPeriod {
    /// Number of calendar months in one window
    pub fn months(&self) -> u32 {
        match self {
            Self::ThreeMonths => 3,
            Self::SixMonths => 6,
            Self::TwelveMonths => 12,
            Self::TwentyFourMonths => 24,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThreeMonths => "3months",
            Self::SixMonths => "6months",
            Self::TwelveMonths => "12months",
            Self::TwentyFourMonths => "24months",
        }
    }

    /// Human-readable label used in chart metadata
    pub fn label(&self) -> String {
        format!("Last {} months", self.months())
    }

    /// Start of the current window (inclusive)
    pub fn cutoff(&self, now: NaiveDate) -> NaiveDate {
        months_before(now, self.months())
    }

    /// Start of the previous window (inclusive); the previous window ends at `cutoff`
    pub fn previous_cutoff(&self, now: NaiveDate) -> NaiveDate {
        months_before(self.cutoff(now), self.months())
    }
}

impl From<&str> for AnalysisPeriod {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "3months" => AnalysisPeriod::ThreeMonths,
            "6months" => AnalysisPeriod::SixMonths,
            "12months" => AnalysisPeriod::TwelveMonths,
            "24months" => AnalysisPeriod::TwentyFourMonths,
            _ => AnalysisPeriod::default(),
        }
    }
}

impl From<Option<String>> for AnalysisPeriod {
    fn from(s: Option<String>) -> Self {
        match s {
            Some(val) => AnalysisPeriod::from(val.as_str()),
            None => AnalysisPeriod::default(),
        }
    }
}

impl std::fmt::Display for AnalysisPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolve a period string to its month count, defaulting to 6
pub fn months_for(period: &str) -> u32 {
    AnalysisPeriod::from(period).months()
}

/// Subtract whole calendar months, clamping to the last day of shorter months
pub fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(NaiveDate::MIN)
}
