//! Reporting period keys
//!
//! A period is either one day ("2024-03-01") or one month ("2024-03").
//! Matching is a plain equality/prefix test on the entry's canonical
//! `YYYY-MM-DD` date string; there is no timezone or calendar arithmetic.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key selecting the entries of a daily or monthly report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum PeriodKey {
    /// A single day
    Day(NaiveDate),

    /// A calendar month
    Month { year: i32, month: u32 },
}

impl PeriodKey {
    pub fn day(date: NaiveDate) -> Self {
        Self::Day(date)
    }

    /// Create a month key; `None` if the month is out of range
    pub fn month(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (0..=9999).contains(&year) {
            Some(Self::Month { year, month })
        } else {
            None
        }
    }

    /// The month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        Self::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Today's date key
    pub fn today() -> Self {
        Self::Day(chrono::Local::now().date_naive())
    }

    /// The current month's key
    pub fn current_month() -> Self {
        Self::month_of(chrono::Local::now().date_naive())
    }

    /// Prefix an entry's date string must start with to fall in this period
    pub fn prefix(&self) -> String {
        match self {
            Self::Day(date) => date.format("%Y-%m-%d").to_string(),
            Self::Month { year, month } => format!("{:04}-{:02}", year, month),
        }
    }

    /// Whether the given canonical date string belongs to this period
    pub fn matches_key(&self, date_key: &str) -> bool {
        match self {
            Self::Day(_) => date_key == self.prefix(),
            Self::Month { .. } => date_key.starts_with(&self.prefix()),
        }
    }

    /// Whether the date belongs to this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Self::Day(day) => *day == date,
            Self::Month { year, month } => date.year() == *year && date.month() == *month,
        }
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Day: "2024-03-01"
    /// - Month: "2024-03"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::Day(date));
        }

        if let Some((year, month)) = s.split_once('-') {
            if year.len() == 4 && month.len() == 2 {
                let year: i32 = year
                    .parse()
                    .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
                let month: u32 = month
                    .parse()
                    .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
                return Self::month(year, month).ok_or(PeriodParseError::InvalidMonth(month));
            }
        }

        Err(PeriodParseError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => {
                write!(f, "Invalid period '{}'. Use YYYY-MM-DD or YYYY-MM", s)
            }
            Self::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}
