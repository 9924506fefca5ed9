//! Month periods used to filter the ledger.

use std::{fmt, str::FromStr};

use time::{Date, Month};

use crate::Error;

/// A calendar month, displayed as `MM/YYYY`.
///
/// Periods order chronologically (by year, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u8,
}

impl Period {
    /// Create a period from a year and a month.
    pub fn new(year: i32, month: Month) -> Self {
        Self {
            year,
            month: month as u8,
        }
    }

    /// The period that `date` falls in.
    pub fn of(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }

    /// The year of the period.
    pub fn year(self) -> i32 {
        self.year
    }

    /// The month of the period.
    pub fn month(self) -> Month {
        // `month` is only ever set from a `Month`, so this always succeeds.
        Month::try_from(self.month).unwrap_or(Month::January)
    }

    /// The label with the slash replaced, for use in file names, e.g. `01_2024`.
    pub fn file_label(self) -> String {
        format!("{:02}_{:04}", self.month, self.year)
    }

    /// Whether `date` falls in this period.
    pub fn contains(self, date: Date) -> bool {
        Self::of(date) == self
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidPeriod(text.to_owned());

        let (month, year) = text.trim().split_once('/').ok_or_else(invalid)?;

        if month.len() != 2 || year.len() != 4 {
            return Err(invalid());
        }

        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;
        let year: i32 = year.parse().map_err(|_| invalid())?;

        Ok(Self::new(year, month))
    }
}

/// The month selector on the dashboard: either every record or a single month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MonthFilter {
    /// No filtering.
    #[default]
    All,
    /// Only records dated in the given month.
    Month(Period),
}

impl MonthFilter {
    /// The label of the sentinel that selects every record.
    pub const ALL_LABEL: &'static str = "All";

    /// Whether the filter lets `date` through.
    pub fn matches(self, date: Date) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(period) => period.contains(date),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str(Self::ALL_LABEL),
            MonthFilter::Month(period) => write!(f, "{period}"),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.trim().eq_ignore_ascii_case(Self::ALL_LABEL) {
            return Ok(MonthFilter::All);
        }

        text.parse().map(MonthFilter::Month)
    }
}
