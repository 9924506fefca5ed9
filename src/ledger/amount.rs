//! Currency amounts backed by a fixed-point decimal.

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Sub},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::Error;

/// The largest magnitude a single amount may have, in cents.
const MAX_CENTS: i64 = 99_999_999_999_999;

/// An amount of money with at most two decimal places.
///
/// Sums over many records must be exact (the per-category breakdown has to add
/// up to the expense total), so amounts are never kept as floating point.
/// Use [Amount::from_f64] at the edges where a float comes in (form inputs,
/// spreadsheet cells) and [Amount::as_f64] where one goes out (charts).
///
/// A single amount is capped at [Amount::max]. Arithmetic saturates instead of
/// overflowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    /// The zero amount.
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Create an amount from a number of cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The largest amount a single record may hold.
    pub fn max() -> Self {
        Self::from_cents(MAX_CENTS)
    }

    /// Create an amount from a decimal value, rounded to the nearest cent.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidAmount] if `value` is not finite or exceeds
    /// [Amount::max] in magnitude.
    pub fn from_f64(value: f64) -> Result<Self, Error> {
        let decimal =
            Decimal::try_from(value).map_err(|_| Error::InvalidAmount(value.to_string()))?;

        Self::bounded(
            decimal.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            || value.to_string(),
        )
    }

    fn bounded(decimal: Decimal, text: impl FnOnce() -> String) -> Result<Self, Error> {
        if decimal.abs() > Self::max().0 {
            return Err(Error::InvalidAmount(text()));
        }

        Ok(Self(decimal))
    }

    /// The amount as a decimal value, e.g. for charting.
    pub fn as_f64(self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    /// Whether the amount is below zero.
    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Whether the amount is above zero.
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Parses plain decimal text such as `1200`, `1200.5` or `12,34`.
///
/// Either `.` or `,` may be used as the decimal separator, but not both, and
/// at most two decimal places are accepted.
impl FromStr for Amount {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidAmount(text.to_owned());
        let trimmed = text.trim();

        let (sign, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", trimmed),
        };

        if digits.contains('.') && digits.contains(',') {
            return Err(invalid());
        }

        let (whole, fraction) = digits.split_once(['.', ',']).unwrap_or((digits, ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) || fraction.len() > 2 {
            return Err(invalid());
        }

        let whole = if whole.is_empty() { "0" } else { whole };
        let fraction = if fraction.is_empty() { "0" } else { fraction };
        let decimal =
            Decimal::from_str(&format!("{sign}{whole}.{fraction}")).map_err(|_| invalid())?;

        Self::bounded(decimal, || text.to_owned())
    }
}
