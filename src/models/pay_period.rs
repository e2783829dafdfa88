//! Pay coverage period models.
//!
//! This module contains the [`PayPeriod`] request value (year, month,
//! week-of-month) and the [`ResolvedPeriod`] holding the concrete calendar
//! dates a period covers.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Earliest year a pay period may fall in.
pub const MIN_PERIOD_YEAR: i32 = 2000;

/// Number of weeks a month is divided into.
pub const WEEKS_PER_MONTH: u32 = 4;

/// A pay coverage period: one week of one month.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
/// let period = PayPeriod::new_as_of(2024, 6, 2, today).unwrap();
/// assert_eq!(period.week, 2);
///
/// assert!(PayPeriod::new_as_of(2024, 13, 1, today).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// Calendar year.
    pub year: i32,
    /// Month of the year (1-12).
    pub month: u32,
    /// Week of the month (1-4).
    pub week: u32,
}

impl PayPeriod {
    /// Creates a validated period, checking the year against today's date.
    pub fn new(year: i32, month: u32, week: u32) -> EngineResult<Self> {
        Self::new_as_of(year, month, week, Utc::now().date_naive())
    }

    /// Creates a validated period, checking the year against `today`.
    ///
    /// Fails with `InvalidPeriod` unless the year is within
    /// `2000..=today.year() + 1`, the month within `1..=12`, and the week
    /// within `1..=4`.
    pub fn new_as_of(year: i32, month: u32, week: u32, today: NaiveDate) -> EngineResult<Self> {
        let max_year = today.year() + 1;
        if !(MIN_PERIOD_YEAR..=max_year).contains(&year) {
            return Err(EngineError::InvalidPeriod {
                message: format!(
                    "year must be between {} and {}, got {}",
                    MIN_PERIOD_YEAR, max_year, year
                ),
            });
        }
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod {
                message: format!("month must be between 1 and 12, got {}", month),
            });
        }
        if !(1..=WEEKS_PER_MONTH).contains(&week) {
            return Err(EngineError::InvalidPeriod {
                message: format!(
                    "week must be between 1 and {}, got {}",
                    WEEKS_PER_MONTH, week
                ),
            });
        }
        Ok(Self { year, month, week })
    }
}

impl std::fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Week {}, Month {}/{}", self.week, self.month, self.year)
    }
}

/// A pay period together with the calendar dates it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPeriod {
    /// The requested period.
    pub period: PayPeriod,
    /// The covered dates in ascending order.
    pub dates: Vec<NaiveDate>,
}

impl ResolvedPeriod {
    /// The first covered date.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// The last covered date.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}
