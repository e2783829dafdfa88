//! Resolution of a week-of-month pay period into calendar dates.

use chrono::{Datelike, NaiveDate};

use crate::config::PeriodPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriod, ResolvedPeriod, WEEKS_PER_MONTH};

/// Number of days in a pay week.
pub const DAYS_PER_WEEK: u32 = 7;

/// Returns the number of days in the given month.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::days_in_month;
///
/// assert_eq!(days_in_month(2024, 2), Some(29));
/// assert_eq!(days_in_month(2023, 2), Some(28));
/// assert_eq!(days_in_month(2024, 13), None);
/// ```
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from((next - first).num_days()).ok()
}

/// Resolves a pay period into the ordered calendar dates it covers.
///
/// Week `w` covers days `7*(w-1)+1 ..= 7*w` of the month, clipped to the
/// month length. When `policy.fourth_week_absorbs_trailing_days` is set
/// (the default), week 4 runs to the last day of the month instead, so it
/// may cover up to 10 days.
///
/// # Errors
///
/// Returns `InvalidPeriod` if the month does not exist or the resulting
/// range is empty.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::resolve_period;
/// use payroll_engine::config::PeriodPolicy;
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
/// let period = PayPeriod::new_as_of(2024, 6, 2, today).unwrap();
/// let resolved = resolve_period(&period, &PeriodPolicy::default()).unwrap();
///
/// assert_eq!(resolved.start_date(), NaiveDate::from_ymd_opt(2024, 6, 8));
/// assert_eq!(resolved.end_date(), NaiveDate::from_ymd_opt(2024, 6, 14));
/// ```
pub fn resolve_period(period: &PayPeriod, policy: &PeriodPolicy) -> EngineResult<ResolvedPeriod> {
    let month_length = days_in_month(period.year, period.month).ok_or_else(|| {
        EngineError::InvalidPeriod {
            message: format!("{}-{:02} is not a calendar month", period.year, period.month),
        }
    })?;

    let first_day = DAYS_PER_WEEK * period.week.saturating_sub(1) + 1;
    let last_day = if period.week == WEEKS_PER_MONTH && policy.fourth_week_absorbs_trailing_days {
        month_length
    } else {
        (DAYS_PER_WEEK * period.week).min(month_length)
    };

    let dates: Vec<NaiveDate> = (first_day..=last_day)
        .filter_map(|day| NaiveDate::from_ymd_opt(period.year, period.month, day))
        .collect();

    if dates.is_empty() {
        return Err(EngineError::InvalidPeriod {
            message: format!("{} covers no calendar days", period),
        });
    }

    Ok(ResolvedPeriod {
        period: *period,
        dates,
    })
}
