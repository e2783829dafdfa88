//! Aggregated worked-hours models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Hours credited for a single calendar day.
///
/// A day without a punch is recorded with all figures at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHours {
    /// The calendar date.
    pub date: NaiveDate,
    /// Whether an attendance punch existed for this date.
    pub present: bool,
    /// Total hours between time-in and time-out.
    pub worked_hours: Decimal,
    /// Hours up to the standard shift length.
    pub regular_hours: Decimal,
    /// Hours beyond the standard shift, capped per day.
    pub overtime_hours: Decimal,
    /// Hours that fall inside the night window.
    pub night_hours: Decimal,
    /// Regular hours worked on a holiday.
    pub holiday_hours: Decimal,
    /// Minutes between shift start and time-in, never negative.
    pub late_minutes: Decimal,
}

impl DailyHours {
    /// A day with no attendance.
    pub fn absent(date: NaiveDate) -> Self {
        Self {
            date,
            present: false,
            worked_hours: Decimal::ZERO,
            regular_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            night_hours: Decimal::ZERO,
            holiday_hours: Decimal::ZERO,
            late_minutes: Decimal::ZERO,
        }
    }
}

/// Per-day hours and period totals for one employee and one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursBreakdown {
    /// One entry per date in the period, in date order.
    pub days: Vec<DailyHours>,
    /// Sum of regular hours.
    pub regular_hours: Decimal,
    /// Sum of overtime hours.
    pub overtime_hours: Decimal,
    /// Sum of night hours.
    pub night_hours: Decimal,
    /// Sum of holiday hours.
    pub holiday_hours: Decimal,
    /// Sum of late minutes.
    pub total_late_minutes: Decimal,
}

impl HoursBreakdown {
    /// Builds the breakdown from per-day figures, summing the totals.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{DailyHours, HoursBreakdown};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let mut day = DailyHours::absent(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
    /// day.present = true;
    /// day.regular_hours = Decimal::from(8);
    /// day.overtime_hours = Decimal::from(1);
    ///
    /// let breakdown = HoursBreakdown::from_days(vec![day.clone(), day]);
    /// assert_eq!(breakdown.regular_hours, Decimal::from(16));
    /// assert_eq!(breakdown.overtime_hours, Decimal::from(2));
    /// ```
    pub fn from_days(days: Vec<DailyHours>) -> Self {
        let sum = |f: fn(&DailyHours) -> Decimal| days.iter().map(f).sum::<Decimal>();

        let regular_hours = sum(|d| d.regular_hours);
        let overtime_hours = sum(|d| d.overtime_hours);
        let night_hours = sum(|d| d.night_hours);
        let holiday_hours = sum(|d| d.holiday_hours);
        let total_late_minutes = sum(|d| d.late_minutes);

        Self {
            days,
            regular_hours,
            overtime_hours,
            night_hours,
            holiday_hours,
            total_late_minutes,
        }
    }

    /// Number of days with an attendance punch.
    pub fn days_present(&self) -> usize {
        self.days.iter().filter(|d| d.present).count()
    }

    /// Total of regular and overtime hours.
    pub fn total_hours(&self) -> Decimal {
        self.regular_hours + self.overtime_hours
    }
}
