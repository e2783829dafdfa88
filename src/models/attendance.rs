//! Attendance punch model.

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// One day's time-in/time-out pair for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendancePunch {
    /// The employee the punch belongs to.
    pub employee_id: String,
    /// The calendar date the punch was recorded on (the date of time-in).
    pub date: NaiveDate,
    /// The time the employee clocked in.
    pub time_in: NaiveTime,
    /// The time the employee clocked out.
    pub time_out: NaiveTime,
}

impl AttendancePunch {
    /// Returns true when time-out falls on the day after time-in.
    pub fn crosses_midnight(&self) -> bool {
        self.time_out < self.time_in
    }

    /// Minutes between time-in and time-out, adding a day when the punch
    /// crosses midnight.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::AttendancePunch;
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let night = AttendancePunch {
    ///     employee_id: "10020".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
    ///     time_in: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    ///     time_out: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
    /// };
    /// assert_eq!(night.worked_minutes(), 9 * 60);
    /// ```
    pub fn worked_minutes(&self) -> i64 {
        let span = self.time_out - self.time_in;
        if span < TimeDelta::zero() {
            (span + TimeDelta::days(1)).num_minutes()
        } else {
            span.num_minutes()
        }
    }
}
