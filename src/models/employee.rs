//! Employee model.
//!
//! This module defines the Employee struct representing a master record
//! from the employee directory.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an employee whose attendance is paid by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique numeric identifier for the employee (e.g., "10001").
    pub id: String,
    /// The employee's last name.
    pub last_name: String,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's date of birth, when known.
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    /// The employee's position title.
    #[serde(default)]
    pub position: Option<String>,
    /// Employment status (e.g., "Regular", "Probationary").
    #[serde(default)]
    pub status: Option<String>,
    /// Optional override for the configured hourly rate.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
    /// The time of day the employee's shift starts.
    pub shift_start: NaiveTime,
    /// Whether the employee works the night shift.
    #[serde(default)]
    pub night_shift: bool,
}

impl Employee {
    /// Returns the display name in "Last, First" form.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    /// use chrono::NaiveTime;
    ///
    /// let employee = Employee {
    ///     id: "10001".to_string(),
    ///     last_name: "Garcia".to_string(),
    ///     first_name: "Manuel III".to_string(),
    ///     birthday: None,
    ///     position: None,
    ///     status: None,
    ///     hourly_rate: None,
    ///     shift_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
    ///     night_shift: false,
    /// };
    /// assert_eq!(employee.display_name(), "Garcia, Manuel III");
    /// ```
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

/// Returns true when `id` is a non-empty string of ASCII digits.
pub fn is_valid_employee_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_digit())
}
