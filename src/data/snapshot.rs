//! Read-only employee and attendance collections.
//!
//! The engine reads employee master records and attendance punches through
//! the [`EmployeeDirectory`] and [`AttendanceStore`] traits. [`DataSnapshot`]
//! is the in-memory implementation of both: built once, never mutated, and
//! shared behind an `Arc` by callers that need it across threads.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::warn;

use crate::models::{AttendancePunch, Employee};

/// Lookup of employee master records.
pub trait EmployeeDirectory {
    /// Finds an employee by id.
    fn find_by_id(&self, id: &str) -> Option<&Employee>;

    /// All employees in directory order.
    fn employees(&self) -> &[Employee];
}

/// Range queries over attendance punches.
pub trait AttendanceStore {
    /// Returns the employee's punches recorded on any of `dates`, ordered by
    /// date and then time-in.
    fn punches_for(&self, employee_id: &str, dates: &[NaiveDate]) -> Vec<&AttendancePunch>;

    /// Returns true if the employee has at least one punch on any date.
    fn has_records_for(&self, employee_id: &str) -> bool;
}

/// An immutable snapshot of employees and their attendance.
///
/// # Example
///
/// ```
/// use payroll_engine::data::{AttendanceStore, DataSnapshot, EmployeeDirectory};
/// use payroll_engine::models::{AttendancePunch, Employee};
/// use chrono::{NaiveDate, NaiveTime};
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
/// let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let punch = AttendancePunch {
///     employee_id: "10001".to_string(),
///     date,
///     time_in: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     time_out: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
/// };
///
/// let snapshot = DataSnapshot::new(vec![employee], vec![punch]);
/// assert!(snapshot.find_by_id("10001").is_some());
/// assert_eq!(snapshot.punches_for("10001", &[date]).len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataSnapshot {
    employees: Vec<Employee>,
    employee_index: HashMap<String, usize>,
    /// Punches per employee, sorted by date then time-in.
    punches: HashMap<String, Vec<AttendancePunch>>,
}

impl DataSnapshot {
    /// Builds a snapshot, indexing employees by id and punches by employee.
    ///
    /// When an id appears more than once only the first record is indexed.
    pub fn new(employees: Vec<Employee>, punches: Vec<AttendancePunch>) -> Self {
        let mut employee_index = HashMap::with_capacity(employees.len());
        for (position, employee) in employees.iter().enumerate() {
            if employee_index.contains_key(&employee.id) {
                warn!(employee_id = %employee.id, "Duplicate employee record ignored");
                continue;
            }
            employee_index.insert(employee.id.clone(), position);
        }

        let mut by_employee: HashMap<String, Vec<AttendancePunch>> = HashMap::new();
        for punch in punches {
            by_employee
                .entry(punch.employee_id.clone())
                .or_default()
                .push(punch);
        }
        for list in by_employee.values_mut() {
            list.sort_by(|a, b| (a.date, a.time_in).cmp(&(b.date, b.time_in)));
        }

        Self {
            employees,
            employee_index,
            punches: by_employee,
        }
    }

    /// Total number of attendance punches held.
    pub fn punch_count(&self) -> usize {
        self.punches.values().map(Vec::len).sum()
    }
}

impl EmployeeDirectory for DataSnapshot {
    fn find_by_id(&self, id: &str) -> Option<&Employee> {
        self.employee_index.get(id).map(|&i| &self.employees[i])
    }

    fn employees(&self) -> &[Employee] {
        &self.employees
    }
}

impl AttendanceStore for DataSnapshot {
    fn punches_for(&self, employee_id: &str, dates: &[NaiveDate]) -> Vec<&AttendancePunch> {
        self.punches
            .get(employee_id)
            .map(|list| {
                list.iter()
                    .filter(|p| dates.contains(&p.date))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn has_records_for(&self, employee_id: &str) -> bool {
        self.punches
            .get(employee_id)
            .is_some_and(|list| !list.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn employee(id: &str, last_name: &str) -> Employee {
        Employee {
            id: id.to_string(),
            last_name: last_name.to_string(),
            first_name: "Test".to_string(),
            birthday: None,
            position: None,
            status: None,
            hourly_rate: None,
            shift_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            night_shift: false,
        }
    }

    fn punch(id: &str, day: u32, hour_in: u32) -> AttendancePunch {
        AttendancePunch {
            employee_id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            time_in: NaiveTime::from_hms_opt(hour_in, 0, 0).unwrap(),
            time_out: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_find_by_id() {
        let snapshot = DataSnapshot::new(
            vec![employee("10001", "Garcia"), employee("10002", "Lim")],
            vec![],
        );
        assert_eq!(snapshot.find_by_id("10002").unwrap().last_name, "Lim");
        assert!(snapshot.find_by_id("99999").is_none());
        assert_eq!(snapshot.employees().len(), 2);
    }

    #[test]
    fn test_duplicate_employee_keeps_first() {
        let snapshot = DataSnapshot::new(
            vec![employee("10001", "Garcia"), employee("10001", "Impostor")],
            vec![],
        );
        assert_eq!(snapshot.find_by_id("10001").unwrap().last_name, "Garcia");
    }

    #[test]
    fn test_punches_for_filters_and_orders() {
        let snapshot = DataSnapshot::new(
            vec![],
            vec![
                punch("10001", 5, 8),
                punch("10001", 3, 9),
                punch("10001", 3, 8),
                punch("10002", 3, 8),
                punch("10001", 20, 8),
            ],
        );

        let dates: Vec<NaiveDate> = (1..=7)
            .map(|d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap())
            .collect();
        let found = snapshot.punches_for("10001", &dates);

        assert_eq!(found.len(), 3);
        assert_eq!(found[0].date.to_string(), "2024-06-03");
        assert_eq!(found[0].time_in, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(found[1].time_in, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(found[2].date.to_string(), "2024-06-05");
        assert_eq!(snapshot.punch_count(), 5);
    }

    #[test]
    fn test_has_records_for() {
        let snapshot = DataSnapshot::new(vec![], vec![punch("10001", 3, 8)]);
        assert!(snapshot.has_records_for("10001"));
        assert!(!snapshot.has_records_for("10002"));
    }

    #[test]
    fn test_punches_for_unknown_employee_is_empty() {
        let snapshot = DataSnapshot::default();
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert!(snapshot.punches_for("10001", &[date]).is_empty());
    }
}
