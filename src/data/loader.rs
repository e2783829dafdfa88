//! Loading of employee and attendance CSV exports.
//!
//! This module provides the [`DataLoader`] type, which reads the
//! `employees.csv` and `attendance.csv` files of a data directory into a
//! [`DataSnapshot`].

use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendancePunch, Employee, is_valid_employee_id};

use super::csv::{CsvRow, CsvTable};
use super::snapshot::DataSnapshot;

/// Date layouts accepted in data files.
const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

/// Time layouts accepted in data files.
const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// Shift start assumed when the employee file has no shift column.
const DEFAULT_SHIFT_START: (u32, u32) = (8, 0);

/// Loads employee and attendance data from CSV files.
///
/// # Directory Structure
///
/// ```text
/// data/
/// ├── employees.csv   # Employee #, Last Name, First Name, Shift Start, ...
/// └── attendance.csv  # Employee #, Date, Log In, Log Out
/// ```
///
/// Rows that are incomplete or malformed are skipped with a warning; a
/// missing file or a header without the required columns is an error.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::data::{DataLoader, EmployeeDirectory};
///
/// let snapshot = DataLoader::load("./data")?;
/// println!("Loaded {} employees", snapshot.employees().len());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub struct DataLoader;

impl DataLoader {
    /// Loads `employees.csv` and `attendance.csv` from `dir`.
    pub fn load<P: AsRef<Path>>(dir: P) -> EngineResult<DataSnapshot> {
        let dir = dir.as_ref();
        let employees = Self::load_employees(&dir.join("employees.csv"))?;
        let punches = Self::load_attendance(&dir.join("attendance.csv"))?;

        info!(
            path = %dir.display(),
            employees = employees.len(),
            punches = punches.len(),
            "Loaded payroll data"
        );

        Ok(DataSnapshot::new(employees, punches))
    }

    /// Reads employee master records.
    pub fn load_employees(path: &Path) -> EngineResult<Vec<Employee>> {
        let (path_str, table) = Self::read_table(path)?;

        let id_col = table.column(&path_str, "Employee #")?;
        let last_col = table.column(&path_str, "Last Name")?;
        let first_col = table.column(&path_str, "First Name")?;
        let birthday_col = table.optional_column("Birthday");
        let position_col = table.optional_column("Position");
        let status_col = table.optional_column("Status");
        let rate_col = table.optional_column("Hourly Rate");
        let shift_col = table.optional_column("Shift Start");
        let night_col = table.optional_column("Night Shift");

        let mut employees = Vec::with_capacity(table.rows().len());
        for row in table.rows() {
            let optional = |col: Option<usize>| col.and_then(|c| row.get(c));

            let parsed = (|| -> Result<Employee, String> {
                let id = required(row, id_col, "Employee #")?;
                if !is_valid_employee_id(id) {
                    return Err(format!("employee id '{}' is not numeric", id));
                }

                let shift_start = match optional(shift_col) {
                    Some(s) => parse_time(s)?,
                    None => NaiveTime::from_hms_opt(DEFAULT_SHIFT_START.0, DEFAULT_SHIFT_START.1, 0)
                        .ok_or("invalid default shift start")?,
                };

                Ok(Employee {
                    id: id.to_string(),
                    last_name: required(row, last_col, "Last Name")?.to_string(),
                    first_name: required(row, first_col, "First Name")?.to_string(),
                    birthday: optional(birthday_col).map(parse_date).transpose()?,
                    position: optional(position_col).map(str::to_string),
                    status: optional(status_col).map(str::to_string),
                    hourly_rate: optional(rate_col).map(parse_amount).transpose()?,
                    shift_start,
                    night_shift: optional(night_col).map(parse_flag).unwrap_or(false),
                })
            })();

            match parsed {
                Ok(employee) => employees.push(employee),
                Err(reason) => warn!(
                    path = %path_str,
                    line = row.line,
                    reason = %reason,
                    "Skipping employee record"
                ),
            }
        }

        Ok(employees)
    }

    /// Reads attendance punches.
    pub fn load_attendance(path: &Path) -> EngineResult<Vec<AttendancePunch>> {
        let (path_str, table) = Self::read_table(path)?;

        let id_col = table.column(&path_str, "Employee #")?;
        let date_col = table.column(&path_str, "Date")?;
        let in_col = table.column(&path_str, "Log In")?;
        let out_col = table.column(&path_str, "Log Out")?;

        let mut punches = Vec::with_capacity(table.rows().len());
        for row in table.rows() {
            let parsed = (|| -> Result<AttendancePunch, String> {
                Ok(AttendancePunch {
                    employee_id: required(row, id_col, "Employee #")?.to_string(),
                    date: parse_date(required(row, date_col, "Date")?)?,
                    time_in: parse_time(required(row, in_col, "Log In")?)?,
                    time_out: parse_time(required(row, out_col, "Log Out")?)?,
                })
            })();

            match parsed {
                Ok(punch) => punches.push(punch),
                Err(reason) => warn!(
                    path = %path_str,
                    line = row.line,
                    reason = %reason,
                    "Skipping attendance record"
                ),
            }
        }

        Ok(punches)
    }

    /// Reads and parses a CSV file. A missing file is `DataNotFound`; a file
    /// that exists but cannot be read as UTF-8 text is a `DataParseError` at
    /// line 0.
    fn read_table(path: &Path) -> EngineResult<(String, CsvTable)> {
        let path_str = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => EngineError::DataNotFound {
                path: path_str.clone(),
            },
            _ => EngineError::DataParseError {
                path: path_str.clone(),
                line: 0,
                message: e.to_string(),
            },
        })?;
        let table = CsvTable::parse(&path_str, &content)?;
        Ok((path_str, table))
    }
}

fn required<'a>(row: &'a CsvRow, index: usize, name: &str) -> Result<&'a str, String> {
    row.get(index).ok_or_else(|| format!("missing '{}'", name))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| format!("invalid date '{}'", s))
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| format!("invalid time '{}'", s))
}

fn parse_amount(s: &str) -> Result<Decimal, String> {
    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    let amount = Decimal::from_str(&cleaned).map_err(|_| format!("invalid amount '{}'", s))?;
    if amount < Decimal::ZERO {
        return Err(format!("negative amount '{}'", s));
    }
    Ok(amount)
}

fn parse_flag(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1" | "night"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AttendanceStore, EmployeeDirectory};

    fn data_path() -> &'static str {
        "./data"
    }

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "payroll-engine-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{}.csv", name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_sample_data() {
        let snapshot = DataLoader::load(data_path());
        assert!(snapshot.is_ok(), "Failed to load data: {:?}", snapshot.err());

        let snapshot = snapshot.unwrap();
        let employee = snapshot.find_by_id("10001").unwrap();
        assert_eq!(employee.last_name, "Garcia");
        assert!(snapshot.has_records_for("10001"));
    }

    #[test]
    fn test_load_employees_parses_optional_columns() {
        let path = write_temp(
            "employees-optional",
            "Employee #,Last Name,First Name,Birthday,Hourly Rate,Shift Start,Night Shift\n\
             10001,Garcia,Manuel III,10/11/1983,\"1,535.71\",8:00,No\n\
             10002,Lim,Antonio,,,22:00,Yes\n",
        );

        let employees = DataLoader::load_employees(&path).unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(employees[0].hourly_rate, Some(Decimal::new(153571, 2)));
        assert_eq!(
            employees[0].birthday,
            NaiveDate::from_ymd_opt(1983, 10, 11)
        );
        assert!(!employees[0].night_shift);
        assert!(employees[1].night_shift);
        assert_eq!(
            employees[1].shift_start,
            NaiveTime::from_hms_opt(22, 0, 0).unwrap()
        );
        assert!(employees[1].hourly_rate.is_none());
    }

    #[test]
    fn test_load_employees_defaults_shift_start() {
        let path = write_temp("employees-default-shift", "Employee #,Last Name,First Name\n10003,Aquino,Bianca\n");

        let employees = DataLoader::load_employees(&path).unwrap();
        assert_eq!(
            employees[0].shift_start,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_load_employees_skips_bad_rows() {
        let path = write_temp(
            "employees-bad",
            "Employee #,Last Name,First Name,Hourly Rate\n\
             10001,Garcia,Manuel III,535.71\n\
             abc,Bad,Id,100\n\
             10004,,Missing Last,100\n\
             10005,Reyes,Isabella,-5\n",
        );

        let employees = DataLoader::load_employees(&path).unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].id, "10001");
    }

    #[test]
    fn test_load_attendance_parses_rows_and_skips_bad_ones() {
        let path = write_temp(
            "attendance",
            "Employee #,Last Name,First Name,Date,Log In,Log Out\n\
             10001,Garcia,Manuel III,06/03/2024,8:59,18:31\n\
             10001,Garcia,Manuel III,2024-06-04,22:00,06:00\n\
             10001,Garcia,Manuel III,13/45/2024,8:00,17:00\n\
             10001,Garcia,Manuel III,06/05/2024,,17:00\n",
        );

        let punches = DataLoader::load_attendance(&path).unwrap();
        assert_eq!(punches.len(), 2);
        assert_eq!(punches[0].date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(punches[0].time_in, NaiveTime::from_hms_opt(8, 59, 0).unwrap());
        assert!(punches[1].crosses_midnight());
    }

    #[test]
    fn test_load_attendance_missing_column() {
        let path = write_temp("attendance-no-logout", "Employee #,Date,Log In\n10001,06/03/2024,8:00\n");

        match DataLoader::load_attendance(&path) {
            Err(EngineError::DataParseError { message, .. }) => {
                assert!(message.contains("Log Out"));
            }
            other => panic!("Expected DataParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_directory_returns_data_not_found() {
        match DataLoader::load("/nonexistent/data") {
            Err(EngineError::DataNotFound { path }) => {
                assert!(path.contains("employees.csv"));
            }
            other => panic!("Expected DataNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_file_is_a_parse_error() {
        let path = write_temp("employees-latin1", "");
        fs::write(&path, b"Employee #,Last Name,First Name\n10001,Pe\xf1a,Jos\xe9\n").unwrap();

        match DataLoader::load_employees(&path) {
            Err(EngineError::DataParseError { path: failed, line, .. }) => {
                assert!(failed.contains("employees-latin1"));
                assert_eq!(line, 0);
            }
            other => panic!("Expected DataParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_in_place_of_file_is_a_parse_error() {
        let dir = write_temp("attendance-dir", "").with_extension("d");
        fs::create_dir_all(&dir).unwrap();

        assert!(matches!(
            DataLoader::load_attendance(&dir),
            Err(EngineError::DataParseError { line: 0, .. })
        ));
    }

    #[test]
    fn test_parse_flag_variants() {
        assert!(parse_flag("Yes"));
        assert!(parse_flag("TRUE"));
        assert!(!parse_flag("No"));
        assert!(!parse_flag("false"));
    }
}
