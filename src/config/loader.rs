//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from YAML files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{
    ContributionConfig, HolidayCalendar, PayPolicy, PayrollConfig, WithholdingSchedule,
};

/// Loads and provides access to payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query pay policy, holidays, contribution
/// tables, and withholding tax schedules.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/ph/
/// ├── policy.yaml          # Shift length, overtime, night window, default rate
/// ├── holidays.yaml        # Holiday calendar and premiums
/// ├── contributions.yaml   # SSS, PhilHealth and Pag-IBIG tables
/// └── withholding_tax/
///     └── 2023-01-01.yaml  # Tax schedule effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/ph").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let schedule = loader.withholding_schedule_for(date).unwrap();
/// println!("Tax brackets: {}", schedule.brackets.len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - A table is internally inconsistent (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<PayPolicy>(&path.join("policy.yaml"))?;
        let holidays = Self::load_yaml::<HolidayCalendar>(&path.join("holidays.yaml"))?;
        let contributions =
            Self::load_yaml::<ContributionConfig>(&path.join("contributions.yaml"))?;
        let schedules = Self::load_schedules(&path.join("withholding_tax"))?;

        Self::validate_policy(&policy)?;
        contributions.validate()?;
        for schedule in &schedules {
            schedule.validate()?;
        }

        debug!(
            path = %path.display(),
            holidays = holidays.holidays.len(),
            tax_schedules = schedules.len(),
            "Loaded payroll configuration"
        );

        Ok(Self {
            config: PayrollConfig::new(policy, holidays, contributions, schedules),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all withholding schedules from the schedule directory.
    fn load_schedules(dir: &Path) -> EngineResult<Vec<WithholdingSchedule>> {
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut schedules = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                schedules.push(Self::load_yaml::<WithholdingSchedule>(&path)?);
            }
        }

        if schedules.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no schedule files found)", dir_str),
            });
        }

        Ok(schedules)
    }

    fn validate_policy(policy: &PayPolicy) -> EngineResult<()> {
        let non_negative = [
            ("default_hourly_rate", policy.default_hourly_rate),
            ("standard_shift_hours", policy.standard_shift_hours),
            ("daily_overtime_cap_hours", policy.daily_overtime_cap_hours),
            ("overtime_multiplier", policy.overtime_multiplier),
            ("night_differential_rate", policy.night_differential_rate),
        ];
        if let Some((field, value)) = non_negative.iter().find(|(_, v)| *v < Decimal::ZERO) {
            return Err(EngineError::InvalidConfig {
                message: format!("{} must not be negative, got {}", field, value),
            });
        }
        if policy.standard_shift_hours > Decimal::from(24) {
            return Err(EngineError::InvalidConfig {
                message: "standard_shift_hours cannot exceed 24".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the pay policy constants.
    pub fn policy(&self) -> &PayPolicy {
        self.config.policy()
    }

    /// Returns the holiday calendar.
    pub fn holidays(&self) -> &HolidayCalendar {
        self.config.holidays()
    }

    /// Returns the withholding schedule in effect on `date`.
    pub fn withholding_schedule_for(&self, date: NaiveDate) -> EngineResult<&WithholdingSchedule> {
        self.config.withholding_schedule_for(date)
    }
}
