//! Orchestration of a full payroll calculation.

use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::PayrollConfig;
use crate::data::{AttendanceStore, EmployeeDirectory};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, GrossWageCalculation, GrossWageResult, HoursBreakdown, PayPeriod,
    PayrollCalculation, ResolvedPeriod,
};

use super::gross_wage::{calculate_gross_wage, resolve_hourly_rate};
use super::hours::{aggregate_hours, validate_employee_id};
use super::net_wage::assemble_net_wage;
use super::period::resolve_period;

/// Runs payroll calculations against a configuration and a data source.
///
/// The engine borrows its inputs and never mutates them; each call resolves
/// the period, aggregates hours and computes gross (and for [`net_wage`],
/// deductions, tax and net) in sequence. A failure at any stage is returned
/// as is, without partial results.
///
/// [`net_wage`]: PayrollEngine::net_wage
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::PayrollEngine;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::data::DataSnapshot;
/// use payroll_engine::models::{AttendancePunch, Employee, PayPeriod};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/ph").unwrap();
/// let employee = Employee {
///     id: "10001".to_string(),
///     last_name: "Garcia".to_string(),
///     first_name: "Manuel III".to_string(),
///     birthday: None,
///     position: None,
///     status: None,
///     hourly_rate: Some(Decimal::from(100)),
///     shift_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     night_shift: false,
/// };
/// let punches = (3..=7)
///     .map(|d| AttendancePunch {
///         employee_id: "10001".to_string(),
///         date: NaiveDate::from_ymd_opt(2024, 6, d).unwrap(),
///         time_in: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///         time_out: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     })
///     .collect();
/// let snapshot = DataSnapshot::new(vec![employee], punches);
///
/// let engine = PayrollEngine::new(loader.config(), &snapshot, &snapshot);
/// let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
/// let period = PayPeriod::new_as_of(2024, 6, 1, today).unwrap();
///
/// let result = engine.gross_wage("10001", &period).unwrap();
/// assert_eq!(result.gross.total_gross, Decimal::from(4625));
/// ```
pub struct PayrollEngine<'a, D, A> {
    config: &'a PayrollConfig,
    directory: &'a D,
    attendance: &'a A,
}

/// Stages shared by the gross and net calculations.
struct GrossStage<'a> {
    employee: &'a Employee,
    period: ResolvedPeriod,
    hours: HoursBreakdown,
    gross: GrossWageResult,
}

impl<'a, D, A> PayrollEngine<'a, D, A>
where
    D: EmployeeDirectory,
    A: AttendanceStore,
{
    /// Creates an engine over borrowed configuration and data.
    pub fn new(config: &'a PayrollConfig, directory: &'a D, attendance: &'a A) -> Self {
        Self {
            config,
            directory,
            attendance,
        }
    }

    /// Calculates gross pay for one employee and period.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for a malformed employee id
    /// - `EmployeeNotFound` if the id is unknown or has no attendance
    /// - `InvalidPeriod` if the period resolves to no dates
    /// - `InvalidAmount` if a negative rate reaches the calculator
    pub fn gross_wage(
        &self,
        employee_id: &str,
        period: &PayPeriod,
    ) -> EngineResult<GrossWageCalculation> {
        let started = Instant::now();
        info!(employee_id = %employee_id, period = %period, "Starting gross wage calculation");

        let stage = self.gross_stage(employee_id, period).inspect_err(|e| {
            warn!(employee_id = %employee_id, period = %period, error = %e, "Gross wage calculation failed");
        })?;

        info!(
            employee_id = %employee_id,
            period = %period,
            total_gross = %stage.gross.total_gross,
            duration_us = started.elapsed().as_micros() as u64,
            "Gross wage calculation complete"
        );

        Ok(GrossWageCalculation {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            employee_id: stage.employee.id.clone(),
            employee_name: stage.employee.display_name(),
            period: stage.period,
            hours: stage.hours,
            gross: stage.gross,
        })
    }

    /// Calculates gross pay, deductions, withholding tax and net pay for one
    /// employee and period.
    ///
    /// The withholding schedule in effect on the period's first date is used.
    ///
    /// # Errors
    ///
    /// Everything [`gross_wage`](Self::gross_wage) returns, plus
    /// `InvalidConfig` if no withholding schedule covers the period.
    pub fn net_wage(&self, employee_id: &str, period: &PayPeriod) -> EngineResult<PayrollCalculation> {
        let started = Instant::now();
        info!(employee_id = %employee_id, period = %period, "Starting payroll calculation");

        let result = self.net_stage(employee_id, period).inspect_err(|e| {
            warn!(employee_id = %employee_id, period = %period, error = %e, "Payroll calculation failed");
        })?;

        info!(
            employee_id = %employee_id,
            period = %period,
            total_gross = %result.gross.total_gross,
            total_deductions = %result.net.total_deductions,
            withholding_tax = %result.net.withholding_tax,
            net_wage = %result.net.net_wage,
            duration_us = started.elapsed().as_micros() as u64,
            "Payroll calculation complete"
        );

        Ok(result)
    }

    fn gross_stage(&self, employee_id: &str, period: &PayPeriod) -> EngineResult<GrossStage<'a>> {
        validate_employee_id(employee_id)?;

        let employee = self
            .directory
            .find_by_id(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                id: employee_id.to_string(),
            })?;

        let policy = self.config.policy();
        let holidays = self.config.holidays();

        let resolved = resolve_period(period, &policy.period)?;
        let hours = aggregate_hours(employee, &resolved, self.attendance, policy, holidays)?;
        let rate = resolve_hourly_rate(employee, policy);
        let gross = calculate_gross_wage(&hours, rate, policy, employee.night_shift, holidays)?;

        Ok(GrossStage {
            employee,
            period: resolved,
            hours,
            gross,
        })
    }

    fn net_stage(&self, employee_id: &str, period: &PayPeriod) -> EngineResult<PayrollCalculation> {
        let stage = self.gross_stage(employee_id, period)?;

        let effective_on = stage.period.start_date().ok_or_else(|| EngineError::InvalidPeriod {
            message: format!("{} covers no calendar days", period),
        })?;
        let schedule = self.config.withholding_schedule_for(effective_on)?;

        let net = assemble_net_wage(
            Some(&stage.gross),
            stage.hours.total_late_minutes,
            self.config.contributions(),
            schedule,
        )?;

        Ok(PayrollCalculation {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            employee_id: stage.employee.id.clone(),
            employee_name: stage.employee.display_name(),
            period: stage.period,
            hours: stage.hours,
            gross: stage.gross,
            net,
        })
    }
}
