//! Core data models for the Payroll Computation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod calculation_result;
mod employee;
mod hours;
mod pay_period;

pub use attendance::AttendancePunch;
pub use calculation_result::{
    GrossWageCalculation, GrossWageResult, NetWageResult, PayrollCalculation,
};
pub use employee::{Employee, is_valid_employee_id};
pub use hours::{DailyHours, HoursBreakdown};
pub use pay_period::{MIN_PERIOD_YEAR, PayPeriod, ResolvedPeriod, WEEKS_PER_MONTH};
