//! Calculation logic for the Payroll Computation Engine.
//!
//! This module contains the calculation pipeline: resolving a pay period
//! into dates, aggregating attendance into hours, computing gross pay,
//! statutory deductions and withholding tax, and assembling net pay. The
//! [`PayrollEngine`] runs the stages in order.

mod deductions;
mod engine;
mod gross_wage;
mod hours;
mod net_wage;
mod period;
mod withholding_tax;

#[cfg(test)]
pub(crate) mod test_support;

pub use deductions::{
    DeductionBreakdown, calculate_deductions, late_deduction, pagibig_contribution,
    philhealth_contribution, sss_contribution,
};
pub use engine::PayrollEngine;
pub use gross_wage::{calculate_gross_wage, resolve_hourly_rate};
pub use hours::{aggregate_hours, late_minutes, night_overlap_minutes, validate_employee_id};
pub use net_wage::assemble_net_wage;
pub use period::{DAYS_PER_WEEK, days_in_month, resolve_period};
pub use withholding_tax::{calculate_withholding_tax, withholding_tax_from_gross};
