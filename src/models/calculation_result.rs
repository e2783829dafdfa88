//! Calculation result models for the Payroll Computation Engine.
//!
//! This module contains the gross and net wage figures and the
//! [`GrossWageCalculation`] / [`PayrollCalculation`] envelopes that carry
//! every intermediate figure of a calculation for presentation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{HoursBreakdown, ResolvedPeriod};

/// Gross pay broken down by component.
///
/// Values are unrounded; rounding happens where results are presented.
///
/// # Example
///
/// ```
/// use payroll_engine::models::GrossWageResult;
/// use rust_decimal::Decimal;
///
/// let gross = GrossWageResult {
///     hourly_rate: Decimal::from(100),
///     regular_pay: Decimal::from(4000),
///     overtime_pay: Decimal::from(625),
///     holiday_pay: Decimal::ZERO,
///     night_differential_pay: Decimal::ZERO,
///     total_gross: Decimal::from(4625),
/// };
/// assert_eq!(gross.components_total(), gross.total_gross);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossWageResult {
    /// The hourly rate the pay was computed from.
    pub hourly_rate: Decimal,
    /// Pay for regular hours.
    pub regular_pay: Decimal,
    /// Pay for overtime hours.
    pub overtime_pay: Decimal,
    /// Premium pay for regular hours worked on holidays.
    pub holiday_pay: Decimal,
    /// Night differential for night-shift employees.
    pub night_differential_pay: Decimal,
    /// Sum of all pay components.
    pub total_gross: Decimal,
}

impl GrossWageResult {
    /// Sums the individual pay components.
    pub fn components_total(&self) -> Decimal {
        self.regular_pay + self.overtime_pay + self.holiday_pay + self.night_differential_pay
    }
}

/// Statutory deductions, late penalty, tax and the resulting net wage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetWageResult {
    /// Social-insurance (SSS) contribution.
    pub sss_deduction: Decimal,
    /// Health-insurance (PhilHealth) contribution.
    pub philhealth_deduction: Decimal,
    /// Housing-fund (Pag-IBIG) contribution.
    pub pagibig_deduction: Decimal,
    /// Late-arrival penalty.
    pub late_deduction: Decimal,
    /// Sum of the four deductions above.
    pub total_deductions: Decimal,
    /// Withholding tax on the taxable base.
    pub withholding_tax: Decimal,
    /// Gross minus deductions minus tax.
    pub net_wage: Decimal,
}

/// The complete result of a gross wage calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossWageCalculation {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The employee the calculation is for.
    pub employee_id: String,
    /// The employee's "Last, First" name.
    pub employee_name: String,
    /// The period and the dates it covers.
    pub period: ResolvedPeriod,
    /// Hours derived from attendance.
    pub hours: HoursBreakdown,
    /// Gross pay components.
    pub gross: GrossWageResult,
}

/// The complete result of a net wage (payroll) calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCalculation {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The employee the calculation is for.
    pub employee_id: String,
    /// The employee's "Last, First" name.
    pub employee_name: String,
    /// The period and the dates it covers.
    pub period: ResolvedPeriod,
    /// Hours derived from attendance.
    pub hours: HoursBreakdown,
    /// Gross pay components.
    pub gross: GrossWageResult,
    /// Deductions, tax and net wage.
    pub net: NetWageResult,
}
