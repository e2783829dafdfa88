//! Net wage assembly.

use rust_decimal::Decimal;

use crate::config::{ContributionConfig, WithholdingSchedule};
use crate::error::{EngineError, EngineResult};
use crate::models::{GrossWageResult, NetWageResult};

use super::deductions::calculate_deductions;
use super::withholding_tax::withholding_tax_from_gross;

/// Combines gross pay, deductions and withholding tax into a net wage.
///
/// Late minutes are charged at the gross result's hourly rate. Tax is taken
/// on `total_gross` before deductions, and
/// `net_wage = total_gross - total_deductions - withholding_tax`.
///
/// # Errors
///
/// Returns `InvalidArgument` when no gross result is supplied, plus any
/// error from the deduction or tax calculation.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::assemble_net_wage;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::GrossWageResult;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/ph").unwrap();
/// let schedule = loader
///     .withholding_schedule_for(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap())
///     .unwrap();
/// let gross = GrossWageResult {
///     hourly_rate: Decimal::from(100),
///     regular_pay: Decimal::from(4000),
///     overtime_pay: Decimal::from(625),
///     holiday_pay: Decimal::ZERO,
///     night_differential_pay: Decimal::ZERO,
///     total_gross: Decimal::from(4625),
/// };
///
/// let net = assemble_net_wage(
///     Some(&gross),
///     Decimal::ZERO,
///     loader.config().contributions(),
///     schedule,
/// )
/// .unwrap();
///
/// assert_eq!(net.total_deductions, Decimal::from(445));
/// assert_eq!(net.withholding_tax, Decimal::ZERO);
/// assert_eq!(net.net_wage, Decimal::from(4180));
/// ```
pub fn assemble_net_wage(
    gross: Option<&GrossWageResult>,
    total_late_minutes: Decimal,
    contributions: &ContributionConfig,
    schedule: &WithholdingSchedule,
) -> EngineResult<NetWageResult> {
    let gross = gross.ok_or_else(|| EngineError::InvalidArgument {
        message: "gross wage is required to assemble net wage".to_string(),
    })?;

    let deductions = calculate_deductions(
        gross.total_gross,
        total_late_minutes,
        gross.hourly_rate,
        contributions,
    )?;
    let withholding_tax = withholding_tax_from_gross(Some(gross), schedule)?;

    Ok(NetWageResult {
        sss_deduction: deductions.sss,
        philhealth_deduction: deductions.philhealth,
        pagibig_deduction: deductions.pagibig,
        late_deduction: deductions.late,
        total_deductions: deductions.total,
        withholding_tax,
        net_wage: gross
            .total_gross
            .checked_sub(deductions.total)
            .and_then(|net| net.checked_sub(withholding_tax))
            .ok_or_else(|| EngineError::invalid_amount("net_wage", gross.total_gross))?,
    })
}
