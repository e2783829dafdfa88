//! Gross wage calculation.
//!
//! Converts an [`HoursBreakdown`] into pay components at an hourly rate:
//! regular pay, overtime pay, holiday premium pay and night differential.

use rust_decimal::Decimal;

use crate::config::{HolidayCalendar, PayPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, GrossWageResult, HoursBreakdown};

/// Multiplies pay factors, reporting overflow as `InvalidAmount` on `field`.
pub(super) fn checked_product(field: &str, factors: &[Decimal]) -> EngineResult<Decimal> {
    factors.iter().try_fold(Decimal::ONE, |acc, &factor| {
        acc.checked_mul(factor).ok_or_else(|| {
            EngineError::invalid_amount(field, format!("{} x {} overflows", acc, factor))
        })
    })
}

/// Adds amounts, reporting overflow as `InvalidAmount` on `field`.
pub(super) fn checked_sum(
    field: &str,
    amounts: impl IntoIterator<Item = Decimal>,
) -> EngineResult<Decimal> {
    amounts.into_iter().try_fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount).ok_or_else(|| {
            EngineError::invalid_amount(field, format!("{} + {} overflows", acc, amount))
        })
    })
}

/// Returns the employee's own hourly rate, or the policy default when the
/// employee carries none.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::resolve_hourly_rate;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::Employee;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/ph").unwrap();
/// let mut employee = Employee {
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
///
/// assert_eq!(resolve_hourly_rate(&employee, loader.policy()), Decimal::new(13393, 2));
///
/// employee.hourly_rate = Some(Decimal::from(100));
/// assert_eq!(resolve_hourly_rate(&employee, loader.policy()), Decimal::from(100));
/// ```
pub fn resolve_hourly_rate(employee: &Employee, policy: &PayPolicy) -> Decimal {
    employee.hourly_rate.unwrap_or(policy.default_hourly_rate)
}

/// Calculates gross pay from aggregated hours.
///
/// - `regular_pay = regular_hours × rate`
/// - `overtime_pay = overtime_hours × rate × overtime_multiplier`
/// - `holiday_pay = Σ holiday_hours × rate × premium` over holiday dates,
///   with the premium taken from the calendar by holiday kind
/// - `night_differential_pay = night_hours × rate × night_differential_rate`
///   for night-shift employees, zero otherwise
///
/// `total_gross` is the sum of the four. The result is unrounded and the
/// function is pure: the same inputs always give the same result.
///
/// # Errors
///
/// Returns `InvalidAmount` if the rate or any hour total is negative, or if
/// a pay component does not fit in a `Decimal`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_gross_wage;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{DailyHours, HoursBreakdown};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/ph").unwrap();
/// let days = (3..=7)
///     .map(|d| {
///         let mut day = DailyHours::absent(NaiveDate::from_ymd_opt(2024, 6, d).unwrap());
///         day.present = true;
///         day.regular_hours = Decimal::from(8);
///         day.overtime_hours = Decimal::from(1);
///         day
///     })
///     .collect();
/// let hours = HoursBreakdown::from_days(days);
///
/// let gross = calculate_gross_wage(
///     &hours,
///     Decimal::from(100),
///     loader.policy(),
///     false,
///     loader.holidays(),
/// )
/// .unwrap();
///
/// assert_eq!(gross.regular_pay, Decimal::from(4000));
/// assert_eq!(gross.overtime_pay, Decimal::from(625));
/// assert_eq!(gross.total_gross, Decimal::from(4625));
/// ```
pub fn calculate_gross_wage(
    hours: &HoursBreakdown,
    hourly_rate: Decimal,
    policy: &PayPolicy,
    night_shift: bool,
    holidays: &HolidayCalendar,
) -> EngineResult<GrossWageResult> {
    if hourly_rate < Decimal::ZERO {
        return Err(EngineError::invalid_amount("hourly_rate", hourly_rate));
    }
    for (field, value) in [
        ("regular_hours", hours.regular_hours),
        ("overtime_hours", hours.overtime_hours),
        ("night_hours", hours.night_hours),
        ("holiday_hours", hours.holiday_hours),
    ] {
        if value < Decimal::ZERO {
            return Err(EngineError::invalid_amount(field, value));
        }
    }

    let regular_pay = checked_product("regular_pay", &[hours.regular_hours, hourly_rate])?;
    let overtime_pay = checked_product(
        "overtime_pay",
        &[hours.overtime_hours, hourly_rate, policy.overtime_multiplier],
    )?;

    let holiday_pay = checked_sum(
        "holiday_pay",
        hours
            .days
            .iter()
            .filter(|d| !d.holiday_hours.is_zero())
            .map(|d| {
                checked_product(
                    "holiday_pay",
                    &[d.holiday_hours, hourly_rate, holidays.premium_on(d.date)],
                )
            })
            .collect::<EngineResult<Vec<_>>>()?,
    )?;

    let night_differential_pay = if night_shift {
        checked_product(
            "night_differential_pay",
            &[hours.night_hours, hourly_rate, policy.night_differential_rate],
        )?
    } else {
        Decimal::ZERO
    };

    let total_gross = checked_sum(
        "total_gross",
        [regular_pay, overtime_pay, holiday_pay, night_differential_pay],
    )?;

    Ok(GrossWageResult {
        hourly_rate,
        regular_pay,
        overtime_pay,
        holiday_pay,
        night_differential_pay,
        total_gross,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::test_support::*;
    use crate::models::DailyHours;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn worked_day(on: NaiveDate, regular: &str, overtime: &str) -> DailyHours {
        let mut day = DailyHours::absent(on);
        day.present = true;
        day.regular_hours = dec(regular);
        day.overtime_hours = dec(overtime);
        day
    }

    fn five_day_week() -> HoursBreakdown {
        HoursBreakdown::from_days(
            (3..=7)
                .map(|d| worked_day(date(2024, 6, d), "8", "1"))
                .collect(),
        )
    }

    fn gross(hours: &HoursBreakdown, rate: &str, night_shift: bool) -> EngineResult<GrossWageResult> {
        calculate_gross_wage(
            hours,
            dec(rate),
            &create_test_policy(),
            night_shift,
            &create_test_holidays(),
        )
    }

    #[test]
    fn test_standard_week_at_100_per_hour() {
        let result = gross(&five_day_week(), "100", false).unwrap();

        assert_eq!(result.regular_pay, dec("4000"));
        assert_eq!(result.overtime_pay, dec("625"));
        assert_eq!(result.holiday_pay, Decimal::ZERO);
        assert_eq!(result.night_differential_pay, Decimal::ZERO);
        assert_eq!(result.total_gross, dec("4625"));
    }

    #[test]
    fn test_regular_holiday_premium() {
        let mut day = worked_day(date(2024, 6, 12), "8", "0");
        day.holiday_hours = dec("8");
        let hours = HoursBreakdown::from_days(vec![day]);

        let result = gross(&hours, "100", false).unwrap();

        assert_eq!(result.regular_pay, dec("800"));
        assert_eq!(result.holiday_pay, dec("800"));
        assert_eq!(result.total_gross, dec("1600"));
    }

    #[test]
    fn test_special_non_working_premium() {
        let mut day = worked_day(date(2024, 8, 21), "8", "0");
        day.holiday_hours = dec("8");
        let hours = HoursBreakdown::from_days(vec![day]);

        let result = gross(&hours, "100", false).unwrap();

        assert_eq!(result.holiday_pay, dec("240"));
    }

    #[test]
    fn test_night_differential_only_for_night_shift() {
        let mut day = worked_day(date(2024, 6, 3), "8", "0");
        day.night_hours = dec("8");
        let hours = HoursBreakdown::from_days(vec![day]);

        let night = gross(&hours, "100", true).unwrap();
        assert_eq!(night.night_differential_pay, dec("80"));
        assert_eq!(night.total_gross, dec("880"));

        let day_shift = gross(&hours, "100", false).unwrap();
        assert_eq!(day_shift.night_differential_pay, Decimal::ZERO);
        assert_eq!(day_shift.total_gross, dec("800"));
    }

    #[test]
    fn test_zero_hours_yield_zero_gross() {
        let hours = HoursBreakdown::from_days(vec![DailyHours::absent(date(2024, 6, 3))]);
        let result = gross(&hours, "133.93", false).unwrap();
        assert_eq!(result.total_gross, Decimal::ZERO);
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        match gross(&five_day_week(), "-1", false) {
            Err(EngineError::InvalidAmount { field, .. }) => assert_eq!(field, "hourly_rate"),
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_hours_are_rejected() {
        let mut hours = five_day_week();
        hours.overtime_hours = dec("-1");
        assert!(matches!(
            gross(&hours, "100", false),
            Err(EngineError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_overflowing_rate_is_rejected_not_panicking() {
        let hours = five_day_week();

        match gross(&hours, "79228162514264337593543950335", false) {
            Err(EngineError::InvalidAmount { field, .. }) => assert_eq!(field, "regular_pay"),
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        // Each component fits on its own; their sum does not.
        let hours = HoursBreakdown::from_days(vec![worked_day(date(2024, 6, 3), "1", "1")]);
        let mut policy = create_test_policy();
        policy.overtime_multiplier = Decimal::ONE;

        match calculate_gross_wage(&hours, Decimal::MAX, &policy, false, &create_test_holidays()) {
            Err(EngineError::InvalidAmount { field, .. }) => assert_eq!(field, "total_gross"),
            other => panic!("Expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_hourly_rate_prefers_employee_rate() {
        let policy = create_test_policy();
        let mut employee = create_test_employee("10001", time(8, 0), false);
        assert_eq!(resolve_hourly_rate(&employee, &policy), dec("133.93"));

        employee.hourly_rate = Some(dec("535.71"));
        assert_eq!(resolve_hourly_rate(&employee, &policy), dec("535.71"));
    }

    proptest! {
        #[test]
        fn prop_total_is_sum_of_components(
            regular in 0u32..=4000,
            overtime in 0u32..=2000,
            night in 0u32..=4000,
            rate_cents in 0u32..=100_000,
            night_shift in any::<bool>(),
        ) {
            let mut day = worked_day(date(2024, 6, 12), "0", "0");
            day.regular_hours = Decimal::new(i64::from(regular), 2);
            day.overtime_hours = Decimal::new(i64::from(overtime), 2);
            day.night_hours = Decimal::new(i64::from(night), 2);
            day.holiday_hours = day.regular_hours;
            let hours = HoursBreakdown::from_days(vec![day]);
            let rate = Decimal::new(i64::from(rate_cents), 2);

            let first = calculate_gross_wage(&hours, rate, &create_test_policy(), night_shift, &create_test_holidays()).unwrap();
            let second = calculate_gross_wage(&hours, rate, &create_test_policy(), night_shift, &create_test_holidays()).unwrap();

            prop_assert_eq!(first.total_gross, first.components_total());
            prop_assert_eq!(&first, &second);
            prop_assert!(first.total_gross >= Decimal::ZERO);
        }
    }
}
