//! Aggregation of attendance punches into worked hours.
//!
//! For each date of a resolved period the aggregator derives regular,
//! overtime, night and holiday hours plus late minutes from the employee's
//! punch, then sums them into an [`HoursBreakdown`].

use chrono::{NaiveTime, Timelike};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::{HolidayCalendar, NightWindow, PayPolicy};
use crate::data::AttendanceStore;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendancePunch, DailyHours, Employee, HoursBreakdown, ResolvedPeriod, is_valid_employee_id,
};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// A time-in further than this before a night shift's start belongs to the
/// following calendar day.
const NIGHT_SHIFT_ROLLOVER_MINUTES: i64 = 12 * 60;

/// Rejects employee ids that are empty or not purely numeric.
///
/// # Errors
///
/// Returns `InvalidArgument` for a malformed id.
pub fn validate_employee_id(id: &str) -> EngineResult<()> {
    if is_valid_employee_id(id) {
        Ok(())
    } else {
        Err(EngineError::InvalidArgument {
            message: format!("employee id '{}' must be non-empty and numeric", id),
        })
    }
}

/// Aggregates an employee's attendance over a resolved period.
///
/// Every date in the period produces one [`DailyHours`] entry; dates without
/// a punch contribute zero hours and zero lateness. For a punched date:
///
/// - worked time runs from time-in to time-out, wrapping past midnight when
///   time-out is earlier than time-in
/// - regular hours are worked time up to the standard shift
/// - overtime hours are worked time beyond the standard shift, capped at the
///   daily overtime cap
/// - night hours are worked time inside the night window
/// - holiday hours equal regular hours on a configured holiday
/// - late minutes are minutes between shift start and time-in, never negative
///
/// # Errors
///
/// - `InvalidArgument` if the employee id is malformed
/// - `EmployeeNotFound` if the store has no attendance for the employee at all
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{aggregate_hours, resolve_period};
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
///     hourly_rate: None,
///     shift_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     night_shift: false,
/// };
/// let punch = AttendancePunch {
///     employee_id: "10001".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     time_in: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     time_out: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
/// };
/// let store = DataSnapshot::new(vec![employee.clone()], vec![punch]);
///
/// let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
/// let period = PayPeriod::new_as_of(2024, 6, 1, today).unwrap();
/// let resolved = resolve_period(&period, &loader.policy().period).unwrap();
///
/// let hours = aggregate_hours(&employee, &resolved, &store, loader.policy(), loader.holidays()).unwrap();
/// assert_eq!(hours.regular_hours, Decimal::from(8));
/// assert_eq!(hours.overtime_hours, Decimal::from(2));
/// ```
pub fn aggregate_hours(
    employee: &Employee,
    period: &ResolvedPeriod,
    store: &impl AttendanceStore,
    policy: &PayPolicy,
    holidays: &HolidayCalendar,
) -> EngineResult<HoursBreakdown> {
    validate_employee_id(&employee.id)?;

    if !store.has_records_for(&employee.id) {
        return Err(EngineError::EmployeeNotFound {
            id: employee.id.clone(),
        });
    }

    let punches = store.punches_for(&employee.id, &period.dates);

    let days = period
        .dates
        .iter()
        .map(|&date| {
            let mut on_date = punches.iter().filter(|p| p.date == date);
            let Some(first) = on_date.next() else {
                return DailyHours::absent(date);
            };

            let extra = on_date.count();
            if extra > 0 {
                warn!(
                    employee_id = %employee.id,
                    date = %date,
                    ignored = extra,
                    "Multiple punches on one day; using the earliest time-in"
                );
            }

            daily_hours(employee, first, policy, holidays)
        })
        .collect();

    let breakdown = HoursBreakdown::from_days(days);

    debug!(
        employee_id = %employee.id,
        period = %period.period,
        days_present = breakdown.days_present(),
        regular_hours = %breakdown.regular_hours,
        overtime_hours = %breakdown.overtime_hours,
        "Aggregated attendance"
    );

    Ok(breakdown)
}

/// Derives one day's figures from a punch.
fn daily_hours(
    employee: &Employee,
    punch: &AttendancePunch,
    policy: &PayPolicy,
    holidays: &HolidayCalendar,
) -> DailyHours {
    let sixty = Decimal::from(60);
    let worked = Decimal::from(punch.worked_minutes());
    let standard = policy.standard_shift_minutes();
    let cap = policy.daily_overtime_cap_minutes();

    let regular = worked.min(standard);
    let excess = (worked - standard).max(Decimal::ZERO);
    let overtime = excess.min(cap);

    if excess > cap {
        warn!(
            employee_id = %employee.id,
            date = %punch.date,
            excess_minutes = %(excess - cap),
            "Overtime beyond the daily cap is not paid"
        );
    }

    let regular_hours = regular / sixty;
    let holiday_hours = if holidays.holiday_on(punch.date).is_some() {
        regular_hours
    } else {
        Decimal::ZERO
    };

    DailyHours {
        date: punch.date,
        present: true,
        worked_hours: worked / sixty,
        regular_hours,
        overtime_hours: overtime / sixty,
        night_hours: Decimal::from(night_overlap_minutes(punch, &policy.night_window)) / sixty,
        holiday_hours,
        late_minutes: Decimal::from(late_minutes(
            punch.time_in,
            employee.shift_start,
            employee.night_shift,
        )),
    }
}

/// Minutes between shift start and time-in, never negative.
///
/// For night-shift employees a time-in more than twelve hours before the
/// shift start counts as the following day, so a 00:30 punch against a 22:00
/// shift is 150 minutes late.
pub fn late_minutes(time_in: NaiveTime, shift_start: NaiveTime, night_shift: bool) -> i64 {
    let mut diff = (time_in - shift_start).num_minutes();
    if night_shift && diff < -NIGHT_SHIFT_ROLLOVER_MINUTES {
        diff += MINUTES_PER_DAY;
    }
    diff.max(0)
}

/// Minutes of a punch that fall inside the night window.
pub fn night_overlap_minutes(punch: &AttendancePunch, window: &NightWindow) -> i64 {
    let start = minutes_of_day(punch.time_in);
    let end = start + punch.worked_minutes();

    let window_start = minutes_of_day(window.start);
    let mut window_len = minutes_of_day(window.end) - window_start;
    if window.wraps_midnight() {
        window_len += MINUTES_PER_DAY;
    }

    // A punch spans at most two calendar days, so windows opening on the
    // previous, same and next day cover every overlap.
    (-1..=1)
        .map(|day| {
            let w_start = day * MINUTES_PER_DAY + window_start;
            let w_end = w_start + window_len;
            (end.min(w_end) - start.max(w_start)).max(0)
        })
        .sum()
}

fn minutes_of_day(t: NaiveTime) -> i64 {
    i64::from(t.num_seconds_from_midnight() / 60)
}
