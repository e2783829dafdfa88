//! Fixtures shared by the calculation tests.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::config::{
    ContributionConfig, Holiday, HolidayCalendar, HolidayKind, HolidayPremiums, NightWindow,
    PagIbigRule, PagIbigTier, PayPolicy, PayrollConfig, PeriodPolicy, PhilHealthRule, SssBracket,
    SssTable, TaxBracket, WithholdingSchedule,
};
use crate::models::{AttendancePunch, Employee};

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn create_test_policy() -> PayPolicy {
    PayPolicy {
        default_hourly_rate: dec("133.93"),
        standard_shift_hours: dec("8"),
        daily_overtime_cap_hours: dec("4"),
        overtime_multiplier: dec("1.25"),
        night_differential_rate: dec("0.10"),
        night_window: NightWindow {
            start: time(22, 0),
            end: time(6, 0),
        },
        period: PeriodPolicy::default(),
    }
}

/// Independence Day (regular) and Ninoy Aquino Day (special non-working).
pub fn create_test_holidays() -> HolidayCalendar {
    HolidayCalendar {
        premiums: HolidayPremiums {
            regular: dec("1.00"),
            special_non_working: dec("0.30"),
        },
        holidays: vec![
            Holiday {
                date: date(2024, 6, 12),
                name: "Independence Day".to_string(),
                kind: HolidayKind::Regular,
            },
            Holiday {
                date: date(2024, 8, 21),
                name: "Ninoy Aquino Day".to_string(),
                kind: HolidayKind::SpecialNonWorking,
            },
        ],
    }
}

pub fn create_test_contributions() -> ContributionConfig {
    let mut brackets = vec![SssBracket {
        lower_bound: Decimal::ZERO,
        contribution: dec("135.00"),
    }];
    let mut lower = dec("3250");
    let mut contribution = dec("157.50");
    while lower <= dec("24750") {
        brackets.push(SssBracket {
            lower_bound: lower,
            contribution,
        });
        lower += dec("500");
        contribution += dec("22.50");
    }

    ContributionConfig {
        sss: SssTable { brackets },
        philhealth: PhilHealthRule {
            rate: dec("0.03"),
            floor: dec("300"),
            ceiling: dec("1800"),
            employee_share: dec("0.5"),
        },
        pagibig: PagIbigRule {
            tiers: vec![
                PagIbigTier {
                    lower_bound: Decimal::ZERO,
                    rate: dec("0.01"),
                },
                PagIbigTier {
                    lower_bound: dec("1500.01"),
                    rate: dec("0.02"),
                },
            ],
            cap: dec("100.00"),
        },
    }
}

pub fn create_test_schedule() -> WithholdingSchedule {
    let bracket = |lower: &str, base: &str, rate: &str| TaxBracket {
        lower_bound: dec(lower),
        base_tax: dec(base),
        marginal_rate: dec(rate),
    };
    WithholdingSchedule {
        effective_date: date(2023, 1, 1),
        brackets: vec![
            bracket("0", "0", "0"),
            bracket("20833", "0", "0.20"),
            bracket("33333", "2500", "0.25"),
            bracket("66667", "10833", "0.30"),
            bracket("166667", "40833.33", "0.32"),
            bracket("666667", "200833.33", "0.35"),
        ],
    }
}

pub fn create_test_config() -> PayrollConfig {
    PayrollConfig::new(
        create_test_policy(),
        create_test_holidays(),
        create_test_contributions(),
        vec![create_test_schedule()],
    )
}

pub fn create_test_employee(id: &str, shift_start: NaiveTime, night_shift: bool) -> Employee {
    Employee {
        id: id.to_string(),
        last_name: "Garcia".to_string(),
        first_name: "Manuel III".to_string(),
        birthday: None,
        position: None,
        status: None,
        hourly_rate: None,
        shift_start,
        night_shift,
    }
}

pub fn punch(id: &str, on: NaiveDate, time_in: NaiveTime, time_out: NaiveTime) -> AttendancePunch {
    AttendancePunch {
        employee_id: id.to_string(),
        date: on,
        time_in,
        time_out,
    }
}
