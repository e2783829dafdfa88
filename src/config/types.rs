//! Configuration types for payroll computation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files: pay policy constants,
//! the holiday calendar, statutory contribution tables, and withholding
//! tax schedules.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A daily time window, which may wrap past midnight (e.g. 22:00 to 06:00).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightWindow {
    /// Start of the window (inclusive).
    pub start: NaiveTime,
    /// End of the window (exclusive).
    pub end: NaiveTime,
}

impl NightWindow {
    /// Returns true when the window crosses midnight.
    pub fn wraps_midnight(&self) -> bool {
        self.end <= self.start
    }
}

/// How weeks of a month map onto calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPolicy {
    /// When true, week 4 runs to the last day of the month; when false it
    /// stops at day 28 and days 29-31 belong to no week. Defaults to true.
    #[serde(default = "absorb_trailing_days")]
    pub fourth_week_absorbs_trailing_days: bool,
}

fn absorb_trailing_days() -> bool {
    true
}

impl Default for PeriodPolicy {
    fn default() -> Self {
        Self {
            fourth_week_absorbs_trailing_days: absorb_trailing_days(),
        }
    }
}

/// Pay policy constants from policy.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayPolicy {
    /// Hourly rate used when an employee carries no rate of their own.
    pub default_hourly_rate: Decimal,
    /// Length of a standard shift in hours; time beyond it is overtime.
    pub standard_shift_hours: Decimal,
    /// Maximum overtime hours credited per day.
    pub daily_overtime_cap_hours: Decimal,
    /// Overtime multiplier applied to the hourly rate (e.g. 1.25).
    pub overtime_multiplier: Decimal,
    /// Additional fraction of the hourly rate paid for night hours (e.g. 0.10).
    pub night_differential_rate: Decimal,
    /// The window in which worked time counts as night hours.
    pub night_window: NightWindow,
    /// Week-of-month resolution policy.
    #[serde(default)]
    pub period: PeriodPolicy,
}

impl PayPolicy {
    /// Standard shift length in minutes.
    pub fn standard_shift_minutes(&self) -> Decimal {
        self.standard_shift_hours * Decimal::from(60)
    }

    /// Daily overtime cap in minutes.
    pub fn daily_overtime_cap_minutes(&self) -> Decimal {
        self.daily_overtime_cap_hours * Decimal::from(60)
    }
}

/// The kind of a holiday, which determines its premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayKind {
    /// A regular holiday.
    Regular,
    /// A special non-working day.
    SpecialNonWorking,
}

/// A single holiday on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday (e.g., "Independence Day").
    pub name: String,
    /// The kind of holiday.
    pub kind: HolidayKind,
}

/// Premium multipliers paid on top of regular pay for hours worked on holidays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayPremiums {
    /// Premium for regular holidays (1.00 doubles the day's pay).
    pub regular: Decimal,
    /// Premium for special non-working days.
    pub special_non_working: Decimal,
}

/// The holiday calendar from holidays.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    /// Premiums by holiday kind.
    pub premiums: HolidayPremiums,
    /// All configured holidays.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

impl HolidayCalendar {
    /// Returns the holiday falling on `date`, if any.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::{Holiday, HolidayCalendar, HolidayKind, HolidayPremiums};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let calendar = HolidayCalendar {
    ///     premiums: HolidayPremiums {
    ///         regular: Decimal::ONE,
    ///         special_non_working: Decimal::new(30, 2),
    ///     },
    ///     holidays: vec![Holiday {
    ///         date: NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
    ///         name: "Independence Day".to_string(),
    ///         kind: HolidayKind::Regular,
    ///     }],
    /// };
    ///
    /// assert!(calendar.holiday_on(NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()).is_some());
    /// assert!(calendar.holiday_on(NaiveDate::from_ymd_opt(2024, 6, 13).unwrap()).is_none());
    /// ```
    pub fn holiday_on(&self, date: NaiveDate) -> Option<&Holiday> {
        self.holidays.iter().find(|h| h.date == date)
    }

    /// Returns the premium multiplier for a holiday kind.
    pub fn premium_for(&self, kind: HolidayKind) -> Decimal {
        match kind {
            HolidayKind::Regular => self.premiums.regular,
            HolidayKind::SpecialNonWorking => self.premiums.special_non_working,
        }
    }

    /// Returns the premium that applies on `date`, or zero for ordinary days.
    pub fn premium_on(&self, date: NaiveDate) -> Decimal {
        self.holiday_on(date)
            .map(|h| self.premium_for(h.kind))
            .unwrap_or(Decimal::ZERO)
    }
}

/// One row of the social-insurance (SSS) contribution table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SssBracket {
    /// Lowest gross pay (inclusive) this bracket applies to.
    pub lower_bound: Decimal,
    /// Fixed employee contribution for this bracket.
    pub contribution: Decimal,
}

/// The SSS contribution table, ordered by lower bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SssTable {
    /// Brackets ordered by ascending lower bound.
    pub brackets: Vec<SssBracket>,
}

impl SssTable {
    /// Checks that the table starts at zero, ascends strictly, and never
    /// lowers the contribution as income rises.
    pub fn validate(&self) -> EngineResult<()> {
        let first = self.brackets.first().ok_or_else(|| EngineError::InvalidConfig {
            message: "SSS table has no brackets".to_string(),
        })?;
        if !first.lower_bound.is_zero() {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "SSS table must start at 0, starts at {}",
                    first.lower_bound
                ),
            });
        }
        for pair in self.brackets.windows(2) {
            if pair[1].lower_bound <= pair[0].lower_bound {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "SSS bracket {} is not above {}",
                        pair[1].lower_bound, pair[0].lower_bound
                    ),
                });
            }
            if pair[1].contribution < pair[0].contribution {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "SSS contribution decreases at bracket {}",
                        pair[1].lower_bound
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Health-insurance (PhilHealth) premium rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhilHealthRule {
    /// Premium rate applied to gross pay.
    pub rate: Decimal,
    /// Minimum total premium.
    pub floor: Decimal,
    /// Maximum total premium.
    pub ceiling: Decimal,
    /// Fraction of the premium paid by the employee.
    pub employee_share: Decimal,
}

/// One tier of the housing-fund (Pag-IBIG) rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagIbigTier {
    /// Lowest gross pay (inclusive) this tier applies to.
    pub lower_bound: Decimal,
    /// Contribution rate for this tier.
    pub rate: Decimal,
}

/// Housing-fund (Pag-IBIG) contribution rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagIbigRule {
    /// Rate tiers ordered by ascending lower bound.
    pub tiers: Vec<PagIbigTier>,
    /// Maximum employee contribution.
    pub cap: Decimal,
}

/// Statutory contribution configuration from contributions.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionConfig {
    /// Social-insurance table.
    pub sss: SssTable,
    /// Health-insurance rule.
    pub philhealth: PhilHealthRule,
    /// Housing-fund rule.
    pub pagibig: PagIbigRule,
}

impl ContributionConfig {
    /// Validates every contribution table.
    pub fn validate(&self) -> EngineResult<()> {
        self.sss.validate()?;

        let ph = &self.philhealth;
        if ph.floor > ph.ceiling {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "PhilHealth floor {} exceeds ceiling {}",
                    ph.floor, ph.ceiling
                ),
            });
        }
        if ph.employee_share < Decimal::ZERO || ph.employee_share > Decimal::ONE {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "PhilHealth employee share {} must be between 0 and 1",
                    ph.employee_share
                ),
            });
        }

        let tiers = &self.pagibig.tiers;
        if tiers.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "Pag-IBIG rule has no tiers".to_string(),
            });
        }
        if tiers.windows(2).any(|t| t[1].lower_bound <= t[0].lower_bound) {
            return Err(EngineError::InvalidConfig {
                message: "Pag-IBIG tiers must ascend by lower bound".to_string(),
            });
        }
        Ok(())
    }
}

/// One bracket of a progressive withholding tax schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lowest taxable income (inclusive) this bracket applies to.
    pub lower_bound: Decimal,
    /// Tax owed at exactly the lower bound.
    pub base_tax: Decimal,
    /// Rate applied to income above the lower bound.
    pub marginal_rate: Decimal,
}

/// A withholding tax schedule effective from a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingSchedule {
    /// The first date this schedule applies to.
    pub effective_date: NaiveDate,
    /// Brackets ordered by ascending lower bound.
    pub brackets: Vec<TaxBracket>,
}

impl WithholdingSchedule {
    /// Checks that brackets start at zero, ascend strictly, and carry rates
    /// between 0 and 1.
    pub fn validate(&self) -> EngineResult<()> {
        let first = self.brackets.first().ok_or_else(|| EngineError::InvalidConfig {
            message: format!(
                "Withholding schedule {} has no brackets",
                self.effective_date
            ),
        })?;
        if !first.lower_bound.is_zero() {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "Withholding schedule {} must start at 0",
                    self.effective_date
                ),
            });
        }
        if self
            .brackets
            .windows(2)
            .any(|b| b[1].lower_bound <= b[0].lower_bound)
        {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "Withholding schedule {} brackets must ascend",
                    self.effective_date
                ),
            });
        }
        if let Some(bad) = self
            .brackets
            .iter()
            .find(|b| b.marginal_rate < Decimal::ZERO || b.marginal_rate > Decimal::ONE)
        {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "Marginal rate {} at bracket {} is out of range",
                    bad.marginal_rate, bad.lower_bound
                ),
            });
        }
        Ok(())
    }
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    policy: PayPolicy,
    holidays: HolidayCalendar,
    contributions: ContributionConfig,
    /// Withholding schedules by effective date (sorted oldest first).
    tax_schedules: Vec<WithholdingSchedule>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        policy: PayPolicy,
        holidays: HolidayCalendar,
        contributions: ContributionConfig,
        tax_schedules: Vec<WithholdingSchedule>,
    ) -> Self {
        let mut sorted_schedules = tax_schedules;
        sorted_schedules.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            policy,
            holidays,
            contributions,
            tax_schedules: sorted_schedules,
        }
    }

    /// Returns the pay policy constants.
    pub fn policy(&self) -> &PayPolicy {
        &self.policy
    }

    /// Returns the holiday calendar.
    pub fn holidays(&self) -> &HolidayCalendar {
        &self.holidays
    }

    /// Returns the statutory contribution tables.
    pub fn contributions(&self) -> &ContributionConfig {
        &self.contributions
    }

    /// Returns all withholding schedules, oldest first.
    pub fn tax_schedules(&self) -> &[WithholdingSchedule] {
        &self.tax_schedules
    }

    /// Returns the withholding schedule in effect on `date`.
    pub fn withholding_schedule_for(&self, date: NaiveDate) -> EngineResult<&WithholdingSchedule> {
        self.tax_schedules
            .iter()
            .rfind(|s| s.effective_date <= date)
            .ok_or_else(|| EngineError::InvalidConfig {
                message: format!("No withholding schedule effective on {}", date),
            })
    }
}
