//! Configuration loading and management for the Payroll Computation Engine.
//!
//! This module provides functionality to load payroll configuration from YAML
//! files, including pay policy constants, the holiday calendar, statutory
//! contribution tables, and effective-dated withholding tax schedules.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ph").unwrap();
//! println!("Overtime multiplier: {}", config.policy().overtime_multiplier);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ContributionConfig, Holiday, HolidayCalendar, HolidayKind, HolidayPremiums, NightWindow,
    PagIbigRule, PagIbigTier, PayPolicy, PayrollConfig, PeriodPolicy, PhilHealthRule, SssBracket,
    SssTable, TaxBracket, WithholdingSchedule,
};
