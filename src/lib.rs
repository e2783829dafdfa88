//! Payroll Computation Engine for attendance-based Philippine wages
//!
//! This crate computes weekly gross and net pay from employee attendance:
//! worked hours per week of a month, overtime, holiday premiums and night
//! differential, statutory contributions (SSS, PhilHealth, Pag-IBIG),
//! late penalties and progressive withholding tax.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
