//! HTTP API module for the Payroll Computation Engine.
//!
//! This module provides REST endpoints for browsing employees and
//! computing gross and net pay for a week of a month.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::PayrollRequest;
pub use response::{
    ApiError, ApiErrorResponse, EmployeeSummary, GrossWageResponse, HoursView, PayrollResponse,
    PeriodView, ReloadResponse, round2,
};
pub use state::AppState;
