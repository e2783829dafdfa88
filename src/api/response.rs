//! Response types for the Payroll Computation Engine API.
//!
//! This module defines the JSON bodies returned by the endpoints, which
//! present monetary values and hours rounded to two decimals, and the error
//! response structures mapped from [`EngineError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{
    Employee, GrossWageCalculation, GrossWageResult, HoursBreakdown, NetWageResult,
    PayrollCalculation, ResolvedPeriod,
};

/// Rounds a presented amount to two decimals, halves away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// One entry of the `/employees` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// Employee number.
    pub id: String,
    /// Family name.
    pub last_name: String,
    /// Given name.
    pub first_name: String,
}

impl From<&Employee> for EmployeeSummary {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            last_name: employee.last_name.clone(),
            first_name: employee.first_name.clone(),
        }
    }
}

/// The period a calculation covered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodView {
    /// Calendar year.
    pub year: i32,
    /// Month of the year.
    pub month: u32,
    /// Week of the month.
    pub week: u32,
    /// First covered date.
    pub start_date: Option<NaiveDate>,
    /// Last covered date.
    pub end_date: Option<NaiveDate>,
}

impl From<&ResolvedPeriod> for PeriodView {
    fn from(resolved: &ResolvedPeriod) -> Self {
        Self {
            year: resolved.period.year,
            month: resolved.period.month,
            week: resolved.period.week,
            start_date: resolved.start_date(),
            end_date: resolved.end_date(),
        }
    }
}

/// Period hour totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursView {
    /// Days with an attendance punch.
    pub days_present: usize,
    /// Regular hours.
    pub regular_hours: Decimal,
    /// Overtime hours.
    pub overtime_hours: Decimal,
    /// Night hours.
    pub night_hours: Decimal,
    /// Holiday hours.
    pub holiday_hours: Decimal,
    /// Late minutes.
    pub late_minutes: Decimal,
}

impl From<&HoursBreakdown> for HoursView {
    fn from(hours: &HoursBreakdown) -> Self {
        Self {
            days_present: hours.days_present(),
            regular_hours: round2(hours.regular_hours),
            overtime_hours: round2(hours.overtime_hours),
            night_hours: round2(hours.night_hours),
            holiday_hours: round2(hours.holiday_hours),
            late_minutes: round2(hours.total_late_minutes),
        }
    }
}

fn rounded_gross(gross: &GrossWageResult) -> GrossWageResult {
    GrossWageResult {
        hourly_rate: round2(gross.hourly_rate),
        regular_pay: round2(gross.regular_pay),
        overtime_pay: round2(gross.overtime_pay),
        holiday_pay: round2(gross.holiday_pay),
        night_differential_pay: round2(gross.night_differential_pay),
        total_gross: round2(gross.total_gross),
    }
}

fn rounded_net(net: &NetWageResult) -> NetWageResult {
    NetWageResult {
        sss_deduction: round2(net.sss_deduction),
        philhealth_deduction: round2(net.philhealth_deduction),
        pagibig_deduction: round2(net.pagibig_deduction),
        late_deduction: round2(net.late_deduction),
        total_deductions: round2(net.total_deductions),
        withholding_tax: round2(net.withholding_tax),
        net_wage: round2(net.net_wage),
    }
}

/// Response body for `POST /payroll/gross`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossWageResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The engine version.
    pub engine_version: String,
    /// Employee number.
    pub employee_id: String,
    /// "Last, First" name.
    pub employee_name: String,
    /// The covered period.
    pub period: PeriodView,
    /// Hour totals.
    pub hours: HoursView,
    /// Gross pay components.
    pub gross: GrossWageResult,
}

impl From<&GrossWageCalculation> for GrossWageResponse {
    fn from(calc: &GrossWageCalculation) -> Self {
        Self {
            calculation_id: calc.calculation_id,
            timestamp: calc.timestamp,
            engine_version: calc.engine_version.clone(),
            employee_id: calc.employee_id.clone(),
            employee_name: calc.employee_name.clone(),
            period: PeriodView::from(&calc.period),
            hours: HoursView::from(&calc.hours),
            gross: rounded_gross(&calc.gross),
        }
    }
}

/// Response body for `POST /payroll/net`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The engine version.
    pub engine_version: String,
    /// Employee number.
    pub employee_id: String,
    /// "Last, First" name.
    pub employee_name: String,
    /// The covered period.
    pub period: PeriodView,
    /// Hour totals.
    pub hours: HoursView,
    /// Gross pay components.
    pub gross: GrossWageResult,
    /// Deductions, tax and net pay.
    pub net: NetWageResult,
}

impl From<&PayrollCalculation> for PayrollResponse {
    fn from(calc: &PayrollCalculation) -> Self {
        Self {
            calculation_id: calc.calculation_id,
            timestamp: calc.timestamp,
            engine_version: calc.engine_version.clone(),
            employee_id: calc.employee_id.clone(),
            employee_name: calc.employee_name.clone(),
            period: PeriodView::from(&calc.period),
            hours: HoursView::from(&calc.hours),
            gross: rounded_gross(&calc.gross),
            net: rounded_net(&calc.net),
        }
    }
}

/// Response body for `POST /admin/reload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReloadResponse {
    /// Employees in the new snapshot.
    pub employees: usize,
    /// Attendance punches in the new snapshot.
    pub punches: usize,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidPeriod { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_PERIOD", message),
            },
            EngineError::EmployeeNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "EMPLOYEE_NOT_FOUND",
                    message,
                    format!("No employee record or attendance exists for '{}'", id),
                ),
            },
            EngineError::InvalidAmount { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_AMOUNT",
                    message,
                    format!("'{}' must not be negative", field),
                ),
            },
            EngineError::InvalidArgument { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(message),
            },
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::DataNotFound { .. } | EngineError::DataParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("DATA_ERROR", "Data source error", message),
                }
            }
        }
    }
}
