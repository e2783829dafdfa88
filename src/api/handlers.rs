//! HTTP request handlers for the Payroll Computation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{PayrollEngine, validate_employee_id};
use crate::data::EmployeeDirectory;
use crate::error::EngineError;

use super::request::PayrollRequest;
use super::response::{
    ApiError, ApiErrorResponse, EmployeeSummary, GrossWageResponse, PayrollResponse,
    ReloadResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", get(list_employees_handler))
        .route("/employees/:id", get(get_employee_handler))
        .route("/payroll/gross", post(gross_handler))
        .route("/payroll/net", post(net_handler))
        .route("/admin/reload", post(reload_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Unwraps a JSON body, mapping rejections to a 400 response.
fn parse_payload<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    match payload {
        Ok(Json(req)) => Ok(req),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(json_response(StatusCode::BAD_REQUEST, error))
        }
    }
}

/// Handler for GET /employees.
async fn list_employees_handler(State(state): State<AppState>) -> Response {
    let snapshot = state.snapshot().await;
    let employees: Vec<EmployeeSummary> = snapshot
        .employees()
        .iter()
        .map(EmployeeSummary::from)
        .collect();
    json_response(StatusCode::OK, employees)
}

/// Handler for GET /employees/:id.
async fn get_employee_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();

    if let Err(err) = validate_employee_id(&id) {
        return error_response(correlation_id, err);
    }

    let snapshot = state.snapshot().await;
    match snapshot.find_by_id(&id) {
        Some(employee) => json_response(StatusCode::OK, employee),
        None => error_response(correlation_id, EngineError::EmployeeNotFound { id }),
    }
}

/// Handler for POST /payroll/gross.
///
/// Computes gross pay for the requested employee and week.
async fn gross_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing gross wage request");

    let request = match parse_payload(correlation_id, payload) {
        Ok(req) => req,
        Err(response) => return response,
    };
    let period = match request.pay_period() {
        Ok(period) => period,
        Err(err) => return error_response(correlation_id, err),
    };

    let snapshot = state.snapshot().await;
    let engine = PayrollEngine::new(state.config().config(), snapshot.as_ref(), snapshot.as_ref());

    match engine.gross_wage(&request.employee_id, &period) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %result.employee_id,
                total_gross = %result.gross.total_gross,
                "Gross wage request completed"
            );
            json_response(StatusCode::OK, GrossWageResponse::from(&result))
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /payroll/net.
///
/// Computes the full payroll breakdown for the requested employee and week.
async fn net_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match parse_payload(correlation_id, payload) {
        Ok(req) => req,
        Err(response) => return response,
    };
    let period = match request.pay_period() {
        Ok(period) => period,
        Err(err) => return error_response(correlation_id, err),
    };

    let snapshot = state.snapshot().await;
    let engine = PayrollEngine::new(state.config().config(), snapshot.as_ref(), snapshot.as_ref());

    match engine.net_wage(&request.employee_id, &period) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %result.employee_id,
                net_wage = %result.net.net_wage,
                "Payroll request completed"
            );
            json_response(StatusCode::OK, PayrollResponse::from(&result))
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /admin/reload.
async fn reload_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.reload().await {
        Ok(snapshot) => {
            let body = ReloadResponse {
                employees: snapshot.employees().len(),
                punches: snapshot.punch_count(),
            };
            info!(
                correlation_id = %correlation_id,
                employees = body.employees,
                punches = body.punches,
                "Reload completed"
            );
            json_response(StatusCode::OK, body)
        }
        Err(err) => error_response(correlation_id, err),
    }
}
