//! HTTP request handlers for the HR engine API.
//!
//! This module contains the handler functions for all API endpoints. The
//! caller's identity arrives in headers set by the upstream authentication
//! layer; each handler checks it against the role registry before acting.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::PayrollSettings;
use crate::error::EngineError;
use crate::models::{Action, AuditStep, PayrollRecord, Principal};
use crate::payroll::{
    compute_from_attendance, compute_from_hours, sanitize_salary, validate_inputs,
};
use crate::permissions::{NewRole, require_any_role};

use super::request::{PayrollRequest, SalaryImportRequest};
use super::response::{
    ApiError, ApiErrorResponse, ComputationMethod, PayrollComputation, PermissionSummary,
    RoleDeleted, SalaryImportResponse,
};
use super::state::AppState;

/// Header carrying the caller's role key.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Header carrying the caller's username.
pub const USER_NAME_HEADER: &str = "x-user-name";

const PAYROLL_MODULE: &str = "payroll";
const EMPLOYEES_MODULE: &str = "employees";
const ROLE_ADMINISTRATORS: [&str; 1] = ["admin"];

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/compute", post(compute_payroll_handler))
        .route("/payroll/recompute", post(recompute_payroll_handler))
        .route("/permissions/:module", get(permissions_handler))
        .route("/roles", post(add_role_handler))
        .route("/roles/:key", delete(delete_role_handler))
        .route("/import/salaries", post(import_salaries_handler))
        .with_state(state)
}

/// Reads the caller's identity from the request headers.
///
/// A missing or blank role header yields an anonymous principal. The
/// username falls back to the role key when not supplied.
fn principal_from_headers(headers: &HeaderMap) -> Principal {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    match header_value(USER_ROLE_HEADER) {
        Some(role) => {
            let username = header_value(USER_NAME_HEADER).unwrap_or(role);
            Principal::authenticated(username, role)
        }
        None => Principal::Anonymous,
    }
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
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    ApiErrorResponse::from(err).into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
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
    json_response(StatusCode::BAD_REQUEST, error)
}

fn computation(
    method: ComputationMethod,
    settings: &PayrollSettings,
    record: PayrollRecord,
    audit_steps: Vec<AuditStep>,
    start_time: Instant,
) -> PayrollComputation {
    PayrollComputation {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        method,
        currency: settings.currency.clone(),
        record,
        audit_steps,
        duration_us: start_time.elapsed().as_micros() as u64,
    }
}

/// Handler for POST /payroll/compute.
///
/// Builds a draft record from the submitted inputs, validates it and runs
/// the attendance-based computation.
async fn compute_payroll_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll computation request");

    let principal = principal_from_headers(&headers);
    if let Err(err) = state
        .registry()
        .require(&principal, PAYROLL_MODULE, Action::Add)
    {
        return error_response(correlation_id, err);
    }

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let mut record = request.into_record(state.settings());
    if let Err(err) = validate_inputs(&record) {
        return error_response(correlation_id, err);
    }

    let start_time = Instant::now();
    let settings = state.settings();
    let audit_steps = compute_from_attendance(&mut record, &settings.currency_symbol);
    let result = computation(
        ComputationMethod::Attendance,
        settings,
        record,
        audit_steps,
        start_time,
    );

    info!(
        correlation_id = %correlation_id,
        employee_id = %result.record.employee_id,
        net_salary = %result.record.net_salary,
        duration_us = result.duration_us,
        "Payroll computed"
    );
    json_response(StatusCode::OK, result)
}

/// Handler for POST /payroll/recompute.
///
/// Accepts an existing record, validates its inputs and refreshes its gross
/// and net salary with the hours-based computation.
async fn recompute_payroll_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PayrollRecord>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll recomputation request");

    let principal = principal_from_headers(&headers);
    if let Err(err) = state
        .registry()
        .require(&principal, PAYROLL_MODULE, Action::Edit)
    {
        return error_response(correlation_id, err);
    }

    let mut record = match payload {
        Ok(Json(record)) => record,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = validate_inputs(&record) {
        return error_response(correlation_id, err);
    }

    let start_time = Instant::now();
    let settings = state.settings();
    let audit_steps = compute_from_hours(&mut record, &settings.currency_symbol);
    let result = computation(
        ComputationMethod::Hours,
        settings,
        record,
        audit_steps,
        start_time,
    );

    info!(
        correlation_id = %correlation_id,
        employee_id = %result.record.employee_id,
        net_salary = %result.record.net_salary,
        "Payroll recomputed"
    );
    json_response(StatusCode::OK, result)
}

/// Handler for GET /permissions/:module.
///
/// Reports what the caller may do in a module. Anonymous callers and
/// unknown modules get an all-denied summary rather than an error.
async fn permissions_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(module): Path<String>,
) -> Response {
    let principal = principal_from_headers(&headers);
    let registry = state.registry();

    let summary = PermissionSummary {
        view: registry.can_view(&principal, &module),
        add: registry.can_add(&principal, &module),
        edit: registry.can_edit(&principal, &module),
        delete: registry.can_delete(&principal, &module),
        fields: registry.accessible_fields(&principal, &module),
        module,
    };
    json_response(StatusCode::OK, summary)
}

/// Handler for POST /roles.
async fn add_role_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<NewRole>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing role creation request");

    let principal = principal_from_headers(&headers);
    if let Err(err) = require_any_role(&principal, &ROLE_ADMINISTRATORS) {
        return error_response(correlation_id, err);
    }

    let new_role = match payload {
        Ok(Json(role)) => role,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let key = new_role.key.trim().to_string();
    match state.registry().add_role(new_role) {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                user = principal.username().unwrap_or_default(),
                role = %key,
                "Role created"
            );
            let snapshot = state.registry().snapshot();
            match snapshot.role(&key) {
                Some(role) => json_response(StatusCode::CREATED, role),
                None => error_response(correlation_id, EngineError::RoleNotFound { key }),
            }
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for DELETE /roles/:key.
async fn delete_role_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(key): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, role = %key, "Processing role deletion request");

    let principal = principal_from_headers(&headers);
    if let Err(err) = require_any_role(&principal, &ROLE_ADMINISTRATORS) {
        return error_response(correlation_id, err);
    }

    match state.registry().delete_role(&key, state.users()) {
        Ok(removed) => {
            info!(
                correlation_id = %correlation_id,
                user = principal.username().unwrap_or_default(),
                role = %key,
                "Role deleted"
            );
            json_response(
                StatusCode::OK,
                RoleDeleted {
                    key,
                    name: removed.name,
                },
            )
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /import/salaries.
///
/// Maps every raw spreadsheet cell to a usable salary. Bad cells never fail
/// the batch.
async fn import_salaries_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SalaryImportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing salary import request");

    let principal = principal_from_headers(&headers);
    if let Err(err) = state
        .registry()
        .require(&principal, EMPLOYEES_MODULE, Action::Add)
    {
        return error_response(correlation_id, err);
    }

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let salaries: Vec<_> = request
        .cells()
        .iter()
        .map(|cell| sanitize_salary(cell.as_deref()))
        .collect();

    info!(
        correlation_id = %correlation_id,
        rows = salaries.len(),
        "Salaries sanitized"
    );
    json_response(StatusCode::OK, SalaryImportResponse { salaries })
}
