//! Response types for the HR engine API.
//!
//! This module defines the success payloads, the error response structures
//! and the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{AuditStep, PayrollRecord};

/// Which payroll path produced a computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputationMethod {
    /// Full attendance-based computation, used at record creation.
    Attendance,
    /// Simplified hours-based computation, used when editing.
    Hours,
}

/// Response body for the payroll endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollComputation {
    /// Unique identifier for this computation.
    pub calculation_id: Uuid,
    /// When the computation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// The computation path used.
    pub method: ComputationMethod,
    /// Currency the amounts are paid in.
    pub currency: String,
    /// The record with its derived fields filled in.
    pub record: PayrollRecord,
    /// One step per derived value.
    pub audit_steps: Vec<AuditStep>,
    /// Time spent computing, in microseconds.
    pub duration_us: u64,
}

/// Response body for `GET /permissions/{module}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSummary {
    /// The module queried.
    pub module: String,
    /// May view records.
    pub view: bool,
    /// May create records.
    pub add: bool,
    /// May modify records.
    pub edit: bool,
    /// May remove records.
    pub delete: bool,
    /// Visible field-groups in definition order.
    pub fields: Vec<String>,
}

/// Response body for `DELETE /roles/{key}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDeleted {
    /// The deleted role key.
    pub key: String,
    /// The deleted role's display name.
    pub name: String,
}

/// Response body for `POST /import/salaries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryImportResponse {
    /// Sanitized salaries in input order.
    pub salaries: Vec<Decimal>,
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

impl ApiErrorResponse {
    fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
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
            EngineError::ConfigNotFound { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("CONFIG_ERROR", "Configuration error"),
            ),
            EngineError::ConfigParseError { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("CONFIG_ERROR", "Configuration parse error"),
            ),
            EngineError::PersistenceError { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details(
                    "PERSISTENCE_ERROR",
                    "Role document could not be saved",
                    message,
                ),
            ),
            EngineError::ConfigIntegrity { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "UNKNOWN_FIELD_GROUP",
                    message,
                    "Field-groups must be defined by the module they are granted on",
                ),
            ),
            EngineError::UnknownModule { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("UNKNOWN_MODULE", message),
            ),
            EngineError::InvalidPayroll { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_PAYROLL",
                    message,
                    "The payroll record contains invalid information",
                ),
            ),
            EngineError::MissingRoleField { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("MISSING_FIELD", message),
            ),
            EngineError::DuplicateRole { .. } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                ApiError::new("DUPLICATE_ROLE", message),
            ),
            EngineError::ProtectedRole { .. } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                ApiError::new("PROTECTED_ROLE", message),
            ),
            EngineError::RoleInUse { .. } => ApiErrorResponse::new(
                StatusCode::CONFLICT,
                ApiError::new("ROLE_IN_USE", message),
            ),
            EngineError::RoleNotFound { .. } => ApiErrorResponse::new(
                StatusCode::NOT_FOUND,
                ApiError::new("ROLE_NOT_FOUND", message),
            ),
            EngineError::Unauthenticated => ApiErrorResponse::new(
                StatusCode::UNAUTHORIZED,
                ApiError::new("UNAUTHENTICATED", message),
            ),
            EngineError::Forbidden { .. } | EngineError::RoleRequired { .. } => {
                ApiErrorResponse::new(StatusCode::FORBIDDEN, ApiError::new("FORBIDDEN", message))
            }
        }
    }
}
