//! HTTP API module for the HR engine.
//!
//! This module exposes payroll computation, permission lookups, role
//! administration and salary import sanitizing as REST endpoints. Every
//! handler checks the caller's permissions before doing any work.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{USER_NAME_HEADER, USER_ROLE_HEADER, create_router};
pub use request::{PayrollRequest, SalaryImportRequest};
pub use response::{
    ApiError, ComputationMethod, PayrollComputation, PermissionSummary, RoleDeleted,
    SalaryImportResponse,
};
pub use state::AppState;
