//! Payroll engine.
//!
//! This module derives the monetary fields of a [`PayrollRecord`](crate::models::PayrollRecord)
//! from its inputs. Two computation paths exist and are kept separate on
//! purpose: record creation uses the attendance-based path, record editing
//! uses the simplified hours-based path. The module also provides the input
//! validation callers run before computing, and the salary sanitizer used by
//! bulk imports.

mod attendance;
mod hours;
mod sanitize;
mod validation;

pub use attendance::{SALARY_DAYS_PER_MONTH, compute_from_attendance};
pub use hours::compute_from_hours;
pub use sanitize::{
    CLAMPED_IMPORTED_SALARY, DEFAULT_IMPORTED_SALARY, MAX_PLAUSIBLE_SALARY, sanitize_salary,
};
pub use validation::{MAX_PAYROLL_AMOUNT, MAX_PERIOD_DAYS, validate_inputs};
