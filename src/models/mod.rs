//! Core data models for the HR engine.
//!
//! This module contains the domain models shared by the payroll engine,
//! the permission resolver and the HTTP layer.

mod audit;
mod payroll_record;
mod principal;

pub use audit::AuditStep;
pub use payroll_record::{PayrollRecord, PayrollStatus};
pub use principal::{Action, Principal};
