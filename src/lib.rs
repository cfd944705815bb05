//! Payroll and permission engine for HR administration.
//!
//! This crate computes monthly payroll records from attendance and salary
//! inputs, and resolves what each role may view, add, edit or delete in
//! every application module, down to the field-groups it may see.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod payroll;
pub mod permissions;
