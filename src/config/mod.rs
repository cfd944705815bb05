//! Configuration loading and management for the HR engine.
//!
//! This module provides functionality to load the module catalogue, the role
//! table and payroll settings from YAML files, or from the defaults compiled
//! into the crate.
//!
//! # Example
//!
//! ```
//! use hr_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::builtin().unwrap();
//! assert!(config.permissions().role("admin").is_some());
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, ROLE_DOCUMENT_FILE};
pub use types::{HrConfig, ModulesConfig, PayrollSettings, RolesConfig};
