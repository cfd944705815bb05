//! Error types for the HR engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for configuration loading, payroll input validation, role administration
//! and authorization checks.

use thiserror::Error;

/// The main error type for the HR engine.
///
/// Payroll computation and permission queries never fail; this type covers
/// the operations around them: loading configuration, validating caller
/// input, mutating the role table and enforcing authorization.
///
/// # Example
///
/// ```
/// use hr_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/roles.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/roles.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A role grant references a field-group its module does not define.
    #[error(
        "Role '{role}' references field-group '{field_group}' which is not defined for module '{module}'"
    )]
    ConfigIntegrity {
        /// The role holding the dangling reference.
        role: String,
        /// The module the grant is scoped to.
        module: String,
        /// The field-group that does not exist.
        field_group: String,
    },

    /// A module key is not part of the module catalogue.
    #[error("Unknown module: {module}")]
    UnknownModule {
        /// The module key that was not found.
        module: String,
    },

    /// A payroll record failed caller-side validation.
    #[error("Invalid payroll field '{field}': {message}")]
    InvalidPayroll {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A required role attribute was blank or missing.
    #[error("Please fill in all required fields: '{field}' is missing")]
    MissingRoleField {
        /// The attribute that was missing.
        field: String,
    },

    /// A role with the same key already exists.
    #[error("Role '{key}' already exists")]
    DuplicateRole {
        /// The duplicated role key.
        key: String,
    },

    /// The role is one of the built-in roles and cannot be deleted.
    #[error("Role '{key}' is a built-in system role and cannot be deleted")]
    ProtectedRole {
        /// The protected role key.
        key: String,
    },

    /// The role is still assigned to at least one user.
    #[error("Role '{key}' cannot be deleted because {user_count} user(s) are assigned to it")]
    RoleInUse {
        /// The role key.
        key: String,
        /// How many users currently reference the role.
        user_count: u64,
    },

    /// The role does not exist.
    #[error("Role not found: {key}")]
    RoleNotFound {
        /// The role key that was not found.
        key: String,
    },

    /// The caller is not authenticated.
    #[error("Authentication required")]
    Unauthenticated,

    /// The caller's role does not grant the requested action.
    #[error("Role '{role}' is not allowed to {action} in module '{module}'")]
    Forbidden {
        /// The caller's role.
        role: String,
        /// The module the action targets.
        module: String,
        /// The attempted action.
        action: String,
    },

    /// The operation is restricted to a fixed set of roles.
    #[error("Role '{role}' is not permitted here; requires one of: {allowed}")]
    RoleRequired {
        /// The caller's role.
        role: String,
        /// Comma-separated list of roles that may proceed.
        allowed: String,
    },

    /// The role document could not be written or read.
    #[error("Failed to persist roles to '{path}': {message}")]
    PersistenceError {
        /// The path of the role document.
        path: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
