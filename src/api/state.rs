//! Application state for the HR engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, PayrollSettings};
use crate::permissions::{RoleRegistry, UserDirectory};

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// role registry, the payroll settings and the user directory consulted
/// before deleting a role.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<RoleRegistry>,
    settings: Arc<PayrollSettings>,
    users: Arc<dyn UserDirectory>,
}

impl AppState {
    /// Creates the application state from a loaded configuration.
    pub fn new(config: ConfigLoader, users: Arc<dyn UserDirectory>) -> Self {
        let settings = config.settings().clone();
        Self {
            registry: Arc::new(config.into_registry()),
            settings: Arc::new(settings),
            users,
        }
    }

    /// Returns the role registry.
    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    /// Returns the payroll settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Returns the user directory.
    pub fn users(&self) -> &dyn UserDirectory {
        self.users.as_ref()
    }
}
