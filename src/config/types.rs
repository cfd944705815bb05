//! Configuration types for the HR engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration files.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::permissions::{ModuleDefinition, PermissionTable, RoleDefinition};

/// Module catalogue file structure (`modules.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ModulesConfig {
    /// Modules in definition order.
    pub modules: Vec<ModuleDefinition>,
}

/// Role table file structure (`roles.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct RolesConfig {
    /// Roles keyed by role identifier.
    pub roles: BTreeMap<String, RoleDefinition>,
}

fn default_overtime_rate() -> Decimal {
    Decimal::new(15, 1)
}

fn default_monthly_hours() -> u32 {
    160
}

fn default_currency() -> String {
    "Saudi Riyal".to_string()
}

fn default_currency_symbol() -> String {
    "ر.س".to_string()
}

/// Payroll settings (`payroll.yaml`).
///
/// Supplies defaults for new payroll records. The 30-day salary divisor is
/// fixed and deliberately absent from these settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSettings {
    /// Overtime multiplier for new records.
    #[serde(default = "default_overtime_rate")]
    pub default_overtime_rate: Decimal,
    /// Regular hours per month for new records.
    #[serde(default = "default_monthly_hours")]
    pub monthly_hours: u32,
    /// Currency name shown on payslips.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Currency symbol shown on payslips.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            default_overtime_rate: default_overtime_rate(),
            monthly_hours: default_monthly_hours(),
            currency: default_currency(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// The complete engine configuration.
///
/// Aggregates the validated permission table and the payroll settings.
#[derive(Debug, Clone)]
pub struct HrConfig {
    permissions: PermissionTable,
    settings: PayrollSettings,
}

impl HrConfig {
    /// Creates a configuration from its parts.
    pub fn new(permissions: PermissionTable, settings: PayrollSettings) -> Self {
        Self {
            permissions,
            settings,
        }
    }

    /// Returns the permission table.
    pub fn permissions(&self) -> &PermissionTable {
        &self.permissions
    }

    /// Returns the payroll settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Splits the configuration into its parts.
    pub fn into_parts(self) -> (PermissionTable, PayrollSettings) {
        (self.permissions, self.settings)
    }
}
