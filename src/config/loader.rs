//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the module
//! catalogue, role table and payroll settings from YAML files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::permissions::{PermissionTable, RoleDefinition, RoleRegistry};

use super::types::{HrConfig, ModulesConfig, PayrollSettings, RolesConfig};

/// File name of the administrator-edited role document.
pub const ROLE_DOCUMENT_FILE: &str = "roles.json";

const BUILTIN_MODULES: &str = include_str!("../../config/default/modules.yaml");
const BUILTIN_ROLES: &str = include_str!("../../config/default/roles.yaml");
const BUILTIN_PAYROLL: &str = include_str!("../../config/default/payroll.yaml");

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── modules.yaml   # Module catalogue and field-groups
/// ├── roles.yaml     # Built-in role grants
/// ├── payroll.yaml   # Payroll settings
/// └── roles.json     # Optional: persisted role table, replaces roles.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use hr_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Loaded {} roles", loader.permissions().roles().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: HrConfig,
    role_document: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// If the directory contains a `roles.json` document it is used instead
    /// of `roles.yaml`, and later role changes are written back to it.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file is malformed (`ConfigParseError`)
    /// - A role references an undefined module or field-group
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let modules = Self::load_yaml::<ModulesConfig>(&path.join("modules.yaml"))?;

        let role_document = path.join(ROLE_DOCUMENT_FILE);
        let roles = if role_document.exists() {
            info!(path = %role_document.display(), "Loading persisted role document");
            Self::load_role_document(&role_document)?
        } else {
            Self::load_yaml::<RolesConfig>(&path.join("roles.yaml"))?.roles
        };

        let settings = Self::load_yaml::<PayrollSettings>(&path.join("payroll.yaml"))?;

        let permissions = PermissionTable::new(modules.modules, roles)?;

        Ok(Self {
            config: HrConfig::new(permissions, settings),
            role_document: Some(role_document),
        })
    }

    /// Returns the default configuration compiled into the crate.
    ///
    /// No role document is attached, so role changes stay in memory.
    pub fn builtin() -> EngineResult<Self> {
        let modules = Self::parse_yaml::<ModulesConfig>(BUILTIN_MODULES, "builtin:modules.yaml")?;
        let roles = Self::parse_yaml::<RolesConfig>(BUILTIN_ROLES, "builtin:roles.yaml")?;
        let settings = Self::parse_yaml::<PayrollSettings>(BUILTIN_PAYROLL, "builtin:payroll.yaml")?;

        let permissions = PermissionTable::new(modules.modules, roles.roles)?;

        Ok(Self {
            config: HrConfig::new(permissions, settings),
            role_document: None,
        })
    }

    fn read(path: &Path) -> EngineResult<String> {
        fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path.display().to_string(),
        })
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(content: &str, path: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let content = Self::read(path)?;
        Self::parse_yaml(&content, &path.display().to_string())
    }

    /// Loads the JSON role document.
    fn load_role_document(
        path: &Path,
    ) -> EngineResult<std::collections::BTreeMap<String, RoleDefinition>> {
        let content = Self::read(path)?;
        serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &HrConfig {
        &self.config
    }

    /// Returns the validated permission table.
    pub fn permissions(&self) -> &PermissionTable {
        self.config.permissions()
    }

    /// Returns the payroll settings.
    pub fn settings(&self) -> &PayrollSettings {
        self.config.settings()
    }

    /// Returns where role changes are persisted, if anywhere.
    pub fn role_document(&self) -> Option<&Path> {
        self.role_document.as_deref()
    }

    /// Builds the runtime role registry, attaching the role document.
    pub fn into_registry(self) -> RoleRegistry {
        let (permissions, _) = self.config.into_parts();
        let registry = RoleRegistry::new(permissions);
        match self.role_document {
            Some(path) => registry.with_document(path),
            None => registry,
        }
    }
}
