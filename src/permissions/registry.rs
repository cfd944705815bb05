//! Runtime role registry.
//!
//! The [`RoleRegistry`] owns the process-wide [`PermissionTable`], answers
//! permission queries from any number of readers, and applies administrator
//! role additions and removals one writer at a time.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{Action, Principal};

use super::guard;
use super::model::{FieldAccess, ModulePermission, RoleDefinition};
use super::table::{PermissionTable, check_fields};
use super::users::UserDirectory;

/// Built-in roles that can never be deleted.
pub const PROTECTED_ROLES: [&str; 5] = ["admin", "manager", "hr", "employee", "user"];

/// Submitted permissions for one module when adding a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleGrant {
    /// Grant view.
    #[serde(default)]
    pub view: bool,
    /// Grant add.
    #[serde(default)]
    pub add: bool,
    /// Grant edit.
    #[serde(default)]
    pub edit: bool,
    /// Grant delete.
    #[serde(default)]
    pub delete: bool,
    /// Selected field-groups; including `"all"` selects every group.
    #[serde(default)]
    pub fields: Vec<String>,
}

/// An administrator's request to add a role.
///
/// Modules without a grant are fully denied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRole {
    /// Unique role key.
    #[serde(default)]
    pub key: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Grants keyed by module.
    #[serde(default)]
    pub modules: BTreeMap<String, ModuleGrant>,
}

/// Process-wide role table guarded by a single-writer lock.
#[derive(Debug)]
pub struct RoleRegistry {
    table: RwLock<PermissionTable>,
    document_path: Option<PathBuf>,
}

impl RoleRegistry {
    /// Creates a registry over a validated table.
    pub fn new(table: PermissionTable) -> Self {
        Self {
            table: RwLock::new(table),
            document_path: None,
        }
    }

    /// Writes the role document to `path` after every successful mutation.
    pub fn with_document(mut self, path: impl Into<PathBuf>) -> Self {
        self.document_path = Some(path.into());
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, PermissionTable> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PermissionTable> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the current table.
    pub fn snapshot(&self) -> PermissionTable {
        self.read().clone()
    }

    /// See [`PermissionTable::can_view`].
    pub fn can_view(&self, principal: &Principal, module: &str) -> bool {
        self.read().can_view(principal, module)
    }

    /// See [`PermissionTable::can_add`].
    pub fn can_add(&self, principal: &Principal, module: &str) -> bool {
        self.read().can_add(principal, module)
    }

    /// See [`PermissionTable::can_edit`].
    pub fn can_edit(&self, principal: &Principal, module: &str) -> bool {
        self.read().can_edit(principal, module)
    }

    /// See [`PermissionTable::can_delete`].
    pub fn can_delete(&self, principal: &Principal, module: &str) -> bool {
        self.read().can_delete(principal, module)
    }

    /// See [`PermissionTable::accessible_fields`].
    pub fn accessible_fields(&self, principal: &Principal, module: &str) -> Vec<String> {
        self.read().accessible_fields(principal, module)
    }

    /// See [`guard::require`].
    pub fn require(&self, principal: &Principal, module: &str, action: Action) -> EngineResult<()> {
        guard::require(&self.read(), principal, module, action)
    }

    /// Adds a role.
    ///
    /// The key and name are trimmed and must be non-empty, and the key must
    /// not already exist. Every module in the catalogue receives a grant:
    /// the submitted one, or a full denial when none was submitted.
    ///
    /// # Returns
    ///
    /// - `MissingRoleField` for a blank key or name
    /// - `DuplicateRole` if the key is taken
    /// - `UnknownModule` if a grant names a module outside the catalogue
    /// - `ConfigIntegrity` if a grant lists an undefined field-group
    pub fn add_role(&self, new_role: NewRole) -> EngineResult<()> {
        let key = new_role.key.trim().to_string();
        let name = new_role.name.trim().to_string();

        if key.is_empty() {
            return Err(EngineError::MissingRoleField {
                field: "role_key".to_string(),
            });
        }
        if name.is_empty() {
            return Err(EngineError::MissingRoleField {
                field: "role_name".to_string(),
            });
        }

        {
            let mut table = self.write();

            if table.role(&key).is_some() {
                warn!(role = %key, "Rejected duplicate role");
                return Err(EngineError::DuplicateRole { key });
            }

            if let Some(unknown) = new_role
                .modules
                .keys()
                .find(|module| table.module(module).is_none())
            {
                return Err(EngineError::UnknownModule {
                    module: unknown.clone(),
                });
            }

            let mut modules = BTreeMap::new();
            for module in table.modules() {
                let permission = match new_role.modules.get(&module.key) {
                    Some(grant) => {
                        let fields = FieldAccess::from_submitted(grant.fields.clone());
                        check_fields(&key, module, &fields)?;
                        ModulePermission {
                            view: grant.view,
                            add: grant.add,
                            edit: grant.edit,
                            delete: grant.delete,
                            fields,
                        }
                    }
                    None => ModulePermission::denied(),
                };
                modules.insert(module.key.clone(), permission);
            }

            table.insert_role(
                key.clone(),
                RoleDefinition {
                    name: name.clone(),
                    modules,
                },
            );
        }

        info!(role = %key, name = %name, "Added role");
        self.persist_if_configured();
        Ok(())
    }

    /// Deletes a role and returns its definition.
    ///
    /// # Returns
    ///
    /// - `ProtectedRole` for any of [`PROTECTED_ROLES`], whatever its user count
    /// - `RoleInUse` if any user is still assigned the role
    /// - `RoleNotFound` if no such role exists
    ///
    /// The in-use check reads `users` before the table's write lock is taken,
    /// so it is advisory: a user assigned the role in between keeps a key
    /// that no longer resolves and is denied everywhere.
    pub fn delete_role(
        &self,
        key: &str,
        users: &dyn UserDirectory,
    ) -> EngineResult<RoleDefinition> {
        if PROTECTED_ROLES.contains(&key) {
            warn!(role = %key, "Rejected deletion of protected role");
            return Err(EngineError::ProtectedRole {
                key: key.to_string(),
            });
        }

        let user_count = users.count_users_with_role(key);
        if user_count > 0 {
            warn!(role = %key, user_count, "Rejected deletion of role in use");
            return Err(EngineError::RoleInUse {
                key: key.to_string(),
                user_count,
            });
        }

        let removed = self
            .write()
            .remove_role(key)
            .ok_or_else(|| EngineError::RoleNotFound {
                key: key.to_string(),
            })?;

        info!(role = %key, name = %removed.name, "Deleted role");
        self.persist_if_configured();
        Ok(removed)
    }

    /// Writes the role table to `path` as a JSON document keyed by role.
    pub fn persist(&self, path: &Path) -> EngineResult<()> {
        let path_str = path.display().to_string();
        let document = serde_json::to_string_pretty(self.read().roles()).map_err(|e| {
            EngineError::PersistenceError {
                path: path_str.clone(),
                message: e.to_string(),
            }
        })?;

        fs::write(path, document).map_err(|e| EngineError::PersistenceError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn persist_if_configured(&self) {
        if let Some(path) = &self.document_path {
            if let Err(err) = self.persist(path) {
                warn!(error = %err, "Role change applied but not saved");
            }
        }
    }
}
