//! The static permission table and its resolution queries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Action, Principal};

use super::model::{FieldAccess, ModuleDefinition, ModulePermission, RoleDefinition};

/// Module catalogue plus role grants.
///
/// Construction checks referential integrity: every module a role grants
/// must exist in the catalogue, and every explicitly listed field-group must
/// be defined by that module. Queries never fail; anything undefined, and
/// any anonymous caller, resolves to a denial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTable {
    modules: Vec<ModuleDefinition>,
    roles: BTreeMap<String, RoleDefinition>,
}

impl PermissionTable {
    /// Builds a table, rejecting grants that reference undefined modules or
    /// field-groups.
    pub fn new(
        modules: Vec<ModuleDefinition>,
        roles: BTreeMap<String, RoleDefinition>,
    ) -> EngineResult<Self> {
        let table = Self { modules, roles };
        table.check_integrity()?;
        Ok(table)
    }

    /// Verifies every role grant against the module catalogue.
    ///
    /// # Returns
    ///
    /// - `UnknownModule` if a role grants a module not in the catalogue
    /// - `ConfigIntegrity` if a role lists a field-group its module does not define
    pub fn check_integrity(&self) -> EngineResult<()> {
        for (role_key, role) in &self.roles {
            for (module_key, permission) in &role.modules {
                let module = self.module(module_key).ok_or_else(|| EngineError::UnknownModule {
                    module: module_key.clone(),
                })?;
                check_fields(role_key, module, &permission.fields)?;
            }
        }
        Ok(())
    }

    /// Returns the module catalogue in definition order.
    pub fn modules(&self) -> &[ModuleDefinition] {
        &self.modules
    }

    /// Returns a module definition by key.
    pub fn module(&self, key: &str) -> Option<&ModuleDefinition> {
        self.modules.iter().find(|m| m.key == key)
    }

    /// Returns all roles keyed by role identifier.
    pub fn roles(&self) -> &BTreeMap<String, RoleDefinition> {
        &self.roles
    }

    /// Returns a role by key.
    pub fn role(&self, key: &str) -> Option<&RoleDefinition> {
        self.roles.get(key)
    }

    pub(crate) fn insert_role(&mut self, key: String, role: RoleDefinition) {
        self.roles.insert(key, role);
    }

    pub(crate) fn remove_role(&mut self, key: &str) -> Option<RoleDefinition> {
        self.roles.remove(key)
    }

    fn grant(&self, principal: &Principal, module: &str) -> Option<&ModulePermission> {
        let role = principal.role()?;
        self.module(module)?;
        self.roles.get(role)?.modules.get(module)
    }

    /// Returns whether the principal may perform the action on the module.
    pub fn allows(&self, principal: &Principal, module: &str, action: Action) -> bool {
        self.grant(principal, module)
            .is_some_and(|permission| permission.allows(action))
    }

    /// Returns whether the principal may view the module.
    pub fn can_view(&self, principal: &Principal, module: &str) -> bool {
        self.allows(principal, module, Action::View)
    }

    /// Returns whether the principal may add records to the module.
    pub fn can_add(&self, principal: &Principal, module: &str) -> bool {
        self.allows(principal, module, Action::Add)
    }

    /// Returns whether the principal may edit records in the module.
    pub fn can_edit(&self, principal: &Principal, module: &str) -> bool {
        self.allows(principal, module, Action::Edit)
    }

    /// Returns whether the principal may delete records from the module.
    pub fn can_delete(&self, principal: &Principal, module: &str) -> bool {
        self.allows(principal, module, Action::Delete)
    }

    /// Returns the field-groups the principal may see or edit in the module.
    ///
    /// An `AllFields` grant expands to every field-group of the module in
    /// definition order; an explicit grant is returned verbatim. Unknown
    /// roles or modules and anonymous callers get an empty list.
    pub fn accessible_fields(&self, principal: &Principal, module: &str) -> Vec<String> {
        let Some(permission) = self.grant(principal, module) else {
            return Vec::new();
        };

        match &permission.fields {
            FieldAccess::AllFields => self
                .module(module)
                .map(ModuleDefinition::field_group_keys)
                .unwrap_or_default(),
            FieldAccess::Explicit(groups) => groups.clone(),
        }
    }
}

pub(crate) fn check_fields(
    role_key: &str,
    module: &ModuleDefinition,
    fields: &FieldAccess,
) -> EngineResult<()> {
    if let FieldAccess::Explicit(groups) = fields {
        if let Some(missing) = groups.iter().find(|g| !module.has_field_group(g)) {
            return Err(EngineError::ConfigIntegrity {
                role: role_key.to_string(),
                module: module.key.clone(),
                field_group: missing.clone(),
            });
        }
    }
    Ok(())
}
