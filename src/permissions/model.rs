//! Module catalogue and role grant types.
//!
//! These types are deserialized from the YAML configuration and from the
//! persisted JSON role document, and are the data the resolver queries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Action;

/// Marker used in configuration for "every field-group of the module".
pub const ALL_FIELDS_MARKER: &str = "all";

/// A named subset of a module's fields; the unit of field-level permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldGroup {
    /// Identifier referenced by role grants (e.g. "salary_components").
    pub key: String,
    /// Display name.
    pub name: String,
    /// Field names belonging to the group, in display order.
    pub fields: Vec<String>,
}

/// A top-level functional area subject to role-based permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDefinition {
    /// Module key (e.g. "payroll").
    pub key: String,
    /// Display name.
    pub name: String,
    /// Icon class shown next to the module.
    #[serde(default)]
    pub icon: String,
    /// Field-groups in definition order.
    pub field_groups: Vec<FieldGroup>,
}

impl ModuleDefinition {
    /// Returns the field-group keys in definition order.
    pub fn field_group_keys(&self) -> Vec<String> {
        self.field_groups.iter().map(|g| g.key.clone()).collect()
    }

    /// Returns true if the module defines a field-group with this key.
    pub fn has_field_group(&self, key: &str) -> bool {
        self.field_groups.iter().any(|g| g.key == key)
    }
}

/// Which field-groups a role may see or edit within a module.
///
/// Serialized as the string `"all"` or as a list of field-group keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FieldAccessRepr", into = "FieldAccessRepr")]
pub enum FieldAccess {
    /// Every field-group the module defines.
    AllFields,
    /// Exactly these field-groups, in this order.
    Explicit(Vec<String>),
}

impl Default for FieldAccess {
    fn default() -> Self {
        FieldAccess::Explicit(Vec::new())
    }
}

impl FieldAccess {
    /// Builds a field access from a submitted list of field-groups.
    ///
    /// A list containing the `"all"` marker collapses to [`FieldAccess::AllFields`].
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_engine::permissions::FieldAccess;
    ///
    /// let all = FieldAccess::from_submitted(vec!["basic_info".to_string(), "all".to_string()]);
    /// assert_eq!(all, FieldAccess::AllFields);
    ///
    /// let some = FieldAccess::from_submitted(vec!["basic_info".to_string()]);
    /// assert_eq!(some, FieldAccess::Explicit(vec!["basic_info".to_string()]));
    /// ```
    pub fn from_submitted(groups: Vec<String>) -> Self {
        if groups.iter().any(|g| g == ALL_FIELDS_MARKER) {
            FieldAccess::AllFields
        } else {
            FieldAccess::Explicit(groups)
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FieldAccessRepr {
    Marker(String),
    Groups(Vec<String>),
}

impl TryFrom<FieldAccessRepr> for FieldAccess {
    type Error = String;

    fn try_from(repr: FieldAccessRepr) -> Result<Self, Self::Error> {
        match repr {
            FieldAccessRepr::Marker(marker) if marker == ALL_FIELDS_MARKER => {
                Ok(FieldAccess::AllFields)
            }
            FieldAccessRepr::Marker(other) => Err(format!(
                "expected \"{}\" or a list of field-groups, found \"{}\"",
                ALL_FIELDS_MARKER, other
            )),
            FieldAccessRepr::Groups(groups) => Ok(FieldAccess::from_submitted(groups)),
        }
    }
}

impl From<FieldAccess> for FieldAccessRepr {
    fn from(access: FieldAccess) -> Self {
        match access {
            FieldAccess::AllFields => FieldAccessRepr::Marker(ALL_FIELDS_MARKER.to_string()),
            FieldAccess::Explicit(groups) => FieldAccessRepr::Groups(groups),
        }
    }
}

/// A role's grant on one module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePermission {
    /// May read records.
    #[serde(default)]
    pub view: bool,
    /// May create records.
    #[serde(default)]
    pub add: bool,
    /// May modify records.
    #[serde(default)]
    pub edit: bool,
    /// May delete records.
    #[serde(default)]
    pub delete: bool,
    /// Field-groups the role may see or edit.
    #[serde(default)]
    pub fields: FieldAccess,
}

impl ModulePermission {
    /// A grant that allows nothing.
    pub fn denied() -> Self {
        Self::default()
    }

    /// Returns whether the grant allows the action.
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::View => self.view,
            Action::Add => self.add,
            Action::Edit => self.edit,
            Action::Delete => self.delete,
        }
    }
}

/// A role: a display name plus one grant per module.
///
/// A module with no entry is fully denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    /// Display name.
    pub name: String,
    /// Grants keyed by module.
    #[serde(default)]
    pub modules: BTreeMap<String, ModulePermission>,
}
