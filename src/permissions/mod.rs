//! Role-based permission resolver.
//!
//! Permissions are data: a table mapping (role, module) to view/add/edit/delete
//! flags plus the field-groups the role may see. This module provides the
//! table and its queries, the runtime registry that administrators mutate,
//! and the guards request handlers call before acting.
//!
//! # Example
//!
//! ```
//! use hr_engine::config::ConfigLoader;
//! use hr_engine::models::Principal;
//!
//! let registry = ConfigLoader::builtin().unwrap().into_registry();
//! let hr = Principal::authenticated("sara", "hr");
//!
//! assert!(registry.can_view(&hr, "payroll"));
//! assert_eq!(registry.accessible_fields(&hr, "payroll"), vec!["salary_components"]);
//! assert!(!registry.can_view(&Principal::Anonymous, "employees"));
//! ```

mod guard;
mod model;
mod registry;
mod table;
mod users;

pub use guard::{require, require_any_role};
pub use model::{
    ALL_FIELDS_MARKER, FieldAccess, FieldGroup, ModuleDefinition, ModulePermission, RoleDefinition,
};
pub use registry::{ModuleGrant, NewRole, PROTECTED_ROLES, RoleRegistry};
pub use table::PermissionTable;
pub use users::{InMemoryUserDirectory, UserDirectory};
