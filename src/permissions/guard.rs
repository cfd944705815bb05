//! Authorization guards invoked at the start of each request handler.
//!
//! Handlers call these explicitly so the permission contract is visible at
//! each call site. UI-level hiding never replaces these checks.

use crate::error::{EngineError, EngineResult};
use crate::models::{Action, Principal};

use super::table::PermissionTable;

/// Requires that the principal may perform `action` on `module`.
///
/// # Returns
///
/// - `Unauthenticated` for anonymous callers
/// - `Forbidden` when the role's grant does not allow the action
///
/// # Examples
///
/// ```
/// use hr_engine::config::ConfigLoader;
/// use hr_engine::models::{Action, Principal};
/// use hr_engine::permissions::require;
///
/// let config = ConfigLoader::builtin().unwrap();
/// let manager = Principal::authenticated("omar", "manager");
///
/// assert!(require(config.permissions(), &manager, "payroll", Action::Add).is_ok());
/// assert!(require(config.permissions(), &manager, "payroll", Action::Delete).is_err());
/// ```
pub fn require(
    table: &PermissionTable,
    principal: &Principal,
    module: &str,
    action: Action,
) -> EngineResult<()> {
    let Some(role) = principal.role() else {
        return Err(EngineError::Unauthenticated);
    };

    if table.allows(principal, module, action) {
        Ok(())
    } else {
        Err(EngineError::Forbidden {
            role: role.to_string(),
            module: module.to_string(),
            action: action.to_string(),
        })
    }
}

/// Requires that the principal holds one of the listed roles.
pub fn require_any_role(principal: &Principal, allowed: &[&str]) -> EngineResult<()> {
    let Some(role) = principal.role() else {
        return Err(EngineError::Unauthenticated);
    };

    if allowed.contains(&role) {
        Ok(())
    } else {
        Err(EngineError::RoleRequired {
            role: role.to_string(),
            allowed: allowed.join(", "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;

    fn table() -> PermissionTable {
        ConfigLoader::builtin().unwrap().permissions().clone()
    }

    #[test]
    fn test_anonymous_is_unauthenticated() {
        assert!(matches!(
            require(&table(), &Principal::Anonymous, "employees", Action::View),
            Err(EngineError::Unauthenticated)
        ));
        assert!(matches!(
            require_any_role(&Principal::Anonymous, &["admin"]),
            Err(EngineError::Unauthenticated)
        ));
    }

    #[test]
    fn test_forbidden_reports_role_module_and_action() {
        let hr = Principal::authenticated("sara", "hr");
        match require(&table(), &hr, "payroll", Action::Edit) {
            Err(EngineError::Forbidden {
                role,
                module,
                action,
            }) => {
                assert_eq!(role, "hr");
                assert_eq!(module, "payroll");
                assert_eq!(action, "edit");
            }
            other => panic!("Expected Forbidden, got {:?}", other),
        }
    }

    #[test]
    fn test_granted_action_passes() {
        let hr = Principal::authenticated("sara", "hr");
        assert!(require(&table(), &hr, "payroll", Action::View).is_ok());
    }

    #[test]
    fn test_require_any_role() {
        let manager = Principal::authenticated("omar", "manager");
        assert!(require_any_role(&manager, &["admin", "manager"]).is_ok());

        match require_any_role(&manager, &["admin"]) {
            Err(EngineError::RoleRequired { role, allowed }) => {
                assert_eq!(role, "manager");
                assert_eq!(allowed, "admin");
            }
            other => panic!("Expected RoleRequired, got {:?}", other),
        }
    }
}
