//! Caller identity and the actions a role can be granted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The identity a permission query is evaluated for.
///
/// Unauthenticated callers are represented explicitly so that every query
/// can deny them without consulting the role table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Principal {
    /// No authenticated session.
    Anonymous,
    /// A signed-in user holding a role key.
    Authenticated {
        /// The user's login name.
        username: String,
        /// The role key assigned to the user (e.g. "hr").
        role: String,
    },
}

impl Principal {
    /// Creates an authenticated principal.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_engine::models::Principal;
    ///
    /// let principal = Principal::authenticated("sara", "hr");
    /// assert_eq!(principal.role(), Some("hr"));
    /// assert_eq!(principal.username(), Some("sara"));
    /// ```
    pub fn authenticated(username: impl Into<String>, role: impl Into<String>) -> Self {
        Principal::Authenticated {
            username: username.into(),
            role: role.into(),
        }
    }

    /// Returns the role key, or `None` for anonymous callers.
    pub fn role(&self) -> Option<&str> {
        match self {
            Principal::Anonymous => None,
            Principal::Authenticated { role, .. } => Some(role),
        }
    }

    /// Returns the username, or `None` for anonymous callers.
    pub fn username(&self) -> Option<&str> {
        match self {
            Principal::Anonymous => None,
            Principal::Authenticated { username, .. } => Some(username),
        }
    }
}

/// An operation a role may be granted on a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read records of the module.
    View,
    /// Create records in the module.
    Add,
    /// Modify existing records.
    Edit,
    /// Remove records.
    Delete,
}

impl Action {
    /// Returns the lowercase action name.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Add => "add",
            Action::Edit => "edit",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
