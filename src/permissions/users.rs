//! User directory seam used when deleting roles.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Answers how many user records reference a role.
///
/// Backed by the persistence layer in production; [`InMemoryUserDirectory`]
/// serves tests and single-process deployments.
pub trait UserDirectory: Send + Sync {
    /// Returns the number of users currently assigned the role.
    fn count_users_with_role(&self, role: &str) -> u64;
}

/// A user directory held in memory, keyed by username.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    assignments: RwLock<HashMap<String, String>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a role to a user, replacing any previous assignment.
    pub fn assign(&self, username: impl Into<String>, role: impl Into<String>) {
        self.assignments
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(username.into(), role.into());
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn count_users_with_role(&self, role: &str) -> u64 {
        self.assignments
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|assigned| assigned.as_str() == role)
            .count() as u64
    }
}
