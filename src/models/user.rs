use std::collections::BTreeSet;
use std::fmt;

use uuid::Uuid;

use super::Role;

/// A stored account as returned by a credential store
///
/// This crate only reads users; registration and updates live elsewhere.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// PHC string: algorithm, version, params, salt and digest
    pub password_hash: String,
    pub roles: BTreeSet<Role>,
}

impl User {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.as_str() == role)
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("roles", &self.roles)
            .finish()
    }
}
