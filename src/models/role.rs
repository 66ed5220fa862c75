use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A named permission group
///
/// Comparison is exact: `Admin` and `admin` are different roles.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub const ADMIN: &'static str = "Admin";
    pub const USER: &'static str = "User";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn admin() -> Self {
        Self::new(Self::ADMIN)
    }

    pub fn user() -> Self {
        Self::new(Self::USER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse a comma-separated role list as stored in the `users.roles` column
    pub fn parse_list(list: &str) -> BTreeSet<Role> {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Role::new)
            .collect()
    }

    /// Inverse of [`Role::parse_list`]
    pub fn join_list<'a>(roles: impl IntoIterator<Item = &'a Role>) -> String {
        roles
            .into_iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Self(name)
    }
}
