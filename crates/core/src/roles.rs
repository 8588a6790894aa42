//! User roles.
//!
//! The string values must match the `CHECK` constraint on `users.role` in
//! `20260301000002_create_users_table.sql`.

use serde::{Deserialize, Serialize};

pub const ROLE_CLIENT: &str = "client";
pub const ROLE_SUPPORT: &str = "support";

/// All valid role strings.
pub const VALID_ROLES: &[&str] = &[ROLE_CLIENT, ROLE_SUPPORT];

/// Role of a user account; selects which dashboard a session presents and
/// which operations it may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Support,
}

impl Role {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ROLE_CLIENT => Ok(Self::Client),
            ROLE_SUPPORT => Ok(Self::Support),
            _ => Err(format!(
                "Invalid role '{s}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => ROLE_CLIENT,
            Self::Support => ROLE_SUPPORT,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
