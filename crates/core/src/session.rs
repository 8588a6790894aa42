//! Per-connection session state.
//!
//! A session is either logged out or logged in with a username and role.
//! It is carried by the caller (the API derives it from the bearer token on
//! every request); nothing here is stored process-wide.
//!
//! ```text
//! LoggedOut --login(username, role)--> LoggedIn { username, role }
//! LoggedIn  --logout-----------------> LoggedOut
//! ```

use serde::Serialize;

use crate::error::CoreError;
use crate::roles::Role;

/// Session context presented to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    LoggedOut,
    LoggedIn { username: String, role: Role },
}

impl Default for Session {
    fn default() -> Self {
        Self::LoggedOut
    }
}

impl Session {
    /// Transition after a successful authentication.
    ///
    /// Logging in from an already logged-in session is rejected; the caller
    /// must log out first.
    pub fn login(self, username: impl Into<String>, role: Role) -> Result<Self, CoreError> {
        match self {
            Self::LoggedOut => Ok(Self::LoggedIn {
                username: username.into(),
                role,
            }),
            Self::LoggedIn { username, .. } => Err(CoreError::Conflict(format!(
                "Already logged in as {username}"
            ))),
        }
    }

    /// Transition back to logged out. Logging out twice is a no-op.
    pub fn logout(self) -> Self {
        Self::LoggedOut
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Self::LoggedIn { role, .. } => Some(*role),
            Self::LoggedOut => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::LoggedIn { username, .. } => Some(username),
            Self::LoggedOut => None,
        }
    }
}
