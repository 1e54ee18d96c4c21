//! Role types for platform access control.
//!
//! Exactly one role is active per session. Roles are never persisted; they
//! are recomputed from the current identity every time it changes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Access role resolved for a session.
///
/// Variants are ordered by privilege, so `Role::Admin > Role::User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// No identity, or a federated sign-in without an elevated email.
    Guest,
    /// Signed in with institutional credentials.
    User,
    /// Matches the configured admin address.
    Admin,
    /// Matches the configured super-admin address, or the demo bypass.
    Superadmin,
}

impl Role {
    /// Returns the wire name of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::User => "user",
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
        }
    }

    /// Human-readable label used on badges and greetings.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Guest => "Guest",
            Self::User => "User",
            Self::Admin => "Admin",
            Self::Superadmin => "Super Admin",
        }
    }

    /// Returns true for `Admin` and `Superadmin`.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::Superadmin)
    }

    /// Returns true if the role may add, edit, or remove shared content
    /// such as gallery images and calendar events.
    #[must_use]
    pub fn can_manage_content(&self) -> bool {
        self.is_admin()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
