//! Error types for the platform-access crate.
//!
//! Role resolution itself never fails. Errors are propagated as rootcause
//! reports:
//! - `AuthorizationError`: a caller asked for access the resolved role does
//!   not grant
//! - `ConfigError`: the access policy could not be loaded

use std::fmt;

use crate::role::Role;

/// Errors from authorization checks against a resolved session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// No identity is signed in.
    NotAuthenticated,
    /// The session's role does not allow the action.
    PermissionDenied { role: Role, action: String },
}

impl fmt::Display for AuthorizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAuthenticated => {
                write!(f, "user is not authenticated")
            }
            Self::PermissionDenied { role, action } => {
                write!(f, "role '{role}' may not {action}")
            }
        }
    }
}

impl std::error::Error for AuthorizationError {}

/// Errors from loading the access policy configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuration source was present but invalid.
    Load { reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load { reason } => write!(f, "failed to load access policy: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}
