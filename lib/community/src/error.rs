//! Error types for the community crate.
//!
//! Errors are designed for layered context using rootcause: authorization
//! failures from platform-access are wrapped with `ContentError::Unauthorized`
//! via `.context()`.

use campus_gallery_core::Result;
use campus_gallery_platform_access::Session;
use rootcause::prelude::*;
use std::fmt;

/// Errors from content operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// The referenced item does not exist.
    NotFound { kind: &'static str, id: String },
    /// A required field was left empty.
    MissingField { field: &'static str },
    /// A time of day could not be parsed.
    InvalidTime { value: String },
    /// The session may not perform the action.
    Unauthorized { action: String },
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} '{id}' not found"),
            Self::MissingField { field } => write!(f, "missing required field: {field}"),
            Self::InvalidTime { value } => write!(f, "invalid time of day: '{value}'"),
            Self::Unauthorized { action } => write!(f, "not allowed to {action}"),
        }
    }
}

impl std::error::Error for ContentError {}

/// Requires the session to be allowed to manage shared content.
pub(crate) fn authorize(session: &Session, action: &str) -> Result<(), ContentError> {
    session
        .require_content_manager(action)
        .context(ContentError::Unauthorized {
            action: action.to_string(),
        })
}
