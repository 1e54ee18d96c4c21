//! Shared result type.
//!
//! Failures travel as a [`Report`] whose context is the error enum of the
//! crate that raised them (`AuthorizationError`, `ContentError`,
//! `ConfigError`). Callers in a higher crate wrap with `.context()` so the
//! report keeps the lower-level cause attached.

use rootcause::Report;

/// Result whose error is a report carrying a typed context `C`.
///
/// `C` defaults to `()` for call sites that only propagate.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
