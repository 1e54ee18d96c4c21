//! Role resolution and session gating for campus-gallery.
//!
//! This crate provides:
//! - Identity records from the external provider (`Identity`)
//! - The configured access policy and role resolver (`AccessPolicy`, `Role`)
//! - Sessions, including the demo bypass, and the login gate (`Session`)
//! - An owned identity subscription per page (`SessionWatcher`)
//!
//! # Example
//!
//! ```
//! use campus_gallery_platform_access::{
//!     AccessPolicy, ChannelIdentityProvider, GateDecision, Identity, IdentityStatus, Role,
//!     SessionWatcher,
//! };
//! use std::sync::Arc;
//!
//! let provider = ChannelIdentityProvider::new();
//! let mut watcher = SessionWatcher::mount(&provider, Arc::new(AccessPolicy::default()), None);
//! assert_eq!(watcher.state().gate(), GateDecision::Wait);
//!
//! let identity = Identity::new("uid_1")
//!     .with_email("admin@gehu.ac.in")
//!     .with_provider("password");
//! let state = watcher.apply(IdentityStatus::SignedIn(identity));
//!
//! assert_eq!(state.role(), Role::Admin);
//! assert_eq!(state.gate(), GateDecision::Allow);
//! ```

pub mod error;
pub mod identity;
pub mod policy;
pub mod role;
pub mod session;
pub mod watcher;

// Re-export main types at crate root
pub use error::{AuthorizationError, ConfigError};
pub use identity::{Identity, ProviderId};
pub use policy::{AccessPolicy, AccessPolicyBuilder, DemoOverride};
pub use role::Role;
pub use session::{
    DemoIdentity, GateDecision, Principal, Session, SessionState, SignOutAction,
    should_redirect_to_login,
};
pub use watcher::{
    ChannelIdentityProvider, IdentityProvider, IdentityStatus, IdentitySubscription,
    SessionWatcher,
};
