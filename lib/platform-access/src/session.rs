//! Session state for a single page lifetime.
//!
//! A [`Session`] pairs a principal with the role resolved for it. Demo
//! sessions are a distinct [`Principal`] variant so nothing downstream can
//! mistake them for provider-backed sessions.
//!
//! Before the provider has reported anything the state is
//! [`SessionState::Determining`], and no gate decision is taken.

use campus_gallery_core::Result;
use serde::{Deserialize, Serialize};

use crate::error::AuthorizationError;
use crate::identity::{Identity, ProviderId, initials};
use crate::policy::{AccessPolicy, DemoOverride};
use crate::role::Role;

/// Placeholder identity synthesized for the demo super-admin bypass.
///
/// It has no backing credential and cannot be refreshed or validated by
/// the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoIdentity {
    uid: String,
    email: String,
    display_name: String,
}

impl DemoIdentity {
    /// Creates a demo identity.
    #[must_use]
    pub fn new(uid: String, email: String, display_name: String) -> Self {
        Self {
            uid,
            email,
            display_name,
        }
    }

    /// Returns the sentinel uid.
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Returns the configured super-admin email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the fixed display label.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Shapes the demo identity like a password sign-in identity.
    #[must_use]
    pub fn to_identity(&self) -> Identity {
        Identity::new(self.uid.clone())
            .with_email(self.email.clone())
            .with_display_name(self.display_name.clone())
            .with_provider(ProviderId::password())
    }
}

/// Who a session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Principal {
    /// The provider reported no signed-in identity.
    Absent,
    /// A provider-backed identity.
    Real(Identity),
    /// The demo bypass; never provider-backed.
    Demo(DemoIdentity),
}

/// What signing out means for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutAction {
    /// Ask the provider to end its session.
    ProviderSignOut,
    /// Drop the local demo session; the provider holds nothing.
    ClearLocal,
    /// Nobody is signed in.
    Nothing,
}

/// A principal paired with its resolved role.
///
/// Sessions are only built through [`Session::resolve`] and
/// [`Session::demo`], so the role always agrees with the principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    principal: Principal,
    role: Role,
}

impl Session {
    /// Resolves a session from the provider's current identity and the
    /// optional demo override.
    #[must_use]
    pub fn resolve(
        policy: &AccessPolicy,
        identity: Option<Identity>,
        demo: Option<&DemoOverride>,
    ) -> Self {
        if policy.demo_applies(demo) {
            return Self::demo(policy);
        }

        let role = policy.resolve_role(identity.as_ref(), demo);
        let principal = match identity {
            Some(identity) => Principal::Real(identity),
            None => Principal::Absent,
        };
        Self { principal, role }
    }

    /// Creates a synthetic demo super-admin session.
    #[must_use]
    pub fn demo(policy: &AccessPolicy) -> Self {
        Self {
            principal: Principal::Demo(policy.demo_identity()),
            role: Role::Superadmin,
        }
    }

    /// Creates a session with no identity.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            principal: Principal::Absent,
            role: Role::Guest,
        }
    }

    /// Returns the session's principal.
    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Returns the resolved role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the provider-backed identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match &self.principal {
            Principal::Real(identity) => Some(identity),
            _ => None,
        }
    }

    /// Returns true for demo bypass sessions.
    #[must_use]
    pub fn is_demo(&self) -> bool {
        matches!(self.principal, Principal::Demo(_))
    }

    /// Returns true if there is a real or demo principal.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        !matches!(self.principal, Principal::Absent)
    }

    /// Returns true if the provider can refresh this session's credential.
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        matches!(self.principal, Principal::Real(_))
    }

    /// Returns true if the role may manage shared content.
    #[must_use]
    pub fn can_manage_content(&self) -> bool {
        self.role.can_manage_content()
    }

    /// Fails unless the session may manage shared content.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` for an anonymous session and
    /// `PermissionDenied` for a signed-in role without content rights.
    pub fn require_content_manager(&self, action: &str) -> Result<(), AuthorizationError> {
        if self.can_manage_content() {
            return Ok(());
        }
        if !self.is_signed_in() {
            return Err(AuthorizationError::NotAuthenticated.into());
        }
        Err(AuthorizationError::PermissionDenied {
            role: self.role,
            action: action.to_string(),
        }
        .into())
    }

    /// Name to greet the user with.
    #[must_use]
    pub fn greeting_name(&self) -> Option<&str> {
        match &self.principal {
            Principal::Absent => None,
            Principal::Real(identity) => identity.greeting_name(),
            Principal::Demo(demo) => Some(demo.display_name()),
        }
    }

    /// Two-letter avatar fallback.
    #[must_use]
    pub fn initials(&self) -> String {
        match &self.principal {
            Principal::Absent => initials(None, None),
            Principal::Real(identity) => identity.initials(),
            Principal::Demo(demo) => initials(Some(demo.display_name()), Some(demo.email())),
        }
    }

    /// Returns what signing out should do for this session.
    #[must_use]
    pub fn sign_out_action(&self) -> SignOutAction {
        match self.principal {
            Principal::Absent => SignOutAction::Nothing,
            Principal::Real(_) => SignOutAction::ProviderSignOut,
            Principal::Demo(_) => SignOutAction::ClearLocal,
        }
    }
}

/// Returns true when there is no active identity and the session is not a
/// demo bypass.
///
/// Only meaningful once the provider has reported at least once; see
/// [`SessionState::gate`].
#[must_use]
pub fn should_redirect_to_login(session: &Session, is_demo_session: bool) -> bool {
    matches!(session.principal(), Principal::Absent) && !is_demo_session
}

/// Outcome of the login gate for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateDecision {
    /// Identity status is still unknown; render a loading state.
    Wait,
    /// Render the page.
    Allow,
    /// Send the user to the login surface.
    RedirectToLogin,
}

/// Session state as seen by a page shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// The provider has not delivered its first notification.
    Determining,
    /// The provider has reported, or a demo session was created.
    Known(Session),
}

impl SessionState {
    /// Returns the session once known.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Determining => None,
            Self::Known(session) => Some(session),
        }
    }

    /// Returns the resolved role, treating an undetermined state as guest.
    #[must_use]
    pub fn role(&self) -> Role {
        self.session().map_or(Role::Guest, Session::role)
    }

    /// Returns true while waiting on the provider.
    #[must_use]
    pub fn is_determining(&self) -> bool {
        matches!(self, Self::Determining)
    }

    /// Decides whether the page may render or must redirect.
    #[must_use]
    pub fn gate(&self) -> GateDecision {
        match self {
            Self::Determining => GateDecision::Wait,
            Self::Known(session) if should_redirect_to_login(session, session.is_demo()) => {
                GateDecision::RedirectToLogin
            }
            Self::Known(_) => GateDecision::Allow,
        }
    }
}
