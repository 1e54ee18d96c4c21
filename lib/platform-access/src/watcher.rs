//! Identity subscription and per-page session reconciliation.
//!
//! A page mounts a [`SessionWatcher`], which subscribes to its identity
//! provider exactly once and owns that subscription. Each provider
//! notification is reconciled synchronously into a [`SessionState`].
//! Dropping the watcher releases the subscription, so no notification is
//! acted on after the page is gone.
//!
//! Notifications carry state, not events: if the provider reports twice
//! before the watcher looks, only the latest status is seen.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::identity::Identity;
use crate::policy::{AccessPolicy, DemoOverride};
use crate::session::{Session, SessionState, SignOutAction};

/// One identity-change notification from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IdentityStatus {
    /// Nobody is signed in.
    SignedOut,
    /// An identity is signed in (sign-in or token refresh).
    SignedIn(Identity),
}

impl IdentityStatus {
    /// Returns the identity carried by the notification.
    #[must_use]
    pub fn into_identity(self) -> Option<Identity> {
        match self {
            Self::SignedOut => None,
            Self::SignedIn(identity) => Some(identity),
        }
    }
}

/// Source of identity-change notifications.
///
/// Implemented by adapters around the external authentication provider.
pub trait IdentityProvider {
    /// Opens a subscription. The provider's current status, if it has one,
    /// is visible immediately through [`IdentitySubscription::current`].
    fn subscribe(&self) -> IdentitySubscription;
}

/// An owned subscription to identity changes.
///
/// Dropping it unsubscribes.
#[derive(Debug)]
pub struct IdentitySubscription {
    receiver: watch::Receiver<Option<IdentityStatus>>,
}

impl IdentitySubscription {
    /// Wraps a watch receiver. `None` in the channel means the provider has
    /// not reported yet.
    #[must_use]
    pub fn new(receiver: watch::Receiver<Option<IdentityStatus>>) -> Self {
        Self { receiver }
    }

    /// Returns the provider's latest status and marks it seen.
    pub fn current(&mut self) -> Option<IdentityStatus> {
        self.receiver.borrow_and_update().clone()
    }

    /// Waits for the next status. Returns `None` once the provider is gone.
    pub async fn recv(&mut self) -> Option<IdentityStatus> {
        loop {
            self.receiver.changed().await.ok()?;
            if let Some(status) = self.receiver.borrow_and_update().clone() {
                return Some(status);
            }
        }
    }
}

/// In-process identity provider backed by a watch channel.
///
/// Stands in for the external provider in the `session-probe` binary and in tests.
#[derive(Debug)]
pub struct ChannelIdentityProvider {
    sender: watch::Sender<Option<IdentityStatus>>,
}

impl ChannelIdentityProvider {
    /// Creates a provider that has not reported a status yet.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    /// Publishes a new identity status to all subscribers.
    pub fn publish(&self, status: IdentityStatus) {
        self.sender.send_replace(Some(status));
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChannelIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for ChannelIdentityProvider {
    fn subscribe(&self) -> IdentitySubscription {
        IdentitySubscription::new(self.sender.subscribe())
    }
}

/// Session reconciliation for one page lifetime.
#[derive(Debug)]
pub struct SessionWatcher {
    policy: Arc<AccessPolicy>,
    subscription: IdentitySubscription,
    demo_session: bool,
    state: SessionState,
}

impl SessionWatcher {
    /// Subscribes to the provider and establishes the initial state.
    ///
    /// The demo override is read here and never again. An applicable
    /// override yields a known demo session straight away; otherwise the
    /// state is `Determining` until the provider reports.
    pub fn mount<P>(provider: &P, policy: Arc<AccessPolicy>, demo: Option<DemoOverride>) -> Self
    where
        P: IdentityProvider + ?Sized,
    {
        let demo_session = policy.demo_applies(demo.as_ref());
        let state = if demo_session {
            SessionState::Known(Session::demo(&policy))
        } else {
            SessionState::Determining
        };

        let mut watcher = Self {
            policy,
            subscription: provider.subscribe(),
            demo_session,
            state,
        };
        info!(demo_session, "session watcher mounted");

        if let Some(status) = watcher.subscription.current() {
            watcher.apply(status);
        }
        watcher
    }

    /// Returns the current session state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns true if this page runs a demo bypass session.
    #[must_use]
    pub fn is_demo_session(&self) -> bool {
        self.demo_session
    }

    /// Reconciles one provider notification into the session state.
    ///
    /// While a demo session is active, notifications are observed but do
    /// not replace it.
    #[instrument(skip_all, fields(demo_session = self.demo_session))]
    pub fn apply(&mut self, status: IdentityStatus) -> &SessionState {
        if self.demo_session {
            debug!("demo session active, ignoring provider notification");
            return &self.state;
        }

        let previous = self.state.session().map(Session::role);
        let session = Session::resolve(&self.policy, status.into_identity(), None);
        let role = session.role();

        match previous {
            Some(from) if from == role => debug!(%role, "identity refreshed, role unchanged"),
            Some(from) => info!(%from, to = %role, "session role changed"),
            None => info!(%role, signed_in = session.is_signed_in(), "session determined"),
        }

        self.state = SessionState::Known(session);
        &self.state
    }

    /// Waits for the next provider notification and applies it.
    ///
    /// Returns `None` once the provider has gone away.
    pub async fn next(&mut self) -> Option<&SessionState> {
        let status = self.subscription.recv().await?;
        Some(self.apply(status))
    }

    /// Signs the page out.
    ///
    /// A demo session is cleared locally and the page falls back to
    /// whatever the provider currently reports: its signed-in identity, a
    /// known sign-out, or `Determining` if it has not reported yet. For a
    /// real session the caller must ask the provider to sign out; the
    /// resulting notification updates the state.
    pub fn sign_out(&mut self) -> SignOutAction {
        let action = self
            .state
            .session()
            .map_or(SignOutAction::Nothing, Session::sign_out_action);

        if action == SignOutAction::ClearLocal {
            info!("demo session cleared");
            self.demo_session = false;
            self.state = SessionState::Determining;
            if let Some(status) = self.subscription.current() {
                self.apply(status);
            }
        }
        action
    }
}

impl Drop for SessionWatcher {
    fn drop(&mut self) {
        debug!("session watcher unmounted, identity subscription released");
    }
}
