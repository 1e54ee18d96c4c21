//! End-to-end role resolution and gating across a page lifetime.

use campus_gallery_platform_access::{
    AccessPolicy, ChannelIdentityProvider, DemoOverride, GateDecision, Identity, IdentityStatus,
    ProviderId, Role, Session, SessionWatcher, should_redirect_to_login,
};
use std::sync::Arc;

const ADMIN: &str = "admin@gehu.ac.in";
const SUPER_ADMIN: &str = "superadmin@gehu.ac.in";

fn provider_sets() -> Vec<Vec<&'static str>> {
    vec![
        vec![],
        vec![ProviderId::PASSWORD],
        vec!["google.com"],
        vec![ProviderId::PASSWORD, "google.com"],
    ]
}

fn identity(uid: &str, email: &str, providers: &[&str]) -> Identity {
    providers
        .iter()
        .fold(Identity::new(uid).with_email(email), |identity, p| {
            identity.with_provider(*p)
        })
}

#[test]
fn super_admin_email_always_resolves_superadmin() {
    let policy = AccessPolicy::default();
    for providers in provider_sets() {
        let identity = identity("uid", SUPER_ADMIN, &providers);
        assert_eq!(
            policy.resolve_role(Some(&identity), None),
            Role::Superadmin,
            "providers: {providers:?}"
        );
    }
}

#[test]
fn admin_email_always_resolves_admin() {
    let policy = AccessPolicy::default();
    for providers in provider_sets() {
        let identity = identity("uid", ADMIN, &providers);
        assert_eq!(
            policy.resolve_role(Some(&identity), None),
            Role::Admin,
            "providers: {providers:?}"
        );
    }
}

#[test]
fn federated_without_elevated_email_is_guest() {
    let policy = AccessPolicy::default();
    for email in ["visitor@gmail.com", "student@gehu.ac.in"] {
        let identity = identity("uid", email, &["google.com"]);
        assert_eq!(policy.resolve_role(Some(&identity), None), Role::Guest);
    }
}

#[test]
fn institutional_without_elevated_email_is_user() {
    let policy = AccessPolicy::default();
    let identity = identity("uid", "student@gehu.ac.in", &[ProviderId::PASSWORD]);
    assert_eq!(policy.resolve_role(Some(&identity), None), Role::User);
}

#[test]
fn demo_override_resolves_without_identity() {
    let policy = AccessPolicy::default();
    let demo = DemoOverride::from_query([("isDemoSuperAdmin", "true"), ("email", SUPER_ADMIN)]);
    assert_eq!(policy.resolve_role(None, demo.as_ref()), Role::Superadmin);
}

#[test]
fn absent_identity_redirects_only_after_determination() {
    let provider = ChannelIdentityProvider::new();
    let mut watcher = SessionWatcher::mount(&provider, Arc::new(AccessPolicy::default()), None);

    assert_eq!(watcher.state().gate(), GateDecision::Wait);

    let state = watcher.apply(IdentityStatus::SignedOut);
    assert_eq!(state.role(), Role::Guest);
    assert_eq!(state.gate(), GateDecision::RedirectToLogin);

    let session = state.session().expect("known");
    assert!(should_redirect_to_login(session, false));
}

#[test]
fn resolution_is_pure() {
    let policy = AccessPolicy::default();
    let identity = identity("uid", "student@gehu.ac.in", &[ProviderId::PASSWORD]);

    let first = Session::resolve(&policy, Some(identity.clone()), None);
    let second = Session::resolve(&policy, Some(identity), None);

    assert_eq!(first, second);
}

#[tokio::test]
async fn pages_share_one_provider_with_independent_sessions() {
    let provider = ChannelIdentityProvider::new();
    let policy = Arc::new(AccessPolicy::default());

    let mut gallery = SessionWatcher::mount(&provider, policy.clone(), None);
    let demo = DemoOverride::active(SUPER_ADMIN);
    let mut events = SessionWatcher::mount(&provider, policy, Some(demo));
    assert_eq!(provider.subscriber_count(), 2);

    provider.publish(IdentityStatus::SignedIn(identity(
        "uid",
        "visitor@gmail.com",
        &["google.com"],
    )));

    let gallery_role = gallery.next().await.expect("provider alive").role();
    let events_role = events.next().await.expect("provider alive").role();
    assert_eq!(gallery_role, Role::Guest);
    assert_eq!(events_role, Role::Superadmin);

    drop(gallery);
    assert_eq!(provider.subscriber_count(), 1);
}
