//! Access policy configuration and role resolution.
//!
//! The policy holds the process-wide constants that decide elevated access:
//! the admin and super-admin addresses, the demo sentinel, and which sign-in
//! providers count as federated. [`AccessPolicy::resolve_role`] is the single
//! place that maps an identity to a [`Role`].
//!
//! Fields with defaults can be omitted when loading from environment variables.

use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::role::Role;
use crate::session::DemoIdentity;

/// Query parameter that requests the demo super-admin bypass.
pub const DEMO_QUERY_FLAG: &str = "isDemoSuperAdmin";

/// Query parameter carrying the email for the demo bypass.
pub const DEMO_QUERY_EMAIL: &str = "email";

/// Configured constants used to resolve roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    /// Address granted the `admin` role.
    /// Default: "admin@gehu.ac.in"
    #[serde(default = "default_admin_email")]
    admin_email: String,
    /// Address granted the `superadmin` role.
    /// Default: "superadmin@gehu.ac.in"
    #[serde(default = "default_super_admin_email")]
    super_admin_email: String,
    /// Sentinel uid carried by synthesized demo identities.
    /// Default: "superadmin-demo-uid"
    #[serde(default = "default_demo_uid")]
    demo_uid: String,
    /// Display label for synthesized demo identities.
    /// Default: "Super Admin (Demo)"
    #[serde(default = "default_demo_display_name")]
    demo_display_name: String,
    /// Provider tags that mark a third-party sign-in.
    /// Default: ["google.com"]
    #[serde(default = "default_federated_providers")]
    federated_providers: Vec<String>,
    /// Compare emails after trimming and lowercasing.
    /// Default: false (exact, case-sensitive match)
    #[serde(default)]
    normalize_emails: bool,
}

fn default_admin_email() -> String {
    "admin@gehu.ac.in".to_string()
}

fn default_super_admin_email() -> String {
    "superadmin@gehu.ac.in".to_string()
}

fn default_demo_uid() -> String {
    "superadmin-demo-uid".to_string()
}

fn default_demo_display_name() -> String {
    "Super Admin (Demo)".to_string()
}

fn default_federated_providers() -> Vec<String> {
    vec!["google.com".to_string()]
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            admin_email: default_admin_email(),
            super_admin_email: default_super_admin_email(),
            demo_uid: default_demo_uid(),
            demo_display_name: default_demo_display_name(),
            federated_providers: default_federated_providers(),
            normalize_emails: false,
        }
    }
}

impl AccessPolicy {
    /// Creates a policy builder starting from the defaults.
    #[must_use]
    pub fn builder() -> AccessPolicyBuilder {
        AccessPolicyBuilder::default()
    }

    /// Returns the address granted the `admin` role.
    #[must_use]
    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    /// Returns the address granted the `superadmin` role.
    #[must_use]
    pub fn super_admin_email(&self) -> &str {
        &self.super_admin_email
    }

    /// Returns the demo sentinel uid.
    #[must_use]
    pub fn demo_uid(&self) -> &str {
        &self.demo_uid
    }

    /// Returns the display label given to demo identities.
    #[must_use]
    pub fn demo_display_name(&self) -> &str {
        &self.demo_display_name
    }

    /// Returns the provider tags treated as federated sign-in.
    #[must_use]
    pub fn federated_providers(&self) -> &[String] {
        &self.federated_providers
    }

    /// Returns true if emails are normalized before comparison.
    #[must_use]
    pub fn normalize_emails(&self) -> bool {
        self.normalize_emails
    }

    /// Resolves the role for an identity and optional demo override.
    ///
    /// Checks run in priority order and the first match wins:
    /// 1. an active demo override for the super-admin address
    /// 2. no identity: `Guest`
    /// 3. super-admin address
    /// 4. admin address
    /// 5. a previously synthesized demo identity
    /// 6. a federated sign-in: `Guest`
    /// 7. otherwise `User`
    ///
    /// Resolution never fails and has no side effects.
    #[must_use]
    pub fn resolve_role(&self, identity: Option<&Identity>, demo: Option<&DemoOverride>) -> Role {
        if self.demo_applies(demo) {
            return Role::Superadmin;
        }

        let Some(identity) = identity else {
            return Role::Guest;
        };

        if self.is_super_admin_email(identity.email()) {
            Role::Superadmin
        } else if self.is_admin_email(identity.email()) {
            Role::Admin
        } else if self.is_demo_identity(identity) {
            Role::Superadmin
        } else if self.is_federated(identity) {
            Role::Guest
        } else {
            Role::User
        }
    }

    /// Returns true if the override requests the demo bypass for the
    /// configured super-admin address.
    #[must_use]
    pub fn demo_applies(&self, demo: Option<&DemoOverride>) -> bool {
        demo.is_some_and(|d| {
            d.active && self.email_matches(Some(d.email.as_str()), &self.super_admin_email)
        })
    }

    /// Builds the placeholder identity used for demo sessions.
    #[must_use]
    pub fn demo_identity(&self) -> DemoIdentity {
        DemoIdentity::new(
            self.demo_uid.clone(),
            self.super_admin_email.clone(),
            self.demo_display_name.clone(),
        )
    }

    /// Returns true if any of the identity's providers is federated.
    #[must_use]
    pub fn is_federated(&self, identity: &Identity) -> bool {
        identity
            .providers()
            .iter()
            .any(|p| self.federated_providers.iter().any(|f| f == p.as_str()))
    }

    fn is_super_admin_email(&self, email: Option<&str>) -> bool {
        self.email_matches(email, &self.super_admin_email)
    }

    fn is_admin_email(&self, email: Option<&str>) -> bool {
        self.email_matches(email, &self.admin_email)
    }

    // Recognizes a synthesized demo identity on re-evaluation.
    fn is_demo_identity(&self, identity: &Identity) -> bool {
        identity.uid() == self.demo_uid && self.is_super_admin_email(identity.email())
    }

    fn email_matches(&self, email: Option<&str>, configured: &str) -> bool {
        let Some(email) = email else {
            return false;
        };
        if self.normalize_emails {
            email.trim().to_lowercase() == configured.trim().to_lowercase()
        } else {
            email == configured
        }
    }
}

/// Builder for `AccessPolicy`.
#[derive(Debug, Default)]
pub struct AccessPolicyBuilder {
    policy: AccessPolicy,
}

impl AccessPolicyBuilder {
    /// Sets the admin address.
    #[must_use]
    pub fn admin_email(mut self, email: impl Into<String>) -> Self {
        self.policy.admin_email = email.into();
        self
    }

    /// Sets the super-admin address.
    #[must_use]
    pub fn super_admin_email(mut self, email: impl Into<String>) -> Self {
        self.policy.super_admin_email = email.into();
        self
    }

    /// Sets the demo sentinel uid.
    #[must_use]
    pub fn demo_uid(mut self, uid: impl Into<String>) -> Self {
        self.policy.demo_uid = uid.into();
        self
    }

    /// Sets the demo display label.
    #[must_use]
    pub fn demo_display_name(mut self, name: impl Into<String>) -> Self {
        self.policy.demo_display_name = name.into();
        self
    }

    /// Adds a federated provider tag.
    #[must_use]
    pub fn add_federated_provider(mut self, provider: impl Into<String>) -> Self {
        let provider = provider.into();
        if !self.policy.federated_providers.contains(&provider) {
            self.policy.federated_providers.push(provider);
        }
        self
    }

    /// Enables or disables email normalization.
    #[must_use]
    pub fn normalize_emails(mut self, normalize: bool) -> Self {
        self.policy.normalize_emails = normalize;
        self
    }

    /// Builds the `AccessPolicy`.
    #[must_use]
    pub fn build(self) -> AccessPolicy {
        self.policy
    }
}

/// Demo bypass request read from navigation parameters at mount time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoOverride {
    /// Whether the bypass flag was set.
    pub active: bool,
    /// Email the bypass claims.
    pub email: String,
}

impl DemoOverride {
    /// Creates an active override for the given email.
    #[must_use]
    pub fn active(email: impl Into<String>) -> Self {
        Self {
            active: true,
            email: email.into(),
        }
    }

    /// Reads an override from query parameters.
    ///
    /// Returns `None` when neither demo parameter is present. The flag is
    /// only active when its value is exactly `"true"`.
    pub fn from_query<I, K, V>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut flag = None;
        let mut email = None;
        for (key, value) in pairs {
            match key.as_ref() {
                DEMO_QUERY_FLAG => flag = Some(value.as_ref() == "true"),
                DEMO_QUERY_EMAIL => email = Some(value.as_ref().to_string()),
                _ => {}
            }
        }

        if flag.is_none() && email.is_none() {
            return None;
        }

        Some(Self {
            active: flag.unwrap_or(false),
            email: email.unwrap_or_default(),
        })
    }
}
