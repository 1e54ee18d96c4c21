//! Identity records supplied by the external authentication provider.
//!
//! The platform never creates real identities itself. They arrive through
//! identity-change notifications and are only read to resolve a role.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag naming the sign-in method behind an identity.
///
/// Providers report values such as `"password"` for institutional
/// credentials or `"google.com"` for federated sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    /// Tag used for email and password sign-in.
    pub const PASSWORD: &'static str = "password";

    /// Creates a provider tag from a string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the tag for institutional credential sign-in.
    #[must_use]
    pub fn password() -> Self {
        Self::new(Self::PASSWORD)
    }

    /// Returns the provider tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProviderId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// An authenticated user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque unique identifier assigned by the provider.
    uid: String,
    /// Email address, if the provider shared one.
    #[serde(default)]
    email: Option<String>,
    /// Display name, if the user set one.
    #[serde(default)]
    display_name: Option<String>,
    /// Reference to a profile photo.
    #[serde(default)]
    photo_url: Option<String>,
    /// Sign-in methods linked to this identity.
    #[serde(default)]
    providers: Vec<ProviderId>,
}

impl Identity {
    /// Creates an identity with only its provider-assigned id.
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
            photo_url: None,
            providers: Vec::new(),
        }
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Sets the profile photo reference.
    #[must_use]
    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }

    /// Adds a sign-in provider tag.
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<ProviderId>) -> Self {
        let provider = provider.into();
        if !self.providers.contains(&provider) {
            self.providers.push(provider);
        }
        self
    }

    /// Returns the provider-assigned id.
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Returns the email address, if available.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the display name, if available.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the profile photo reference, if available.
    #[must_use]
    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }

    /// Returns the linked sign-in provider tags.
    #[must_use]
    pub fn providers(&self) -> &[ProviderId] {
        &self.providers
    }

    /// Name used when greeting the user: display name, then email.
    #[must_use]
    pub fn greeting_name(&self) -> Option<&str> {
        self.display_name().or(self.email())
    }

    /// Two-letter avatar fallback derived from the display name or email.
    #[must_use]
    pub fn initials(&self) -> String {
        initials(self.display_name(), self.email())
    }
}

/// Upper-cased first two characters of the name, else of the email.
pub(crate) fn initials(display_name: Option<&str>, email: Option<&str>) -> String {
    display_name
        .filter(|n| !n.is_empty())
        .or(email.filter(|e| !e.is_empty()))
        .map(|source| source.chars().take(2).collect::<String>().to_uppercase())
        .unwrap_or_else(|| "??".to_string())
}
