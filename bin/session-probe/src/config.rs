//! Probe configuration.
//!
//! Loaded via the `config` crate from environment variables prefixed with
//! `CAMPUS`, using `__` to separate nested keys, for example
//! `CAMPUS__ACCESS__ADMIN_EMAIL`. Every field has a default, so an empty
//! environment is valid.

use campus_gallery_core::Result;
use campus_gallery_platform_access::{AccessPolicy, ConfigError};
use rootcause::prelude::*;
use serde::Deserialize;

/// Probe configuration composed from library configs.
#[derive(Debug, Default, Deserialize)]
pub struct ProbeConfig {
    /// Role resolution policy.
    #[serde(default)]
    pub access: AccessPolicy,
}

impl ProbeConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(config::Environment::with_prefix("CAMPUS"))
    }

    fn load(env: config::Environment) -> Result<Self, ConfigError> {
        match Self::from_source(env) {
            Ok(config) => Ok(config),
            Err(e) => {
                let reason = e.to_string();
                Err(e).context(ConfigError::Load { reason })
            }
        }
    }

    fn from_source(env: config::Environment) -> std::result::Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                env.separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("access.federated_providers"),
            )
            .build()?
            .try_deserialize()
    }
}

/// Reads the key/value pairs of a navigation query string.
///
/// Values are form-decoded, so `%40` becomes `@` and `+` becomes a space.
#[must_use]
pub fn demo_pairs(query: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .into_owned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_gallery_platform_access::DemoOverride;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix("CAMPUS").source(Some(source))
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ProbeConfig::load(env(&[])).expect("load");
        assert_eq!(config.access, AccessPolicy::default());
    }

    #[test]
    fn environment_overrides_policy() {
        let config = ProbeConfig::load(env(&[
            ("CAMPUS__ACCESS__ADMIN_EMAIL", "staff@college.edu"),
            ("CAMPUS__ACCESS__NORMALIZE_EMAILS", "true"),
            ("CAMPUS__ACCESS__FEDERATED_PROVIDERS", "google.com,github.com"),
        ]))
        .expect("load");

        assert_eq!(config.access.admin_email(), "staff@college.edu");
        assert!(config.access.normalize_emails());
        assert_eq!(
            config.access.federated_providers(),
            &["google.com".to_string(), "github.com".to_string()]
        );
    }

    #[test]
    fn invalid_value_fails_to_load() {
        let result = ProbeConfig::load(env(&[("CAMPUS__ACCESS__NORMALIZE_EMAILS", "maybe")]));
        assert!(result.is_err());
    }

    #[test]
    fn demo_pairs_parse_query() {
        let pairs = demo_pairs("?isDemoSuperAdmin=true&email=superadmin@gehu.ac.in");
        assert_eq!(
            pairs,
            vec![
                ("isDemoSuperAdmin".to_string(), "true".to_string()),
                ("email".to_string(), "superadmin@gehu.ac.in".to_string()),
            ]
        );
        assert!(demo_pairs("").is_empty());
    }

    #[test]
    fn demo_pairs_decode_percent_and_plus() {
        let pairs = demo_pairs("?isDemoSuperAdmin=true&email=superadmin%40gehu.ac.in&note=a+b");
        assert_eq!(pairs[1].1, "superadmin@gehu.ac.in");
        assert_eq!(pairs[2].1, "a b");
    }

    #[test]
    fn encoded_demo_link_activates_override() {
        let demo = DemoOverride::from_query(demo_pairs(
            "isDemoSuperAdmin=true&email=superadmin%40gehu.ac.in",
        ));
        assert!(AccessPolicy::default().demo_applies(demo.as_ref()));
    }
}
