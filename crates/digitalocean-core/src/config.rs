//! Configuration structures for DigitalOcean clients.
//!
//! This module provides the configuration used to construct a client:
//! the API base URL, the two credentials that authenticate every request,
//! and the HTTP timeouts applied by the default transport.

use crate::Error;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Base URL of the DigitalOcean v1 API.
pub const DEFAULT_API_URL: &str = "https://api.digitalocean.com";

/// Environment variable holding the client identifier.
pub const CLIENT_ID_ENV: &str = "DIGITALOCEAN_CLIENT_ID";
/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "DIGITALOCEAN_API_KEY";
/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "DIGITALOCEAN_API_URL";

/// Client identifier and API key sent with every request.
///
/// The API key is kept in a [`SecretString`] and never shows up in `Debug`
/// output.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    api_key: SecretString,
}

impl Credentials {
    /// Create credentials from a client identifier and an API key.
    pub fn new(client_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            api_key: SecretString::from(api_key.into()),
        }
    }

    /// The client identifier.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The API key.
    ///
    /// This exposes the secret, callers must not log it.
    #[must_use]
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Configuration for a DigitalOcean client instance.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct DigitalOceanConfig {
    /// API base URL
    #[validate(url)]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Client identifier
    #[validate(length(min = 1))]
    pub client_id: String,

    /// API key, never serialized
    #[serde(skip_serializing, deserialize_with = "deserialize_secret")]
    pub api_key: SecretString,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Connect timeout in seconds
    #[validate(range(min = 1, max = 60))]
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

impl DigitalOceanConfig {
    /// Create a configuration for the public API with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if either credential is empty.
    pub fn new(client_id: impl Into<String>, api_key: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            base_url: default_base_url(),
            client_id: client_id.into(),
            api_key: SecretString::from(api_key.into()),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        };

        config.check()?;
        Ok(config)
    }

    /// Load the configuration from `DIGITALOCEAN_CLIENT_ID`,
    /// `DIGITALOCEAN_API_KEY` and the optional `DIGITALOCEAN_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if a credential variable is unset or the result fails
    /// validation.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_env_vars(CLIENT_ID_ENV, API_KEY_ENV, API_URL_ENV)
    }

    /// Load the configuration from custom environment variable names.
    ///
    /// # Errors
    ///
    /// Returns an error if a credential variable is unset or the result fails
    /// validation.
    pub fn from_env_vars(
        client_id_var: &str,
        api_key_var: &str,
        url_var: &str,
    ) -> Result<Self, Error> {
        let read = |name: &str| {
            std::env::var(name)
                .map_err(|_| Error::ConfigError(format!("environment variable {name} not set")))
        };

        let mut config = Self::new(read(client_id_var)?, read(api_key_var)?)?;
        if let Ok(url) = std::env::var(url_var) {
            config = config.with_base_url(url)?;
        }
        Ok(config)
    }

    /// Point the client at a different API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not validate.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, Error> {
        self.base_url = base_url.into();
        self.check()?;
        Ok(self)
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set connect timeout in seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, seconds: u64) -> Self {
        self.connect_timeout_secs = seconds;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Credentials carried by this configuration.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            client_id: self.client_id.clone(),
            api_key: self.api_key.clone(),
        }
    }

    /// Parse and validate the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        Url::parse(&self.base_url)
            .map_err(|e| Error::ConfigError(format!("Invalid API base URL: {e}")))
    }

    /// Run field validation plus the checks validator cannot express.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first failing rule.
    pub fn check(&self) -> Result<(), Error> {
        self.validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        if self.api_key.expose_secret().is_empty() {
            return Err(Error::ConfigError("api_key must not be empty".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for DigitalOceanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigitalOceanConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("api_key", &"[REDACTED]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = DigitalOceanConfig::new("test-client-id", "test-api-key").unwrap();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.client_id, "test-client-id");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.connect_timeout_secs, 10);
    }

    #[test]
    fn test_config_rejects_empty_credentials() {
        assert!(DigitalOceanConfig::new("", "key").is_err());
        assert!(matches!(
            DigitalOceanConfig::new("id", ""),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_config_invalid_base_url() {
        let result = DigitalOceanConfig::new("id", "key")
            .unwrap()
            .with_base_url("not-a-url");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = DigitalOceanConfig::new("id", "key")
            .unwrap()
            .with_base_url("http://127.0.0.1:8080")
            .unwrap()
            .with_timeout(60)
            .with_connect_timeout(5);

        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = DigitalOceanConfig::new("id", "key").unwrap();
        config.request_timeout_secs = 0;
        assert!(config.check().is_err());

        config.request_timeout_secs = 301;
        assert!(config.check().is_err());

        config.request_timeout_secs = 30;
        config.connect_timeout_secs = 61;
        assert!(config.check().is_err());

        config.connect_timeout_secs = 10;
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_parse_base_url() {
        let config = DigitalOceanConfig::new("id", "key").unwrap();
        let url = config.parse_base_url().unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("api.digitalocean.com"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = DigitalOceanConfig::new("id", "super-secret").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));

        let credentials = config.credentials();
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("super-secret"));
        assert_eq!(credentials.api_key(), "super-secret");
    }

    #[test]
    fn test_serialization_skips_api_key() {
        let config = DigitalOceanConfig::new("id", "super-secret").unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(!json.contains("api_key"));
    }

    #[test]
    fn test_deserialization_applies_defaults() {
        let config: DigitalOceanConfig =
            serde_json::from_str(r#"{"client_id":"id","api_key":"key"}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.credentials().api_key(), "key");
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_from_env_vars() {
        std::env::set_var("DO_CONFIG_TEST_CLIENT_ID", "env-client");
        std::env::set_var("DO_CONFIG_TEST_API_KEY", "env-key");
        std::env::set_var("DO_CONFIG_TEST_API_URL", "http://localhost:9999");

        let config = DigitalOceanConfig::from_env_vars(
            "DO_CONFIG_TEST_CLIENT_ID",
            "DO_CONFIG_TEST_API_KEY",
            "DO_CONFIG_TEST_API_URL",
        )
        .unwrap();

        assert_eq!(config.client_id, "env-client");
        assert_eq!(config.credentials().api_key(), "env-key");
        assert_eq!(config.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_from_env_vars_missing() {
        let result = DigitalOceanConfig::from_env_vars(
            "DO_CONFIG_TEST_UNSET_ID",
            "DO_CONFIG_TEST_UNSET_KEY",
            "DO_CONFIG_TEST_UNSET_URL",
        );
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }
}
