//! Static configuration of the ImageKit.io client.
//!
//! [`ApiConfig`] describes where and how requests are sent,
//! [`Credentials`] describes who sends them.
//! Both are immutable once handed to [`crate::api::ImageKit`].

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
pub use validator::Validate;

/// The documented defaults of [`ApiConfig`] as a TOML document.
pub const DEFAULT_CONFIG_STR: &str = include_str!("default.toml");

/// The default base URL of the ImageKit.io API.
pub const DEFAULT_UPLOAD_PREFIX: &str = "https://api.imagekit.io/v1";
/// The default request timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 60;
/// The default upload chunk size in bytes.
pub const DEFAULT_CHUNK_SIZE: u64 = 20_000_000;

/// Environment variable holding the private API key.
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";
/// Environment variable holding the public API key.
pub const PUBLIC_KEY_ENV: &str = "PUBLIC_KEY";
/// Environment variable holding the URL endpoint of the media library.
pub const URL_ENDPOINT_ENV: &str = "URL_ENDPOINT";

/// Errors raised while loading [`ApiConfig`] or [`Credentials`].
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("environment variable `{0}` not found")]
    MissingEnv(&'static str),
    /// The config file is not valid TOML.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    /// A value is out of range.
    #[error(transparent)]
    Invalid(#[from] validator::ValidationErrors),
}

/// Transport configuration for requests to the ImageKit.io API.
///
/// Missing keys fall back to [`ApiConfig::default`] when deserializing.
#[non_exhaustive]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Validate)]
#[serde(default)]
pub struct ApiConfig {
    /// The base URL every endpoint is joined onto.
    #[validate(url(message = "upload_prefix must be a valid URL"))]
    pub upload_prefix: String,
    /// Request timeout in seconds, `0` means no timeout.
    pub timeout: u64,
    /// Upload timeout in seconds, `0` means no timeout.
    pub upload_timeout: u64,
    /// Upload chunk size in bytes.
    #[validate(range(min = 1, message = "chunk_size must be greater than 0"))]
    pub chunk_size: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            upload_prefix: String::from(DEFAULT_UPLOAD_PREFIX),
            timeout: DEFAULT_TIMEOUT,
            upload_timeout: 0,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ApiConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// If the document is not valid TOML, or one of the values is out of range.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Set [`Self::upload_prefix`].
    pub fn with_upload_prefix(mut self, upload_prefix: impl Into<String>) -> Self {
        self.upload_prefix = upload_prefix.into();
        self
    }

    /// Set [`Self::timeout`].
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set [`Self::upload_timeout`].
    pub fn with_upload_timeout(mut self, upload_timeout: u64) -> Self {
        self.upload_timeout = upload_timeout;
        self
    }

    /// Set [`Self::chunk_size`].
    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// [`Self::timeout`] as a [`Duration`], `None` if disabled.
    #[inline]
    pub fn timeout_duration(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }

    /// [`Self::upload_timeout`] as a [`Duration`], `None` if disabled.
    #[inline]
    pub fn upload_timeout_duration(&self) -> Option<Duration> {
        (self.upload_timeout > 0).then(|| Duration::from_secs(self.upload_timeout))
    }
}

/// The keys of an ImageKit.io account.
///
/// Only `private_key` is needed to call the API, it is sent as the
/// basic-auth user name. `Debug` never prints it.
#[derive(Clone, Default, Deserialize, Validate)]
pub struct Credentials {
    /// Private API key, required.
    #[validate(length(min = 1, message = "private_key must not be empty"))]
    pub private_key: String,
    /// Public API key.
    #[serde(default)]
    pub public_key: String,
    /// URL endpoint of the media library, e.g. `https://ik.imagekit.io/demo`.
    #[serde(default)]
    pub url_endpoint: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .field("url_endpoint", &self.url_endpoint)
            .finish()
    }
}

impl Credentials {
    /// Credentials with only a private key.
    pub fn new(private_key: impl Into<String>) -> Self {
        Self {
            private_key: private_key.into(),
            ..Self::default()
        }
    }

    /// Set [`Self::public_key`].
    pub fn with_public_key(mut self, public_key: impl Into<String>) -> Self {
        self.public_key = public_key.into();
        self
    }

    /// Set [`Self::url_endpoint`].
    pub fn with_url_endpoint(mut self, url_endpoint: impl Into<String>) -> Self {
        self.url_endpoint = url_endpoint.into();
        self
    }

    /// Read the keys from [`PRIVATE_KEY_ENV`], [`PUBLIC_KEY_ENV`] and [`URL_ENDPOINT_ENV`].
    ///
    /// # Errors
    ///
    /// If `PRIVATE_KEY` is not set. The other two are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let private_key = lookup(PRIVATE_KEY_ENV).ok_or(ConfigError::MissingEnv(PRIVATE_KEY_ENV))?;
        Ok(Self {
            private_key,
            public_key: lookup(PUBLIC_KEY_ENV).unwrap_or_default(),
            url_endpoint: lookup(URL_ENDPOINT_ENV).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_config() -> anyhow::Result<()> {
        let config = ApiConfig::from_toml_str(DEFAULT_CONFIG_STR)?;
        assert_eq!(config, ApiConfig::default());
        Ok(())
    }

    #[test]
    fn test_missing_keys_use_defaults() -> anyhow::Result<()> {
        let config = ApiConfig::from_toml_str("timeout = 5")?;
        assert_eq!(config.timeout, 5);
        assert_eq!(config.upload_prefix, DEFAULT_UPLOAD_PREFIX);
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        Ok(())
    }

    #[test]
    fn test_parse_invalid_config() {
        ApiConfig::from_toml_str(r#"upload_prefix = "not a url""#)
            .expect_err("bad url should be invalid");
        ApiConfig::from_toml_str("chunk_size = 0").expect_err("zero chunk size should be invalid");
    }

    #[test]
    fn test_timeout_duration() {
        let config = ApiConfig::default();
        assert_eq!(config.timeout_duration(), Some(Duration::from_secs(60)));
        assert_eq!(config.upload_timeout_duration(), None);
        assert_eq!(config.with_timeout(0).timeout_duration(), None);
    }

    #[test]
    fn test_credentials_from_lookup() {
        let creds = Credentials::from_lookup(|key| match key {
            PRIVATE_KEY_ENV => Some(String::from("private_xxx")),
            URL_ENDPOINT_ENV => Some(String::from("https://ik.imagekit.io/demo")),
            _ => None,
        })
        .unwrap();
        assert_eq!(creds.private_key, "private_xxx");
        assert_eq!(creds.public_key, "");
        assert_eq!(creds.url_endpoint, "https://ik.imagekit.io/demo");

        let err = Credentials::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv(PRIVATE_KEY_ENV)));
    }

    #[test]
    fn test_credentials_debug_redacts_private_key() {
        let creds = Credentials::new("private_secret").with_public_key("public_xxx");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("private_secret"));
        assert!(debug.contains("public_xxx"));
        creds.validate().unwrap();
        Credentials::new("")
            .validate()
            .expect_err("empty private key should be invalid");
    }
}
