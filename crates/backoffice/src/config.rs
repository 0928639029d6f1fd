//! Backoffice configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ORDERDESK_API_URL` - Base URL of the order-management service
//! - `ORDERDESK_STORE_KEY` - Store-scope key used to filter order listings
//!
//! ## Optional
//! - `ORDERDESK_API_TOKEN` - Bearer token deposited into the client at
//!   construction. Interactive callers get their token from the session
//!   manager instead; setting this is how headless tools authenticate.

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Backoffice application configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct BackofficeConfig {
    /// Base URL of the order-management service
    pub api_url: Url,
    /// Store-scope key carried in listing requests
    pub store_key: String,
    /// Bearer token to deposit at client construction, if any
    pub api_token: Option<SecretString>,
}

impl std::fmt::Debug for BackofficeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackofficeConfig")
            .field("api_url", &self.api_url.as_str())
            .field("store_key", &self.store_key)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl BackofficeConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the token fails placeholder detection.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_base_url("ORDERDESK_API_URL", &required("ORDERDESK_API_URL")?)?;
        let store_key = required("ORDERDESK_STORE_KEY")?;

        let api_token = match std::env::var("ORDERDESK_API_TOKEN") {
            Ok(value) if !value.trim().is_empty() => {
                validate_secret("ORDERDESK_API_TOKEN", &value)?;
                Some(SecretString::from(value))
            }
            _ => None,
        };

        Ok(Self {
            api_url,
            store_key,
            api_token,
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_base_url(name: &str, value: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            name.to_string(),
            "must be a base URL".to_string(),
        ));
    }

    // Url::join drops the last path segment without a trailing slash.
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }

    Ok(url)
}

fn validate_secret(name: &str, value: &str) -> Result<(), ConfigError> {
    let lowered = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lowered.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                name.to_string(),
                format!("looks like a placeholder ({pattern})"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let url = parse_base_url("ORDERDESK_API_URL", "https://orders.example.test/api")
            .expect("valid url");
        assert_eq!(url.as_str(), "https://orders.example.test/api/");

        let joined = url.join("orders/get").expect("join");
        assert_eq!(joined.as_str(), "https://orders.example.test/api/orders/get");
    }

    #[test]
    fn non_base_urls_are_rejected() {
        let err = parse_base_url("ORDERDESK_API_URL", "not a url").expect_err("invalid");
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));

        let err = parse_base_url("ORDERDESK_API_URL", "mailto:ops@example.test")
            .expect_err("cannot be a base");
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn placeholder_tokens_are_rejected() {
        let err =
            validate_secret("ORDERDESK_API_TOKEN", "changeme-please").expect_err("placeholder");
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));

        validate_secret("ORDERDESK_API_TOKEN", "0aGVhZGxlc3MtMjAyNi1rZXk")
            .expect("real-looking token");
    }
}
