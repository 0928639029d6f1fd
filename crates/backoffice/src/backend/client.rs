//! HTTP client for the order-management backend.

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::RwLock;
use url::Url;

use crate::config::BackofficeConfig;

use super::BackendError;

/// Order-management backend HTTP client.
///
/// Cheap to clone; all clones share one connection pool and one token slot.
/// The client never acquires credentials itself: an external session manager
/// deposits a bearer token with [`set_token`](Self::set_token), and any call
/// made without one fails with [`BackendError::NoCredentials`] before any
/// I/O happens.
#[derive(Clone)]
pub struct OrdersClient {
    inner: Arc<OrdersClientInner>,
}

struct OrdersClientInner {
    client: reqwest::Client,
    base_url: Url,
    store_key: String,
    /// In-memory token slot (persisted externally by the session manager).
    token: RwLock<Option<SecretString>>,
}

impl OrdersClient {
    /// Create a new backend client.
    ///
    /// If the configuration carries a token it is deposited immediately,
    /// which is how headless tools (the CLI) authenticate.
    #[must_use]
    pub fn new(config: &BackofficeConfig) -> Self {
        Self {
            inner: Arc::new(OrdersClientInner {
                client: reqwest::Client::new(),
                base_url: config.api_url.clone(),
                store_key: config.store_key.clone(),
                token: RwLock::new(config.api_token.clone()),
            }),
        }
    }

    /// The store-scope key carried in listing requests.
    #[must_use]
    pub fn store_key(&self) -> &str {
        &self.inner.store_key
    }

    /// Deposit a bearer token (for loading from the session store).
    pub async fn set_token(&self, token: SecretString) {
        *self.inner.token.write().await = Some(token);
    }

    /// Whether a token has been deposited.
    pub async fn has_token(&self) -> bool {
        self.inner.token.read().await.is_some()
    }

    /// Drop the deposited token (sign-out).
    pub async fn clear_token(&self) {
        *self.inner.token.write().await = None;
    }

    async fn bearer_token(&self) -> Result<SecretString, BackendError> {
        self.inner
            .token
            .read()
            .await
            .clone()
            .ok_or(BackendError::NoCredentials)
    }

    /// POST a JSON body and map failure statuses onto the error taxonomy,
    /// returning the successful response for the caller to decode.
    async fn execute<B>(&self, path: &str, body: &B) -> Result<reqwest::Response, BackendError>
    where
        B: Serialize + ?Sized,
    {
        let token = self.bearer_token().await?;
        let url = self
            .inner
            .base_url
            .join(path)
            .map_err(|e| BackendError::Backend(format!("invalid endpoint {path}: {e}")))?;

        let response = self
            .inner
            .client
            .post(url)
            .bearer_auth(token.expose_secret())
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(BackendError::RateLimited(retry_after));
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(BackendError::Unauthorized(
                "invalid or expired access token".to_string(),
            ));
        }

        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(
                failure_detail(response, "order id is unknown").await,
            ));
        }

        if status == StatusCode::CONFLICT {
            return Err(BackendError::ConcurrencyConflict(
                failure_detail(response, "order was modified concurrently").await,
            ));
        }

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(BackendError::TransitionRejected(
                failure_detail(response, "backend refused the state change").await,
            ));
        }

        if !status.is_success() {
            return Err(BackendError::Backend(format!(
                "unexpected status {status}: {}",
                failure_detail(response, "(no body)").await
            )));
        }

        Ok(response)
    }

    /// POST and decode a JSON response.
    pub(super) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(path, body).await?;
        Ok(response.json::<T>().await?)
    }

    /// POST where the success body is opaque and discarded.
    pub(super) async fn post_unit<B>(&self, path: &str, body: &B) -> Result<(), BackendError>
    where
        B: Serialize + ?Sized,
    {
        let _ = self.execute(path, body).await?;
        Ok(())
    }
}

impl std::fmt::Debug for OrdersClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("store_key", &self.inner.store_key)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

async fn failure_detail(response: reqwest::Response, fallback: &str) -> String {
    let text = response.text().await.unwrap_or_default();
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> BackofficeConfig {
        BackofficeConfig {
            api_url: Url::parse("https://orders.example.test/api/").expect("static url"),
            store_key: "store-001".to_string(),
            api_token: None,
        }
    }

    #[tokio::test]
    async fn token_slot_starts_empty_and_is_managed() {
        let client = OrdersClient::new(&test_config());
        assert!(!client.has_token().await);

        client.set_token(SecretString::from("tok-abc")).await;
        assert!(client.has_token().await);

        client.clear_token().await;
        assert!(!client.has_token().await);
    }

    #[tokio::test]
    async fn calls_without_token_fail_before_any_io() {
        let client = OrdersClient::new(&test_config());
        let err = client.bearer_token().await.expect_err("no token deposited");
        assert!(matches!(err, BackendError::NoCredentials));
    }

    #[test]
    fn debug_redacts_the_token() {
        let mut config = test_config();
        config.api_token = Some(SecretString::from("tok-secret"));
        let rendered = format!("{:?}", OrdersClient::new(&config));
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("tok-secret"));
    }
}
