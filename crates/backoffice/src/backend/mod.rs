//! Order-management backend client.
//!
//! # Architecture
//!
//! - [`OrderGateway`] is the transport seam the engine consumes: four
//!   single-flight JSON calls, no implicit timeout, no automatic retry.
//!   Conflict and rejection errors surface to the caller unchanged; the
//!   caller decides whether to re-fetch and retry with a fresh version.
//! - [`OrdersClient`] is the production implementation over HTTP. The
//!   backend is the source of truth - no local database, direct API calls.
//! - Bearer credentials are held, not acquired: an external session manager
//!   deposits the token via [`OrdersClient::set_token`].
//!
//! # Example
//!
//! ```rust,ignore
//! use orderdesk_backoffice::backend::{OrderGateway, OrdersClient};
//!
//! let client = OrdersClient::new(&config);
//! client.set_token(token).await;
//!
//! let raw = client.fetch_order(&order_id).await?;
//! client.approve(&order_id, raw.version).await?;
//! ```

mod client;
mod orders;
pub mod types;

pub use client::OrdersClient;

use orderdesk_core::{OrderId, OrderStatus, Version};
use thiserror::Error;

use types::RawOrderRecord;

/// Errors surfaced by the order-management backend or its transport.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Order id is unknown to the backend.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The submitted version no longer matches the backend's current
    /// version; the order was mutated concurrently.
    #[error("Version conflict: {0}")]
    ConcurrencyConflict(String),

    /// The backend refused a transition that passed the local pre-check.
    /// The backend is the final authority.
    #[error("Transition rejected: {0}")]
    TransitionRejected(String),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limited by the backend.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// No bearer token has been deposited by the session manager.
    #[error("No credentials available, sign in first")]
    NoCredentials,

    /// The backend answered with an unexpected status or shape.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// The transport seam to the remote order-management service.
///
/// The production implementation is [`OrdersClient`]; tests substitute an
/// in-memory implementation that enforces the same version and approval
/// rules.
#[allow(async_fn_in_trait)]
pub trait OrderGateway {
    /// Fetch a single order by its opaque id.
    async fn fetch_order(&self, id: &OrderId) -> Result<RawOrderRecord, BackendError>;

    /// Fetch the store's orders, optionally restricted to one status.
    async fn fetch_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<RawOrderRecord>, BackendError>;

    /// Ask the backend to open the approval gate for the given version.
    ///
    /// The response body is treated as opaque; on success the caller must
    /// re-fetch to observe the refreshed record.
    async fn approve(&self, id: &OrderId, version: Version) -> Result<(), BackendError>;

    /// Submit a status transition for the given version.
    async fn submit_transition(
        &self,
        id: &OrderId,
        version: Version,
        target: OrderStatus,
    ) -> Result<(), BackendError>;
}
