//! Orderdesk Backoffice - order projection and lifecycle engine.
//!
//! This crate turns raw records from a remote order-management service into
//! canonical [`orders::OrderView`] projections and governs which status
//! transitions an order may legally undergo, under an approval gate and
//! optimistic-concurrency versioning.
//!
//! # Architecture
//!
//! - [`backend`] - the transport seam: the [`backend::OrderGateway`] trait
//!   and its production HTTP implementation, [`backend::OrdersClient`]
//! - [`orders`] - the projection builder and the lifecycle controller
//! - [`config`] - environment-driven configuration
//!
//! The engine never mutates an order locally: every successful mutation is
//! followed by a re-fetch so the held version token is always the backend's.
//!
//! # Example
//!
//! ```rust,ignore
//! use orderdesk_backoffice::config::BackofficeConfig;
//! use orderdesk_backoffice::backend::OrdersClient;
//! use orderdesk_backoffice::orders::OrderSession;
//! use orderdesk_core::{OrderId, OrderStatus};
//!
//! let config = BackofficeConfig::from_env()?;
//! let client = OrdersClient::new(&config);
//!
//! let mut session = OrderSession::open(client, &OrderId::new("ord-1")).await?;
//! session.begin_transition(OrderStatus::Delivered)?;
//! session.confirm_transition().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod orders;

pub use backend::{BackendError, OrderGateway, OrdersClient};
pub use config::{BackofficeConfig, ConfigError};
pub use orders::{LifecycleError, OrderSession, OrderView};
