//! Core types for Orderdesk.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod status;

pub use id::{OrderId, Version};
pub use money::{CurrencyCode, Money};
pub use status::{ALL_STATUSES, DeliveryType, OrderStatus, TRANSITIONS};
