//! Canonical order view model, projection, and lifecycle control.
//!
//! An [`OrderView`] is rebuilt from a fresh backend fetch every time - there
//! is no incremental mutation. After any successful approval or transition
//! the record is re-fetched rather than patched, so the held version token
//! is always the backend's authoritative one.

pub mod lifecycle;
pub mod projection;

pub use lifecycle::{IllegalTransitionReason, LifecycleError, OrderSession, check_transition};

use chrono::{DateTime, Utc};
use orderdesk_core::{CurrencyCode, DeliveryType, OrderId, OrderStatus, Version};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::backend::{BackendError, OrderGateway};

/// Canonical, currency-major-unit projection of a backend order record.
///
/// Immutable once built. Money fields carry two-fractional-digit major
/// units in [`OrderView::currency`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    pub id: OrderId,
    /// Concurrency token to echo on the next mutating request.
    pub version: Version,
    pub status: OrderStatus,
    /// Approval gate; while false no status transition may be submitted.
    pub is_approved: bool,
    pub customer: CustomerName,
    pub lines: Vec<OrderLine>,
    pub sub_total: Decimal,
    pub shipping_cost: Decimal,
    /// Positive means money taken off: sum of line totals minus subtotal.
    pub discount: Decimal,
    pub grand_total: Decimal,
    pub tax_breakdown: Vec<TaxLine>,
    pub payments: Vec<PaymentView>,
    pub shipping_address: Option<ShippingAddress>,
    pub delivery_type: DeliveryType,
    pub currency: CurrencyCode,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Statuses reachable in one transition, from the status alone. The
    /// approval gate is evaluated separately by the lifecycle controller.
    pub legal_next_states: Vec<OrderStatus>,
}

/// A normalized order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub sku: String,
    pub unit_price: Decimal,
    pub quantity: i64,
    pub line_total: Decimal,
    pub image_url: String,
}

/// One tax portion. The taxable base is the order's single net total,
/// repeated on every row exactly as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxLine {
    pub description: String,
    /// Percentage, not fraction (19.0 means 19%).
    pub rate_percent: f64,
    pub taxable_base: Decimal,
    pub tax_amount: Decimal,
}

/// A payment attached to the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentView {
    pub method: String,
    pub amount: Decimal,
    pub transaction_id: String,
}

/// Normalized shipping address. Missing optional fields become empty
/// strings, never null, so consuming views need no guards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub company: String,
    pub street_line1: String,
    pub street_line2: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub country: String,
    pub phone_number: String,
}

/// Customer name, derived from the shipping address when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerName {
    pub first_name: String,
    pub last_name: String,
}

/// Fetch one order and project it.
///
/// # Errors
///
/// Propagates backend errors unchanged; projection itself cannot fail.
pub async fn load_order<G: OrderGateway>(
    gateway: &G,
    id: &OrderId,
) -> Result<OrderView, BackendError> {
    Ok(projection::build(gateway.fetch_order(id).await?))
}

/// Fetch the store's orders, optionally filtered by status, and project
/// each record.
///
/// # Errors
///
/// Propagates backend errors unchanged.
pub async fn load_orders<G: OrderGateway>(
    gateway: &G,
    status: Option<OrderStatus>,
) -> Result<Vec<OrderView>, BackendError> {
    Ok(gateway
        .fetch_orders(status)
        .await?
        .into_iter()
        .map(projection::build)
        .collect())
}
