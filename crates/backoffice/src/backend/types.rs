//! Wire types for the order-management backend.
//!
//! These mirror the backend's JSON shapes verbatim. Money arrives in minor
//! currency units; every optional section defaults rather than fails, since
//! orders legitimately lack shipping, tax, payment or address data in early
//! lifecycle states. Conversion to the canonical view model happens in
//! [`crate::orders::projection`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use orderdesk_core::{OrderId, OrderStatus, Version};
use serde::{Deserialize, Serialize};

/// A backend-owned order record, as fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrderRecord {
    pub id: OrderId,
    /// Optimistic-concurrency token; echoed on every mutating request.
    pub version: Version,
    pub order_state: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
    #[serde(default)]
    pub total_price: RawMoney,
    #[serde(default)]
    pub taxed_price: Option<RawTaxedPrice>,
    #[serde(default)]
    pub shipping_info: Option<RawShippingInfo>,
    #[serde(default)]
    pub payment_info: Option<RawPaymentInfo>,
    #[serde(default)]
    pub line_items: Vec<RawLineItem>,
    #[serde(default)]
    pub shipping_address: Option<RawAddress>,
    #[serde(default)]
    pub custom: Option<RawCustom>,
}

/// A money amount in minor units (integer cents).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMoney {
    #[serde(default)]
    pub cent_amount: i64,
    #[serde(default)]
    pub currency_code: String,
}

/// Net total plus the tax portions levied on it.
///
/// The backend reports a single net base shared by every portion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTaxedPrice {
    #[serde(default)]
    pub total_net: RawMoney,
    #[serde(default)]
    pub tax_portions: Vec<RawTaxPortion>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTaxPortion {
    #[serde(default)]
    pub name: String,
    /// Fractional rate (0.19 means 19%).
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub amount: RawMoney,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawShippingInfo {
    #[serde(default)]
    pub shipping_method_name: String,
    #[serde(default)]
    pub price: RawMoney,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPaymentInfo {
    #[serde(default)]
    pub payments: Vec<RawPaymentRef>,
}

/// Reference to a payment held by the backend. Only the id is reported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPaymentRef {
    #[serde(default)]
    pub id: String,
}

/// A line item with its locale-keyed display name.
///
/// The name map is a `BTreeMap` so the no-primary-locale fallback is
/// deterministic: sorted key order, not backend iteration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLineItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: BTreeMap<String, String>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub price: Option<RawPrice>,
    #[serde(default)]
    pub total_price: RawMoney,
    #[serde(default)]
    pub variant: Option<RawVariant>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPrice {
    #[serde(default)]
    pub value: RawMoney,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVariant {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub images: Vec<RawImage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    #[serde(default)]
    pub url: String,
}

/// A shipping address as the backend reports it. Every field is optional
/// on the wire and defaults to the empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAddress {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub street_name: String,
    #[serde(default)]
    pub street_number: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub mobile: String,
}

/// Backend custom-field envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCustom {
    #[serde(default)]
    pub fields: RawCustomFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCustomFields {
    /// Approval gate; false until the dedicated approve operation runs.
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub delivery_type: Option<String>,
}

// =============================================================================
// Request/response envelopes
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FetchOrderRequest<'a> {
    pub order_id: &'a OrderId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListOrdersRequest<'a> {
    pub store_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_status: Option<OrderStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApproveOrderRequest<'a> {
    pub order_id: &'a OrderId,
    pub version: Version,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransitionRequest<'a> {
    pub order_id: &'a OrderId,
    pub version: Version,
    pub order_state: OrderStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListOrdersResponse {
    #[serde(default)]
    pub results: Vec<RawOrderRecord>,
}
