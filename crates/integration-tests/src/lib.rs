//! Integration test support for Orderdesk.
//!
//! [`InMemoryGateway`] stands in for the remote order-management service and
//! enforces its rules faithfully:
//!
//! - mutations with a stale version fail with a concurrency conflict,
//! - every successful mutation bumps the version,
//! - transitions are re-validated on the backend side, so a test can observe
//!   a backend rejection even when the local pre-check passed.
//!
//! Tests drive the real engine (`OrderSession`, the projection builder)
//! against this gateway; only the HTTP transport is substituted.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use orderdesk_backoffice::backend::types::{RawCustom, RawCustomFields, RawOrderRecord};
use orderdesk_backoffice::backend::{BackendError, OrderGateway};
use orderdesk_core::{OrderId, OrderStatus, Version};

/// In-memory stand-in for the order-management backend.
///
/// Clones share the same store, so a test can hold one handle while the
/// engine under test holds another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    orders: Arc<Mutex<BTreeMap<String, RawOrderRecord>>>,
}

impl InMemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a record.
    pub fn insert(&self, record: RawOrderRecord) {
        self.lock().insert(record.id.to_string(), record);
    }

    /// The current version of an order, as the backend sees it.
    #[must_use]
    pub fn current_version(&self, id: &OrderId) -> Option<Version> {
        self.lock().get(id.as_str()).map(|record| record.version)
    }

    /// The current state of an order, as the backend sees it.
    #[must_use]
    pub fn current_state(&self, id: &OrderId) -> Option<OrderStatus> {
        self.lock().get(id.as_str()).map(|record| record.order_state)
    }

    /// Move an order's state behind the client's back, without bumping the
    /// version. Simulates backend-side rules the client cannot see, so
    /// tests can observe a rejection despite a passing local pre-check.
    pub fn force_state(&self, id: &OrderId, state: OrderStatus) {
        if let Some(record) = self.lock().get_mut(id.as_str()) {
            record.order_state = state;
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, RawOrderRecord>> {
        self.orders.lock().expect("gateway store lock poisoned")
    }
}

impl OrderGateway for InMemoryGateway {
    async fn fetch_order(&self, id: &OrderId) -> Result<RawOrderRecord, BackendError> {
        self.lock()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| BackendError::NotFound(id.to_string()))
    }

    async fn fetch_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<RawOrderRecord>, BackendError> {
        Ok(self
            .lock()
            .values()
            .filter(|record| status.is_none_or(|wanted| record.order_state == wanted))
            .cloned()
            .collect())
    }

    async fn approve(&self, id: &OrderId, version: Version) -> Result<(), BackendError> {
        let mut orders = self.lock();
        let record = orders
            .get_mut(id.as_str())
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;

        if record.version != version {
            return Err(BackendError::ConcurrencyConflict(format!(
                "expected version {}, got {version}",
                record.version
            )));
        }

        record
            .custom
            .get_or_insert_with(RawCustom::default)
            .fields
            .is_approved = true;
        record.version = Version::new(record.version.value() + 1);
        Ok(())
    }

    async fn submit_transition(
        &self,
        id: &OrderId,
        version: Version,
        target: OrderStatus,
    ) -> Result<(), BackendError> {
        let mut orders = self.lock();
        let record = orders
            .get_mut(id.as_str())
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;

        if record.version != version {
            return Err(BackendError::ConcurrencyConflict(format!(
                "expected version {}, got {version}",
                record.version
            )));
        }

        // The backend re-validates on its own; the client pre-check is only
        // an optimistic shortcut.
        let approved = record
            .custom
            .as_ref()
            .is_some_and(|custom| custom.fields.is_approved);
        if !approved {
            return Err(BackendError::TransitionRejected(
                "order is not approved".to_string(),
            ));
        }
        if !record.order_state.can_transition_to(target) {
            return Err(BackendError::TransitionRejected(format!(
                "{} cannot move to {target}",
                record.order_state
            )));
        }

        record.order_state = target;
        record.version = Version::new(record.version.value() + 1);
        Ok(())
    }
}

/// Build a raw order record the way the backend would report it.
#[must_use]
pub fn order_record(id: &str, version: u64, state: &str, approved: bool) -> RawOrderRecord {
    let mut record: RawOrderRecord = serde_json::from_value(serde_json::json!({
        "id": id,
        "version": version,
        "orderState": state,
        "createdAt": "2026-03-10T08:15:00Z",
        "lastModifiedAt": "2026-03-11T16:40:00Z",
        "totalPrice": { "centAmount": 12345, "currencyCode": "EUR" },
        "shippingInfo": { "shippingMethodName": "DHL", "price": { "centAmount": 495 } },
        "taxedPrice": {
            "totalNet": { "centAmount": 11850 },
            "taxPortions": [
                { "name": "VAT", "rate": 0.19, "amount": { "centAmount": 2252 } },
            ],
        },
        "lineItems": [
            {
                "id": "li-1",
                "name": { "en-US": "Desk Lamp", "de-DE": "Schreibtischlampe" },
                "quantity": 2,
                "price": { "value": { "centAmount": 5925 } },
                "totalPrice": { "centAmount": 11850 },
                "variant": { "sku": "LAMP-2", "images": [{ "url": "https://cdn.example/lamp.jpg" }] },
            },
        ],
        "shippingAddress": {
            "firstName": "Ada",
            "lastName": "Berg",
            "streetName": "Lindenweg",
            "streetNumber": "12a",
            "city": "Bremen",
            "postalCode": "28195",
            "country": "DE",
            "mobile": "+49 421 555 0101",
        },
    }))
    .expect("fixture must deserialize");

    record.custom = Some(RawCustom {
        fields: RawCustomFields {
            is_approved: approved,
            delivery_type: None,
        },
    });
    record
}
