//! Order operations against the backend.

use orderdesk_core::{OrderId, OrderStatus, Version};
use tracing::instrument;

use super::types::{
    ApproveOrderRequest, FetchOrderRequest, ListOrdersRequest, ListOrdersResponse, RawOrderRecord,
    TransitionRequest,
};
use super::{BackendError, OrderGateway, OrdersClient};

impl OrderGateway for OrdersClient {
    /// Fetch an order by id.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] for unknown ids, or a transport
    /// error if the request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    async fn fetch_order(&self, id: &OrderId) -> Result<RawOrderRecord, BackendError> {
        self.post("orders/get", &FetchOrderRequest { order_id: id })
            .await
    }

    /// Fetch the store's orders, optionally restricted to one status.
    ///
    /// The store-scope key from configuration rides in the request body, so
    /// the backend only returns orders assigned to this operator's store.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or answers with an error
    /// status.
    #[instrument(skip(self))]
    async fn fetch_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<RawOrderRecord>, BackendError> {
        let response: ListOrdersResponse = self
            .post(
                "orders/search",
                &ListOrdersRequest {
                    store_key: self.store_key(),
                    order_status: status,
                },
            )
            .await?;

        Ok(response.results)
    }

    /// Ask the backend to open the approval gate.
    ///
    /// The response body is opaque; callers re-fetch on success to pick up
    /// the refreshed record and its new version.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::ConcurrencyConflict`] when `version` is
    /// stale, [`BackendError::NotFound`] for unknown ids.
    #[instrument(skip(self), fields(order_id = %id, version = %version))]
    async fn approve(&self, id: &OrderId, version: Version) -> Result<(), BackendError> {
        self.post_unit(
            "orders/approve",
            &ApproveOrderRequest {
                order_id: id,
                version,
            },
        )
        .await
    }

    /// Submit a status transition.
    ///
    /// The local pre-check has already run by the time this is called; the
    /// backend remains the final authority and may still refuse with
    /// [`BackendError::TransitionRejected`].
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::ConcurrencyConflict`] when `version` is
    /// stale, [`BackendError::TransitionRejected`] on a backend-side
    /// refusal, [`BackendError::NotFound`] for unknown ids.
    #[instrument(skip(self), fields(order_id = %id, version = %version, target = %target))]
    async fn submit_transition(
        &self,
        id: &OrderId,
        version: Version,
        target: OrderStatus,
    ) -> Result<(), BackendError> {
        self.post_unit(
            "orders/transition",
            &TransitionRequest {
                order_id: id,
                version,
                order_state: target,
            },
        )
        .await
    }
}
