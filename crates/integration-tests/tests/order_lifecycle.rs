//! End-to-end lifecycle scenarios against the in-memory backend.
//!
//! These drive the real engine - `OrderSession`, the projection builder and
//! the gate - with only the HTTP transport substituted.

use orderdesk_backoffice::backend::BackendError;
use orderdesk_backoffice::orders::{IllegalTransitionReason, LifecycleError, OrderSession};
use orderdesk_core::{OrderId, OrderStatus, Version};
use orderdesk_integration_tests::{InMemoryGateway, order_record};

#[tokio::test]
async fn shipped_order_is_delivered_and_refetched() {
    let gateway = InMemoryGateway::new();
    gateway.insert(order_record("ord-1", 5, "Shipped", true));

    let mut session = OrderSession::open(gateway.clone(), &OrderId::new("ord-1"))
        .await
        .expect("order exists");

    assert_eq!(session.view().status, OrderStatus::Shipped);
    assert_eq!(
        session.view().legal_next_states,
        vec![OrderStatus::Delivered, OrderStatus::Returned]
    );

    session
        .begin_transition(OrderStatus::Delivered)
        .expect("Delivered is legal from Shipped");
    session
        .confirm_transition()
        .await
        .expect("backend accepts the transition");

    // The fresh fetch carries the authoritative new state and version.
    assert_eq!(session.view().status, OrderStatus::Delivered);
    assert_eq!(session.view().version, Version::new(6));
    assert_eq!(
        gateway.current_version(&OrderId::new("ord-1")),
        Some(Version::new(6))
    );
}

#[tokio::test]
async fn second_approve_with_stale_version_conflicts() {
    let gateway = InMemoryGateway::new();
    gateway.insert(order_record("ord-2", 1, "Open", false));
    let id = OrderId::new("ord-2");

    let mut first = OrderSession::open(gateway.clone(), &id)
        .await
        .expect("order exists");
    let mut second = OrderSession::open(gateway.clone(), &id)
        .await
        .expect("order exists");

    first.approve().await.expect("first approval wins");
    assert!(first.view().is_approved);
    assert_eq!(first.view().version, Version::new(2));

    // The second session still holds version 1.
    let err = second.approve().await.expect_err("stale version must lose");
    assert!(matches!(
        err,
        LifecycleError::Backend(BackendError::ConcurrencyConflict(_))
    ));
    assert_eq!(second.view().version, Version::new(1));

    // After a refresh the order is already approved; no retry needed.
    second.refresh().await.expect("refresh picks up the update");
    assert!(second.view().is_approved);
}

#[tokio::test]
async fn approval_opens_the_gate_for_transitions() {
    let gateway = InMemoryGateway::new();
    gateway.insert(order_record("ord-3", 1, "Open", false));

    let mut session = OrderSession::open(gateway.clone(), &OrderId::new("ord-3"))
        .await
        .expect("order exists");

    let err = session
        .begin_transition(OrderStatus::Confirmed)
        .expect_err("gate is closed before approval");
    assert!(matches!(
        err,
        LifecycleError::IllegalTransition(IllegalTransitionReason::NotApproved)
    ));

    session.approve().await.expect("approval succeeds");
    assert!(session.view().is_approved);

    session
        .begin_transition(OrderStatus::Confirmed)
        .expect("gate is open now");
    session
        .confirm_transition()
        .await
        .expect("transition succeeds");
    assert_eq!(session.view().status, OrderStatus::Confirmed);
}

#[tokio::test]
async fn backend_rejection_overrules_passing_local_check() {
    let gateway = InMemoryGateway::new();
    gateway.insert(order_record("ord-4", 3, "Shipped", true));
    let id = OrderId::new("ord-4");

    let mut session = OrderSession::open(gateway.clone(), &id)
        .await
        .expect("order exists");
    session
        .begin_transition(OrderStatus::Delivered)
        .expect("legal locally");

    // The backend moved the order behind our back without a version bump,
    // so the submit passes the version check but fails its rule check.
    gateway.force_state(&id, OrderStatus::Cancelled);

    let err = session
        .confirm_transition()
        .await
        .expect_err("backend is the final authority");
    assert!(matches!(
        err,
        LifecycleError::Backend(BackendError::TransitionRejected(_))
    ));

    // Locally nothing moved: the stale view and the intent are intact.
    assert_eq!(session.view().status, OrderStatus::Shipped);
    assert_eq!(session.pending_transition(), Some(OrderStatus::Delivered));
}

#[tokio::test]
async fn cancelling_at_the_confirmation_step_touches_nothing() {
    let gateway = InMemoryGateway::new();
    gateway.insert(order_record("ord-5", 2, "Shipped", true));
    let id = OrderId::new("ord-5");

    let mut session = OrderSession::open(gateway.clone(), &id)
        .await
        .expect("order exists");
    session
        .begin_transition(OrderStatus::Returned)
        .expect("legal locally");
    session.cancel_transition();

    assert_eq!(session.pending_transition(), None);
    assert_eq!(session.view().status, OrderStatus::Shipped);
    assert_eq!(gateway.current_state(&id), Some(OrderStatus::Shipped));
    assert_eq!(gateway.current_version(&id), Some(Version::new(2)));
}

#[tokio::test]
async fn unknown_order_id_surfaces_not_found() {
    let gateway = InMemoryGateway::new();

    let err = OrderSession::open(gateway, &OrderId::new("ord-missing"))
        .await
        .expect_err("nothing seeded");
    assert!(matches!(
        err,
        LifecycleError::Backend(BackendError::NotFound(_))
    ));
}

#[tokio::test]
async fn terminal_orders_offer_no_transitions() {
    let gateway = InMemoryGateway::new();
    gateway.insert(order_record("ord-6", 9, "Cancelled", true));

    let mut session = OrderSession::open(gateway, &OrderId::new("ord-6"))
        .await
        .expect("order exists");

    assert!(session.view().legal_next_states.is_empty());
    for target in orderdesk_core::ALL_STATUSES {
        assert!(
            session.begin_transition(target).is_err(),
            "Cancelled must not reach {target}"
        );
    }
}
