//! The lifecycle controller: approval gate, transition pre-check, and the
//! two-step confirmation for submitting a status change.
//!
//! Status changes are externally visible and not trivially reversible, so
//! a transition is never submitted in one call: the caller first records an
//! intent with [`OrderSession::begin_transition`], then either confirms or
//! cancels. Local rule violations are rejected before any network call; the
//! backend stays the final authority on everything else.

use orderdesk_core::{OrderId, OrderStatus};
use thiserror::Error;

use crate::backend::{BackendError, OrderGateway};

use super::{OrderView, projection};

/// Why a transition was refused locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalTransitionReason {
    /// The approval gate is closed; no status change may be submitted.
    NotApproved,
    /// `to` is not in the legal-next set of `from`.
    NotReachable { from: OrderStatus, to: OrderStatus },
}

impl std::fmt::Display for IllegalTransitionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotApproved => write!(f, "order is not approved"),
            Self::NotReachable { from, to } => {
                write!(f, "{from} orders cannot move to {to}")
            }
        }
    }
}

/// Errors from the lifecycle controller.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Locally-detected rule violation. No network call was made.
    #[error("Illegal transition: {0}")]
    IllegalTransition(IllegalTransitionReason),

    /// `confirm_transition` was called with no transition begun.
    #[error("No transition pending confirmation")]
    NoPendingTransition,

    /// Backend-surfaced failure, propagated unchanged.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Evaluate both transition preconditions in one place: the approval gate
/// must be open AND `target` must be reachable from the current status in
/// the transition table.
///
/// This is the single source of truth for the rule. Disabling widgets in a
/// UI is a convenience layered on top, never the authority.
///
/// # Errors
///
/// Returns [`LifecycleError::IllegalTransition`] with the failing reason.
pub fn check_transition(view: &OrderView, target: OrderStatus) -> Result<(), LifecycleError> {
    if !view.is_approved {
        return Err(LifecycleError::IllegalTransition(
            IllegalTransitionReason::NotApproved,
        ));
    }

    if !view.status.can_transition_to(target) {
        return Err(LifecycleError::IllegalTransition(
            IllegalTransitionReason::NotReachable {
                from: view.status,
                to: target,
            },
        ));
    }

    Ok(())
}

/// One operator's working session on a single order.
///
/// Holds the last-fetched projection and the pending transition intent.
/// Every successful mutation re-fetches instead of patching locally, so the
/// held version token is always the backend's; on any failure the view and
/// the intent are left exactly as they were.
#[derive(Debug)]
pub struct OrderSession<G> {
    gateway: G,
    view: OrderView,
    pending: Option<OrderStatus>,
}

impl<G: OrderGateway> OrderSession<G> {
    /// Fetch the order and open a session on it.
    ///
    /// # Errors
    ///
    /// Propagates backend errors, including [`BackendError::NotFound`].
    pub async fn open(gateway: G, id: &OrderId) -> Result<Self, LifecycleError> {
        let raw = gateway.fetch_order(id).await?;
        Ok(Self {
            gateway,
            view: projection::build(raw),
            pending: None,
        })
    }

    /// The last-fetched projection.
    #[must_use]
    pub fn view(&self) -> &OrderView {
        &self.view
    }

    /// The target recorded by [`begin_transition`](Self::begin_transition),
    /// if any.
    #[must_use]
    pub fn pending_transition(&self) -> Option<OrderStatus> {
        self.pending
    }

    /// Re-fetch and re-project. This is the only way the held version
    /// advances.
    ///
    /// # Errors
    ///
    /// Propagates backend errors; the held view is untouched on failure.
    pub async fn refresh(&mut self) -> Result<(), LifecycleError> {
        let id = self.view.id.clone();
        let raw = self.gateway.fetch_order(&id).await?;
        self.view = projection::build(raw);
        Ok(())
    }

    /// Ask the backend to open the approval gate, then re-fetch.
    ///
    /// Approval is one-way: once open it cannot be revoked through this
    /// interface.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::ConcurrencyConflict`] when the held version
    /// is stale; the caller may [`refresh`](Self::refresh) and retry.
    pub async fn approve(&mut self) -> Result<(), LifecycleError> {
        let id = self.view.id.clone();
        self.gateway.approve(&id, self.view.version).await?;
        self.refresh().await
    }

    /// Record the intent to move to `target`, validating it locally first.
    /// No backend call is made.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::IllegalTransition`] when the approval gate
    /// is closed or `target` is not reachable from the current status.
    pub fn begin_transition(&mut self, target: OrderStatus) -> Result<(), LifecycleError> {
        check_transition(&self.view, target)?;
        self.pending = Some(target);
        Ok(())
    }

    /// Drop the pending intent. No backend call is made and the held view
    /// is untouched.
    pub fn cancel_transition(&mut self) {
        self.pending = None;
    }

    /// Submit the pending transition with the held version.
    ///
    /// Re-checks the gate, submits, then clears the intent and re-fetches
    /// on success. On failure the view and the intent are left as they
    /// were; the caller decides whether to cancel, or refresh and retry
    /// with the new version.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::NoPendingTransition`] when nothing was begun;
    /// [`LifecycleError::IllegalTransition`] from the local re-check;
    /// otherwise the backend's verdict, unchanged.
    pub async fn confirm_transition(&mut self) -> Result<(), LifecycleError> {
        let target = self.pending.ok_or(LifecycleError::NoPendingTransition)?;
        check_transition(&self.view, target)?;

        let id = self.view.id.clone();
        self.gateway
            .submit_transition(&id, self.view.version, target)
            .await?;

        self.pending = None;
        self.refresh().await
    }
}
