//! Order status and the lifecycle transition table.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a commerce order.
///
/// Mirrors the state tags reported by the order backend. `Open` is the sole
/// initial state for new orders; construction is backend-owned, so this
/// crate only ever observes it. Tags this build does not recognize
/// deserialize to [`Unknown`](Self::Unknown), which has no legal
/// transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Open,
    Confirmed,
    InProgress,
    Shipped,
    Delivered,
    Complete,
    Cancelled,
    Returned,
    /// Catch-all for state tags introduced on the backend after this build.
    #[serde(other)]
    Unknown,
}

/// Every status the dashboard recognizes, in lifecycle order.
pub const ALL_STATUSES: [OrderStatus; 8] = [
    OrderStatus::Open,
    OrderStatus::Confirmed,
    OrderStatus::InProgress,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
    OrderStatus::Complete,
    OrderStatus::Cancelled,
    OrderStatus::Returned,
];

/// The transition table: current status to the statuses reachable in one
/// step.
///
/// This is data, not control flow, so it can be checked exhaustively against
/// [`ALL_STATUSES`]. Lookup is fail-closed: a status absent from the table
/// (including [`OrderStatus::Unknown`]) has no legal transitions.
pub static TRANSITIONS: &[(OrderStatus, &[OrderStatus])] = &[
    (
        OrderStatus::Open,
        &[
            OrderStatus::Confirmed,
            OrderStatus::Complete,
            OrderStatus::Cancelled,
        ],
    ),
    (
        OrderStatus::Confirmed,
        &[OrderStatus::Complete, OrderStatus::Cancelled],
    ),
    (
        OrderStatus::InProgress,
        &[OrderStatus::Shipped, OrderStatus::Cancelled],
    ),
    (
        OrderStatus::Shipped,
        &[OrderStatus::Delivered, OrderStatus::Returned],
    ),
    (
        OrderStatus::Delivered,
        &[OrderStatus::Complete, OrderStatus::Returned],
    ),
    (OrderStatus::Complete, &[OrderStatus::Cancelled]),
    (OrderStatus::Cancelled, &[]),
    (OrderStatus::Returned, &[]),
];

impl OrderStatus {
    /// The statuses this one may legally move to in a single transition.
    ///
    /// A pure function of the status alone; the approval gate is evaluated
    /// separately by the lifecycle controller.
    #[must_use]
    pub fn legal_next_states(self) -> &'static [Self] {
        TRANSITIONS
            .iter()
            .find(|(from, _)| *from == self)
            .map_or(&[], |(_, to)| *to)
    }

    /// Whether `target` is reachable from this status in one step.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.legal_next_states().contains(&target)
    }

    /// Whether no further transitions are possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.legal_next_states().is_empty()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::Open => "Open",
            Self::Confirmed => "Confirmed",
            Self::InProgress => "InProgress",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Complete => "Complete",
            Self::Cancelled => "Cancelled",
            Self::Returned => "Returned",
            Self::Unknown => "Unknown",
        };
        write!(f, "{tag}")
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(Self::Open),
            "Confirmed" => Ok(Self::Confirmed),
            "InProgress" => Ok(Self::InProgress),
            "Shipped" => Ok(Self::Shipped),
            "Delivered" => Ok(Self::Delivered),
            "Complete" => Ok(Self::Complete),
            "Cancelled" => Ok(Self::Cancelled),
            "Returned" => Ok(Self::Returned),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// How an order reaches the customer.
///
/// Carried in the backend's order custom fields; absent means a standard
/// shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum DeliveryType {
    #[default]
    StandardShipment,
    Ship,
    Pickup,
    /// Backend-defined tag this build does not recognize.
    Other(String),
}

impl DeliveryType {
    /// Parse a backend delivery tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Standard Shipment" => Self::StandardShipment,
            "ship" => Self::Ship,
            "pickup" => Self::Pickup,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire tag for this delivery type.
    #[must_use]
    pub fn as_tag(&self) -> &str {
        match self {
            Self::StandardShipment => "Standard Shipment",
            Self::Ship => "ship",
            Self::Pickup => "pickup",
            Self::Other(tag) => tag,
        }
    }
}

impl std::fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

impl From<String> for DeliveryType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<DeliveryType> for String {
    fn from(delivery: DeliveryType) -> Self {
        delivery.as_tag().to_string()
    }
}
