//! Newtype identifiers for backend-owned entities.
//!
//! Order ids are opaque strings minted by the order backend; versions are
//! its optimistic-concurrency tokens. Both are newtypes so they cannot be
//! mixed up with display strings or counts.

use serde::{Deserialize, Serialize};

/// Opaque backend identifier for an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Create an id from a backend-supplied value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Optimistic-concurrency token for an order.
///
/// The backend increments the version on every mutation. A version is never
/// advanced locally: it is read from the last fetched record and echoed back
/// verbatim on the next mutating request. A mismatch on write signals a lost
/// update.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Version(u64);

impl Version {
    /// Wrap a backend-reported version number.
    #[must_use]
    pub const fn new(version: u64) -> Self {
        Self(version)
    }

    /// Get the underlying integer value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Version {
    fn from(version: u64) -> Self {
        Self(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_is_opaque_and_transparent_in_serde() {
        let id = OrderId::new("ord-5c1a");
        assert_eq!(id.as_str(), "ord-5c1a");
        assert_eq!(id.to_string(), "ord-5c1a");
    }

    #[test]
    fn versions_compare_numerically() {
        assert!(Version::new(2) > Version::new(1));
        assert_eq!(Version::new(7).value(), 7);
    }
}
