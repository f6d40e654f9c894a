//! Ride identifier newtype around [`Uuid`].
//!
//! Ride IDs are opaque to every caller: generated once at ride start,
//! never reused, never parsed for meaning. UUID v4 gives 122 random bits,
//! which makes collision probability negligible without any coordination
//! between request tasks.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RideId(pub Uuid);

impl RideId {
    /// Create a new random identifier (UUID v4).
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Whether this is the all-zero (nil) UUID, i.e. an unset identifier.
    pub const fn is_nil(self) -> bool {
        self.0.is_nil()
    }
}

impl Default for RideId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for RideId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RideId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<RideId> for Uuid {
    fn from(id: RideId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn new_ids_are_unique() {
        let a = RideId::new();
        let b = RideId::new();
        assert_ne!(a, b);
        assert!(!a.is_nil());
    }

    #[test]
    fn serializes_as_plain_uuid_string() {
        let id = RideId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
