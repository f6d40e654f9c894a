//! Serialized read-response shape, also used as the cache value.
//!
//! The snapshot is what `GET /rides/{id}` returns and what the cache
//! stores verbatim, so a cache hit can be served without re-encoding.
//! Zero/omitted fields are elided: `end` while the ride is in progress,
//! `distance` while it is still zero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::RideId;
use crate::ride::{Ride, RideKind};

/// JSON shape `{id, driver, kind, start, end?, distance?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideSnapshot {
    /// Ride identifier.
    pub id: RideId,
    /// Driver login.
    pub driver: String,
    /// Kind label, `"shared"` or `"private"`.
    pub kind: RideKind,
    /// UTC start timestamp.
    pub start: DateTime<Utc>,
    /// UTC end timestamp; absent while the ride is in progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    /// Traveled distance in miles; absent while zero.
    #[serde(default, skip_serializing_if = "distance_unset")]
    pub distance: f64,
}

// Exact +0.0; validated distances are never negative, so -0.0 and NaN do
// not occur here.
fn distance_unset(distance: &f64) -> bool {
    distance.to_bits() == 0
}

impl From<&Ride> for RideSnapshot {
    fn from(ride: &Ride) -> Self {
        Self {
            id: ride.id,
            driver: ride.driver.clone(),
            kind: ride.kind,
            start: ride.start,
            end: ride.end,
            distance: ride.distance,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn open_ride_elides_end_and_distance() {
        let ride = Ride::open("otto", RideKind::Shared);
        let value = serde_json::to_value(RideSnapshot::from(&ride)).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("end"));
        assert!(!object.contains_key("distance"));
        assert_eq!(object.get("kind").unwrap(), "shared");
        assert_eq!(object.get("driver").unwrap(), "otto");
    }

    #[test]
    fn closed_ride_carries_end_and_distance() {
        let mut ride = Ride::open("otto", RideKind::Private);
        ride.close(ride.start + chrono::Duration::minutes(20), 5.5)
            .unwrap();
        let value = serde_json::to_value(RideSnapshot::from(&ride)).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("end"));
        assert_eq!(object.get("distance").unwrap().as_f64().unwrap(), 5.5);
    }

    #[test]
    fn snapshot_round_trips() {
        let mut ride = Ride::open("vera", RideKind::Shared);
        ride.close(ride.start + chrono::Duration::hours(1), 12.0)
            .unwrap();
        let snapshot = RideSnapshot::from(&ride);
        let bytes = serde_json::to_vec(&snapshot).unwrap();
        let decoded: RideSnapshot = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded, snapshot);
    }
}
