//! Per-driver earnings reports.
//!
//! Reports are derived on demand from the full ride set and never
//! persisted or incrementally updated. Only closed rides contribute; an
//! open ride has no defined fare and is skipped silently.

use std::collections::BTreeMap;

use jitney_types::{Ride, RideKind};
use serde::Serialize;

use crate::fare::ride_fee;

/// Flat platform fee in cents deducted from every ride's payment.
pub const PLATFORM_FEE: i64 = 30;

/// Aggregate earnings for one driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverReport {
    /// Driver login.
    pub driver: String,
    /// Number of closed rides that contributed.
    pub rides: u32,
    /// Total net payment in cents (fees minus the platform fee per ride).
    #[serde(rename = "payment")]
    pub payment_cents: i64,
}

/// Aggregate rides into per-driver reports.
///
/// Open rides are skipped; a driver with no closed rides gets no entry.
/// Output order is unspecified -- callers must treat the result as a set.
pub fn by_driver(rides: &[Ride]) -> Vec<DriverReport> {
    let mut reports: BTreeMap<&str, DriverReport> = BTreeMap::new();

    for ride in rides {
        let Some(end) = ride.end else {
            continue;
        };
        let fee = ride_fee(end - ride.start, ride.distance, ride.kind == RideKind::Shared);

        let entry = reports
            .entry(ride.driver.as_str())
            .or_insert_with(|| DriverReport {
                driver: ride.driver.clone(),
                rides: 0,
                payment_cents: 0,
            });
        entry.rides += 1;
        entry.payment_cents += fee - PLATFORM_FEE;
    }

    reports.into_values().collect()
}
