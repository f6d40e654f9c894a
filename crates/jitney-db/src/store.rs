//! The ride store facade and its `PostgreSQL` implementation.
//!
//! [`RideStore`] is the narrow contract the rest of the service depends
//! on: single-row add/get/update plus a full-set read for report
//! generation. The store provides per-row atomicity only; concurrent
//! updates to the same ride are not serialized here and resolve
//! last-write-wins.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jitney_types::{Ride, RideId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreError;

/// Persistent ride storage contract.
///
/// `get` on an absent ID yields [`StoreError::RideNotFound`], never a
/// generic error, so the cache-aside path can branch on it. `update`
/// replaces the full record; callers read-modify-write whole rides.
#[async_trait]
pub trait RideStore: Send + Sync {
    /// Insert a new ride row.
    async fn add(&self, ride: &Ride) -> Result<(), StoreError>;

    /// Fetch a ride by ID.
    async fn get(&self, id: RideId) -> Result<Ride, StoreError>;

    /// Replace an existing ride row in full.
    async fn update(&self, ride: &Ride) -> Result<(), StoreError>;

    /// Fetch the full ride set, for report generation.
    async fn list(&self) -> Result<Vec<Ride>, StoreError>;

    /// Probe the store with a real query.
    async fn health(&self) -> Result<(), StoreError>;
}

/// [`RideStore`] backed by `PostgreSQL`.
#[derive(Clone)]
pub struct PgRideStore {
    pool: PgPool,
}

impl PgRideStore {
    /// Create a store over a connection pool (pool clones share
    /// connections).
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw `rides` row; the kind label is decoded fail-closed into
/// [`jitney_types::RideKind`] when converting to a [`Ride`].
#[derive(Debug, sqlx::FromRow)]
struct RideRow {
    id: Uuid,
    driver: String,
    kind: String,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    distance: f64,
}

impl RideRow {
    fn into_ride(self) -> Result<Ride, StoreError> {
        let id = RideId::from(self.id);
        let kind = self.kind.parse().map_err(|_| StoreError::InvalidRow {
            id,
            reason: format!("unknown kind label {:?}", self.kind),
        })?;
        Ok(Ride {
            id,
            driver: self.driver,
            kind,
            start: self.start_time,
            end: self.end_time,
            distance: self.distance,
        })
    }
}

const SELECT_COLUMNS: &str = "id, driver, kind, start_time, end_time, distance";

#[async_trait]
impl RideStore for PgRideStore {
    async fn add(&self, ride: &Ride) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO rides (id, driver, kind, start_time, end_time, distance)
              VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(ride.id.into_inner())
        .bind(&ride.driver)
        .bind(ride.kind.as_label())
        .bind(ride.start)
        .bind(ride.end)
        .bind(ride.distance)
        .execute(&self.pool)
        .await?;

        tracing::debug!(ride_id = %ride.id, driver = %ride.driver, "Ride inserted");
        Ok(())
    }

    async fn get(&self, id: RideId) -> Result<Ride, StoreError> {
        let row = sqlx::query_as::<_, RideRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM rides WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await?;

        row.map_or(Err(StoreError::RideNotFound(id)), RideRow::into_ride)
    }

    async fn update(&self, ride: &Ride) -> Result<(), StoreError> {
        let result = sqlx::query(
            r"UPDATE rides
              SET driver = $2, kind = $3, start_time = $4, end_time = $5, distance = $6
              WHERE id = $1",
        )
        .bind(ride.id.into_inner())
        .bind(&ride.driver)
        .bind(ride.kind.as_label())
        .bind(ride.start)
        .bind(ride.end)
        .bind(ride.distance)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RideNotFound(ride.id));
        }

        tracing::debug!(ride_id = %ride.id, "Ride updated");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Ride>, StoreError> {
        let rows = sqlx::query_as::<_, RideRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM rides ORDER BY start_time"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RideRow::into_ride).collect()
    }

    async fn health(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jitney_types::RideKind;

    use super::*;

    fn row(kind: &str) -> RideRow {
        RideRow {
            id: Uuid::new_v4(),
            driver: String::from("otto"),
            kind: kind.to_owned(),
            start_time: Utc::now(),
            end_time: None,
            distance: 0.0,
        }
    }

    #[test]
    fn row_decodes_known_kind_labels() {
        let ride = row("shared").into_ride().ok();
        assert_eq!(ride.map(|r| r.kind), Some(RideKind::Shared));
    }

    #[test]
    fn row_with_unknown_kind_fails_closed() {
        let err = row("luxury").into_ride();
        assert!(matches!(err, Err(StoreError::InvalidRow { .. })));
    }
}
