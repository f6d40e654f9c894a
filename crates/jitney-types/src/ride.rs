//! The ride entity, its kind labels, and lifecycle validation.
//!
//! A ride is created "open" (no end timestamp) by a start operation and
//! transitions exactly once to "closed" (end + distance set). Only a
//! closed ride has a defined fare. Callers validate before any persistence
//! call; validation itself is pure and side-effect free.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::RideId;

/// Whether a ride is pooled with other passengers or exclusive.
///
/// The wire labels are exact and bidirectional: `"shared"` maps to
/// [`RideKind::Shared`], `"private"` to [`RideKind::Private`], and any
/// other string is a decode error. Decoding fails closed on unknown
/// labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RideKind {
    /// Pooled ride; the fare carries a 10% discount.
    Shared,
    /// Exclusive ride at the full fare.
    Private,
}

impl RideKind {
    /// The canonical wire/storage label for this kind.
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Private => "private",
        }
    }
}

impl core::fmt::Display for RideKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_label())
    }
}

impl core::str::FromStr for RideKind {
    type Err = ValidationError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "shared" => Ok(Self::Shared),
            "private" => Ok(Self::Private),
            other => Err(ValidationError::UnknownKind(other.to_owned())),
        }
    }
}

/// A malformed or out-of-range ride field.
///
/// Always the caller's fault; never retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The ride ID is the nil UUID.
    #[error("ride id is unset")]
    MissingId,

    /// The driver identifier is empty.
    #[error("driver is empty")]
    MissingDriver,

    /// The start timestamp is unset (Unix epoch).
    #[error("start timestamp is unset")]
    MissingStart,

    /// The end timestamp precedes the start timestamp.
    #[error("end {end} precedes start {start}")]
    EndBeforeStart {
        /// The ride's start timestamp.
        start: DateTime<Utc>,
        /// The offending end timestamp.
        end: DateTime<Utc>,
    },

    /// The distance is negative or not a number.
    #[error("invalid distance {0}")]
    InvalidDistance(f64),

    /// A kind label that is neither `"shared"` nor `"private"`.
    #[error("unknown ride kind: {0}")]
    UnknownKind(String),

    /// The ride already has an end timestamp and cannot be closed again.
    #[error("ride already ended")]
    AlreadyClosed,
}

/// A single ride record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    /// Opaque unique identifier, generated at start, never reused.
    pub id: RideId,
    /// Driver login the ride belongs to.
    pub driver: String,
    /// Shared or private.
    pub kind: RideKind,
    /// UTC start timestamp, set by the start operation.
    pub start: DateTime<Utc>,
    /// UTC end timestamp; `None` while the ride is in progress.
    pub end: Option<DateTime<Utc>>,
    /// Traveled distance in miles, meaningful only once ended.
    pub distance: f64,
}

impl Ride {
    /// Open a new ride for `driver` starting now.
    pub fn open(driver: impl Into<String>, kind: RideKind) -> Self {
        Self {
            id: RideId::new(),
            driver: driver.into(),
            kind,
            start: Utc::now(),
            end: None,
            distance: 0.0,
        }
    }

    /// Whether the ride has an end timestamp.
    pub const fn is_closed(&self) -> bool {
        self.end.is_some()
    }

    /// Close the ride with its end timestamp and traveled distance.
    ///
    /// The open -> closed transition happens exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AlreadyClosed`] if the ride already has
    /// an end timestamp, [`ValidationError::EndBeforeStart`] if `end`
    /// precedes the start, or [`ValidationError::InvalidDistance`] if
    /// `distance` is negative or NaN.
    pub fn close(&mut self, end: DateTime<Utc>, distance: f64) -> Result<(), ValidationError> {
        if self.is_closed() {
            return Err(ValidationError::AlreadyClosed);
        }
        if end < self.start {
            return Err(ValidationError::EndBeforeStart {
                start: self.start,
                end,
            });
        }
        if distance < 0.0 || distance.is_nan() {
            return Err(ValidationError::InvalidDistance(distance));
        }
        self.end = Some(end);
        self.distance = distance;
        Ok(())
    }

    /// Check every field invariant.
    ///
    /// Pure; calling it twice on the same ride yields the same result.
    /// Callers must validate before any persistence call.
    ///
    /// # Errors
    ///
    /// Returns the first violated [`ValidationError`]: unset id, empty
    /// driver, unset start, end before start, or invalid distance.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::MissingId);
        }
        if self.driver.is_empty() {
            return Err(ValidationError::MissingDriver);
        }
        if self.start.timestamp() == 0 && self.start.timestamp_subsec_nanos() == 0 {
            return Err(ValidationError::MissingStart);
        }
        if let Some(end) = self.end {
            if end < self.start {
                return Err(ValidationError::EndBeforeStart {
                    start: self.start,
                    end,
                });
            }
        }
        if self.distance < 0.0 || self.distance.is_nan() {
            return Err(ValidationError::InvalidDistance(self.distance));
        }
        Ok(())
    }
}
