//! Internal implementation of record identifiers.
//!
//! This module contains the implementation details for UUID and timestamp-based
//! unique identifiers used throughout the ward crates.

use chrono::{DateTime, Duration, Utc};
use std::fmt;
use uuid::Uuid;

const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.3f";

/// Canonical record identifier (32 lowercase hex characters, no hyphens).
///
/// Identifiers are only ever generated, never parsed back in, so the contained UUID is always
/// displayed in canonical form and string comparisons are consistent across the system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(Uuid);

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordId {
    /// Generates a new random (version 4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// A time-prefixed record identifier.
///
/// Format:
/// `YYYYMMDDTHHMMSS.mmmZ-<canonical_uuid>`
///
/// Example:
/// `20260111T143522.045Z-550e8400e29b41d4a716446655440000`
///
/// Identifiers produced by one [`TimestampIdGenerator`] are strictly increasing, so sorting
/// them (or their string form) recovers creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimestampId {
    timestamp: DateTime<Utc>,
    id: RecordId,
}

impl TimestampId {
    /// Returns the timestamp component.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the UUID component.
    pub fn id(&self) -> RecordId {
        self.id
    }
}

impl fmt::Display for TimestampId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}Z-{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.id
        )
    }
}

/// Hands out strictly increasing [`TimestampId`]s.
///
/// If the clock has not advanced past the previous identifier (or went backwards), the next
/// identifier is placed 1 ms after the previous one.
#[derive(Clone, Debug, Default)]
pub struct TimestampIdGenerator {
    last: Option<TimestampId>,
}

impl TimestampIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the next identifier using the current time.
    pub fn next_id(&mut self) -> TimestampId {
        self.next_at(Utc::now())
    }

    /// Generates the next identifier as if the clock read `now`.
    pub fn next_at(&mut self, now: DateTime<Utc>) -> TimestampId {
        // Truncate to the millisecond precision of the textual form.
        let now = DateTime::<Utc>::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);

        let timestamp = match self.last {
            Some(prev) if now <= prev.timestamp => prev.timestamp + Duration::milliseconds(1),
            _ => now,
        };

        let id = TimestampId {
            timestamp,
            id: RecordId::new(),
        };
        self.last = Some(id);
        id
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::{RecordId, TimestampId};

    impl serde::Serialize for RecordId {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl serde::Serialize for TimestampId {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }
}
