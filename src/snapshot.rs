//! Snapshot value type.

use chrono::{DateTime, SubsecRound, Utc};

/// Timestamp pattern used for the `created_at` column, UTC with
/// microsecond precision.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A point-in-time capture of an aggregate's state.
///
/// Constructed by the aggregate repository, persisted and reconstructed by
/// the snapshot adapter. Never mutated after construction; the adapter treats
/// `aggregate_root` as an opaque payload and never inspects it.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<A> {
    aggregate_type: String,
    aggregate_id: String,
    aggregate_root: A,
    last_version: u64,
    created_at: DateTime<Utc>,
}

impl<A> Snapshot<A> {
    /// Create a snapshot of `aggregate_root` as of event-stream version
    /// `last_version`.
    ///
    /// `created_at` is truncated to microseconds, the precision the storage
    /// format carries.
    pub fn new(
        aggregate_type: impl Into<String>,
        aggregate_id: impl Into<String>,
        aggregate_root: A,
        last_version: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            aggregate_type: aggregate_type.into(),
            aggregate_id: aggregate_id.into(),
            aggregate_root,
            last_version,
            created_at: created_at.trunc_subsecs(6),
        }
    }

    /// Logical aggregate type, namespaced form.
    pub fn aggregate_type(&self) -> &str {
        &self.aggregate_type
    }

    /// Aggregate identifier, unique within a type.
    pub fn aggregate_id(&self) -> &str {
        &self.aggregate_id
    }

    /// The captured aggregate state.
    pub fn aggregate_root(&self) -> &A {
        &self.aggregate_root
    }

    /// Consume the snapshot, yielding the captured state.
    pub fn into_aggregate_root(self) -> A {
        self.aggregate_root
    }

    /// Event-stream version this snapshot reflects.
    pub fn last_version(&self) -> u64 {
        self.last_version
    }

    /// Capture time, UTC, microsecond precision.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};

    use super::*;

    #[test]
    fn created_at_truncated_to_microseconds() {
        let ts = Utc
            .with_ymd_and_hms(2024, 5, 17, 10, 30, 0)
            .unwrap()
            .with_nanosecond(123_456_789)
            .unwrap();

        let snapshot = Snapshot::new("foo", "id-1", (), 3, ts);

        assert_eq!(snapshot.created_at().nanosecond(), 123_456_000);
        assert_eq!(
            snapshot.created_at().format(CREATED_AT_FORMAT).to_string(),
            "2024-05-17T10:30:00.123456"
        );
    }
}
