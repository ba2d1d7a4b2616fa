//! Snapshot adapter contract.

use async_trait::async_trait;

use crate::codec::CodecError;
use crate::config::ConfigError;
use crate::snapshot::Snapshot;

/// Result type for snapshot operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;

/// Errors that can occur during snapshot operations.
///
/// "No snapshot for this key" is not an error; [`SnapshotAdapter::get`]
/// returns `Ok(None)` for it. Transport errors pass through unwrapped and
/// are never retried here.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("snapshot payload codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("invalid created_at value {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("last_version {value} exceeds the storable range")]
    VersionOutOfRange { value: u64 },

    #[error("invalid last_version {value} in storage")]
    InvalidVersion { value: i64 },
}

/// Interface for snapshot persistence.
///
/// Snapshots are an optional optimization to avoid replaying entire event
/// history: the aggregate repository loads the latest snapshot, then replays
/// only events past [`Snapshot::last_version`].
///
/// Writes are plain inserts; history accumulates and pruning belongs to an
/// external maintenance job. Two concurrent `add` calls for the same key
/// produce two rows and a concurrent `get` may observe either, depending on
/// commit timing. Callers needing strict ordering serialize writes
/// themselves; the adapter holds no mutable state and imposes no locking.
///
/// # Implementations
///
/// - `PostgresSnapshotAdapter`: PostgreSQL storage
/// - `SqliteSnapshotAdapter`: SQLite storage
/// - `MockSnapshotAdapter`: in-memory mock for testing
#[async_trait]
pub trait SnapshotAdapter<A: Send + Sync>: Send + Sync {
    /// Retrieve the most recent snapshot for an aggregate.
    ///
    /// Of all rows stored for `(aggregate_type, aggregate_id)`, the one with
    /// the highest `last_version` is returned. `Ok(None)` if no snapshot has
    /// been written. A payload that cannot be decoded is an error, never a
    /// default value.
    async fn get(&self, aggregate_type: &str, aggregate_id: &str) -> Result<Option<Snapshot<A>>>;

    /// Append a snapshot.
    ///
    /// Always inserts a new row; no existence check, upsert, or
    /// de-duplication.
    async fn add(&self, snapshot: &Snapshot<A>) -> Result<()>;
}

impl<'a, A: Send + Sync> std::fmt::Debug for dyn SnapshotAdapter<A> + 'a {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SnapshotAdapter")
    }
}
