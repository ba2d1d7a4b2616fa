//! Snapstore - relational snapshot storage for event-sourced aggregates.
//!
//! Persists point-in-time captures of aggregate state keyed by aggregate
//! type and id, so repositories can rehydrate from the latest snapshot plus
//! the event tail instead of replaying the full stream.
//!
//! The core is the [`SnapshotAdapter`] contract with two operations: `get`
//! the most recent snapshot for a key, and `add` a new one (always an
//! insert, never an upsert). Aggregate state is an opaque blob encoded by a
//! pluggable [`SnapshotCodec`]; table names come from an explicit
//! [`TableMap`] or a deriving convention. SQL backends (PostgreSQL, SQLite)
//! are behind cargo features, plus an in-memory mock for tests.

pub mod adapter;
pub mod codec;
pub mod config;
pub mod snapshot;
pub mod storage;
pub mod table;

pub use adapter::{Result, SnapshotAdapter, SnapshotError};
pub use codec::{CodecError, JsonCodec, ProstCodec, SnapshotCodec};
pub use config::{ConfigError, SnapstoreConfig, StorageType};
pub use snapshot::{Snapshot, CREATED_AT_FORMAT};
pub use table::{derive_table_name, TableMap};
