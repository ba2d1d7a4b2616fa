//! Mock adapter implementation for testing.

mod snapshot_adapter;

pub use snapshot_adapter::MockSnapshotAdapter;
