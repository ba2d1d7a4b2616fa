//! Shared storage integration tests.
//!
//! Exercises the SnapshotAdapter contract against each backend. The backend
//! test files create their own pool and adapter, then run these functions.

pub mod snapshot_adapter_tests;

use tracing_subscriber::EnvFilter;

/// Install the env-filter log subscriber, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
