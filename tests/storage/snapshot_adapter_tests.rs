//! SnapshotAdapter contract tests.
//!
//! These verify the adapter contract independent of backend; each storage
//! implementation runs them against its own setup.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use snapstore::{Snapshot, SnapshotAdapter, CREATED_AT_FORMAT};

/// Aggregate state with nesting, to catch field loss in the codec path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestState {
    pub owner: String,
    pub balance: i64,
    pub lines: Vec<TestLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestLine {
    pub sku: String,
    pub quantity: u32,
}

pub fn make_state(balance: i64) -> TestState {
    TestState {
        owner: "ada".to_string(),
        balance,
        lines: vec![
            TestLine {
                sku: "A-1".to_string(),
                quantity: 2,
            },
            TestLine {
                sku: "B-9".to_string(),
                quantity: 1,
            },
        ],
    }
}

/// Snapshot with a fixed microsecond-precision timestamp, so round-trip
/// comparisons are exact.
pub fn make_snapshot(aggregate_type: &str, aggregate_id: &str, version: u64) -> Snapshot<TestState> {
    let created_at = NaiveDateTime::parse_from_str("2024-05-17T10:30:00.123456", CREATED_AT_FORMAT)
        .expect("valid timestamp")
        .and_utc();
    Snapshot::new(
        aggregate_type,
        aggregate_id,
        make_state(100 * version as i64),
        version,
        created_at,
    )
}

pub async fn test_get_missing_returns_none<S: SnapshotAdapter<TestState>>(
    store: &S,
    aggregate_type: &str,
) {
    let result = store
        .get(aggregate_type, "no-such-id")
        .await
        .expect("get should succeed");
    assert!(result.is_none(), "unknown key should be None, not an error");
}

pub async fn test_add_then_get_round_trips<S: SnapshotAdapter<TestState>>(
    store: &S,
    aggregate_type: &str,
) {
    let snapshot = make_snapshot(aggregate_type, "agg-1", 7);

    store.add(&snapshot).await.expect("add should succeed");

    let loaded = store
        .get(aggregate_type, "agg-1")
        .await
        .expect("get should succeed")
        .expect("snapshot should exist");

    // Deep equality: state, version, and microsecond created_at.
    assert_eq!(loaded, snapshot);
}

pub async fn test_latest_version_wins<S: SnapshotAdapter<TestState>>(
    store: &S,
    aggregate_type: &str,
) {
    store
        .add(&make_snapshot(aggregate_type, "agg-2", 1))
        .await
        .expect("first add should succeed");
    store
        .add(&make_snapshot(aggregate_type, "agg-2", 2))
        .await
        .expect("second add should succeed");

    let loaded = store
        .get(aggregate_type, "agg-2")
        .await
        .expect("get should succeed")
        .expect("snapshot should exist");

    assert_eq!(loaded.last_version(), 2);
    assert_eq!(loaded.aggregate_root().balance, 200);
}

pub async fn test_keys_do_not_leak<S: SnapshotAdapter<TestState>>(
    store: &S,
    aggregate_type: &str,
) {
    store
        .add(&make_snapshot(aggregate_type, "agg-3", 4))
        .await
        .expect("add should succeed");

    let other = store
        .get(aggregate_type, "agg-4")
        .await
        .expect("get should succeed");
    assert!(other.is_none());
}
