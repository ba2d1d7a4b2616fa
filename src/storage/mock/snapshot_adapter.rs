//! Mock SnapshotAdapter implementation for testing.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::adapter::{Result, SnapshotAdapter};
use crate::snapshot::Snapshot;
use crate::table::TableMap;

/// Mock snapshot adapter that keeps rows in memory.
///
/// Mirrors the SQL adapters' append-only behavior: every `add` stores a new
/// row, and `get` picks the highest version. The inspection helpers expose
/// what a row count query would show against a real table.
pub struct MockSnapshotAdapter<A> {
    rows: RwLock<Vec<Snapshot<A>>>,
    tables: TableMap,
}

impl<A> MockSnapshotAdapter<A> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            tables: TableMap::new(),
        }
    }

    /// Mock with explicit table overrides, for resolver-sensitive tests.
    pub fn with_tables(tables: TableMap) -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            tables,
        }
    }

    /// Resolve the table an aggregate type would be stored in.
    pub fn table_for(&self, aggregate_type: &str) -> String {
        self.tables.resolve(aggregate_type)
    }

    /// Number of stored rows for one aggregate.
    pub async fn row_count(&self, aggregate_type: &str, aggregate_id: &str) -> usize {
        self.rows
            .read()
            .await
            .iter()
            .filter(|s| s.aggregate_type() == aggregate_type && s.aggregate_id() == aggregate_id)
            .count()
    }

    /// Total number of stored rows.
    pub async fn total_rows(&self) -> usize {
        self.rows.read().await.len()
    }
}

impl<A> Default for MockSnapshotAdapter<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<A> SnapshotAdapter<A> for MockSnapshotAdapter<A>
where
    A: Clone + Send + Sync,
{
    async fn get(&self, aggregate_type: &str, aggregate_id: &str) -> Result<Option<Snapshot<A>>> {
        let rows = self.rows.read().await;
        let latest = rows
            .iter()
            .filter(|s| s.aggregate_type() == aggregate_type && s.aggregate_id() == aggregate_id)
            .max_by_key(|s| s.last_version());
        Ok(latest.cloned())
    }

    async fn add(&self, snapshot: &Snapshot<A>) -> Result<()> {
        self.rows.write().await.push(snapshot.clone());
        Ok(())
    }
}
