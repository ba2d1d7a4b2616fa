//! Snapshot table schema.
//!
//! Column identifiers for type-safe query building, plus DDL helpers for the
//! migration tooling that owns schema management. The adapter itself never
//! executes DDL implicitly; `ensure_table` on the SQL adapters is an explicit
//! opt-in used by tests and bootstrap scripts.

use sea_query::Iden;

/// Snapshot table columns. The table name itself is dynamic, one table per
/// aggregate type, so only columns are enumerated here.
#[derive(Iden)]
pub enum Snapshots {
    #[iden = "aggregate_type"]
    AggregateType,
    #[iden = "aggregate_id"]
    AggregateId,
    #[iden = "last_version"]
    LastVersion,
    #[iden = "created_at"]
    CreatedAt,
    #[iden = "aggregate_root"]
    AggregateRoot,
}

/// Build the CREATE TABLE statement for a snapshot table.
///
/// `version_type` and `blob_type` vary per dialect (INTEGER/BLOB on SQLite,
/// BIGINT/BYTEA on PostgreSQL).
pub fn create_table_sql(table: &str, version_type: &str, blob_type: &str) -> String {
    format!(
        r#"CREATE TABLE IF NOT EXISTS {table} (
    aggregate_type TEXT NOT NULL,
    aggregate_id TEXT NOT NULL,
    last_version {version_type} NOT NULL,
    created_at TEXT NOT NULL,
    aggregate_root {blob_type} NOT NULL
)"#
    )
}

/// Build the composite `(aggregate_type, aggregate_id)` index statement.
pub fn create_index_sql(table: &str) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS idx_{table}_aggregate \
         ON {table} (aggregate_type, aggregate_id)"
    )
}

/// Build the DROP TABLE statement for a snapshot table.
pub fn drop_table_sql(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {table}")
}
