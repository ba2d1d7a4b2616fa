//! Unified SQL adapter implementation.
//!
//! The adapter is parameterized by database type via the `SqlDatabase` trait;
//! a macro generates the per-backend trait impls so PostgreSQL and SQLite
//! share one code path.

mod snapshot_adapter;

pub use snapshot_adapter::SqlSnapshotAdapter;

/// Trait for SQL database backends.
///
/// Provides the pool type and statement building. Statements are rendered
/// with placeholder parameters and bound values via sea-query-binder, never
/// with inlined values.
pub trait SqlDatabase: Send + Sync + 'static {
    /// The connection pool type for this database.
    type Pool: Clone + Send + Sync;

    /// Render a SELECT statement with bound parameters.
    fn build_select(stmt: sea_query::SelectStatement) -> (String, sea_query_binder::SqlxValues);

    /// Render an INSERT statement with bound parameters.
    fn build_insert(stmt: sea_query::InsertStatement) -> (String, sea_query_binder::SqlxValues);

    /// DDL for creating a snapshot table in this dialect.
    fn create_table_sql(table: &str) -> String;

    /// DDL for the composite `(aggregate_type, aggregate_id)` index.
    fn create_index_sql(table: &str) -> String;
}

#[cfg(feature = "postgres")]
pub mod postgres {
    //! PostgreSQL database backend.

    use sea_query::PostgresQueryBuilder;
    use sea_query_binder::{SqlxBinder, SqlxValues};
    use sqlx::PgPool;

    use crate::storage::schema;

    /// PostgreSQL database marker type.
    pub struct Postgres;

    impl super::SqlDatabase for Postgres {
        type Pool = PgPool;

        fn build_select(stmt: sea_query::SelectStatement) -> (String, SqlxValues) {
            stmt.build_sqlx(PostgresQueryBuilder)
        }

        fn build_insert(stmt: sea_query::InsertStatement) -> (String, SqlxValues) {
            stmt.build_sqlx(PostgresQueryBuilder)
        }

        fn create_table_sql(table: &str) -> String {
            schema::create_table_sql(table, "BIGINT", "BYTEA")
        }

        fn create_index_sql(table: &str) -> String {
            schema::create_index_sql(table)
        }
    }

    /// PostgreSQL snapshot adapter.
    pub type PostgresSnapshotAdapter<C> = super::SqlSnapshotAdapter<Postgres, C>;
}

#[cfg(feature = "sqlite")]
pub mod sqlite {
    //! SQLite database backend.

    use sea_query::SqliteQueryBuilder;
    use sea_query_binder::{SqlxBinder, SqlxValues};
    use sqlx::SqlitePool;

    use crate::storage::schema;

    /// SQLite database marker type.
    pub struct Sqlite;

    impl super::SqlDatabase for Sqlite {
        type Pool = SqlitePool;

        fn build_select(stmt: sea_query::SelectStatement) -> (String, SqlxValues) {
            stmt.build_sqlx(SqliteQueryBuilder)
        }

        fn build_insert(stmt: sea_query::InsertStatement) -> (String, SqlxValues) {
            stmt.build_sqlx(SqliteQueryBuilder)
        }

        fn create_table_sql(table: &str) -> String {
            schema::create_table_sql(table, "INTEGER", "BLOB")
        }

        fn create_index_sql(table: &str) -> String {
            schema::create_index_sql(table)
        }
    }

    /// SQLite snapshot adapter.
    pub type SqliteSnapshotAdapter<C> = super::SqlSnapshotAdapter<Sqlite, C>;
}
