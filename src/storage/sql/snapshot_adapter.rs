//! SQL snapshot adapter, shared across backends.

use std::marker::PhantomData;

use crate::table::TableMap;

use super::SqlDatabase;

/// SQL-based implementation of `SnapshotAdapter`.
///
/// Generic over any database implementing [`SqlDatabase`] (PostgreSQL,
/// SQLite) and over the payload codec. Stateless aside from the pool handle,
/// codec, and immutable table map; one instance can be shared freely across
/// tasks.
pub struct SqlSnapshotAdapter<DB: SqlDatabase, C> {
    pool: DB::Pool,
    codec: C,
    tables: TableMap,
    _marker: PhantomData<DB>,
}

impl<DB: SqlDatabase, C> SqlSnapshotAdapter<DB, C> {
    /// Create a new SQL snapshot adapter over an existing pool.
    pub fn new(pool: DB::Pool, codec: C, tables: TableMap) -> Self {
        Self {
            pool,
            codec,
            tables,
            _marker: PhantomData,
        }
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &DB::Pool {
        &self.pool
    }

    /// Resolve the physical table for an aggregate type.
    pub fn table_for(&self, aggregate_type: &str) -> String {
        self.tables.resolve(aggregate_type)
    }
}

/// Implement `SnapshotAdapter` for a specific SQL backend.
macro_rules! impl_snapshot_adapter {
    ($db_type:ty, $feature:literal) => {
        #[cfg(feature = $feature)]
        impl<C> SqlSnapshotAdapter<$db_type, C>
        where
            C: crate::codec::SnapshotCodec,
        {
            /// Create the snapshot table and index for an aggregate type.
            ///
            /// Schema management belongs to the caller's migration tooling;
            /// this helper exists for bootstrap scripts and tests.
            pub async fn ensure_table(&self, aggregate_type: &str) -> crate::adapter::Result<()> {
                use crate::storage::sql::SqlDatabase;

                let table = self.table_for(aggregate_type);
                tracing::debug!("ensuring snapshot table {}", table);

                sqlx::query(&<$db_type>::create_table_sql(&table))
                    .execute(&self.pool)
                    .await?;
                sqlx::query(&<$db_type>::create_index_sql(&table))
                    .execute(&self.pool)
                    .await?;

                Ok(())
            }
        }

        #[cfg(feature = $feature)]
        #[async_trait::async_trait]
        impl<C> crate::adapter::SnapshotAdapter<C::Root> for SqlSnapshotAdapter<$db_type, C>
        where
            C: crate::codec::SnapshotCodec,
        {
            async fn get(
                &self,
                aggregate_type: &str,
                aggregate_id: &str,
            ) -> crate::adapter::Result<Option<crate::snapshot::Snapshot<C::Root>>> {
                use sea_query::{Alias, Expr, Order, Query};
                use sqlx::Row;

                use crate::snapshot::{Snapshot, CREATED_AT_FORMAT};
                use crate::storage::schema::Snapshots;
                use crate::storage::sql::SqlDatabase;

                let table = self.table_for(aggregate_type);

                let stmt = Query::select()
                    .column(Snapshots::AggregateType)
                    .column(Snapshots::AggregateId)
                    .column(Snapshots::LastVersion)
                    .column(Snapshots::CreatedAt)
                    .column(Snapshots::AggregateRoot)
                    .from(Alias::new(table.as_str()))
                    .and_where(Expr::col(Snapshots::AggregateType).eq(aggregate_type))
                    .and_where(Expr::col(Snapshots::AggregateId).eq(aggregate_id))
                    .order_by(Snapshots::LastVersion, Order::Desc)
                    .limit(1)
                    .to_owned();

                let (sql, values) = <$db_type>::build_select(stmt);
                let row = sqlx::query_with(&sql, values)
                    .fetch_optional(&self.pool)
                    .await?;

                let row = match row {
                    Some(row) => row,
                    None => return Ok(None),
                };

                let last_version: i64 = row.try_get("last_version")?;
                let created_raw: String = row.try_get("created_at")?;
                // The driver hands back the blob fully buffered; decode sees
                // the complete payload, never a partial read.
                let payload: Vec<u8> = row.try_get("aggregate_root")?;

                let aggregate_root = self.codec.decode(&payload)?;
                let created_at = chrono::NaiveDateTime::parse_from_str(
                    &created_raw,
                    CREATED_AT_FORMAT,
                )
                .map_err(|source| crate::adapter::SnapshotError::InvalidTimestamp {
                    value: created_raw.clone(),
                    source,
                })?
                .and_utc();
                let last_version = u64::try_from(last_version).map_err(|_| {
                    crate::adapter::SnapshotError::InvalidVersion {
                        value: last_version,
                    }
                })?;

                tracing::debug!(
                    "loaded snapshot for {}/{} at version {} from {}",
                    aggregate_type,
                    aggregate_id,
                    last_version,
                    table
                );

                Ok(Some(Snapshot::new(
                    aggregate_type,
                    aggregate_id,
                    aggregate_root,
                    last_version,
                    created_at,
                )))
            }

            async fn add(
                &self,
                snapshot: &crate::snapshot::Snapshot<C::Root>,
            ) -> crate::adapter::Result<()> {
                use sea_query::{Alias, Query};

                use crate::snapshot::CREATED_AT_FORMAT;
                use crate::storage::schema::Snapshots;
                use crate::storage::sql::SqlDatabase;

                let table = self.table_for(snapshot.aggregate_type());
                let last_version = i64::try_from(snapshot.last_version()).map_err(|_| {
                    crate::adapter::SnapshotError::VersionOutOfRange {
                        value: snapshot.last_version(),
                    }
                })?;
                let payload = self.codec.encode(snapshot.aggregate_root())?;
                let created_at = snapshot.created_at().format(CREATED_AT_FORMAT).to_string();

                let stmt = Query::insert()
                    .into_table(Alias::new(table.as_str()))
                    .columns([
                        Snapshots::AggregateType,
                        Snapshots::AggregateId,
                        Snapshots::LastVersion,
                        Snapshots::CreatedAt,
                        Snapshots::AggregateRoot,
                    ])
                    .values_panic([
                        snapshot.aggregate_type().into(),
                        snapshot.aggregate_id().into(),
                        last_version.into(),
                        created_at.into(),
                        payload.into(),
                    ])
                    .to_owned();

                let (sql, values) = <$db_type>::build_insert(stmt);
                sqlx::query_with(&sql, values).execute(&self.pool).await?;

                tracing::debug!(
                    "added snapshot for {}/{} at version {} to {}",
                    snapshot.aggregate_type(),
                    snapshot.aggregate_id(),
                    snapshot.last_version(),
                    table
                );

                Ok(())
            }
        }
    };
}

impl_snapshot_adapter!(super::postgres::Postgres, "postgres");
impl_snapshot_adapter!(super::sqlite::Sqlite, "sqlite");
