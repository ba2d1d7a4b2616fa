//! Storage implementations.

use std::sync::Arc;

use tracing::info;

use crate::adapter::{Result, SnapshotAdapter};
use crate::codec::SnapshotCodec;
use crate::config::SnapstoreConfig;

pub mod mock;
pub mod schema;
#[cfg(any(feature = "postgres", feature = "sqlite"))]
pub mod sql;

pub use mock::MockSnapshotAdapter;

#[cfg(any(feature = "postgres", feature = "sqlite"))]
pub use sql::{SqlDatabase, SqlSnapshotAdapter};

#[cfg(feature = "postgres")]
pub use sql::postgres::PostgresSnapshotAdapter;
#[cfg(feature = "sqlite")]
pub use sql::sqlite::SqliteSnapshotAdapter;

/// Connect a snapshot adapter from configuration.
///
/// Validates the configuration eagerly, then builds the pool for the
/// configured backend and wraps it with the supplied codec and table map.
/// Schema setup stays with the caller's migration tooling.
pub async fn connect<C>(
    config: &SnapstoreConfig,
    codec: C,
) -> Result<Arc<dyn SnapshotAdapter<C::Root>>>
where
    C: SnapshotCodec + 'static,
    C::Root: 'static,
{
    config.validate()?;
    info!("snapshot storage: {} at {}", config.storage_type, config.url);

    match config.storage_type {
        #[cfg(feature = "sqlite")]
        crate::config::StorageType::Sqlite => {
            // In-memory SQLite databases are per-connection; a single
            // connection keeps the schema visible across calls, and SQLite
            // serializes writes anyway.
            let pool = sqlx::sqlite::SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(&config.url)
                .await?;

            Ok(Arc::new(SqliteSnapshotAdapter::new(
                pool,
                codec,
                config.table_map.clone(),
            )))
        }
        #[cfg(feature = "postgres")]
        crate::config::StorageType::Postgres => {
            let pool = sqlx::PgPool::connect(&config.url).await?;

            Ok(Arc::new(PostgresSnapshotAdapter::new(
                pool,
                codec,
                config.table_map.clone(),
            )))
        }
        #[allow(unreachable_patterns)]
        _ => Err(crate::config::ConfigError::BackendNotEnabled(config.storage_type.clone()).into()),
    }
}
