//! Snapshot store configuration.

use std::fmt;

use serde::Deserialize;

use crate::table::TableMap;

/// Storage backend discriminator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    #[default]
    Sqlite,
    Postgres,
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageType::Sqlite => write!(f, "sqlite"),
            StorageType::Postgres => write!(f, "postgres"),
        }
    }
}

/// Errors raised while validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("connection URL is empty")]
    MissingUrl,

    #[error("storage backend '{0}' is not enabled in this build")]
    BackendNotEnabled(StorageType),
}

/// Snapshot store configuration.
///
/// Typed replacement for config-driven factory wiring: [`validate`] runs
/// eagerly at connect time so a missing connection fails at startup, not on
/// first use.
///
/// [`validate`]: SnapstoreConfig::validate
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnapstoreConfig {
    /// Storage backend discriminator.
    #[serde(rename = "type")]
    pub storage_type: StorageType,
    /// Connection URL for the backend.
    pub url: String,
    /// Explicit aggregate-type to table-name overrides.
    pub table_map: TableMap,
}

impl Default for SnapstoreConfig {
    fn default() -> Self {
        Self {
            storage_type: StorageType::Sqlite,
            url: String::new(),
            table_map: TableMap::new(),
        }
    }
}

impl SnapstoreConfig {
    /// Validate the configuration, failing fast on anything unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::MissingUrl);
        }

        let enabled = match self.storage_type {
            StorageType::Sqlite => cfg!(feature = "sqlite"),
            StorageType::Postgres => cfg!(feature = "postgres"),
        };
        if !enabled {
            return Err(ConfigError::BackendNotEnabled(self.storage_type.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_is_rejected() {
        let config = SnapstoreConfig::default();

        assert!(matches!(config.validate(), Err(ConfigError::MissingUrl)));
    }

    #[test]
    fn deserializes_from_json() {
        let config: SnapstoreConfig = serde_json::from_str(
            r#"{
                "type": "sqlite",
                "url": "sqlite::memory:",
                "table_map": {"My\\Namespace\\Foo": "custom_table"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.storage_type, StorageType::Sqlite);
        assert_eq!(
            config.table_map.resolve("My\\Namespace\\Foo"),
            "custom_table"
        );
        config.validate().unwrap();
    }

    #[cfg(not(feature = "postgres"))]
    #[test]
    fn disabled_backend_is_rejected() {
        let config = SnapstoreConfig {
            storage_type: StorageType::Postgres,
            url: "postgres://localhost/snapshots".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::BackendNotEnabled(StorageType::Postgres))
        ));
    }
}
