//! Store configuration.

use crate::error::{JoblyError, JoblyResult};
use serde::Deserialize;

const DEFAULT_POOL_SIZE: usize = 16;

/// Connection settings for the backing store.
///
/// # Example
///
/// ```ignore
/// // From the environment (reads `.env` if present)
/// let config = StoreConfig::from_env()?;
///
/// // From a TOML document
/// let config = StoreConfig::from_toml_str(r#"
///     database_url = "postgres://localhost/jobly"
///     max_pool_size = 8
/// "#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// Postgres connection URL.
    pub database_url: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_pool_size")]
    pub max_pool_size: usize,
}

fn default_pool_size() -> usize {
    DEFAULT_POOL_SIZE
}

impl StoreConfig {
    /// Create a configuration with defaults for everything but the URL.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_pool_size: DEFAULT_POOL_SIZE,
        }
    }

    /// Set the maximum pool size.
    pub fn max_pool_size(mut self, size: usize) -> Self {
        self.max_pool_size = size;
        self
    }

    /// Load from `DATABASE_URL` and optional `JOBLY_POOL_SIZE`.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    pub fn from_env() -> JoblyResult<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| JoblyError::Config("DATABASE_URL is not set".to_string()))?;
        let mut config = Self::new(database_url);

        if let Ok(raw) = std::env::var("JOBLY_POOL_SIZE") {
            let size = raw.trim().parse().map_err(|e| {
                JoblyError::Config(format!("JOBLY_POOL_SIZE must be a positive integer: {e}"))
            })?;
            config = config.max_pool_size(size);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document.
    pub fn from_toml_str(raw: &str) -> JoblyResult<Self> {
        let config: Self = toml::from_str(raw)
            .map_err(|e| JoblyError::Config(format!("failed to parse store config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> JoblyResult<()> {
        if self.database_url.trim().is_empty() {
            return Err(JoblyError::Config("database_url must not be empty".into()));
        }
        if self.max_pool_size == 0 {
            return Err(JoblyError::Config("max_pool_size must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_with_defaults() {
        let config = StoreConfig::from_toml_str(r#"database_url = "postgres://localhost/jobly""#)
            .unwrap();
        assert_eq!(config, StoreConfig::new("postgres://localhost/jobly"));
        assert_eq!(config.max_pool_size, 16);
    }

    #[test]
    fn toml_overrides_pool_size() {
        let config = StoreConfig::from_toml_str(
            r#"
            database_url = "postgres://localhost/jobly"
            max_pool_size = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.max_pool_size, 4);
    }

    #[test]
    fn toml_rejects_zero_pool() {
        let err = StoreConfig::from_toml_str(
            r#"
            database_url = "postgres://localhost/jobly"
            max_pool_size = 0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, JoblyError::Config(_)));
    }

    #[test]
    fn toml_requires_url() {
        assert!(StoreConfig::from_toml_str("max_pool_size = 2").is_err());
        assert!(StoreConfig::from_toml_str(r#"database_url = " ""#).is_err());
    }
}
