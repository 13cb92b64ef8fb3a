//! Connection pool utilities

use crate::config::StoreConfig;
use crate::error::{JoblyError, JoblyResult};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;

/// Create a connection pool from a [`StoreConfig`].
///
/// Uses `NoTls`; connections are created lazily on first checkout.
///
/// # Example
///
/// ```ignore
/// let pool = jobly::create_pool(&StoreConfig::from_env()?)?;
/// let client = pool.get().await?;
/// let orgs = Organization::find_all(&client, None).await?;
/// ```
pub fn create_pool(config: &StoreConfig) -> JoblyResult<Pool> {
    let pg_config: tokio_postgres::Config = config
        .database_url
        .parse()
        .map_err(|e: tokio_postgres::Error| JoblyError::Connection(e.to_string()))?;

    let manager_config = ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    };
    let mgr = Manager::from_config(pg_config, NoTls, manager_config);
    Pool::builder(mgr)
        .max_size(config.max_pool_size)
        .build()
        .map_err(|e| JoblyError::Pool(e.to_string()))
}
