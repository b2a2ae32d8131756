/**
 * Database Connection
 *
 * Opens the PostgreSQL pool the services run against. A missing
 * `DATABASE_URL` or a failed connection is logged and yields `None`, so a
 * caller can keep running with the pure content and search features only.
 *
 * The schema is managed outside this crate; no migrations are run here.
 */

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::shared::AppConfig;

/// Database configuration result
pub type DatabaseConfig = Option<PgPool>;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_CONNECTIONS: u32 = 10;

/// Connect to the database named by `config.database_url`
///
/// ```rust,no_run
/// use aigm::backend::database::load_database;
/// use aigm::shared::AppConfig;
///
/// # async fn example() {
/// let config = AppConfig::from_env().unwrap_or_default();
/// if let Some(pool) = load_database(&config).await {
///     // services available
/// }
/// # }
/// ```
pub async fn load_database(config: &AppConfig) -> DatabaseConfig {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let connect = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(CONNECT_TIMEOUT)
        .connect(database_url);

    match tokio::time::timeout(CONNECT_TIMEOUT, connect).await {
        Ok(Ok(pool)) => {
            tracing::info!("Database connection pool created successfully");
            Some(pool)
        }
        Ok(Err(e)) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            None
        }
        Err(_) => {
            tracing::error!(timeout = ?CONNECT_TIMEOUT, "Timed out connecting to database");
            tracing::warn!("Database features will be disabled.");
            None
        }
    }
}
