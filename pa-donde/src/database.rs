//! SQLite connection pool management

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::repository::{RepositoryError, RepositoryOperation};

/// Create a SQLite connection pool with retry logic
///
/// The database file is created when missing. Failed attempts are retried
/// up to `max_retries` times with exponential backoff starting at
/// `retry_delay_secs`.
pub async fn connect_sqlite(config: &DatabaseConfig) -> Result<SqlitePool, RepositoryError> {
    let mut attempt = 0;
    let base_delay = Duration::from_secs(config.retry_delay_secs);

    loop {
        match try_connect(config).await {
            Ok(pool) => {
                if attempt > 0 {
                    tracing::info!(
                        "Database connection established after {} attempt(s)",
                        attempt + 1
                    );
                } else {
                    tracing::info!(
                        url = %config.url,
                        max_connections = config.max_connections,
                        "Database connection pool created"
                    );
                }
                return Ok(pool);
            }
            Err(e) => {
                attempt += 1;

                if attempt > config.max_retries {
                    tracing::error!(
                        "Failed to connect to database after {} attempts: {}",
                        config.max_retries + 1,
                        e
                    );
                    return Err(e);
                }

                let delay = backoff_delay(base_delay, attempt);

                tracing::warn!(
                    "Database connection attempt {} failed: {}. Retrying in {:?}...",
                    attempt,
                    e,
                    delay
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Delay before retry `attempt` (1-based), doubling each time
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2_u32.saturating_pow(attempt.saturating_sub(1)))
}

/// Single connection attempt
async fn try_connect(config: &DatabaseConfig) -> Result<SqlitePool, RepositoryError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| connect_error(config, &e))?
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
        .connect_with(options)
        .await
        .map_err(|e| connect_error(config, &e))
}

fn connect_error(config: &DatabaseConfig, err: &sqlx::Error) -> RepositoryError {
    RepositoryError::connection_failed(format!(
        "{} at '{}': {}",
        categorize_db_error(err),
        config.url,
        err
    ))
    .with_operation(RepositoryOperation::Connect)
}

/// Short human description of a driver error
fn categorize_db_error(err: &sqlx::Error) -> &'static str {
    use sqlx::Error;
    match err {
        Error::Configuration(_) => "Invalid database URL",
        Error::Database(_) => "Database error",
        Error::Io(_) => "I/O error - check the path and its permissions",
        Error::PoolTimedOut => "Connection pool timeout - database may be locked",
        Error::PoolClosed => "Connection pool closed",
        Error::WorkerCrashed => "Database worker crashed",
        _ => "Connection error",
    }
}
