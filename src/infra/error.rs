use thiserror::Error;

/// Startup failures for the backing services.
///
/// Display output is safe for logs and the console. The `#[source]` chain in
/// Debug output can carry connection strings, so log with Display (%e), not
/// Debug (?e).
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Could not connect to Postgres. Check DATABASE_URL and that the database is up.")]
    DatabaseConnection(#[source] sqlx::Error),

    #[error("Could not connect to Redis. Check REDIS_URL and that the server is up.")]
    RedisConnection(#[source] redis::RedisError),
}

impl From<sqlx::Error> for InfraError {
    fn from(e: sqlx::Error) -> Self {
        InfraError::DatabaseConnection(e)
    }
}
