use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::filter::FilterError;

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint violated on {field}: {message}")]
    Constraint { field: String, message: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<FilterError> for DatabaseError {
    fn from(err: FilterError) -> Self {
        DatabaseError::QueryError(err.to_string())
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        classify_sqlx_error(err)
    }
}

/// Sort an sqlx error into the storage error kinds.
///
/// - Pool and socket failures are connection errors.
/// - Truncation (22001), not-null (23502), FK (23503) and check (23514) violations are constraint errors.
/// - Everything else stays an opaque sqlx error.
fn classify_sqlx_error(err: sqlx::Error) -> DatabaseError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            DatabaseError::ConnectionError(err.to_string())
        }
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("22001") | Some("23502") | Some("23503") | Some("23514") => DatabaseError::Constraint {
                field: db_err.constraint().unwrap_or("record").to_string(),
                message: db_err.message().to_string(),
            },
            _ => DatabaseError::Sqlx(sqlx::Error::Database(db_err)),
        },
        other => DatabaseError::Sqlx(other),
    }
}

/// Owns the Postgres pool. Built once at start-up and shared through application state.
#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| DatabaseError::ConnectionError("DATABASE_URL is not configured".to_string()))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!(max_connections = config.max_connections, "Created database pool");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the tables and seed rows if they are not there yet.
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_failures_are_connection_errors() {
        assert!(matches!(
            DatabaseError::from(sqlx::Error::PoolTimedOut),
            DatabaseError::ConnectionError(_)
        ));
        assert!(matches!(
            DatabaseError::from(sqlx::Error::RowNotFound),
            DatabaseError::Sqlx(sqlx::Error::RowNotFound)
        ));
    }

    #[test]
    fn filter_errors_are_query_errors() {
        let err: DatabaseError = FilterError::MalformedColumn("nope".to_string()).into();
        assert!(matches!(err, DatabaseError::QueryError(msg) if msg.contains("nope")));
    }
}
