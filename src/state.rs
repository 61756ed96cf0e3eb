use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::database::{
    seed, DatabaseError, DatabaseManager, MemoryRepository, PgRepository, Repository, Student,
};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything inside is behind `Arc` or already a handle.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Student data access, whichever engine backs it.
    pub students: Arc<dyn Repository<Student>>,
    /// Present when the store is Postgres; used for health checks and shutdown.
    pub database: Option<DatabaseManager>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        students: Arc<dyn Repository<Student>>,
        database: Option<DatabaseManager>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            students,
            database,
        }
    }

    /// State over a fresh, seeded in-memory store.
    pub fn in_memory(config: AppConfig) -> Self {
        let students = MemoryRepository::with_rows(config.database.id_strategy, seed::students());
        Self::new(config, Arc::new(students), None)
    }

    /// Build the state the config asks for, connecting and migrating Postgres if needed.
    pub async fn from_config(config: AppConfig) -> Result<Self, DatabaseError> {
        match config.database.store {
            StoreBackend::Memory => {
                tracing::info!(id_strategy = ?config.database.id_strategy, "Using in-memory student store");
                Ok(Self::in_memory(config))
            }
            StoreBackend::Postgres => {
                let database = DatabaseManager::connect(&config.database).await?;
                if config.database.run_migrations {
                    database.migrate().await?;
                }
                let students = PgRepository::<Student>::new(database.pool().clone(), config.database.id_strategy);
                tracing::info!(id_strategy = ?config.database.id_strategy, "Using Postgres student store");
                Ok(Self::new(config, Arc::new(students), Some(database)))
            }
        }
    }
}
