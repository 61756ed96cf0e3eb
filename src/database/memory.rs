use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::config::IdStrategy;
use crate::database::manager::DatabaseError;
use crate::database::repository::{check_constraints, Entity, Repository};
use crate::filter::{Filter, FilterData};

struct MemoryTable<T> {
    rows: BTreeMap<i32, T>,
    // Highest id ever handed out; never decreases.
    last_id: i32,
}

/// In-process repository. Each instance is an independent table; writers are serialised
/// by the table's lock.
pub struct MemoryRepository<T> {
    table: RwLock<MemoryTable<T>>,
    id_strategy: IdStrategy,
}

impl<T: Entity> MemoryRepository<T> {
    /// Start from existing rows, keeping their ids.
    pub fn with_rows(id_strategy: IdStrategy, rows: Vec<T>) -> Self {
        let rows: BTreeMap<i32, T> = rows.into_iter().map(|r| (r.id(), r)).collect();
        let last_id = rows.keys().next_back().copied().unwrap_or(0);
        Self {
            table: RwLock::new(MemoryTable { rows, last_id }),
            id_strategy,
        }
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }
}

impl<T> MemoryTable<T> {
    fn next_id(&self, strategy: IdStrategy) -> i32 {
        match strategy {
            IdStrategy::StoreGenerated => self.last_id + 1,
            IdStrategy::MaxPlusOne => self.rows.keys().next_back().copied().unwrap_or(0) + 1,
        }
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn get_all(&self) -> Result<Vec<T>, DatabaseError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn get_by_filter(&self, filter_data: FilterData, no_tracking: bool) -> Result<Option<T>, DatabaseError> {
        tracing::trace!(table = T::TABLE, no_tracking, "filtered lookup");

        let mut filter = Filter::new(T::TABLE)?.columns(T::COLUMNS.iter().copied());
        filter.assign(filter_data)?;

        let table = self.table.read().await;
        for record in table.rows.values() {
            if filter.matches(&record.row()?) {
                return Ok(Some(record.clone()));
            }
        }
        Ok(None)
    }

    async fn create(&self, mut record: T) -> Result<T, DatabaseError> {
        check_constraints(&record)?;

        let mut table = self.table.write().await;
        let id = table.next_id(self.id_strategy);
        record.set_id(id);
        table.last_id = table.last_id.max(id);
        table.rows.insert(id, record.clone());

        tracing::debug!(table = T::TABLE, id, "created row");
        Ok(record)
    }

    async fn update(&self, record: T) -> Result<T, DatabaseError> {
        check_constraints(&record)?;

        let mut table = self.table.write().await;
        match table.rows.get_mut(&record.id()) {
            Some(existing) => {
                *existing = record.clone();
                Ok(record)
            }
            None => Err(DatabaseError::NotFound(format!("{} row {} not found", T::TABLE, record.id()))),
        }
    }

    async fn delete(&self, record: T) -> Result<bool, DatabaseError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&record.id()).is_some())
    }
}
