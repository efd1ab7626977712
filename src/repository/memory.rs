//! In-Memory Repository
//!
//! Advisors kept in a BTreeMap behind a RwLock, with sequential ids.

use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::debug;

use super::{AdvisorRepository, RepositoryError};
use crate::models::Advisor;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Advisor>,
    last_id: i64,
}

impl Table {
    /// Checks the SIN against every advisor other than `except`.
    fn sin_taken(&self, sin: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|a| a.sin == sin && Some(a.id) != except)
    }
}

// == In-Memory Repository ==
/// Thread-safe advisor store used as the service's backing store.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    table: RwLock<Table>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AdvisorRepository for InMemoryRepository {
    fn get_all(&self) -> Result<Vec<Advisor>, RepositoryError> {
        let table = self.table.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(table.rows.values().cloned().collect())
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Advisor>, RepositoryError> {
        let table = self.table.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(table.rows.get(&id).cloned())
    }

    fn create(&self, mut advisor: Advisor) -> Result<Advisor, RepositoryError> {
        let mut table = self.table.write().map_err(|_| RepositoryError::Poisoned)?;
        if table.sin_taken(&advisor.sin, None) {
            return Err(RepositoryError::DuplicateSin);
        }

        table.last_id += 1;
        advisor.id = table.last_id;
        table.rows.insert(advisor.id, advisor.clone());

        debug!(id = advisor.id, "advisor created");
        Ok(advisor)
    }

    fn update(&self, advisor: Advisor) -> Result<Advisor, RepositoryError> {
        let mut table = self.table.write().map_err(|_| RepositoryError::Poisoned)?;
        if !table.rows.contains_key(&advisor.id) {
            return Err(RepositoryError::NotFound(advisor.id));
        }
        if table.sin_taken(&advisor.sin, Some(advisor.id)) {
            return Err(RepositoryError::DuplicateSin);
        }

        table.rows.insert(advisor.id, advisor.clone());
        Ok(advisor)
    }

    fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let mut table = self.table.write().map_err(|_| RepositoryError::Poisoned)?;
        Ok(table.rows.remove(&id).is_some())
    }
}
