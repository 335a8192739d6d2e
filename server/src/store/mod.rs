//! The resource store: sole owner of the todo collection.
//!
//! # Design
//! Handlers only ever see `Arc<dyn TodoStore>` and receive owned `TodoItem`
//! values back, never references into the collection. Two backends exist:
//! `MemoryStore` (transient, one mutex around every read-modify-write) and
//! `PgStore` (a shared `sqlx` pool, one statement per operation).

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Config, StorageKind};
use crate::error::TASK_REQUIRED;
use crate::model::TodoItem;

/// Tasks loaded into the in-memory store when demo seeding is enabled.
pub const DEMO_TASKS: [&str; 3] = ["Learn Docker", "Build an image", "Deploy to production"];

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The input was rejected before touching the collection.
    #[error("{0}")]
    Validation(&'static str),

    /// The backing database could not be reached or rejected a statement.
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// A write completed without producing the expected row.
    #[error("{0}")]
    Write(&'static str),
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All items, ascending by id.
    async fn list(&self) -> Result<Vec<TodoItem>, StoreError>;
    /// Create an incomplete item with a freshly assigned id.
    async fn create(&self, task: &str) -> Result<TodoItem, StoreError>;
    async fn get(&self, id: i64) -> Result<Option<TodoItem>, StoreError>;
    /// Remove an item, returning its last state. `None` if there was no such item.
    async fn delete(&self, id: i64) -> Result<Option<TodoItem>, StoreError>;
}

/// Reject tasks that are blank once surrounding whitespace is ignored.
pub fn validate_task(task: &str) -> Result<(), StoreError> {
    if task.trim().is_empty() {
        return Err(StoreError::Validation(TASK_REQUIRED));
    }
    Ok(())
}

/// Build the store selected by `config`.
///
/// For the postgres backend this also round-trips a `SELECT 1`, so an
/// unreachable database surfaces here rather than on the first request.
pub async fn open(config: &Config) -> Result<Arc<dyn TodoStore>, StoreError> {
    match config.storage {
        StorageKind::Memory => {
            let store = if config.seed_demo {
                MemoryStore::seeded(DEMO_TASKS)
            } else {
                MemoryStore::new()
            };
            Ok(Arc::new(store))
        }
        StorageKind::Postgres => {
            let store = PgStore::connect(&config.database).await?;
            store.ping().await?;
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_tasks_are_rejected() {
        for task in ["", " ", "\t\n", "   "] {
            let err = validate_task(task).unwrap_err();
            assert!(matches!(err, StoreError::Validation(TASK_REQUIRED)), "{task:?}");
        }
    }

    #[test]
    fn non_blank_tasks_are_accepted() {
        assert!(validate_task("x").is_ok());
        assert!(validate_task("  padded  ").is_ok());
    }
}
