use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{validate_task, StoreError, TodoStore};
use crate::config::DatabaseConfig;
use crate::model::TodoItem;

const LIST: &str = "SELECT id, task, completed FROM todos ORDER BY id ASC";
const INSERT: &str = "INSERT INTO todos (task, completed) VALUES ($1, FALSE) RETURNING id, task, completed";
const SELECT_ONE: &str = "SELECT id, task, completed FROM todos WHERE id = $1";
// Lookup and removal in one statement; no window for a concurrent delete.
const DELETE_RETURNING: &str = "DELETE FROM todos WHERE id = $1 RETURNING id, task, completed";

/// Store backed by the `todos` table (see `sql/init.sql`).
///
/// Connections come from a process-wide pool and go back to it when each
/// query future completes or is dropped.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.connect_options())
            .await?;
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Round-trip a trivial query to prove the database is reachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl TodoStore for PgStore {
    async fn list(&self) -> Result<Vec<TodoItem>, StoreError> {
        Ok(sqlx::query_as::<_, TodoItem>(LIST).fetch_all(&self.pool).await?)
    }

    async fn create(&self, task: &str) -> Result<TodoItem, StoreError> {
        validate_task(task)?;
        sqlx::query_as::<_, TodoItem>(INSERT)
            .bind(task)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::Write("Creating todo failed, no ID obtained."))
    }

    async fn get(&self, id: i64) -> Result<Option<TodoItem>, StoreError> {
        Ok(sqlx::query_as::<_, TodoItem>(SELECT_ONE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn delete(&self, id: i64) -> Result<Option<TodoItem>, StoreError> {
        Ok(sqlx::query_as::<_, TodoItem>(DELETE_RETURNING)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }
}
