use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{validate_task, StoreError, TodoStore};
use crate::model::TodoItem;

#[derive(Debug)]
struct Inner {
    // Kept sorted by id: ids only grow and removal preserves order.
    items: Vec<TodoItem>,
    next_id: i64,
}

/// Process-local store. Contents vanish with the process.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                items: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// A store pre-populated with one incomplete item per task, ids from 1.
    pub fn seeded<I, T>(tasks: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut inner = Inner {
            items: Vec::new(),
            next_id: 1,
        };
        for task in tasks {
            inner.items.push(TodoItem {
                id: inner.next_id,
                task: task.into(),
                completed: false,
            });
            inner.next_id += 1;
        }
        Self {
            inner: Mutex::new(inner),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self) -> Result<Vec<TodoItem>, StoreError> {
        Ok(self.inner.lock().await.items.clone())
    }

    async fn create(&self, task: &str) -> Result<TodoItem, StoreError> {
        validate_task(task)?;
        let mut inner = self.inner.lock().await;
        let todo = TodoItem {
            id: inner.next_id,
            task: task.to_string(),
            completed: false,
        };
        inner.next_id += 1;
        inner.items.push(todo.clone());
        Ok(todo)
    }

    async fn get(&self, id: i64) -> Result<Option<TodoItem>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.items.iter().find(|todo| todo.id == id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<Option<TodoItem>, StoreError> {
        let mut inner = self.inner.lock().await;
        let Some(index) = inner.items.iter().position(|todo| todo.id == id) else {
            return Ok(None);
        };
        Ok(Some(inner.items.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn new_store_is_empty() {
        let store = MemoryStore::new();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ids_start_at_one_and_increase() {
        let store = MemoryStore::new();
        let first = store.create("one").await.unwrap();
        let second = store.create("two").await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(!first.completed);
        assert!(!second.completed);
    }

    #[tokio::test]
    async fn blank_task_leaves_store_untouched() {
        let store = MemoryStore::new();
        let err = store.create("   ").await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(store.create("next").await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        store.create("one").await.unwrap();
        let two = store.create("two").await.unwrap();
        let removed = store.delete(two.id).await.unwrap();
        assert_eq!(removed, Some(two));
        assert_eq!(store.create("three").await.unwrap().id, 3);
    }

    #[tokio::test]
    async fn delete_missing_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.delete(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn get_finds_created_item() {
        let store = MemoryStore::new();
        let created = store.create("find me").await.unwrap();
        assert_eq!(store.get(created.id).await.unwrap(), Some(created));
        assert_eq!(store.get(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_stays_ordered_after_removal() {
        let store = MemoryStore::new();
        for task in ["a", "b", "c", "d"] {
            store.create(task).await.unwrap();
        }
        store.delete(2).await.unwrap();
        let ids: Vec<i64> = store.list().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[tokio::test]
    async fn seeded_store_continues_numbering() {
        let store = MemoryStore::seeded(["Learn Docker", "Build an image"]);
        let todos = store.list().await.unwrap();
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[1].task, "Build an image");
        assert_eq!(store.create("after seed").await.unwrap().id, 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_get_distinct_ids() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..64)
            .map(|n| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create(&format!("task {n}")).await.unwrap().id })
            })
            .collect();
        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=64).collect::<Vec<i64>>());

        let listed: Vec<i64> = store.list().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(listed, (1..=64).collect::<Vec<i64>>());
    }
}
