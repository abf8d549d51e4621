use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use todo_core::{StoreError, TodoItem, TodoItemCreation, TodoItemUpdate};
use tokio::sync::RwLock;

use super::TodoStore;

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, TodoItem>,
}

/// In-process `TodoStore`. Ids start at 1 and are never reused, matching a
/// `BIGSERIAL` column.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    table: Arc<RwLock<Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert(&self, item: &TodoItemCreation) -> Result<i64, StoreError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(
            id,
            TodoItem {
                id,
                title: item.title.clone(),
                description: item.description.clone(),
                status: item.status.clone(),
                created_at: Utc::now(),
                updated_at: None,
            },
        );
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<TodoItem, StoreError> {
        let table = self.table.read().await;
        table.rows.get(&id).cloned().ok_or(StoreError::NotFound { id })
    }

    async fn update_by_id(&self, id: i64, update: &TodoItemUpdate) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        if let Some(item) = table.rows.get_mut(&id) {
            update.apply_to(item, Utc::now());
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }
}
