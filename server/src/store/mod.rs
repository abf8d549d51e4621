//! Data access layer for the `todo_items` table.
//!
//! # Design
//! Handlers only see the object-safe `TodoStore` trait, injected through the
//! router state as `Arc<dyn TodoStore>`. `PgStore` is the production backend;
//! `MemoryStore` has the same semantics and backs the router tests.
//!
//! Update and delete report success when no row matched. Only `find_by_id`
//! distinguishes a missing row.

mod memory;
pub mod postgres;

use async_trait::async_trait;
use todo_core::{StoreError, TodoItem, TodoItemCreation, TodoItemUpdate};

pub use memory::MemoryStore;
pub use postgres::{connect, PgStore};

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Insert a new row and return its server-assigned id.
    async fn insert(&self, item: &TodoItemCreation) -> Result<i64, StoreError>;

    /// Fetch exactly one row, or `StoreError::NotFound`.
    async fn find_by_id(&self, id: i64) -> Result<TodoItem, StoreError>;

    /// Write `status`, any present optional fields, and refresh `updated_at`.
    async fn update_by_id(&self, id: i64, update: &TodoItemUpdate) -> Result<(), StoreError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;
}
