//! PostgreSQL backend for `TodoStore`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{FromRow, Postgres, QueryBuilder};
use todo_core::{StoreError, TodoItem, TodoItemCreation, TodoItemUpdate};
use tracing::debug;

use super::TodoStore;

pub const MAX_OPEN_CONNECTIONS: u32 = 10;
/// sqlx has no cap on idle connections, so surplus idle connections are
/// closed after this timeout instead.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(10 * 60);
pub const MAX_CONNECTION_LIFETIME: Duration = Duration::from_secs(60 * 60);

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Open a pool with the compiled-in sizing.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_OPEN_CONNECTIONS)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_CONNECTION_LIFETIME)
        .connect(database_url)
        .await
}

#[derive(Debug, FromRow)]
struct TodoItemRow {
    id: i64,
    title: String,
    description: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<TodoItemRow> for TodoItem {
    fn from(row: TodoItemRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the embedded migrations that create `todo_items`.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Persistence(e.to_string()))
    }
}

fn persistence(err: sqlx::Error) -> StoreError {
    StoreError::Persistence(err.to_string())
}

/// Build the partial `UPDATE`: `status` and `updated_at` always, `title` and
/// `description` only when present.
fn update_statement(id: i64, update: &TodoItemUpdate) -> QueryBuilder<'_, Postgres> {
    let mut query = QueryBuilder::new("UPDATE todo_items SET status = ");
    query.push_bind(update.status.as_str());
    if let Some(title) = &update.title {
        query.push(", title = ").push_bind(title.as_str());
    }
    if let Some(description) = &update.description {
        query.push(", description = ").push_bind(description.as_str());
    }
    query.push(", updated_at = now() WHERE id = ").push_bind(id);
    query
}

#[async_trait]
impl TodoStore for PgStore {
    async fn insert(&self, item: &TodoItemCreation) -> Result<i64, StoreError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO todo_items (title, description, status) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&item.title)
        .bind(&item.description)
        .bind(&item.status)
        .fetch_one(&self.pool)
        .await
        .map_err(persistence)?;
        debug!(id, "inserted todo item");
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<TodoItem, StoreError> {
        let row: Option<TodoItemRow> = sqlx::query_as(
            "SELECT id, title, description, status, created_at, updated_at \
             FROM todo_items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(persistence)?;
        row.map(TodoItem::from).ok_or(StoreError::NotFound { id })
    }

    async fn update_by_id(&self, id: i64, update: &TodoItemUpdate) -> Result<(), StoreError> {
        let mut query = update_statement(id, update);
        let result = query.build().execute(&self.pool).await.map_err(persistence)?;
        debug!(id, rows = result.rows_affected(), "updated todo item");
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM todo_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(persistence)?;
        debug!(id, rows = result.rows_affected(), "deleted todo item");
        Ok(())
    }
}
