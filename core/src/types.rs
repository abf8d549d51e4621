//! Domain DTOs for the todo items API.
//!
//! # Design
//! `TodoItem` is the persisted row. `TodoItemCreation` and `TodoItemUpdate`
//! are the input projections accepted by the create and update endpoints.
//! None of these types know about SQL or HTTP; the server crate maps them to
//! both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` the same as a missing string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single todo item as stored in the `todo_items` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a new todo item. The server assigns `id` and
/// `created_at`; any client-supplied values for them are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItemCreation {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub status: String,
}

/// Request payload for a partial update.
///
/// `title` and `description` are only written when present. `status` is
/// required and always written, even when it repeats the stored value.
/// Absent fields echo back as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItemUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub status: String,
}

impl TodoItemUpdate {
    /// Merge this update into `item`, leaving absent fields untouched.
    pub fn apply_to(&self, item: &mut TodoItem, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            item.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            item.description.clone_from(description);
        }
        item.status.clone_from(&self.status);
        item.updated_at = Some(now);
    }
}
