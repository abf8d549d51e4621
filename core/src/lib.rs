//! Domain types shared by the todo items service.
//!
//! # Overview
//! Holds the persisted entity, the create/update input projections, the
//! response envelope and the storage error type. Nothing here performs I/O;
//! the `todo-server` crate owns HTTP and SQL.
//!
//! # Design
//! - `TodoItemUpdate` models a partial update with one `Option` per
//!   updatable field, except `status`, which is always written.
//! - `Envelope` is the single response shape for success and failure.

pub mod envelope;
pub mod error;
pub mod types;

pub use envelope::{Envelope, EnvelopeStatus};
pub use error::StoreError;
pub use types::{TodoItem, TodoItemCreation, TodoItemUpdate};
