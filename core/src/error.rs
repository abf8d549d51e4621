//! Error types for the data access layer.
//!
//! # Design
//! `NotFound` gets a dedicated variant because a read of a missing row is the
//! one storage outcome callers can act on. Every other backend failure is
//! flattened into `Persistence` with the driver's message, which is what the
//! API exposes to clients.

use thiserror::Error;

/// Errors returned by `TodoStore` implementations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No row matched the requested id.
    #[error("record not found: id {id}")]
    NotFound { id: i64 },

    /// The backend rejected the statement or could not be reached.
    #[error("{0}")]
    Persistence(String),
}
