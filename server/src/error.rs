//! Request-level errors and their HTTP rendering.
//!
//! # Design
//! Every failure a handler can produce renders as HTTP 400 with the error
//! envelope, whatever the root cause. Clients cannot tell a missing row from
//! a broken connection by status code; only the message differs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use todo_core::{Envelope, StoreError};
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    /// The path parameter or request body failed to parse.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(message) => warn!(%message, "rejected request"),
            ApiError::Store(StoreError::NotFound { id }) => warn!(id, "todo item not found"),
            ApiError::Store(err) => error!(error = %err, "storage failure"),
        }
        (self.status(), Json(Envelope::error(self.to_string()))).into_response()
    }
}
