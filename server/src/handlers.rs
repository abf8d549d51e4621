//! Request handlers for `/api/v1/items`.
//!
//! Each handler validates its inputs through the `ItemId` and `JsonBody`
//! extractors, makes one store call and renders the envelope. Axum runs the
//! path extractor before the body extractor, so a bad id is reported even
//! when the body is also malformed.

use axum::extract::{FromRequest, FromRequestParts, Path, Request, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;
use todo_core::{Envelope, TodoItem, TodoItemCreation, TodoItemUpdate};
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

/// Parse a path id as a positive integer.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    let id: i64 = raw
        .parse()
        .map_err(|e| ApiError::Validation(format!("invalid id: {e}")))?;
    if id <= 0 {
        return Err(ApiError::Validation(format!(
            "invalid id: {id} is not a positive integer"
        )));
    }
    Ok(id)
}

/// The `{id}` path segment, already validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for ItemId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Validation(format!("invalid id: {}", e.body_text())))?;
        parse_id(&raw).map(ItemId)
    }
}

/// `Json<T>` whose rejections render through `ApiError`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        Ok(Self(value))
    }
}

// POST /api/v1/items
pub async fn create_item(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<TodoItemCreation>,
) -> Result<(StatusCode, Json<Envelope<i64>>), ApiError> {
    let id = state.store.insert(&input).await?;
    info!(id, "created todo item");
    Ok((StatusCode::CREATED, Json(Envelope::created(id))))
}

// GET /api/v1/items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<Json<Envelope<TodoItem>>, ApiError> {
    let item = state.store.find_by_id(id).await?;
    Ok(Json(Envelope::ok(item)))
}

// PUT /api/v1/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    ItemId(id): ItemId,
    JsonBody(input): JsonBody<TodoItemUpdate>,
) -> Result<Json<Envelope<TodoItemUpdate>>, ApiError> {
    state.store.update_by_id(id, &input).await?;
    info!(id, status = %input.status, "updated todo item");
    Ok(Json(Envelope::ok(input)))
}

// DELETE /api/v1/items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<Json<Envelope<()>>, ApiError> {
    state.store.delete_by_id(id).await?;
    info!(id, "deleted todo item");
    Ok(Json(Envelope::ok_empty()))
}

pub async fn route_not_found() -> (StatusCode, Json<Envelope<()>>) {
    (StatusCode::NOT_FOUND, Json(Envelope::error("route not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_positive_integers() {
        assert_eq!(parse_id("1").unwrap(), 1);
        assert_eq!(parse_id("9000000000").unwrap(), 9_000_000_000);
    }

    #[test]
    fn parse_id_rejects_non_numeric() {
        let err = parse_id("abc").unwrap_err();
        assert_eq!(err.to_string(), "invalid id: invalid digit found in string");
    }

    #[test]
    fn parse_id_rejects_zero_and_negative() {
        assert!(parse_id("0").is_err());
        let err = parse_id("-3").unwrap_err();
        assert_eq!(err.to_string(), "invalid id: -3 is not a positive integer");
    }

    #[test]
    fn parse_id_rejects_empty() {
        assert!(matches!(parse_id(""), Err(ApiError::Validation(_))));
    }
}
