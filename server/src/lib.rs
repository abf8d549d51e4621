//! HTTP CRUD service for todo items backed by PostgreSQL.
//!
//! # Overview
//! `app` builds the axum router for `/api/v1/items` around an injected
//! `TodoStore`. `run` serves it on a listener until Ctrl-C or SIGTERM.
//!
//! # Design
//! - The store is passed in through `AppState`, never held globally, so the
//!   router can be exercised with `MemoryStore` in tests.
//! - Every handler failure is an `ApiError` rendered as HTTP 400 with the
//!   `{"status":"error","error":...}` envelope.

pub mod config;
pub mod error;
pub mod handlers;
pub mod store;

use std::any::Any;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use todo_core::Envelope;
use tracing::{error, info};

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use store::{MemoryStore, PgStore, TodoStore};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new(store: impl TodoStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/items", post(handlers::create_item))
        .route(
            "/api/v1/items/{id}",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        .fallback(handlers::route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Render a handler panic as a 500 error envelope.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = message, "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Envelope::error("internal server error")),
    )
        .into_response()
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "todo-server listening");
    }
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = sigterm => {}
    }
    info!("shutdown signal received, draining connections");
}
