//! HTTP service exposing list/create/get/delete over todo items.
//!
//! # Design
//! - One binary, two variants: `Variant::Memory` serves the in-memory store
//!   without delete or CORS; `Variant::Persistent` adds `DELETE /todos/{id}`,
//!   `OPTIONS` preflight and CORS headers on every response.
//! - The router only sees `Arc<dyn TodoStore>`, so either variant can run on
//!   either store (tests rely on this).
//! - All `/todos/...` sub-paths land on one wildcard route (plus `/todos/`,
//!   which the wildcard does not match) and are validated by the handler, so
//!   malformed shapes get a JSON 400 instead of a 404.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod store;

use std::{sync::Arc, time::Instant};

use axum::{
    http::{header, HeaderValue},
    routing::{get, MethodRouter},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::config::StorageKind;
use crate::store::TodoStore;

pub use model::{ApiInfo, CreateTodo, DeleteResponse, HealthStatus, TodoItem};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Memory,
    Persistent,
}

impl Variant {
    pub fn serves_delete(self) -> bool {
        self == Variant::Persistent
    }

    pub fn serves_cors(self) -> bool {
        self == Variant::Persistent
    }
}

impl From<StorageKind> for Variant {
    fn from(kind: StorageKind) -> Self {
        match kind {
            StorageKind::Memory => Variant::Memory,
            StorageKind::Postgres => Variant::Persistent,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
    pub variant: Variant,
    pub started: Instant,
}

pub fn app(store: Arc<dyn TodoStore>, variant: Variant) -> Router {
    let state = AppState {
        store,
        variant,
        started: Instant::now(),
    };

    let mut root: MethodRouter<AppState> = get(handlers::api_info);
    let mut todos: MethodRouter<AppState> = get(handlers::list_todos).post(handlers::create_todo);
    let mut todo: MethodRouter<AppState> = get(handlers::get_todo);
    let mut todos_slash: MethodRouter<AppState> = get(handlers::missing_todo_id);
    let mut health: MethodRouter<AppState> = get(handlers::health);

    if variant.serves_delete() {
        todos = todos.delete(handlers::missing_todo_id);
        todo = todo.delete(handlers::delete_todo);
        todos_slash = todos_slash.delete(handlers::missing_todo_id);
    }
    if variant.serves_cors() {
        root = root.options(handlers::preflight);
        todos = todos.options(handlers::preflight);
        todo = todo.options(handlers::preflight);
        todos_slash = todos_slash.options(handlers::preflight);
        health = health.options(handlers::preflight);
    }

    let router = Router::new()
        .route("/", root.fallback(handlers::method_not_allowed))
        .route("/todos", todos.fallback(handlers::method_not_allowed))
        .route("/todos/", todos_slash.fallback(handlers::method_not_allowed))
        .route("/todos/{*rest}", todo.fallback(handlers::method_not_allowed))
        .route("/health", health.fallback(handlers::method_not_allowed))
        .fallback(handlers::not_found)
        .with_state(state);

    let router = if variant.serves_cors() {
        router
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type"),
            ))
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}

/// Serve `app(store, variant)` on `listener` until ctrl-c.
pub async fn run(
    listener: TcpListener,
    store: Arc<dyn TodoStore>,
    variant: Variant,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store, variant))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
