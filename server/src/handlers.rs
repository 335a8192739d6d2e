//! Request handlers. Each one parses its input, makes at most one store call
//! and serializes the result; failures travel back as `ApiError`.

use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

use crate::error::{ApiError, INVALID_TODO_ID, INVALID_TODO_PATH, TASK_REQUIRED};
use crate::model::{ApiInfo, CreateTodo, DeleteResponse, HealthStatus, TodoItem};
use crate::AppState;

pub async fn api_info(State(state): State<AppState>) -> Json<ApiInfo> {
    let mut endpoints = BTreeMap::new();
    endpoints.insert("GET /".to_string(), "API information".to_string());
    endpoints.insert("GET /todos".to_string(), "Get all todos".to_string());
    endpoints.insert("GET /todos/{id}".to_string(), "Get a specific todo".to_string());
    endpoints.insert("POST /todos".to_string(), "Create a new todo".to_string());
    if state.variant.serves_delete() {
        endpoints.insert("DELETE /todos/{id}".to_string(), "Delete a todo".to_string());
    }
    endpoints.insert("GET /health".to_string(), "Health check".to_string());

    Json(ApiInfo {
        message: "Welcome to Todo API!".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoItem>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

pub async fn create_todo(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<TodoItem>), ApiError> {
    let body = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "unreadable create body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::BodyTooLarge
        } else {
            ApiError::MalformedRequest
        }
    })?;
    let input = CreateTodo::from_slice(&body).map_err(|err| {
        tracing::debug!(error = %err, "rejecting create body");
        ApiError::MalformedRequest
    })?;
    let task = input.task().ok_or(ApiError::Validation(TASK_REQUIRED))?;
    let todo = state.store.create(task).await?;
    tracing::debug!(id = todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn get_todo(
    State(state): State<AppState>,
    rest: Result<Path<String>, PathRejection>,
) -> Result<Json<TodoItem>, ApiError> {
    let id = todo_id(rest)?;
    state.store.get(id).await?.map(Json).ok_or(ApiError::NotFound)
}

pub async fn delete_todo(
    State(state): State<AppState>,
    rest: Result<Path<String>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = todo_id(rest)?;
    let deleted = state.store.delete(id).await?.ok_or(ApiError::NotFound)?;
    tracing::debug!(id, "todo deleted");
    Ok(Json(DeleteResponse::new(deleted)))
}

/// `/todos/` with nothing after the slash, or `DELETE /todos`.
pub async fn missing_todo_id() -> ApiError {
    ApiError::Validation(INVALID_TODO_PATH)
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus::healthy(state.started.elapsed()))
}

/// CORS preflight; the headers are attached by the router's layers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn not_found() -> ApiError {
    ApiError::UnknownRoute
}

/// A sub-path that is not valid UTF-8 once decoded cannot be an integer.
fn todo_id(rest: Result<Path<String>, PathRejection>) -> Result<i64, ApiError> {
    let Path(rest) = rest.map_err(|rejection| {
        tracing::debug!(error = %rejection, "unreadable todo path");
        ApiError::Validation(INVALID_TODO_ID)
    })?;
    parse_todo_id(&rest)
}

/// Parse the part of the path after `/todos/`: exactly one integer segment.
fn parse_todo_id(rest: &str) -> Result<i64, ApiError> {
    let mut segments = rest.trim_end_matches('/').split('/');
    match (segments.next(), segments.next()) {
        (Some(id), None) if !id.is_empty() => {
            id.parse().map_err(|_| ApiError::Validation(INVALID_TODO_ID))
        }
        _ => Err(ApiError::Validation(INVALID_TODO_PATH)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<i64, ApiError>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn parses_single_integer_segment() {
        assert_eq!(parse_todo_id("1").unwrap(), 1);
        assert_eq!(parse_todo_id("123/").unwrap(), 123);
        assert_eq!(parse_todo_id("-4").unwrap(), -4);
    }

    #[test]
    fn non_integer_segment_is_invalid_id() {
        assert_eq!(message(parse_todo_id("abc")), INVALID_TODO_ID);
        assert_eq!(message(parse_todo_id("1.5")), INVALID_TODO_ID);
        assert_eq!(message(parse_todo_id("99999999999999999999")), INVALID_TODO_ID);
    }

    #[test]
    fn extra_segments_are_invalid_path() {
        assert_eq!(message(parse_todo_id("1/extra")), INVALID_TODO_PATH);
        assert_eq!(message(parse_todo_id("")), INVALID_TODO_PATH);
        assert_eq!(message(parse_todo_id("1/2/3")), INVALID_TODO_PATH);
    }
}
