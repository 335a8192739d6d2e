//! Wire DTOs for the todo API.
//!
//! # Design
//! Pure data: every type here maps one-to-one onto a JSON document the
//! service reads or writes. Validation of the create payload happens in the
//! handlers, not during deserialization, so a missing `task` reaches the
//! "Task is required" path instead of failing as a malformed body.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single todo item as stored and as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TodoItem {
    pub id: i64,
    pub task: String,
    pub completed: bool,
}

/// Body of `POST /todos`. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub task: Option<String>,
}

impl CreateTodo {
    /// Parse a request body, accepting only a JSON object.
    ///
    /// serde would otherwise happily read `["x"]` as a struct in sequence form.
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        match serde_json::from_slice(body)? {
            Value::Object(fields) => serde_json::from_value(Value::Object(fields)),
            _ => Err(serde::de::Error::custom("expected a JSON object")),
        }
    }

    /// The submitted task, if present and not blank.
    pub fn task(&self) -> Option<&str> {
        self.task.as_deref().filter(|task| !task.trim().is_empty())
    }
}

/// Body of a successful `DELETE /todos/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub message: String,
    pub deleted_todo: TodoItem,
}

impl DeleteResponse {
    pub fn new(deleted_todo: TodoItem) -> Self {
        Self {
            message: "Todo deleted successfully".to_string(),
            deleted_todo,
        }
    }
}

/// Static metadata served from `GET /`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiInfo {
    pub message: String,
    pub version: String,
    pub endpoints: BTreeMap<String, String>,
}

/// Body of `GET /health`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub uptime: String,
}

impl HealthStatus {
    pub fn healthy(uptime: Duration) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            uptime: format!("{}ms", uptime.as_millis()),
        }
    }
}

/// The `{"error": ...}` envelope carried by every failure response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
