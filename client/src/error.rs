//! Error types for the todo API client.
//!
//! `NotFound` gets a dedicated variant because callers routinely branch on
//! "the todo does not exist". Every other unexpected status lands in `Api`
//! with the server's `error` message when the body carries one.

/// Errors returned by `TodoClient` methods.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned some other non-success status.
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}
