//! API request and response types.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::relay::OcrRelay;
use crate::types::{STATUS_SUCCESS, Snapshot};

/// Status string of failure payloads.
pub const STATUS_ERROR: &str = "error";

/// API server state shared by all handlers.
#[derive(Debug, Clone)]
pub struct ApiState {
    pub relay: Arc<OcrRelay>,
}

/// History response: `{ status, texts: [...] }`, oldest first.
pub type HistoryResponse = Snapshot;

/// Latest-text response returned when the front end asks for a result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestTextResponse {
    pub status: String,
    pub message: String,
    /// Resolved text; empty when neither source had one.
    pub text: String,
    /// Number of results carried by this response, always `"1"`.
    pub number: String,
    /// Local wall-clock time of the request, `HH:MM:SS`.
    pub timestamp: String,
}

/// Response of the recognition trigger hook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerResponse {
    pub status: String,
    pub message: String,
    pub text: String,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}

/// Plain acknowledgement: `{ status, message }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            message: message.into(),
        }
    }
}

/// Error response: `{ "status": "error", "message": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// API version
    pub version: String,
}

/// Server information response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    pub version: String,
    pub capacity: usize,
    pub history_len: usize,
    pub snapshot_path: String,
    pub handoff_path: String,
}
