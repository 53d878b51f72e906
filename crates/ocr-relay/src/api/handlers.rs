//! API request handlers.
//!
//! Handlers that touch the file system (snapshot writes, hand-off reads) run
//! the relay call on the blocking pool so the async workers never wait on disk.

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};

use crate::error::RelayError;
use crate::types::{STATUS_SUCCESS, Snapshot, current_time_string, current_timestamp};

use super::{
    error::ApiError,
    types::{
        ApiState, HealthResponse, HistoryResponse, InfoResponse, LatestTextResponse, MessageResponse,
        TriggerResponse,
    },
};

async fn run_blocking<T, F>(task: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ApiError::internal(RelayError::Other(format!("Blocking task failed: {}", e))))
}

/// History endpoint handler.
///
/// GET /api/recognized-text
pub async fn history_handler(State(state): State<ApiState>) -> Json<HistoryResponse> {
    Json(Snapshot::new(state.relay.history()))
}

/// Latest-text endpoint handler, called when the front end asks for a result.
///
/// GET /api/ocr/add
///
/// Reads the hand-off file first and falls back to the newest history record.
/// An empty `text` is a successful answer.
pub async fn latest_text_handler(State(state): State<ApiState>) -> Result<Json<LatestTextResponse>, ApiError> {
    let relay = state.relay.clone();
    let resolved = run_blocking(move || relay.resolve()).await?;

    tracing::info!(source = ?resolved.source, "Returning OCR result: {}", resolved.text);

    Ok(Json(LatestTextResponse {
        status: STATUS_SUCCESS.to_string(),
        message: "OCR data received".to_string(),
        text: resolved.text,
        number: "1".to_string(),
        timestamp: current_time_string(),
    }))
}

/// Submit endpoint handler, called by the recognizer.
///
/// POST /api/ocr/add
///
/// Accepts `{"text": "..."}`. A body that is not JSON or lacks a string
/// `text` field is rejected with `400`, a body over the configured limit with
/// `413`; both leave the history untouched.
pub async fn submit_handler(
    State(state): State<ApiState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let body = body?;
    let relay = state.relay.clone();
    run_blocking(move || relay.submit_payload(&body)).await??;

    Ok(Json(MessageResponse::success("OCR result added")))
}

/// Clear endpoint handler.
///
/// POST /api/ocr/clear
pub async fn clear_handler(State(state): State<ApiState>) -> Result<Json<MessageResponse>, ApiError> {
    let relay = state.relay.clone();
    run_blocking(move || relay.clear()).await?;

    Ok(Json(MessageResponse::success("OCR results cleared")))
}

/// Recognition trigger hook.
///
/// POST /api/ocr/trigger
///
/// No recognizer is wired in, so the returned text is always empty.
pub async fn trigger_handler() -> Json<TriggerResponse> {
    tracing::info!("OCR recognition trigger requested");

    Json(TriggerResponse {
        status: STATUS_SUCCESS.to_string(),
        message: "Recognition completed".to_string(),
        text: String::new(),
        timestamp: current_timestamp(),
    })
}

/// Health check endpoint handler.
///
/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Server info endpoint handler.
///
/// GET /info
pub async fn info_handler(State(state): State<ApiState>) -> Json<InfoResponse> {
    let relay = &state.relay;
    Json(InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        capacity: relay.store().capacity(),
        history_len: relay.store().len(),
        snapshot_path: relay.snapshot().path().display().to_string(),
        handoff_path: relay.resolver().handoff_path().display().to_string(),
    })
}
