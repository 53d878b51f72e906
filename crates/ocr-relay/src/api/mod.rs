//! REST API server for the OCR relay.
//!
//! This module provides an Axum-based HTTP server exposing the relay to the
//! browser front end and to the recognizer. All responses allow any origin.
//!
//! # Endpoints
//!
//! - `GET /api/recognized-text` - Full history, oldest first
//! - `GET /api/ocr/add` - Latest text (hand-off file, then history)
//! - `POST /api/ocr/add` - Submit a recognized text: `{"text": "..."}`
//! - `POST /api/ocr/clear` - Clear the history
//! - `POST /api/ocr/trigger` - Recognition trigger hook (returns empty text)
//! - `GET /health` - Health check endpoint
//! - `GET /info` - Server information
//!
//! # Examples
//!
//! ## Embedding the router in your app
//!
//! ```no_run
//! use std::sync::Arc;
//! use ocr_relay::{OcrRelay, RelayConfig, api::create_router};
//! use axum::Router;
//!
//! let relay = Arc::new(OcrRelay::open(&RelayConfig::default()));
//! let app = Router::new().nest("/relay", create_router(relay));
//! ```
//!
//! # cURL Examples
//!
//! ```bash
//! # Recognizer pushes a result
//! curl -X POST -H 'Content-Type: application/json' \
//!      -d '{"text":"cdEFG123"}' http://localhost:8088/api/ocr/add
//!
//! # Or writes the hand-off file
//! echo "cdEFG123" > /tmp/ocr_result.txt
//!
//! # Front end asks for the latest text
//! curl http://localhost:8088/api/ocr/add
//!
//! # History and clear
//! curl http://localhost:8088/api/recognized-text
//! curl -X POST http://localhost:8088/api/ocr/clear
//! ```

mod error;
mod handlers;
mod server;
mod types;

pub use error::ApiError;
pub use server::{create_router, create_router_with_config, serve, serve_with_shutdown, shutdown_signal};
pub use types::{
    ApiState, ErrorResponse, HealthResponse, HistoryResponse, InfoResponse, LatestTextResponse, MessageResponse,
    STATUS_ERROR, TriggerResponse,
};
