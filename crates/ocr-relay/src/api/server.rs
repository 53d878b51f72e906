//! API server setup and configuration.

use std::{
    future::Future,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{OcrRelay, RelayConfig, RelayError, Result};

use super::{
    handlers::{
        clear_handler, health_handler, history_handler, info_handler, latest_text_handler, submit_handler,
        trigger_handler,
    },
    types::ApiState,
};

/// Create the API router with default limits and no static assets.
///
/// This is public to allow users to embed the router in their own applications.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use ocr_relay::{OcrRelay, RelayConfig, api::create_router};
///
/// let relay = Arc::new(OcrRelay::open(&RelayConfig::default()));
/// let router = create_router(relay);
/// ```
pub fn create_router(relay: Arc<OcrRelay>) -> Router {
    create_router_with_config(relay, &RelayConfig::default())
}

/// Create the API router using the body limit and static directory from `config`.
///
/// Every response allows any origin, method and header.
pub fn create_router_with_config(relay: Arc<OcrRelay>, config: &RelayConfig) -> Router {
    let state = ApiState { relay };

    let cors_layer = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    let mut router = Router::new()
        .route("/api/recognized-text", get(history_handler))
        .route("/api/ocr/add", get(latest_text_handler).post(submit_handler))
        .route("/api/ocr/clear", post(clear_handler))
        .route("/api/ocr/trigger", post(trigger_handler))
        .route("/health", get(health_handler))
        .route("/info", get(info_handler));

    if let Some(static_dir) = &config.static_dir {
        if static_dir.is_dir() {
            tracing::info!("Serving static files from {}", static_dir.display());
            router = router.fallback_service(ServeDir::new(static_dir));
        } else {
            tracing::warn!(
                "Static directory {} does not exist, serving the API only",
                static_dir.display()
            );
        }
    }

    router
        .layer(DefaultBodyLimit::max(config.max_request_body_bytes))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server and run until the process receives Ctrl-C or SIGTERM.
///
/// The history is warm-started from the snapshot before the listener binds,
/// and flushed to disk once more after the server stops.
///
/// # Examples
///
/// ```no_run
/// use ocr_relay::{RelayConfig, api::serve};
///
/// #[tokio::main]
/// async fn main() -> ocr_relay::Result<()> {
///     serve(RelayConfig::default()).await
/// }
/// ```
pub async fn serve(config: RelayConfig) -> Result<()> {
    let relay = Arc::new(OcrRelay::open(&config));
    serve_with_shutdown(config, Arc::clone(&relay), shutdown_signal()).await?;

    if let Err(e) = relay.flush() {
        tracing::warn!("Final snapshot flush failed: {}", e);
    }
    Ok(())
}

/// Start the API server for an existing relay and stop when `shutdown` resolves.
pub async fn serve_with_shutdown<F>(config: RelayConfig, relay: Arc<OcrRelay>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    config.validate()?;

    let ip: IpAddr = config
        .host
        .parse()
        .map_err(|e| RelayError::validation(format!("Invalid host address: {}", e)))?;
    let addr = SocketAddr::new(ip, config.port);

    let app = create_router_with_config(relay, &config);

    tracing::info!("Starting OCR relay on http://{}", addr);
    tracing::info!("Recognizer hand-off file: {}", config.handoff_path.display());

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(RelayError::Io)?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| RelayError::Other(e.to_string()))?;

    tracing::info!("OCR relay stopped");
    Ok(())
}

/// Resolve on Ctrl-C, or on SIGTERM where available.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
