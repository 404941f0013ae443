//! Router construction and server loop.

use crate::app::handlers;
use crate::core::forwarder::RequestForwarder;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<RequestForwarder>,
}

pub fn build_router(forwarder: RequestForwarder) -> Router {
    let state = AppState {
        forwarder: Arc::new(forwarder),
    };

    Router::new()
        .route("/create_group", post(handlers::create_group))
        .route("/contribute", post(handlers::contribute))
        .route("/propose", post(handlers::propose))
        .route("/vote", post(handlers::vote))
        .route("/execute", post(handlers::execute))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl-C; in-flight requests finish before returning.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("🛑 Shutdown signal received");
}
