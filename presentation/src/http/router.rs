//! Router assembly and server loop

use super::cors::cors_middleware;
use super::handlers::{health_handler, history_handler, moderate_handler};
use super::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing::info;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/api/moderate", post(moderate_handler))
        .route("/api/history", get(history_handler))
        .layer(DefaultBodyLimit::max(state.options.max_body_bytes));

    let router = if state.options.cors {
        router.layer(from_fn(cors_middleware))
    } else {
        router
    };

    router.with_state(state)
}

/// Serve until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{}", addr);
    }
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
}
