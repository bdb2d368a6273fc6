//! Router assembly and server startup.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::{self, ClientStore};
use crate::files::FileStore;
use crate::routes::{clients, health, not_found};
use crate::service::ClientService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ClientService>,
    pub config: Arc<Config>,
}

/// Build the router with all routes and middleware.
///
/// The original front end is served from another origin, so CORS stays wide
/// open. The body limit bounds photo uploads.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/clients", get(clients::list).post(clients::create))
        .route(
            "/api/clients/{id}",
            get(clients::get_by_id)
                .put(clients::update)
                .delete(clients::delete),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Connect the storage backend, build the router and serve until shutdown.
pub async fn start_server(config: Config) -> Result<()> {
    let store: Arc<dyn ClientStore> = Arc::new(db::init(&config).await?);
    tracing::info!("database connection established");

    let files = FileStore::new(&config.upload_dir);
    let service = Arc::new(ClientService::new(store, files));

    let addr: SocketAddr = config.socket_addr()?;
    let state = AppState {
        service,
        config: Arc::new(config),
    };
    let app = build_router(state);

    tracing::info!("starting client-registry on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
