//! HTTP server implementation using Axum.

use crate::handler::{handle_health, handle_rpc};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use wirecheck_core::TransferService;

/// Application state shared across handlers.
pub struct AppState {
    /// Transfer service (core semantics, no HTTP knowledge)
    pub service: TransferService,
}

/// A running server instance.
///
/// The listener keeps serving in a background task until [`stop`] is called
/// or the handle is dropped; there is no process-global state.
///
/// [`stop`]: ServerHandle::stop
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// The address the server is bound to (useful when port=0).
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Shut the server down gracefully and wait for it to finish.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        let _ = (&mut self.task).await;
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// Start the JSON-RPC HTTP server.
///
/// Binds to `host:port` (port 0 auto-assigns) and serves in a background
/// task. Returns a [`ServerHandle`] carrying the bound address and an
/// explicit stop.
pub async fn start_server(host: &str, port: u16) -> anyhow::Result<ServerHandle> {
    let state = Arc::new(AppState {
        service: TransferService::new(),
    });

    // Listen on the given address without any authentication mechanism
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/rpc", post(handle_rpc))
        .layer(cors)
        .with_state(state);

    // Parse the address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    // Bind to the address
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("Server listening on {}", actual_addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let task = tokio::spawn(async move {
        let serve = axum::serve(listener, app).with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });
        if let Err(e) = serve.await {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok(ServerHandle {
        addr: actual_addr,
        shutdown: Some(shutdown_tx),
        task,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_starts_on_ephemeral_port() {
        let server = start_server("127.0.0.1", 0).await.unwrap();
        assert!(server.addr().port() > 0);
        server.stop().await;
    }

    #[tokio::test]
    async fn test_stopped_server_releases_port() {
        let server = start_server("127.0.0.1", 0).await.unwrap();
        let addr = server.addr();
        server.stop().await;

        // The port must be bindable again once stop() has returned
        let rebound = tokio::net::TcpListener::bind(addr).await;
        assert!(rebound.is_ok());
    }
}
