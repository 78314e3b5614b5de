//! API server implementation

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tankwatch_storage::RecordStore;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::routes;
use crate::state::AppState;
use crate::Result;

/// Tankwatch API server
pub struct Server {
    config: ServiceConfig,
    state: AppState,
}

impl Server {
    /// Create a server over an already-opened store
    pub fn new(config: ServiceConfig, store: Arc<dyn RecordStore>) -> Self {
        Self {
            config,
            state: AppState::new(store),
        }
    }

    /// Opens the store named in `config` and builds a server around it
    pub async fn connect(config: ServiceConfig) -> Result<Self> {
        let store = tankwatch_storage::connect(&config.database_url).await?;
        tracing::info!(backend = store.backend(), "Record store connected");
        Ok(Self::new(config, store))
    }

    /// The full application router
    pub fn router(&self) -> Router {
        routes::app(self.state.clone(), &self.config.static_dir)
    }

    /// Binds the configured address and serves until Ctrl-C
    pub async fn run(self) -> Result<()> {
        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serves on an already-bound listener until Ctrl-C
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let addr: SocketAddr = listener.local_addr()?;
        tracing::info!("Server started on port {}", addr.port());
        tracing::debug!(%addr, static_dir = %self.config.static_dir.display(), "Listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
