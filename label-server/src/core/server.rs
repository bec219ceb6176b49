//! Server Implementation
//!
//! HTTP server startup and shutdown

use tokio::net::TcpListener;

use crate::api;
use crate::core::{Config, Result, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    /// Validate configuration and prepare the server
    pub fn new(config: Config) -> Result<Self> {
        let state = ServerState::initialize(&config)?;
        Ok(Self { config, state })
    }

    /// Bind the configured address and serve until Ctrl-C
    pub async fn run(self) -> Result<()> {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("🏷️ Label server listening on http://{}", listener.local_addr()?);

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = api::router(self.state);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");
}
