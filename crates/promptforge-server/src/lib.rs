mod api;
mod health;
mod response;
mod state;
mod static_files;

use std::net::SocketAddr;

use axum::Router;
use promptforge_config::Config;
use promptforge_history::HistoryStore;
use tower_http::trace::TraceLayer;

pub use api::GenerateRequest;
use state::AppState;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the history store is enabled but cannot be opened
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config.server.listen_address;

        let history = if config.history.enabled {
            let path = config.history.resolved_path();
            let store = HistoryStore::open(&path, config.history.max_entries)
                .await
                .map_err(|e| anyhow::anyhow!("failed to open history store: {e}"))?;
            tracing::info!(path = %store.path().display(), "history API enabled");
            Some(store)
        } else {
            None
        };

        let public = config.public_view();
        let static_dir = config.server.static_dir.clone();
        let state = AppState::new(config.ollama, public, history);

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // JSON API
        app = app.merge(api::api_router(state));

        // Frontend (everything the API does not claim)
        app = static_files::mount(app, &static_dir);

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
