//! Server execution logic.

use std::{future::Future, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::{
    handler::{get_history, get_rooms, get_users, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket message relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state, Duration::from_secs(1));
/// server.run("127.0.0.1", 5000).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    /// 入力中の期限切れを掃除する間隔
    typing_sweep_interval: Duration,
}

impl Server {
    pub fn new(state: AppState, typing_sweep_interval: Duration) -> Self {
        Self {
            state: Arc::new(state),
            typing_sweep_interval,
        }
    }

    /// ルーティングの定義
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/users", get(get_users))
            .route("/api/rooms", get(get_rooms))
            .route("/api/history", get(get_history))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind to `host:port` and serve until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Message relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws?username=<name>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    ///
    /// 入力中の期限切れを掃除するタスクもここで起動し、終了時に止めます。
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let sweeper = self
            .state
            .dispatcher
            .typing()
            .spawn_expiry_sweeper(self.typing_sweep_interval);

        let result = axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await;

        sweeper.abort();
        result
    }
}
