//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::net::SocketAddr;

use tokio::sync::mpsc;

use crate::api;
use crate::core::{BackgroundTasks, Config, Result, ServerError, ServerState, TaskKind};
use crate::printing::{PrintExecutor, PrintWorker};
use stocktag_label::LabelRenderer;

/// HTTP Server
pub struct Server {
    config: Config,
    state: ServerState,
    print_rx: mpsc::Receiver<String>,
}

impl Server {
    /// Create server with existing state and the print job receiver
    pub fn with_state(config: Config, state: ServerState, print_rx: mpsc::Receiver<String>) -> Self {
        Self {
            config,
            state,
            print_rx,
        }
    }

    pub async fn run(self) -> Result<()> {
        let Server {
            config,
            state,
            print_rx,
        } = self;

        // Start background tasks
        let mut tasks = BackgroundTasks::new();
        let worker = PrintWorker::new(
            state.pool.clone(),
            LabelRenderer::new(config.render_dpi),
            PrintExecutor::new(&config.print_command, &config.label_printer),
            config.labels_dir(),
            state.public_base_url(),
            config.print_workers,
        );
        tasks.spawn("print_worker", TaskKind::Worker, worker.run(print_rx, tasks.token()));

        // Recover jobs left queued by a previous process
        let requeued = state
            .print_service
            .requeue_pending()
            .await
            .map_err(|e| ServerError::Startup(e.to_string()))?;
        if requeued > 0 {
            tracing::info!(requeued, "Recovered queued print jobs from previous run");
        }

        let app = api::build_app(&state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("📦 StockTag server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await?;

        tasks.shutdown().await;

        Ok(())
    }
}
