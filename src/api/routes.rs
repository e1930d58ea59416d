//! Router assembly and the HTTP server loop.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use mockable::Clock;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use super::{system, tasks};
use crate::{
    config::Config,
    task::{ports::TaskRepository, services::TaskLifecycleService},
};

/// Shared handler state.
pub struct AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Task lifecycle service shared by every request.
    pub tasks: Arc<TaskLifecycleService<R, C>>,
}

impl<R, C> Clone for AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
        }
    }
}

/// Builds the application router around a lifecycle service.
///
/// The static `/tasks/next-to-process` and `/tasks/pending` routes take
/// precedence over `/tasks/:external_id`.
pub fn build_router<R, C>(service: Arc<TaskLifecycleService<R, C>>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let state = AppState { tasks: service };

    Router::new()
        .route("/", get(system::index))
        .route("/health", get(system::health::<R, C>))
        .route("/tasks", post(tasks::create_task::<R, C>))
        .route("/tasks/next-to-process", get(tasks::next_to_process::<R, C>))
        .route("/tasks/pending", get(tasks::pending_tasks::<R, C>))
        .route("/tasks/:external_id", get(tasks::get_task::<R, C>))
        .route(
            "/tasks/:external_id/status",
            put(tasks::update_task_status::<R, C>),
        )
        .fallback(system::not_found)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Binds the configured address and serves until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an I/O error when the address cannot be bound or the server
/// fails.
pub async fn serve<R, C>(
    config: &Config,
    service: Arc<TaskLifecycleService<R, C>>,
) -> std::io::Result<()>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let app = build_router(service);
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!(address = %addr, "task scheduler listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}
