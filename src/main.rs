//! Tasklane HTTP server entry point.

use std::sync::Arc;

use mockable::DefaultClock;
use tasklane::{
    api,
    config::Config,
    task::{
        adapters::{
            memory::InMemoryTaskRepository,
            postgres::{PostgresTaskRepository, build_pool},
        },
        ports::TaskRepository,
        services::TaskLifecycleService,
    },
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_LOG_FILTER: &str = "tasklane=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let Some(database) = &config.database else {
        warn!("DATABASE_URL is not set; tasks are kept in memory and lost on exit");
        return run(&config, InMemoryTaskRepository::new()).await;
    };

    info!(pool_size = database.pool_size, "using PostgreSQL task store");
    let pool = build_pool(&database.url, database.pool_size, database.connect_timeout);
    run(&config, PostgresTaskRepository::new(pool)).await
}

async fn run<R>(config: &Config, repository: R) -> Result<(), BoxError>
where
    R: TaskRepository + 'static,
{
    let service = TaskLifecycleService::new(Arc::new(repository), Arc::new(DefaultClock));
    if !service.store_connected().await {
        warn!("task store is not reachable yet; requests will fail until it is");
    }
    api::serve(config, Arc::new(service)).await?;
    Ok(())
}
