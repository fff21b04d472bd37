use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storyforge_core::artifacts::ArtifactStore;
use storyforge_gigachat::{GigaChatClient, GigaChatConfig};
use storyforge_worker::{GenerationWorker, WorkerConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storyforge_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkerConfig::from_env();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = storyforge_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    storyforge_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database connection pool created");

    let generator = GigaChatClient::new(GigaChatConfig::from_env())
        .expect("Failed to build GigaChat client");
    let store = ArtifactStore::new(&config.artifact_dir);

    let worker = GenerationWorker::new(pool, Arc::new(generator), store)
        .with_poll_interval(Duration::from_millis(config.poll_interval_ms));

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.cancel();
        }
    });

    worker.run(cancel).await;
}
