// Scheduled-publishing binary entry point

use common::config::Settings;
use common::db::{ArticleStore, DbPool, PgArticleStore};
use common::publish::{DriverConfig, PublishDriver, ScheduledPublisher};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scheduler=info,common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting Blogpress publish scheduler");

    let settings = Settings::load().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;
    settings.validate().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e
    })?;

    info!(
        database_url = %settings.database.url,
        poll_interval_seconds = settings.publisher.poll_interval_seconds,
        display_timezone = %settings.publisher.display_timezone,
        "Configuration loaded"
    );

    let db_pool = DbPool::new(&settings.database).await.map_err(|e| {
        error!(error = %e, "Failed to initialize database pool");
        e
    })?;
    db_pool.health_check().await.map_err(|e| {
        error!(error = %e, "Database health check failed at startup");
        e
    })?;

    let store = Arc::new(PgArticleStore::new(db_pool.clone())) as Arc<dyn ArticleStore>;
    let evaluator = Arc::new(ScheduledPublisher::new(store, settings.display_timezone()));

    let driver_config = DriverConfig {
        poll_interval_seconds: settings.publisher.poll_interval_seconds,
        retry_attempts: settings.publisher.retry_attempts,
        retry_delay_seconds: settings.publisher.retry_delay_seconds,
    };
    let driver = Arc::new(PublishDriver::new(driver_config, evaluator));

    let driver_for_shutdown = driver.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        info!("Received Ctrl+C signal, initiating graceful shutdown");
        driver_for_shutdown.stop();
    });

    info!("Starting publish polling loop");
    driver.start().await;

    db_pool.close().await;
    info!("Scheduler stopped");
    Ok(())
}
