use std::sync::Arc;

use sea_orm::Database;
use tracing::info;
use tracing_subscriber::EnvFilter;

use reachmon::db::services::{PgSeriesStore, PgTargetCatalog};
use reachmon::monitor::prober::HttpProber;
use reachmon::monitor::query::QueryEngine;
use reachmon::monitor::recorder::Recorder;
use reachmon::monitor::scheduler::Scheduler;
use reachmon::server::config::ServerConfig;
use reachmon::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Arc::new(ServerConfig::from_env()?);

    let db = Database::connect(&config.database_url).await?;
    info!("Connected to the database.");

    let catalog = Arc::new(PgTargetCatalog::new(db.clone()));
    let store = Arc::new(PgSeriesStore::new(db.clone()));
    let prober = Arc::new(HttpProber::new(config.probe_timeout)?);

    let scheduler = Scheduler::new(
        catalog,
        prober,
        Recorder::new(store.clone()),
        config.tick_period,
        config.probe_concurrency,
    );
    let scheduler_handle = scheduler.spawn();

    let app_state = Arc::new(AppState {
        db_pool: db,
        query_engine: QueryEngine::new(store),
        config: config.clone(),
    });
    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(listen_addr = %config.listen_addr, "HTTP server listening.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler_handle.shutdown().await;
    info!("Shutdown complete.");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
