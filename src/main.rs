use std::sync::Arc;
use tokio::sync::broadcast;

use moodlens::config::Config;
use moodlens::services::insights::InsightsAggregator;
use moodlens::services::refresh::{RefreshService, RefreshSettings, Refresher, Snapshots};
use moodlens::sources::PgJournalSource;
use moodlens::{db, handlers, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodlens=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env()?);
    let offset = config.utc_offset()?;

    // Database
    let db = db::create_pool(&config.database_url).await?;
    tracing::info!(user_id = config.journal_user_id, "Connected to journal store");

    // Refresh broadcast channel, fanned out to WebSocket clients
    let (ws_tx, _) = broadcast::channel::<String>(64);

    let source = Arc::new(PgJournalSource::new(db.clone(), config.journal_user_id, offset));
    let refresher = Refresher::new(source, InsightsAggregator::new(offset), Snapshots::new())
        .with_broadcast(ws_tx.clone());

    let refresh_service = RefreshService::start(
        refresher.clone(),
        RefreshSettings {
            insights_interval: config.insights_interval(),
            wellbeing_interval: config.wellbeing_interval(),
        },
    );

    let state = AppState {
        db,
        config: config.clone(),
        ws_tx: Some(ws_tx),
        refresher,
    };
    let app = handlers::router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresh_service.stop().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
