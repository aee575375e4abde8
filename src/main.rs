use tokio::net::TcpListener;

use keuanganku::app;
use keuanganku::config::Config;
use keuanganku::db::pool;
use keuanganku::logging::{init_logging, LoggingConfig};
use keuanganku::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env())?;

    let config = Config::from_env()?;
    tracing::info!(
        "Starting in {} mode (max {} db connections)",
        config.environment.as_str(),
        config.max_connections
    );

    let pool = pool::connect(&config).await?;

    if config.run_migrations {
        tracing::info!("Running database migrations");
        pool::run_migrations(&pool).await?;
    }

    let app = app::create_app(AppState::new(pool));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Keuanganku backend running at http://{}/", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
