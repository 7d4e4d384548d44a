//! Author Chat - HTTP Server Entry Point

use tokio::net::TcpListener;

use author_chat::infrastructure::driven_adapters::config::AppConfig;
use author_chat::infrastructure::driven_adapters::database;
use author_chat::infrastructure::driving_adapters::api_rest::{create_router, AppState};
use author_chat::infrastructure::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    logging::init(&config.logging)?;
    tracing::info!(environment = %config.environment, "Configuration loaded successfully");

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    database::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, pool)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
