use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use college_api::{
    cli::{Cli, Commands},
    config::AppConfig,
    database::DatabaseManager,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();
    cli.apply(&mut config);

    match cli.command() {
        Commands::Migrate => migrate(&config).await,
        Commands::Serve => serve(config).await,
    }
}

async fn migrate(config: &AppConfig) -> anyhow::Result<()> {
    if config.database.url.is_none() {
        anyhow::bail!("DATABASE_URL must be set to run migrations");
    }
    let database = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    database.migrate().await.context("failed to run migrations")?;
    database.close().await;
    Ok(())
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    config.validate().context("invalid configuration")?;
    tracing::info!(
        environment = ?config.environment,
        store = ?config.database.store,
        "Starting College API"
    );

    let bind_addr = config.bind_addr();
    let state = AppState::from_config(config)
        .await
        .context("failed to initialise student store")?;
    let database = state.database.clone();

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, college_api::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(database) = database {
        database.close().await;
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
