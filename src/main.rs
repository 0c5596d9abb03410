use anyhow::Context;
use tracing_subscriber::EnvFilter;

use expense_tracker_server::{
    AppState, config::Config, constants::DEFAULT_LOG_FILTER, database, run_with_listener,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // load environment variables
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env()?;
    let db = database::init_db(&config.data_path)
        .await
        .with_context(|| format!("failed to initialize database at {}", config.data_path))?;
    tracing::info!(path = %config.data_path, "database ready");

    match config.budget_limit {
        Some(limit) => tracing::info!(limit, "budget checking enabled"),
        None => tracing::info!("budget checking disabled: BUDGET_LIMIT unset or not positive"),
    }
    if config.email.api_key.is_none() {
        tracing::warn!("EMAIL_API_KEY is not set, budget alerts will be skipped");
    }

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;

    run_with_listener(AppState::new(db, &config), listener).await?;
    Ok(())
}
