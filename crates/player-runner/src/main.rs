//! Quirkverse Player Runner - composition root binary

use quirkverse_player_adapters::infrastructure::ClientConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| quirkverse_player_runner::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Quirkverse Player");

    let config = ClientConfig::from_env()?;
    tracing::info!(
        api_url = %config.api_url,
        max_attempts = config.max_attempts,
        timeout_ms = config.request_timeout.map(|t| t.as_millis() as u64),
        "Loaded configuration"
    );

    let ctx = quirkverse_player_runner::build_context(&config);
    let report = quirkverse_player_runner::startup(&ctx).await;

    if report.health.is_none() {
        anyhow::bail!("API at {} is unreachable", config.api_url);
    }
    Ok(())
}
