//! seedbed daemon entry point.
//!
//! Usage: `seedbed [config-path]`. The path falls back to the
//! `SEEDBED_CONFIG` environment variable, then `config/config.yml`.
//! The admin API key always comes from the `API_KEY` environment
//! variable, never from the file.

use seedbed::{SeedbedError, Seeder};
use seedbed_config::{
    AppConfig, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, api_key_from_env,
};
use seedbed_notify::WebhookSink;
use seedbed_rcon::RconClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), SeedbedError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seedbed=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    tracing::info!(path = %config_path, "loading configuration");

    let config = AppConfig::load(&config_path)?;
    let api_key = api_key_from_env()?;

    let api = RconClient::new(config.api.base_url.clone(), &api_key)?;
    let sink = WebhookSink::new(config.discord.webhooks.clone())?;

    tracing::info!(
        server = %config.api.base_url,
        webhooks = config.discord.webhooks.len(),
        dry_run = config.runtime.dry_run,
        "seedbed starting"
    );

    let seeder = Seeder::bootstrap(config, api, sink).await?;
    seeder.run().await
}
