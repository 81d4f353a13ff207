mod config;
mod handlers;
mod state;
mod storage;

use anyhow::{Context as _, Result};
use clap::Parser;
use lambda_runtime::{service_fn, LambdaEvent};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use itemstore_core::envelope::Event;

use crate::{
    config::{Config, LogFormat},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    init_tracing(config.log_format);

    // Storage handle is created once per process and reused by every invocation.
    let state = build_state(&config).await?;

    tracing::info!(storage = ?config.storage, "Starting itemstore");

    lambda_runtime::run(service_fn(|event: LambdaEvent<Event>| {
        handlers::handle(&state, event)
    }))
    .await
    .map_err(anyhow::Error::msg)
    .context("Lambda runtime stopped")
}

/// Validate the configuration and build the shared state.
async fn build_state(config: &Config) -> Result<AppState> {
    config.validate().context("invalid configuration")?;
    Ok(AppState::from_config(config).await)
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` overrides the default `itemstore=info` filter.
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "itemstore=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_target(false),
            )
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_state_rejects_invalid_table_name() {
        let config =
            Config::try_parse_from(["itemstore", "--table-name", "x", "--storage", "memory"])
                .unwrap();

        let err = build_state(&config).await.err().unwrap();

        assert_eq!(err.to_string(), "invalid configuration");
        assert!(format!("{err:#}").contains("between 3 and 255 characters"));
    }

    #[tokio::test]
    async fn test_build_state_memory_backend() {
        let config =
            Config::try_parse_from(["itemstore", "--table-name", "Widgets", "--storage", "memory"])
                .unwrap();

        let state = build_state(&config).await.unwrap();

        assert!(state.item_repo.scan().await.unwrap().is_empty());
    }
}
