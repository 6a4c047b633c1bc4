//! Structured logging

use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

use crate::{
    config::Config,
    error::{Error, Result},
};

/// Install the global JSON subscriber
///
/// The filter comes from `service.log_level` and falls back to `info` when the
/// directive does not parse. Fails if a global subscriber is already set.
pub fn init_tracing(config: &Config) -> Result<()> {
    json_subscriber(config)
        .try_init()
        .map_err(|e| Error::Internal(format!("Failed to initialize tracing: {e}")))?;

    tracing::info!(
        service = %config.service.name,
        environment = %config.service.environment,
        "Tracing initialized"
    );

    Ok(())
}

fn json_subscriber(config: &Config) -> impl tracing::Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(log_filter(config))
        .with_current_span(true)
        .finish()
}

fn log_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
}
