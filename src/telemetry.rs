//! Tracing subscriber setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{Error, Result};

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `log_level` when set.
pub fn init(log_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| Error::Configuration(format!("invalid log level '{}': {}", log_level, e)))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .try_init()
        .map_err(|e| Error::Configuration(format!("failed to install tracing subscriber: {}", e)))
}
