/*
    ABSTRACT: Tracing bootstrap for binaries built on the threat event client
*/
use crate::config::LOG_ENV_VAR;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with the `THREAT_EVENT_LOG` environment variable.
///
/// Falls back to `default_filter` if the variable is not set or does not parse.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
