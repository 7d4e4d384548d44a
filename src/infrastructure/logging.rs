//! Tracing Subscriber Setup
//!
//! `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::infrastructure::driven_adapters::config::LoggingConfig;

/// Install the global subscriber: JSON lines when `config.json`, compact text otherwise
///
/// # Errors
///
/// Returns `TryInitError` if a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    let json_layer = config.json.then(|| fmt::layer().json().with_current_span(true));
    let text_layer = (!config.json).then(|| fmt::layer().compact());

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
}

fn default_directives(level: &str) -> String {
    format!("author_chat={level},author_chat_admin={level},tower_http={level},warn")
}
