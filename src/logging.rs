//! Logging setup
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` wins over the
//! configured level; `format = "json"` switches to one JSON object per line.

use crate::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the env filter for a configured level
///
/// A bare level such as "debug" applies to this crate only, leaving
/// dependencies at `warn`.
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive_for(&config.level)))
}

fn directive_for(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("warn,canteen={}", level)
    }
}

/// Install the global subscriber
///
/// Does nothing if a subscriber is already set (e.g. called twice in tests).
pub fn init(config: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(build_filter(config));

    let result = match config.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    if let Err(e) = result {
        tracing::debug!("Tracing subscriber already installed: {}", e);
    }
}
