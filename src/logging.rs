//! Logging setup

use std::str::FromStr;

use crate::config::AnalyticsConfig;

/// Install a global fmt subscriber at the configured level
///
/// Unknown levels fall back to INFO. Returns false if a subscriber was
/// already installed.
pub fn init_logging(config: &AnalyticsConfig) -> bool {
    let level = tracing::Level::from_str(&config.log_level).unwrap_or(tracing::Level::INFO);

    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(level = %level, "Logging initialized");
    }

    installed
}
