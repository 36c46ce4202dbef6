pub mod config;
pub mod error;

pub use config::{
    Config, ConfigOverrides, DashboardConfig, StorageConfig, ValidationResult, WeatherConfig,
    DEFAULT_BASE_URL, DEFAULT_CITIES,
};
pub use error::StorageError;

use anyhow::Result;

/// Initialize logging for the dashboard.
///
/// Output goes to stderr so it never interleaves with the rendered dashboard.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Skyboard core initialized");
    Ok(())
}
