pub mod config;
pub mod error;

pub use config::{
    Config, DefaultLocationConfig, LoggingConfig, ProviderConfig, StorageConfig,
    ValidationResult,
};
pub use error::{
    AppError, ConfigError, NetworkError, ReqwestErrorExt, RusqliteErrorExt, StorageError,
    WeatherError,
};

use anyhow::Result;

/// Initialize tracing/logging.
///
/// `RUST_LOG` wins over `default_filter` when set. Calling this twice is harmless;
/// the second subscriber install is ignored.
pub fn init(default_filter: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }

    tracing::info!("SmartWeather core initialized");
    Ok(())
}
