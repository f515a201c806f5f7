use smartweather_core::StorageError;
use smartweather_weather::ProviderError;
use thiserror::Error;

/// Failures surfaced by [`WeatherSession`](crate::WeatherSession).
///
/// The `Display` text is what the user sees in the dismissible error banner.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Network/HTTP failure from the weather or geocode provider.
    #[error("{message}")]
    ProviderUnavailable {
        message: String,
        #[source]
        source: ProviderError,
    },

    /// Geocoding returned zero results.
    #[error("Location not found.")]
    NotFound { query: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl SessionError {
    pub fn provider(message: impl Into<String>, source: ProviderError) -> Self {
        Self::ProviderUnavailable {
            message: message.into(),
            source,
        }
    }

    pub fn not_found(query: impl Into<String>) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
