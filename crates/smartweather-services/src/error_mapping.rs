//! Maps service errors to smartweather_core::AppError for consistent user-facing messages.

use smartweather_core::{AppError, WeatherError};
use smartweather_weather::ProviderError;

use crate::error::SessionError;

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::ProviderUnavailable {
                source: ProviderError::Unauthorized,
                ..
            } => AppError::Weather(WeatherError::InvalidApiKey),
            SessionError::ProviderUnavailable {
                source: ProviderError::Network(n),
                ..
            } => AppError::Network(n),
            SessionError::ProviderUnavailable { message, source } => AppError::Weather(
                WeatherError::ProviderUnavailable(format!("{message} ({source})")),
            ),
            SessionError::NotFound { query } => {
                AppError::Weather(WeatherError::LocationNotFound(query))
            }
            SessionError::Storage(s) => AppError::Storage(s),
        }
    }
}
