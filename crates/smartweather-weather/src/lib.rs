//! Weather data for SmartWeather
//!
//! Provider access (OpenWeather current weather, 3-hour forecast, direct
//! geocoding), normalization into unit-safe snapshots, and display formatting.

pub mod display;
pub mod geocode;
pub mod normalize;
pub mod provider;
pub mod types;

pub use geocode::{coordinate_label, GeoSuggestion, RecentLocation};
pub use normalize::{forecast_window, normalize, normalize_forecast_entry};
pub use provider::{OpenWeatherClient, ProviderError, WeatherApi};
pub use types::*;
