//! Advisory derivation for SmartWeather
//!
//! Pure functions over a normalized [`WeatherSnapshot`] and an optional
//! [`ForecastWindow`]: per-persona advisories, a soil-moisture estimate and the
//! one-line map hint. Nothing here performs I/O or keeps state between calls.
//!
//! [`WeatherSnapshot`]: smartweather_weather::WeatherSnapshot
//! [`ForecastWindow`]: smartweather_weather::ForecastWindow

pub mod advisory;
pub mod engine;
pub mod hint;
pub mod rules;
pub mod soil;

pub use advisory::{AdvisoryCategory, AdvisoryItem, Persona};
pub use engine::{derive_advisories, AdvisoryEngine};
pub use hint::build_hint;
pub use rules::{Rule, RuleContext};
pub use soil::{estimate_soil_moisture, MoistureLevel, SoilMoistureEstimate};
