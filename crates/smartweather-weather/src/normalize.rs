//! Raw provider records → normalized snapshots and forecast windows.
//!
//! Conversions are exact (`°C = K − 273.15`, `km = m / 1000`). Anything missing,
//! non-finite or out of range becomes `None` instead of a coerced zero.

use chrono::DateTime;

use crate::types::{
    Celsius, ForecastEntry, ForecastWindow, Kelvin, RawForecastEntry, RawMain, RawWeather,
    WeatherSnapshot,
};

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty()).map(str::to_string)
}

fn celsius(kelvin: Option<f64>) -> Option<Celsius> {
    finite(kelvin).map(|k| Celsius::from(Kelvin(k)))
}

fn humidity(value: Option<f64>) -> Option<u8> {
    finite(value)
        .filter(|h| (0.0..=100.0).contains(h))
        .map(|h| h.round() as u8)
}

fn pressure(value: Option<f64>) -> Option<i32> {
    finite(value)
        .filter(|p| *p >= 0.0 && *p <= f64::from(i32::MAX))
        .map(|p| p.round() as i32)
}

/// Build a [`WeatherSnapshot`] from a current-weather payload.
pub fn normalize(raw: &RawWeather) -> WeatherSnapshot {
    let main = raw.main.as_ref();
    let condition = raw.weather.first();

    let snapshot = WeatherSnapshot {
        temperature: celsius(main.and_then(|m| m.temp)),
        feels_like: celsius(main.and_then(|m| m.feels_like)),
        humidity_pct: humidity(main.and_then(|m| m.humidity)),
        pressure_hpa: pressure(main.and_then(|m| m.pressure)),
        visibility_km: finite(raw.visibility)
            .filter(|v| *v >= 0.0)
            .map(|m| m / 1000.0),
        wind_speed_ms: finite(raw.wind.as_ref().and_then(|w| w.speed)).filter(|s| *s >= 0.0),
        condition_main: non_empty(condition.and_then(|c| c.main.as_ref()))
            .map(|c| c.to_lowercase()),
        condition_description: non_empty(condition.and_then(|c| c.description.as_ref())),
        icon_code: non_empty(condition.and_then(|c| c.icon.as_ref())),
        location_name: non_empty(raw.name.as_ref()),
        sunrise_epoch: raw.sys.as_ref().and_then(|s| s.sunrise),
        sunset_epoch: raw.sys.as_ref().and_then(|s| s.sunset),
    };

    tracing::debug!(
        location = ?snapshot.location_name,
        condition = ?snapshot.condition_main,
        "Normalized weather snapshot"
    );
    snapshot
}

fn entry_label(raw: &RawForecastEntry) -> String {
    non_empty(raw.dt_txt.as_ref()).unwrap_or_else(|| {
        DateTime::from_timestamp(raw.dt, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| raw.dt.to_string())
    })
}

/// Normalize one forecast step.
pub fn normalize_forecast_entry(raw: &RawForecastEntry) -> ForecastEntry {
    ForecastEntry {
        timestamp_epoch: raw.dt,
        label: entry_label(raw),
        temperature: celsius(raw.main.as_ref().and_then(|m: &RawMain| m.temp)),
        precipitation_probability: finite(raw.pop).unwrap_or(0.0).clamp(0.0, 1.0),
    }
}

/// Build the fixed next-24h window from a chronological forecast sequence.
pub fn forecast_window(raw: &[RawForecastEntry]) -> ForecastWindow {
    ForecastWindow::new(raw.iter().map(normalize_forecast_entry))
}
