//! Display strings for the rendering layer. Threshold logic never reads these.

use chrono::{DateTime, FixedOffset, Local};

use crate::types::{Celsius, TemperatureUnit};

/// Placeholder for any value the provider did not report.
pub const MISSING: &str = "—";

/// "31.9°C" / "89.4°F", or [`MISSING`].
pub fn format_temperature(value: Option<Celsius>, unit: TemperatureUnit) -> String {
    match value {
        Some(c) => {
            let shown = match unit {
                TemperatureUnit::Celsius => c.value(),
                TemperatureUnit::Fahrenheit => c.to_fahrenheit(),
            };
            format!("{:.1}°{}", shown, unit.symbol())
        }
        None => MISSING.to_string(),
    }
}

pub fn format_visibility(km: Option<f64>) -> String {
    km.map_or_else(|| MISSING.to_string(), |v| format!("{} km", v))
}

pub fn format_wind(speed_ms: Option<f64>) -> String {
    speed_ms.map_or_else(|| MISSING.to_string(), |v| format!("{} m/s", v))
}

pub fn format_humidity(pct: Option<u8>) -> String {
    pct.map_or_else(|| MISSING.to_string(), |v| format!("{}%", v))
}

/// 12-hour clock time ("06:02 AM") at the given UTC offset.
pub fn format_clock_at(epoch: Option<i64>, offset: FixedOffset) -> String {
    epoch
        .and_then(|e| DateTime::from_timestamp(e, 0))
        .map(|dt| dt.with_timezone(&offset).format("%I:%M %p").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// 12-hour clock time in the machine's local zone.
pub fn format_clock(epoch: Option<i64>) -> String {
    epoch
        .and_then(|e| DateTime::from_timestamp(e, 0))
        .map(|dt| dt.with_timezone(&Local).format("%I:%M %p").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}
