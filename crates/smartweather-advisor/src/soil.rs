//! Rule-based soil moisture estimate from humidity, condition and forecast.

use std::fmt;

use serde::{Deserialize, Serialize};
use smartweather_weather::{ForecastWindow, WeatherSnapshot};

const DEFAULT_HUMIDITY: f64 = 50.0;
const BASE_MIN: f64 = 30.0;
const BASE_MAX: f64 = 95.0;
const RAIN_BOOST: f64 = 20.0;
const CLEAR_PENALTY: f64 = 10.0;
const FORECAST_BOOST: f64 = 10.0;
/// Independent of the watering-window threshold in the agriculture rules.
const FORECAST_RAIN_POP: f64 = 0.5;

pub const HIGH_PERCENT: u8 = 75;
pub const LOW_PERCENT: u8 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoistureLevel {
    Low,
    Medium,
    High,
    /// No snapshot to estimate from
    Unknown,
}

impl MoistureLevel {
    fn from_percent(percent: u8) -> Self {
        if percent >= HIGH_PERCENT {
            Self::High
        } else if percent <= LOW_PERCENT {
            Self::Low
        } else {
            Self::Medium
        }
    }
}

impl fmt::Display for MoistureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoilMoistureEstimate {
    pub percent: u8,
    pub level: MoistureLevel,
}

impl SoilMoistureEstimate {
    pub const UNKNOWN: Self = Self {
        percent: 0,
        level: MoistureLevel::Unknown,
    };
}

/// Adjustments run in a fixed order with clamping between steps:
/// condition (rain, else clear/sun), then the forecast boost.
pub fn estimate_soil_moisture(
    snapshot: Option<&WeatherSnapshot>,
    forecast: Option<&ForecastWindow>,
) -> SoilMoistureEstimate {
    let Some(snapshot) = snapshot else {
        return SoilMoistureEstimate::UNKNOWN;
    };

    let humidity = snapshot
        .humidity_pct
        .map_or(DEFAULT_HUMIDITY, f64::from);
    let mut base = humidity.clamp(BASE_MIN, BASE_MAX);

    if snapshot.condition_contains("rain") {
        base = (base + RAIN_BOOST).min(100.0);
    } else if snapshot.condition_contains("clear") || snapshot.condition_contains("sun") {
        base = (base - CLEAR_PENALTY).max(0.0);
    }

    let rain_ahead = forecast.is_some_and(|w| {
        w.entries()
            .iter()
            .any(|e| e.precipitation_probability > FORECAST_RAIN_POP)
    });
    if rain_ahead {
        base = (base + FORECAST_BOOST).min(100.0);
    }

    // base is within [0, 100] here
    let percent = base.round().clamp(0.0, 100.0) as u8;
    SoilMoistureEstimate {
        percent,
        level: MoistureLevel::from_percent(percent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartweather_weather::ForecastEntry;

    fn snapshot(humidity: Option<u8>, condition: Option<&str>) -> WeatherSnapshot {
        WeatherSnapshot {
            humidity_pct: humidity,
            condition_main: condition.map(str::to_string),
            ..Default::default()
        }
    }

    fn window(pops: &[f64]) -> ForecastWindow {
        ForecastWindow::new(pops.iter().map(|pop| ForecastEntry {
            timestamp_epoch: 0,
            label: String::new(),
            temperature: None,
            precipitation_probability: *pop,
        }))
    }

    #[test]
    fn test_no_snapshot_is_unknown() {
        let estimate = estimate_soil_moisture(None, Some(&window(&[0.9])));
        assert_eq!(estimate, SoilMoistureEstimate::UNKNOWN);
        assert_eq!(estimate.level.to_string(), "Unknown");
    }

    #[test]
    fn test_clear_at_low_boundary() {
        let estimate = estimate_soil_moisture(Some(&snapshot(Some(50), Some("clear"))), None);
        assert_eq!(estimate.percent, 40);
        assert_eq!(estimate.level, MoistureLevel::Low);
    }

    #[test]
    fn test_rain_and_forecast_saturate() {
        let estimate = estimate_soil_moisture(
            Some(&snapshot(Some(90), Some("light rain"))),
            Some(&window(&[0.1, 0.6])),
        );
        assert_eq!(estimate.percent, 100);
        assert_eq!(estimate.level, MoistureLevel::High);
    }

    #[test]
    fn test_missing_humidity_defaults_to_fifty() {
        let estimate = estimate_soil_moisture(Some(&snapshot(None, None)), None);
        assert_eq!(estimate.percent, 50);
        assert_eq!(estimate.level, MoistureLevel::Medium);
    }

    #[test]
    fn test_base_is_clamped_before_adjustments() {
        let dry = estimate_soil_moisture(Some(&snapshot(Some(10), Some("sunny"))), None);
        assert_eq!(dry.percent, 20);

        let humid = estimate_soil_moisture(Some(&snapshot(Some(100), Some("clouds"))), None);
        assert_eq!(humid.percent, 95);
        assert_eq!(humid.level, MoistureLevel::High);
    }

    #[test]
    fn test_forecast_boost_requires_strictly_above_half() {
        let s = snapshot(Some(60), Some("clouds"));
        assert_eq!(estimate_soil_moisture(Some(&s), Some(&window(&[0.5]))).percent, 60);
        assert_eq!(estimate_soil_moisture(Some(&s), Some(&window(&[0.51]))).percent, 70);
    }

    #[test]
    fn test_high_boundary() {
        let s = snapshot(Some(55), Some("rain"));
        let estimate = estimate_soil_moisture(Some(&s), None);
        assert_eq!(estimate.percent, 75);
        assert_eq!(estimate.level, MoistureLevel::High);

        let medium = estimate_soil_moisture(Some(&snapshot(Some(74), None)), None);
        assert_eq!(medium.level, MoistureLevel::Medium);
    }
}
