use serde::{Deserialize, Serialize};

/// Absolute zero offset used for the Kelvin → Celsius conversion.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Temperature as reported by the provider. Never compared against thresholds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kelvin(pub f64);

/// Temperature in degrees Celsius, kept at full precision.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(f64);

impl Celsius {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn to_fahrenheit(self) -> f64 {
        self.0 * 9.0 / 5.0 + 32.0
    }
}

impl From<Kelvin> for Celsius {
    fn from(k: Kelvin) -> Self {
        Celsius(k.0 - KELVIN_OFFSET)
    }
}

/// Temperature unit preference, persisted as "C" / "F".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }
}

impl std::str::FromStr for TemperatureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "C" => Ok(Self::Celsius),
            "F" => Ok(Self::Fahrenheit),
            other => Err(format!("Unknown temperature unit: {other}")),
        }
    }
}

/// OpenWeather current-weather payload. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWeather {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub main: Option<RawMain>,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
    #[serde(default)]
    pub wind: Option<RawWind>,
    /// Meters
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub sys: Option<RawSys>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMain {
    /// Kelvin
    #[serde(default)]
    pub temp: Option<f64>,
    /// Kelvin
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    /// hPa
    #[serde(default)]
    pub pressure: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCondition {
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWind {
    /// m/s
    #[serde(default)]
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSys {
    #[serde(default)]
    pub sunrise: Option<i64>,
    #[serde(default)]
    pub sunset: Option<i64>,
}

/// One 3-hour step of the OpenWeather forecast.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawForecastEntry {
    pub dt: i64,
    #[serde(default)]
    pub dt_txt: Option<String>,
    #[serde(default)]
    pub main: Option<RawMain>,
    /// Probability of precipitation, 0..1
    #[serde(default)]
    pub pop: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawForecastResponse {
    #[serde(default)]
    pub list: Vec<RawForecastEntry>,
}

/// One hit from the direct geocoding endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawGeoResult {
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// Normalized, immutable point-in-time weather reading.
///
/// Missing or non-finite provider values are `None`. Rules that need a field
/// skip when it is absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WeatherSnapshot {
    pub temperature: Option<Celsius>,
    pub feels_like: Option<Celsius>,
    pub humidity_pct: Option<u8>,
    pub pressure_hpa: Option<i32>,
    pub visibility_km: Option<f64>,
    pub wind_speed_ms: Option<f64>,
    /// Lowercased category keyword, e.g. "rain", "clear"
    pub condition_main: Option<String>,
    pub condition_description: Option<String>,
    pub icon_code: Option<String>,
    pub location_name: Option<String>,
    pub sunrise_epoch: Option<i64>,
    pub sunset_epoch: Option<i64>,
}

impl WeatherSnapshot {
    /// Substring test on the lowercased condition; `false` when the condition is unknown.
    pub fn condition_contains(&self, needle: &str) -> bool {
        self.condition_main
            .as_deref()
            .is_some_and(|c| c.contains(needle))
    }

    pub fn temperature_c(&self) -> Option<f64> {
        self.temperature.map(Celsius::value)
    }
}

/// Number of forecast steps the engine consumes: ~24h at 3-hour cadence.
pub const FORECAST_WINDOW_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastEntry {
    pub timestamp_epoch: i64,
    /// Provider `dt_txt`, or the UTC timestamp when the provider omitted it
    pub label: String,
    pub temperature: Option<Celsius>,
    /// Clamped to [0, 1]; missing values are 0
    pub precipitation_probability: f64,
}

/// Chronological forecast slice, never longer than [`FORECAST_WINDOW_LEN`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ForecastWindow {
    entries: Vec<ForecastEntry>,
}

impl ForecastWindow {
    /// Keeps the first [`FORECAST_WINDOW_LEN`] entries in the given order.
    pub fn new(entries: impl IntoIterator<Item = ForecastEntry>) -> Self {
        Self {
            entries: entries.into_iter().take(FORECAST_WINDOW_LEN).collect(),
        }
    }

    pub fn entries(&self) -> &[ForecastEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First entry in chronological order matching the predicate.
    pub fn first_where(&self, pred: impl Fn(&ForecastEntry) -> bool) -> Option<&ForecastEntry> {
        self.entries.iter().find(|e| pred(e))
    }
}
