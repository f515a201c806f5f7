use serde::{Deserialize, Serialize};
use smartweather_advisor::Persona;
use smartweather_core::StorageError;
use smartweather_weather::TemperatureUnit;

use crate::store::{KeyValueStore, StoreResult};

pub const PREFERENCES_KEY: &str = "smartWeather_preferences";

/// Boolean preference switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKey {
    AlertsEnabled,
    AgricultureMode,
    TravelMode,
    DailySummary,
    SevereAlerts,
}

impl std::str::FromStr for PreferenceKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alerts" => Ok(Self::AlertsEnabled),
            "agriculture" => Ok(Self::AgricultureMode),
            "travel" => Ok(Self::TravelMode),
            "daily-summary" => Ok(Self::DailySummary),
            "severe-alerts" => Ok(Self::SevereAlerts),
            other => Err(format!("Unknown preference: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub unit: TemperatureUnit,
    pub alerts_enabled: bool,
    pub agriculture_mode: bool,
    pub travel_mode: bool,
    pub daily_summary: bool,
    pub severe_alerts: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            unit: TemperatureUnit::Celsius,
            alerts_enabled: true,
            agriculture_mode: false,
            travel_mode: true,
            daily_summary: true,
            severe_alerts: true,
        }
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "On"
    } else {
        "Off"
    }
}

impl Preferences {
    fn flag_mut(&mut self, key: PreferenceKey) -> &mut bool {
        match key {
            PreferenceKey::AlertsEnabled => &mut self.alerts_enabled,
            PreferenceKey::AgricultureMode => &mut self.agriculture_mode,
            PreferenceKey::TravelMode => &mut self.travel_mode,
            PreferenceKey::DailySummary => &mut self.daily_summary,
            PreferenceKey::SevereAlerts => &mut self.severe_alerts,
        }
    }

    /// Flips a switch and returns its new value.
    pub fn toggle(&mut self, key: PreferenceKey) -> bool {
        let flag = self.flag_mut(key);
        *flag = !*flag;
        *flag
    }

    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.unit = unit;
    }

    /// e.g. "C • Alerts: On • Daily Summary: On"
    pub fn summary_text(&self) -> String {
        format!(
            "{} • Alerts: {} • Daily Summary: {}",
            self.unit.symbol(),
            on_off(self.alerts_enabled),
            on_off(self.daily_summary)
        )
    }

    /// Personas whose advisories should be shown.
    pub fn active_personas(&self) -> Vec<Persona> {
        let mut personas = Vec::new();
        if self.travel_mode {
            personas.push(Persona::General);
        }
        if self.agriculture_mode {
            personas.push(Persona::Agriculture);
        }
        personas
    }

    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(PREFERENCES_KEY) {
            Ok(Some(blob)) => serde_json::from_str(&blob).unwrap_or_else(|e| {
                tracing::warn!("Resetting preferences to defaults: {}", e);
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!("Failed to read preferences, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> StoreResult<()> {
        let json = serde_json::to_string(self).map_err(|e| StorageError::Malformed(e.to_string()))?;
        store.set(PREFERENCES_KEY, &json)
    }
}
