//! One-line context hint shown under the map search box.

use smartweather_weather::{RecentLocation, WeatherSnapshot};

pub const SEARCH_HINT: &str =
    "Hint: Try searching your city (e.g., Colombo, Kandy, Galle) to see live weather on the map.";
pub const RAIN_HINT: &str = "It's raining here. Hint: Check coastal cities like Galle or Negombo to compare rainfall patterns.";
pub const HOT_HINT: &str = "It's quite hot! Hint: Try hill-country locations like Kandy or Nuwara Eliya for cooler weather.";
pub const COOL_HINT: &str =
    "Cool temperature here. Hint: Compare with dry-zone cities like Anuradhapura or Trincomalee.";
pub const MAP_HINT: &str = "Hint: Click anywhere on the map to get weather for that exact spot.";

const HOT_ABOVE_C: f64 = 32.0;
const COOL_BELOW_C: f64 = 22.0;

fn recent_hint(name: &str) -> String {
    format!(
        "You recently checked {name}. Hint: You can tap on the map anywhere to instantly view weather there."
    )
}

/// First match wins. A snapshot that trips none of the condition checks
/// falls through to the recent-location and map hints.
pub fn build_hint(snapshot: Option<&WeatherSnapshot>, recent: &[RecentLocation]) -> String {
    if snapshot.is_none() && recent.is_empty() {
        return SEARCH_HINT.to_string();
    }

    if let Some(s) = snapshot {
        if s.condition_contains("rain") {
            return RAIN_HINT.to_string();
        }
        if s.temperature_c().is_some_and(|t| t > HOT_ABOVE_C) {
            return HOT_HINT.to_string();
        }
        if s.temperature_c().is_some_and(|t| t < COOL_BELOW_C) {
            return COOL_HINT.to_string();
        }
    }

    match recent.first() {
        Some(last) => recent_hint(&last.name),
        None => MAP_HINT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartweather_weather::Celsius;

    fn snapshot(condition: &str, temp: Option<f64>) -> WeatherSnapshot {
        WeatherSnapshot {
            condition_main: Some(condition.to_string()),
            temperature: temp.map(Celsius::new),
            ..Default::default()
        }
    }

    fn recent() -> Vec<RecentLocation> {
        vec![
            RecentLocation::new("Kandy", 7.2906, 80.6337),
            RecentLocation::new("Galle", 6.0535, 80.221),
        ]
    }

    #[test]
    fn test_nothing_known_asks_for_search() {
        assert_eq!(
            build_hint(None, &[]),
            "Hint: Try searching your city (e.g., Colombo, Kandy, Galle) to see live weather on the map."
        );
    }

    #[test]
    fn test_rain_wins_regardless_of_recent() {
        let s = snapshot("rain", Some(35.0));
        assert_eq!(build_hint(Some(&s), &[]), RAIN_HINT);
        assert_eq!(build_hint(Some(&s), &recent()), RAIN_HINT);
    }

    #[test]
    fn test_temperature_hints_are_strict() {
        assert_eq!(build_hint(Some(&snapshot("clear", Some(32.1))), &[]), HOT_HINT);
        assert_eq!(build_hint(Some(&snapshot("clear", Some(21.9))), &[]), COOL_HINT);
        assert_eq!(build_hint(Some(&snapshot("clear", Some(32.0))), &[]), MAP_HINT);
        assert_eq!(build_hint(Some(&snapshot("clear", Some(22.0))), &[]), MAP_HINT);
    }

    #[test]
    fn test_mild_snapshot_falls_through_to_recent() {
        let s = snapshot("clouds", Some(27.0));
        assert_eq!(
            build_hint(Some(&s), &recent()),
            "You recently checked Kandy. Hint: You can tap on the map anywhere to instantly view weather there."
        );
    }

    #[test]
    fn test_recent_without_snapshot() {
        assert!(build_hint(None, &recent()).starts_with("You recently checked Kandy."));
    }

    #[test]
    fn test_unknown_temperature_falls_through() {
        let s = snapshot("clouds", None);
        assert_eq!(build_hint(Some(&s), &[]), MAP_HINT);
    }
}
