use smartweather_weather::{ForecastWindow, WeatherSnapshot};

use crate::advisory::{AdvisoryItem, Persona};
use crate::rules::{self, Rule, RuleContext};

/// Evaluates one persona's rule table.
///
/// Output order is the table's declared order; nothing is re-sorted.
#[derive(Debug, Clone, Copy)]
pub struct AdvisoryEngine {
    persona: Persona,
    rules: &'static [Rule],
}

impl AdvisoryEngine {
    pub fn for_persona(persona: Persona) -> Self {
        Self {
            persona,
            rules: rules::table(persona),
        }
    }

    pub fn persona(&self) -> Persona {
        self.persona
    }

    pub fn evaluate(
        &self,
        snapshot: &WeatherSnapshot,
        forecast: Option<&ForecastWindow>,
    ) -> Vec<AdvisoryItem> {
        let ctx = RuleContext::new(snapshot, forecast);
        let items: Vec<AdvisoryItem> = self
            .rules
            .iter()
            .filter_map(|rule| (rule.evaluate)(&ctx))
            .collect();

        tracing::debug!(
            persona = ?self.persona,
            fired = items.len(),
            "Evaluated advisory rules"
        );
        items
    }

    /// Runs a single rule; `None` when it does not fire or the id is unknown.
    pub fn evaluate_rule(
        &self,
        rule_id: &str,
        snapshot: &WeatherSnapshot,
        forecast: Option<&ForecastWindow>,
    ) -> Option<AdvisoryItem> {
        let ctx = RuleContext::new(snapshot, forecast);
        self.rules
            .iter()
            .find(|r| r.id == rule_id)
            .and_then(|rule| (rule.evaluate)(&ctx))
    }

    /// Rule identifiers in evaluation order.
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id).collect()
    }
}

pub fn derive_advisories(
    persona: Persona,
    snapshot: &WeatherSnapshot,
    forecast: Option<&ForecastWindow>,
) -> Vec<AdvisoryItem> {
    AdvisoryEngine::for_persona(persona).evaluate(snapshot, forecast)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::advisory::AdvisoryCategory;
    use smartweather_weather::{Celsius, ForecastEntry};

    fn snapshot(condition: Option<&str>, temp: Option<f64>) -> WeatherSnapshot {
        WeatherSnapshot {
            condition_main: condition.map(str::to_string),
            temperature: temp.map(Celsius::new),
            ..Default::default()
        }
    }

    fn window(pops: &[f64]) -> ForecastWindow {
        ForecastWindow::new(pops.iter().enumerate().map(|(i, pop)| ForecastEntry {
            timestamp_epoch: i as i64 * 10_800,
            label: format!("slot-{i}"),
            temperature: None,
            precipitation_probability: *pop,
        }))
    }

    fn titles(items: &[AdvisoryItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    fn agri(snapshot: &WeatherSnapshot, forecast: Option<&ForecastWindow>) -> Vec<AdvisoryItem> {
        derive_advisories(Persona::Agriculture, snapshot, forecast)
    }

    #[test]
    fn test_rain_pair_is_exclusive_and_always_fires() {
        for condition in [Some("rain"), Some("light rain"), Some("clear"), Some(""), None] {
            let items = agri(&snapshot(condition, None), None);
            let rain: Vec<_> = items
                .iter()
                .filter(|i| i.category == AdvisoryCategory::Rain)
                .collect();
            assert_eq!(rain.len(), 1, "condition {condition:?}");
        }

        let wet = agri(&snapshot(Some("rain"), None), None);
        assert_eq!(wet[0].title, "Rain detected");
        let unknown = agri(&snapshot(None, None), None);
        assert_eq!(unknown[0].title, "No rain right now");
    }

    #[test]
    fn test_agriculture_temperature_boundaries() {
        let cases = [
            (21.9, Some("Cool weather")),
            (22.0, Some("Cool weather")),
            (22.1, None),
            (31.9, None),
            (32.0, Some("High temperature")),
            (32.1, Some("High temperature")),
        ];
        let engine = AdvisoryEngine::for_persona(Persona::Agriculture);
        for (t, expected) in cases {
            let item = engine.evaluate_rule("agri.temperature", &snapshot(None, Some(t)), None);
            assert_eq!(item.map(|i| i.title).as_deref(), expected, "temp {t}");
        }
    }

    #[test]
    fn test_null_fields_skip_rules() {
        let items = agri(&WeatherSnapshot::default(), None);
        assert_eq!(titles(&items), vec!["No rain right now"]);
    }

    #[test]
    fn test_wind_and_humidity_thresholds() {
        let mut s = snapshot(Some("clouds"), Some(27.0));
        s.wind_speed_ms = Some(8.0);
        s.humidity_pct = Some(80);
        let items = agri(&s, None);
        assert_eq!(
            titles(&items),
            vec!["No rain right now", "Strong winds", "High humidity"]
        );

        s.wind_speed_ms = Some(7.99);
        s.humidity_pct = Some(79);
        assert_eq!(titles(&agri(&s, None)), vec!["No rain right now"]);
    }

    #[test]
    fn test_schedule_rain_likely_when_all_slots_wet() {
        let w = window(&[0.2, 0.3, 0.9, 0.5, 0.2, 0.4, 0.6, 0.7]);
        let items = agri(&snapshot(None, None), Some(&w));
        let last = items.last().unwrap();
        assert_eq!(last.title, "Rain likely");
        assert_eq!(last.category, AdvisoryCategory::Schedule);
    }

    #[test]
    fn test_schedule_picks_first_low_slot_in_order() {
        let w = window(&[0.2, 0.3, 0.9, 0.5, 0.2, 0.19, 0.1, 0.0]);
        let items = agri(&snapshot(None, None), Some(&w));
        let last = items.last().unwrap();
        assert_eq!(last.title, "Best watering time (next 24h)");
        assert_eq!(last.message, "Low rain probability around: slot-5.");
    }

    #[test]
    fn test_schedule_ignores_entries_past_window() {
        let mut pops = vec![0.9; 8];
        pops.push(0.0);
        let w = window(&pops);
        let items = agri(&snapshot(None, None), Some(&w));
        assert_eq!(items.last().unwrap().title, "Rain likely");
    }

    #[test]
    fn test_no_schedule_without_forecast() {
        let empty = ForecastWindow::default();
        for forecast in [None, Some(&empty)] {
            let items = agri(&snapshot(None, None), forecast);
            assert!(items.iter().all(|i| i.category != AdvisoryCategory::Schedule));
        }
    }

    #[test]
    fn test_multiple_rules_fire_in_declared_order() {
        let mut s = snapshot(Some("rain"), Some(33.0));
        s.wind_speed_ms = Some(12.0);
        s.humidity_pct = Some(95);
        let w = window(&[0.8, 0.1]);
        let items = agri(&s, Some(&w));
        assert_eq!(
            titles(&items),
            vec![
                "Rain detected",
                "High temperature",
                "Strong winds",
                "High humidity",
                "Best watering time (next 24h)"
            ]
        );
    }

    #[test]
    fn test_deterministic() {
        let s = snapshot(Some("drizzle"), Some(14.0));
        let w = window(&[0.6]);
        for persona in Persona::ALL {
            assert_eq!(
                derive_advisories(persona, &s, Some(&w)),
                derive_advisories(persona, &s, Some(&w))
            );
        }
    }

    #[test]
    fn test_general_rules() {
        let mut s = snapshot(Some("thunderstorm"), Some(14.0));
        s.visibility_km = Some(1.5);
        s.wind_speed_ms = Some(10.0);
        s.humidity_pct = Some(85);
        let w = window(&[0.1, 0.5]);
        let items = derive_advisories(Persona::General, &s, Some(&w));
        assert_eq!(
            titles(&items),
            vec![
                "Thunderstorm warning",
                "Chilly weather",
                "Windy conditions",
                "Muggy air",
                "Low visibility",
                "Rain expected (next 24h)"
            ]
        );
        assert_eq!(items[5].message, "Rain is likely around: slot-1.");
    }

    #[test]
    fn test_general_umbrella_and_dry_outlook() {
        let s = snapshot(Some("drizzle"), Some(25.0));
        let w = window(&[0.1, 0.49]);
        let items = derive_advisories(Persona::General, &s, Some(&w));
        assert_eq!(titles(&items), vec!["Carry an umbrella", "Dry outlook (next 24h)"]);
    }

    #[test]
    fn test_rule_ids_in_order() {
        let engine = AdvisoryEngine::for_persona(Persona::Agriculture);
        assert_eq!(
            engine.rule_ids(),
            vec![
                "agri.rain",
                "agri.temperature",
                "agri.wind",
                "agri.humidity",
                "agri.schedule"
            ]
        );
        assert_eq!(engine.persona(), Persona::Agriculture);
        assert!(engine
            .evaluate_rule("no.such.rule", &WeatherSnapshot::default(), None)
            .is_none());
    }
}
