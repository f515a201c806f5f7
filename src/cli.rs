//! Command-line flags for preferences and saved locations.

use anyhow::{anyhow, bail, Result};
use smartweather_services::{KeyValueStore, PreferenceKey, Preferences, SavedLocations};
use smartweather_weather::TemperatureUnit;

pub const USAGE: &str = "usage: smartweather [--unit C|F] [--toggle <preference>] \
[--save <name>] [--unsave <name>] [query...]";

#[derive(Debug, Default, PartialEq)]
pub struct CliArgs {
    pub query: String,
    pub unit: Option<TemperatureUnit>,
    pub toggles: Vec<PreferenceKey>,
    pub save: Vec<String>,
    pub unsave: Vec<String>,
}

impl CliArgs {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut parsed = Self::default();
        let mut words = Vec::new();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .ok_or_else(|| anyhow!("{flag} needs a value\n{USAGE}"))
            };
            match arg.as_str() {
                "--unit" => {
                    let unit = value("--unit")?
                        .parse::<TemperatureUnit>()
                        .map_err(|e| anyhow!(e))?;
                    parsed.unit = Some(unit);
                }
                "--toggle" => {
                    let key = value("--toggle")?
                        .parse::<PreferenceKey>()
                        .map_err(|e| anyhow!(e))?;
                    parsed.toggles.push(key);
                }
                "--save" => parsed.save.push(value("--save")?),
                "--unsave" => parsed.unsave.push(value("--unsave")?),
                flag if flag.starts_with("--") => bail!("Unknown option {flag}\n{USAGE}"),
                word => words.push(word.to_string()),
            }
        }

        parsed.query = words.join(" ");
        Ok(parsed)
    }
}

/// Persisted settings after the command-line changes are applied.
#[derive(Debug)]
pub struct Settings {
    pub preferences: Preferences,
    pub saved: SavedLocations,
    /// Rejected saved-location edits, in the order they were requested.
    pub notices: Vec<String>,
}

/// Loads preferences and saved locations, applies the flags, and writes back what changed.
pub fn apply(args: &CliArgs, store: &dyn KeyValueStore) -> Result<Settings> {
    let mut preferences = Preferences::load(store);
    let before = preferences.clone();
    if let Some(unit) = args.unit {
        preferences.set_unit(unit);
    }
    for key in &args.toggles {
        let enabled = preferences.toggle(*key);
        tracing::info!("Preference {:?} is now {}", key, enabled);
    }
    if preferences != before {
        preferences.save(store)?;
    }

    let mut saved = SavedLocations::load(store);
    let mut notices = Vec::new();
    let mut changed = false;
    for name in &args.save {
        match saved.add(name) {
            Ok(()) => changed = true,
            Err(e) => notices.push(format!("{name}: {e}")),
        }
    }
    for name in &args.unsave {
        changed |= saved.remove(name);
    }
    if changed {
        saved.save(store)?;
    }

    Ok(Settings {
        preferences,
        saved,
        notices,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use smartweather_services::MemoryStore;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_flags_and_query() {
        let parsed = CliArgs::parse(args(&[
            "--unit", "F", "New", "--toggle", "agriculture", "York", "--save", "Kandy",
        ]))
        .unwrap();
        assert_eq!(parsed.query, "New York");
        assert_eq!(parsed.unit, Some(TemperatureUnit::Fahrenheit));
        assert_eq!(parsed.toggles, vec![PreferenceKey::AgricultureMode]);
        assert_eq!(parsed.save, vec!["Kandy".to_string()]);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(CliArgs::parse(args(&["--unit"])).is_err());
        assert!(CliArgs::parse(args(&["--unit", "K"])).is_err());
        assert!(CliArgs::parse(args(&["--toggle", "dark-mode"])).is_err());
        assert!(CliArgs::parse(args(&["--verbose"])).is_err());
    }

    #[test]
    fn test_apply_persists_preferences() {
        let store = MemoryStore::new();
        let parsed = CliArgs::parse(args(&["--unit", "F", "--toggle", "agriculture"])).unwrap();

        let settings = apply(&parsed, &store).unwrap();
        assert_eq!(settings.preferences.unit, TemperatureUnit::Fahrenheit);
        assert!(settings.preferences.agriculture_mode);

        let reloaded = Preferences::load(&store);
        assert_eq!(reloaded, settings.preferences);
        assert_eq!(reloaded.summary_text(), "F • Alerts: On • Daily Summary: On");
    }

    #[test]
    fn test_apply_saved_locations() {
        let store = MemoryStore::new();
        let parsed = CliArgs::parse(args(&["--save", "Kandy", "--save", "Galle"])).unwrap();
        apply(&parsed, &store).unwrap();

        let parsed = CliArgs::parse(args(&[
            "--save", "kandy", "--save", " ", "--unsave", "Galle",
        ]))
        .unwrap();
        let settings = apply(&parsed, &store).unwrap();
        assert_eq!(settings.saved.list(), ["Kandy"]);
        assert_eq!(
            settings.notices,
            vec![
                "kandy: Location already saved".to_string(),
                " : Enter a location name".to_string()
            ]
        );
        assert_eq!(SavedLocations::load(&store).list(), ["Kandy"]);
    }

    #[test]
    fn test_apply_without_flags_leaves_store_untouched() {
        let store = MemoryStore::new();
        let settings = apply(&CliArgs::default(), &store).unwrap();
        assert_eq!(settings.preferences, Preferences::default());
        assert!(store.get("smartWeather_preferences").unwrap().is_none());
    }
}
