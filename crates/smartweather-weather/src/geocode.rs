//! Geocoding results shaped for the search box.

use serde::{Deserialize, Serialize};

use crate::types::RawGeoResult;

/// Ephemeral autocomplete entry. Replaced wholesale on each query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoSuggestion {
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
}

/// A location the user has resolved at least once.
///
/// Identity is the exact `(lat, lon)` pair; the name is display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl RecentLocation {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }

    pub fn same_coordinate(&self, lat: f64, lon: f64) -> bool {
        self.lat == lat && self.lon == lon
    }
}

/// "City, State, Country", omitting the state when the provider has none.
pub fn display_name(name: &str, state: Option<&str>, country: &str) -> String {
    let mut parts = vec![name];
    if let Some(s) = state.filter(|s| !s.is_empty()) {
        parts.push(s);
    }
    parts.push(country);
    parts.join(", ")
}

/// Name used when a coordinate has no provider-supplied place name.
pub fn coordinate_label(lat: f64, lon: f64) -> String {
    format!("{lat:.4}, {lon:.4}")
}

impl From<RawGeoResult> for GeoSuggestion {
    fn from(raw: RawGeoResult) -> Self {
        Self {
            display_name: display_name(&raw.name, raw.state.as_deref(), &raw.country),
            lat: raw.lat,
            lon: raw.lon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_with_state() {
        assert_eq!(
            display_name("Kandy", Some("Central Province"), "LK"),
            "Kandy, Central Province, LK"
        );
    }

    #[test]
    fn test_display_name_without_state() {
        assert_eq!(display_name("Colombo", None, "LK"), "Colombo, LK");
        assert_eq!(display_name("Colombo", Some(""), "LK"), "Colombo, LK");
    }

    #[test]
    fn test_suggestion_from_raw() {
        let raw = RawGeoResult {
            name: "Galle".to_string(),
            state: Some("Southern Province".to_string()),
            country: "LK".to_string(),
            lat: 6.0535,
            lon: 80.221,
        };
        let s = GeoSuggestion::from(raw);
        assert_eq!(s.display_name, "Galle, Southern Province, LK");
        assert_eq!((s.lat, s.lon), (6.0535, 80.221));
    }

    #[test]
    fn test_recent_location_identity_is_coordinate() {
        let a = RecentLocation::new("Colombo", 6.9271, 79.8612);
        assert!(a.same_coordinate(6.9271, 79.8612));
        assert!(!a.same_coordinate(6.9271, 79.8613));
    }

    #[test]
    fn test_coordinate_label() {
        assert_eq!(coordinate_label(46.818_234, 8.227_456), "46.8182, 8.2275");
    }
}
