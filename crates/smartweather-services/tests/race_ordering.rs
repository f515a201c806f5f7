//! Autocomplete responses settling out of issue order.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use smartweather_services::{Autocomplete, RacePolicy, SearchState};
use smartweather_weather::{
    ProviderError, RawForecastEntry, RawGeoResult, RawWeather, WeatherApi,
};
use tokio::sync::oneshot;

/// Geocode calls block until the test releases them.
#[derive(Default)]
struct GatedGeocoder {
    gates: Mutex<HashMap<String, oneshot::Receiver<Vec<RawGeoResult>>>>,
}

impl GatedGeocoder {
    fn gate(&self, query: &str) -> oneshot::Sender<Vec<RawGeoResult>> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().insert(query.to_string(), rx);
        tx
    }
}

impl WeatherApi for GatedGeocoder {
    async fn current_weather(&self, _lat: f64, _lon: f64) -> Result<RawWeather, ProviderError> {
        Ok(RawWeather::default())
    }

    async fn forecast(&self, _lat: f64, _lon: f64) -> Result<Vec<RawForecastEntry>, ProviderError> {
        Ok(Vec::new())
    }

    async fn geocode(&self, query: &str, _limit: u32) -> Result<Vec<RawGeoResult>, ProviderError> {
        let gate = self.gates.lock().remove(query);
        match gate {
            Some(rx) => rx
                .await
                .map_err(|_| ProviderError::Parse("gate dropped".to_string())),
            None => Ok(Vec::new()),
        }
    }
}

fn hit(name: &str) -> Vec<RawGeoResult> {
    vec![RawGeoResult {
        name: name.to_string(),
        state: None,
        country: "LK".to_string(),
        lat: 7.0,
        lon: 80.0,
    }]
}

fn names(ac: &Autocomplete<GatedGeocoder>) -> Vec<String> {
    ac.suggestions().into_iter().map(|s| s.display_name).collect()
}

#[tokio::test]
async fn test_last_issued_wins_when_older_settles_last() {
    let geo = Arc::new(GatedGeocoder::default());
    let slow = geo.gate("Kan");
    let fast = geo.gate("Kandy");
    let ac = Autocomplete::new(Arc::clone(&geo), RacePolicy::LastIssuedWins);

    let first = ac.on_input("Kan").unwrap();
    let second = ac.on_input("Kandy").unwrap();
    assert_eq!(ac.state(), SearchState::Pending);

    fast.send(hit("Kandy")).unwrap();
    assert!(second.await.unwrap());
    assert_eq!(names(&ac), vec!["Kandy, LK"]);

    slow.send(hit("Kanpur")).unwrap();
    assert!(!first.await.unwrap());
    assert_eq!(names(&ac), vec!["Kandy, LK"]);
    assert_eq!(ac.state(), SearchState::Resolved);
}

#[tokio::test]
async fn test_last_settled_wins_reproduces_overwrite() {
    let geo = Arc::new(GatedGeocoder::default());
    let slow = geo.gate("Kan");
    let fast = geo.gate("Kandy");
    let ac = Autocomplete::new(Arc::clone(&geo), RacePolicy::LastSettledWins);

    let first = ac.on_input("Kan").unwrap();
    let second = ac.on_input("Kandy").unwrap();

    fast.send(hit("Kandy")).unwrap();
    assert!(second.await.unwrap());
    slow.send(hit("Kanpur")).unwrap();
    assert!(first.await.unwrap());

    assert_eq!(names(&ac), vec!["Kanpur, LK"]);
}

#[tokio::test]
async fn test_in_order_settlement_applies_both() {
    let geo = Arc::new(GatedGeocoder::default());
    let a = geo.gate("Gal");
    let b = geo.gate("Galle");
    let ac = Autocomplete::new(Arc::clone(&geo), RacePolicy::default());

    let first = ac.on_input("Gal").unwrap();
    let second = ac.on_input("Galle").unwrap();

    a.send(hit("Galway")).unwrap();
    assert!(first.await.unwrap());
    assert_eq!(ac.state(), SearchState::Pending);

    b.send(hit("Galle")).unwrap();
    assert!(second.await.unwrap());
    assert_eq!(names(&ac), vec!["Galle, LK"]);
    assert_eq!(ac.state(), SearchState::Resolved);
}

#[tokio::test]
async fn test_selection_discards_in_flight_response() {
    let geo = Arc::new(GatedGeocoder::default());
    let gate = geo.gate("Nuw");
    let ac = Autocomplete::new(Arc::clone(&geo), RacePolicy::LastIssuedWins);

    let pending = ac.on_input("Nuw").unwrap();
    ac.select(&smartweather_weather::GeoSuggestion {
        display_name: "Nuwara Eliya, LK".to_string(),
        lat: 6.9497,
        lon: 80.7891,
    });

    gate.send(hit("Nuwakot")).unwrap();
    assert!(!pending.await.unwrap());
    assert!(ac.suggestions().is_empty());
    assert_eq!(ac.query(), "Nuwara Eliya, LK");
    assert_eq!(ac.state(), SearchState::Idle);
}

#[tokio::test]
async fn test_short_query_never_hits_provider() {
    let geo = Arc::new(GatedGeocoder::default());
    let ac = Autocomplete::new(Arc::clone(&geo), RacePolicy::default());

    assert!(ac.on_input("K").is_none());
    assert!(ac.on_input("Ka").is_none());
    assert_eq!(ac.state(), SearchState::Idle);
}
