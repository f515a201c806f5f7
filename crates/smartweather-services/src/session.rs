//! Per-screen weather state: current snapshot, forecast, map centre, the
//! dismissible error banner and the recent-location cache.
//!
//! Every fetch is user-initiated. A failure leaves an error in place until
//! the user dismisses it or retries with [`WeatherSession::refresh`].

use std::sync::Arc;

use smartweather_advisor::{
    build_hint, derive_advisories, estimate_soil_moisture, AdvisoryItem, Persona,
    SoilMoistureEstimate,
};
use smartweather_weather::{
    coordinate_label, forecast_window, normalize, ForecastWindow, GeoSuggestion, RecentLocation,
    WeatherApi, WeatherSnapshot,
};
use tokio::task::JoinHandle;

use crate::autocomplete::{Autocomplete, RacePolicy, SearchState, SubmitAction};
use crate::error::{SessionError, SessionResult};
use crate::recent::LocationCache;
use crate::store::KeyValueStore;

pub const WEATHER_FAILED_MESSAGE: &str = "Weather data not found for this location.";

pub struct WeatherSession<A, S> {
    provider: Arc<A>,
    store: S,
    autocomplete: Autocomplete<A>,
    recent: LocationCache,
    snapshot: Option<WeatherSnapshot>,
    forecast: Option<ForecastWindow>,
    map_center: (f64, f64),
    last_requested: Option<(f64, f64)>,
    error: Option<String>,
}

impl<A: WeatherApi + 'static, S: KeyValueStore> WeatherSession<A, S> {
    /// Recent locations are loaded from `store`; nothing is fetched yet.
    pub fn new(provider: Arc<A>, store: S, center: (f64, f64)) -> Self {
        Self::with_policy(provider, store, center, RacePolicy::default())
    }

    pub fn with_policy(
        provider: Arc<A>,
        store: S,
        center: (f64, f64),
        policy: RacePolicy,
    ) -> Self {
        let recent = LocationCache::load(&store);
        Self {
            autocomplete: Autocomplete::new(Arc::clone(&provider), policy),
            provider,
            store,
            recent,
            snapshot: None,
            forecast: None,
            map_center: center,
            last_requested: None,
            error: None,
        }
    }

    /// Fetch current weather then forecast for a coordinate.
    ///
    /// A current-weather failure keeps the previous snapshot. A forecast
    /// failure keeps the new snapshot and clears the forecast.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_for(&mut self, lat: f64, lon: f64) -> SessionResult<()> {
        self.map_center = (lat, lon);
        self.last_requested = Some((lat, lon));

        let raw = match self.provider.current_weather(lat, lon).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Current weather request failed: {}", e);
                return Err(self.fail(SessionError::provider(WEATHER_FAILED_MESSAGE, e)));
            }
        };

        let snapshot = normalize(&raw);
        self.error = None;

        let name = snapshot
            .location_name
            .clone()
            .unwrap_or_else(|| coordinate_label(lat, lon));
        if self.recent.upsert(RecentLocation::new(name, lat, lon)) {
            if let Err(e) = self.recent.save(&self.store) {
                tracing::warn!("Failed to persist recent locations: {}", e);
            }
        }
        self.snapshot = Some(snapshot);

        match self.provider.forecast(lat, lon).await {
            Ok(list) => {
                self.forecast = Some(forecast_window(&list));
                tracing::info!("Weather updated");
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Forecast request failed: {}", e);
                self.forecast = None;
                Err(self.fail(SessionError::provider(WEATHER_FAILED_MESSAGE, e)))
            }
        }
    }

    fn fail(&mut self, error: SessionError) -> SessionError {
        self.error = Some(error.to_string());
        error
    }

    /// Retry the last coordinate, or the map centre if nothing was fetched yet.
    pub async fn refresh(&mut self) -> SessionResult<()> {
        let (lat, lon) = self.last_requested.unwrap_or(self.map_center);
        self.fetch_for(lat, lon).await
    }

    /// Keystroke in the search box. See [`Autocomplete::on_input`].
    pub fn set_query(&self, query: &str) -> Option<JoinHandle<bool>> {
        self.autocomplete.on_input(query)
    }

    pub async fn select_suggestion(&mut self, suggestion: &GeoSuggestion) -> SessionResult<()> {
        self.autocomplete.select(suggestion);
        self.fetch_for(suggestion.lat, suggestion.lon).await
    }

    /// Submit the search form: first suggestion if any, else a single-result lookup.
    pub async fn submit(&mut self) -> SessionResult<()> {
        let chosen = match self.autocomplete.submit() {
            SubmitAction::Ignore => return Ok(()),
            SubmitAction::Select(suggestion) => suggestion,
            SubmitAction::Lookup(query) => match self.autocomplete.lookup(&query).await {
                Ok(hit) => hit,
                Err(e) => {
                    tracing::info!("Location lookup for {:?} failed: {}", query, e);
                    return Err(self.fail(e));
                }
            },
        };
        self.fetch_for(chosen.lat, chosen.lon).await
    }

    /// Re-open a recent location by its position in [`Self::recent`].
    pub async fn open_recent(&mut self, index: usize) -> SessionResult<()> {
        let Some((lat, lon)) = self.recent.get(index).map(|l| (l.lat, l.lon)) else {
            tracing::debug!(index, "No recent location at index");
            return Ok(());
        };
        self.fetch_for(lat, lon).await
    }

    pub async fn map_click(&mut self, lat: f64, lon: f64) -> SessionResult<()> {
        self.fetch_for(lat, lon).await
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn forecast(&self) -> Option<&ForecastWindow> {
        self.forecast.as_ref()
    }

    pub fn map_center(&self) -> (f64, f64) {
        self.map_center
    }

    pub fn recent(&self) -> &[RecentLocation] {
        self.recent.list()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn query(&self) -> String {
        self.autocomplete.query()
    }

    pub fn suggestions(&self) -> Vec<GeoSuggestion> {
        self.autocomplete.suggestions()
    }

    pub fn search_state(&self) -> SearchState {
        self.autocomplete.state()
    }

    /// Empty until a snapshot has been fetched.
    pub fn advisories(&self, persona: Persona) -> Vec<AdvisoryItem> {
        self.snapshot
            .as_ref()
            .map(|s| derive_advisories(persona, s, self.forecast.as_ref()))
            .unwrap_or_default()
    }

    pub fn soil_moisture(&self) -> SoilMoistureEstimate {
        estimate_soil_moisture(self.snapshot.as_ref(), self.forecast.as_ref())
    }

    pub fn hint(&self) -> String {
        build_hint(self.snapshot.as_ref(), self.recent.list())
    }
}
