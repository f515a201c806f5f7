//! Bounded, coordinate-deduplicated list of recently viewed locations.

use smartweather_core::StorageError;
use smartweather_weather::RecentLocation;

use crate::store::{KeyValueStore, StoreResult};

pub const RECENT_LOCATIONS_KEY: &str = "smartWeather_recentLocations";
pub const RECENT_CAPACITY: usize = 5;

/// Most-recent-first, at most [`RECENT_CAPACITY`] entries.
///
/// Recency is insertion order: re-resolving a known coordinate does not move
/// it to the front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationCache {
    entries: Vec<RecentLocation>,
}

impl LocationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the location was inserted, `false` when its
    /// coordinate was already present.
    pub fn upsert(&mut self, location: RecentLocation) -> bool {
        if self
            .entries
            .iter()
            .any(|e| e.same_coordinate(location.lat, location.lon))
        {
            tracing::debug!(name = %location.name, "Recent location already cached");
            return false;
        }

        tracing::debug!(name = %location.name, "Caching recent location");
        self.entries.insert(0, location);
        self.entries.truncate(RECENT_CAPACITY);
        true
    }

    pub fn list(&self) -> &[RecentLocation] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&RecentLocation> {
        self.entries.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Parse a persisted blob. Anything unreadable is [`StorageError::Malformed`].
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        let mut entries: Vec<RecentLocation> =
            serde_json::from_str(json).map_err(|e| StorageError::Malformed(e.to_string()))?;
        entries.truncate(RECENT_CAPACITY);
        Ok(Self { entries })
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(&self.entries).map_err(|e| StorageError::Malformed(e.to_string()))
    }

    /// Load from the store. Absent, corrupt or unreadable state yields an empty cache.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let blob = match store.get(RECENT_LOCATIONS_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Self::default(),
            Err(e) => {
                tracing::warn!("Failed to read recent locations, starting empty: {}", e);
                return Self::default();
            }
        };

        Self::from_json(&blob).unwrap_or_else(|e| {
            tracing::warn!("Resetting recent locations: {}", e);
            Self::default()
        })
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> StoreResult<()> {
        store.set(RECENT_LOCATIONS_KEY, &self.to_json()?)
    }
}
