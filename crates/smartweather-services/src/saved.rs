//! User-curated list of saved location names.

use smartweather_core::StorageError;
use thiserror::Error;

use crate::store::{KeyValueStore, StoreResult};

pub const SAVED_LOCATIONS_KEY: &str = "smartWeather_savedLocations";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SavedLocationError {
    #[error("Enter a location name")]
    Empty,

    #[error("Location already saved")]
    Duplicate,
}

/// Plain names, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedLocations {
    names: Vec<String>,
}

impl SavedLocations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a trimmed name at the front. Case-insensitive duplicates are rejected.
    pub fn add(&mut self, name: &str) -> Result<(), SavedLocationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SavedLocationError::Empty);
        }

        let lowered = name.to_lowercase();
        if self.names.iter().any(|n| n.to_lowercase() == lowered) {
            return Err(SavedLocationError::Duplicate);
        }

        self.names.insert(0, name.to_string());
        Ok(())
    }

    /// Drops exact matches. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    pub fn list(&self) -> &[String] {
        &self.names
    }

    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(SAVED_LOCATIONS_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<String>>(&blob) {
                Ok(names) => Self { names },
                Err(e) => {
                    tracing::warn!("Resetting saved locations: {}", e);
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!("Failed to read saved locations, starting empty: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> StoreResult<()> {
        let json =
            serde_json::to_string(&self.names).map_err(|e| StorageError::Malformed(e.to_string()))?;
        store.set(SAVED_LOCATIONS_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_add_trims_and_prepends() {
        let mut saved = SavedLocations::new();
        saved.add("  Kandy ").unwrap();
        saved.add("Galle").unwrap();
        assert_eq!(saved.list(), ["Galle", "Kandy"]);
    }

    #[test]
    fn test_add_rejects_empty() {
        let mut saved = SavedLocations::new();
        let err = saved.add("   ").unwrap_err();
        assert_eq!(err, SavedLocationError::Empty);
        assert_eq!(err.to_string(), "Enter a location name");
    }

    #[test]
    fn test_add_rejects_case_insensitive_duplicate() {
        let mut saved = SavedLocations::new();
        saved.add("Colombo").unwrap();
        let err = saved.add("colombo").unwrap_err();
        assert_eq!(err.to_string(), "Location already saved");
        assert_eq!(saved.list().len(), 1);
    }

    #[test]
    fn test_remove_is_exact() {
        let mut saved = SavedLocations::new();
        saved.add("Colombo").unwrap();
        assert!(!saved.remove("colombo"));
        assert!(saved.remove("Colombo"));
        assert!(saved.list().is_empty());
    }

    #[test]
    fn test_persistence() {
        let store = MemoryStore::new();
        let mut saved = SavedLocations::new();
        saved.add("Jaffna").unwrap();
        saved.save(&store).unwrap();
        assert_eq!(SavedLocations::load(&store), saved);

        store.set(SAVED_LOCATIONS_KEY, "42").unwrap();
        assert!(SavedLocations::load(&store).list().is_empty());
    }
}
