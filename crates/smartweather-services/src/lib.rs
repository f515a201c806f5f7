//! Stateful services for SmartWeather
//!
//! Persistence port and backends, the recent/saved location lists,
//! preferences, the autocomplete race coordinator and the weather session
//! that ties them to the provider.

pub mod autocomplete;
pub mod error;
mod error_mapping;
pub mod preferences;
pub mod recent;
pub mod saved;
pub mod session;
pub mod store;

pub use autocomplete::{
    Autocomplete, AutocompleteCoordinator, RacePolicy, SearchState, SearchTicket, SubmitAction,
    MIN_QUERY_LEN, SUGGESTION_LIMIT,
};
pub use error::{SessionError, SessionResult};
pub use preferences::{PreferenceKey, Preferences};
pub use recent::{LocationCache, RECENT_CAPACITY};
pub use saved::{SavedLocationError, SavedLocations};
pub use session::WeatherSession;
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
