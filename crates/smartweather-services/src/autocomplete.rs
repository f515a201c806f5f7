//! Search-as-you-type coordination.
//!
//! Each qualifying keystroke issues a geocode request tagged with a sequence
//! number. Responses settle in any order; [`RacePolicy`] decides whether a
//! late response may overwrite a newer one. There is no cancellation: stale
//! responses are dropped when they arrive.

use std::sync::Arc;

use parking_lot::Mutex;
use smartweather_core::NetworkError;
use smartweather_weather::{GeoSuggestion, ProviderError, WeatherApi};
use tokio::task::JoinHandle;

use crate::error::{SessionError, SessionResult};

/// Queries shorter than this never reach the provider.
pub const MIN_QUERY_LEN: usize = 3;
pub const SUGGESTION_LIMIT: u32 = 5;
/// The submit fallback asks for a single hit.
pub const LOOKUP_LIMIT: u32 = 1;

pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search location.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RacePolicy {
    /// Apply a response only if it is newer than everything applied or
    /// superseded so far.
    #[default]
    LastIssuedWins,
    /// Every response overwrites the list when it settles, whatever its age.
    LastSettledWins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Query too short, or a selection/submission just happened
    Idle,
    Pending,
    Resolved,
    /// Provider error; suggestions cleared, nothing shown to the user
    Failed,
}

/// An issued geocode request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
}

/// What a form submission should do next.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAction {
    /// Empty query
    Ignore,
    /// A suggestion was on screen; it has been selected
    Select(GeoSuggestion),
    /// No suggestions: geocode the query with [`LOOKUP_LIMIT`]
    Lookup(String),
}

#[derive(Debug)]
pub struct AutocompleteCoordinator {
    policy: RacePolicy,
    state: SearchState,
    query: String,
    suggestions: Vec<GeoSuggestion>,
    /// Highest sequence number handed out
    issued: u64,
    /// Responses at or below this number are stale
    applied: u64,
}

impl Default for AutocompleteCoordinator {
    fn default() -> Self {
        Self::new(RacePolicy::default())
    }
}

impl AutocompleteCoordinator {
    pub fn new(policy: RacePolicy) -> Self {
        Self {
            policy,
            state: SearchState::Idle,
            query: String::new(),
            suggestions: Vec::new(),
            issued: 0,
            applied: 0,
        }
    }

    pub fn policy(&self) -> RacePolicy {
        self.policy
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[GeoSuggestion] {
        &self.suggestions
    }

    fn supersede_in_flight(&mut self) {
        self.applied = self.issued;
    }

    /// Record new input. Returns a ticket when a geocode request should be issued.
    pub fn on_query_changed(&mut self, query: &str) -> Option<SearchTicket> {
        if query == self.query && matches!(self.state, SearchState::Pending | SearchState::Resolved)
        {
            return None;
        }
        self.query = query.to_string();

        if query.chars().count() < MIN_QUERY_LEN {
            self.suggestions.clear();
            self.state = SearchState::Idle;
            self.supersede_in_flight();
            return None;
        }

        self.issued += 1;
        self.state = SearchState::Pending;
        tracing::debug!(seq = self.issued, query, "Issuing geocode request");
        Some(SearchTicket {
            seq: self.issued,
            query: self.query.clone(),
        })
    }

    /// Settle a request. Returns `false` when the response was discarded as stale.
    pub fn apply_result(
        &mut self,
        seq: u64,
        result: Result<Vec<GeoSuggestion>, ProviderError>,
    ) -> bool {
        if self.policy == RacePolicy::LastIssuedWins && seq <= self.applied {
            tracing::debug!(seq, applied = self.applied, "Discarding stale geocode response");
            return false;
        }
        self.applied = self.applied.max(seq);

        let settled = match result {
            Ok(suggestions) => {
                tracing::debug!(seq, count = suggestions.len(), "Applying geocode response");
                self.suggestions = suggestions;
                SearchState::Resolved
            }
            Err(e) => {
                tracing::warn!(seq, "Geocode request failed: {}", e);
                self.suggestions.clear();
                SearchState::Failed
            }
        };

        // A newer request is still out
        self.state = if seq < self.issued && self.policy == RacePolicy::LastIssuedWins {
            SearchState::Pending
        } else {
            settled
        };
        true
    }

    /// The user picked a suggestion.
    pub fn select(&mut self, suggestion: &GeoSuggestion) {
        self.query = suggestion.display_name.clone();
        self.suggestions.clear();
        self.state = SearchState::Idle;
        self.supersede_in_flight();
    }

    pub fn submit(&mut self) -> SubmitAction {
        if self.query.trim().is_empty() {
            return SubmitAction::Ignore;
        }
        self.supersede_in_flight();

        match self.suggestions.first().cloned() {
            Some(first) => {
                self.select(&first);
                SubmitAction::Select(first)
            }
            None => SubmitAction::Lookup(self.query.clone()),
        }
    }

    /// Settle the submit fallback lookup.
    pub fn resolve_lookup(
        &mut self,
        result: Result<Vec<GeoSuggestion>, ProviderError>,
    ) -> SessionResult<GeoSuggestion> {
        match result {
            Ok(hits) => match hits.into_iter().next() {
                Some(hit) => {
                    self.select(&hit);
                    Ok(hit)
                }
                None => {
                    self.suggestions.clear();
                    self.state = SearchState::Failed;
                    Err(SessionError::not_found(self.query.clone()))
                }
            },
            Err(e) => {
                self.suggestions.clear();
                self.state = SearchState::Failed;
                Err(SessionError::provider(SEARCH_FAILED_MESSAGE, e))
            }
        }
    }
}

/// Coordinator shared between the input handler and in-flight query tasks.
pub struct Autocomplete<A> {
    inner: Arc<Mutex<AutocompleteCoordinator>>,
    provider: Arc<A>,
}

impl<A> Clone for Autocomplete<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<A: WeatherApi + 'static> Autocomplete<A> {
    pub fn new(provider: Arc<A>, policy: RacePolicy) -> Self {
        Self {
            inner: Arc::new(Mutex::new(AutocompleteCoordinator::new(policy))),
            provider,
        }
    }

    /// Feed a keystroke. Spawns the geocode request on the current tokio
    /// runtime; the handle resolves to whether the response was applied.
    pub fn on_input(&self, query: &str) -> Option<JoinHandle<bool>> {
        let ticket = self.inner.lock().on_query_changed(query)?;

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!("No async runtime for geocode request: {}", e);
                let failure = ProviderError::Network(NetworkError::ConnectionFailed(e.to_string()));
                self.inner.lock().apply_result(ticket.seq, Err(failure));
                return None;
            }
        };

        let inner = Arc::clone(&self.inner);
        let provider = Arc::clone(&self.provider);
        Some(runtime.spawn(async move {
            let result = provider
                .geocode(&ticket.query, SUGGESTION_LIMIT)
                .await
                .map(|hits| hits.into_iter().map(GeoSuggestion::from).collect());
            inner.lock().apply_result(ticket.seq, result)
        }))
    }

    pub fn select(&self, suggestion: &GeoSuggestion) {
        self.inner.lock().select(suggestion);
    }

    pub fn submit(&self) -> SubmitAction {
        self.inner.lock().submit()
    }

    /// Run the single-result lookup for a submit without suggestions.
    pub async fn lookup(&self, query: &str) -> SessionResult<GeoSuggestion> {
        let result = self
            .provider
            .geocode(query, LOOKUP_LIMIT)
            .await
            .map(|hits| hits.into_iter().map(GeoSuggestion::from).collect());
        self.inner.lock().resolve_lookup(result)
    }

    pub fn state(&self) -> SearchState {
        self.inner.lock().state()
    }

    pub fn query(&self) -> String {
        self.inner.lock().query().to_string()
    }

    pub fn suggestions(&self) -> Vec<GeoSuggestion> {
        self.inner.lock().suggestions().to_vec()
    }
}
