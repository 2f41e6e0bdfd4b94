use serde::Serialize;

use super::query::SchoolQuery;
use super::SchoolStore;
use crate::core::School;
use crate::errors::Result;

/// Where a search view is in its lifecycle.
///
/// `Empty` (the query ran and matched nothing) and `Failed` (the query did
/// not run) are kept apart so the user is never told "no schools" when the
/// data store was unreachable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "lowercase")]
pub enum SearchState {
    Idle,
    Loading,
    Empty,
    Failed(String),
    Loaded(Vec<School>),
}

impl SearchState {
    pub fn schools(&self) -> &[School] {
        match self {
            SearchState::Loaded(schools) => schools,
            _ => &[],
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SearchState::Failed(_))
    }
}

/// Handle for one issued search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Tracks the latest search so a superseded result is dropped.
#[derive(Debug)]
pub struct SearchSession {
    generation: u64,
    state: SearchState,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            generation: 0,
            state: SearchState::Idle,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn into_state(self) -> SearchState {
        self.state
    }

    /// Start a search; any earlier ticket becomes stale.
    pub fn begin(&mut self) -> SearchTicket {
        self.generation += 1;
        self.state = SearchState::Loading;
        SearchTicket(self.generation)
    }

    /// Record a result. Returns `false` and leaves the state untouched when
    /// `ticket` is no longer the latest search.
    pub fn complete(&mut self, ticket: SearchTicket, result: Result<Vec<School>>) -> bool {
        if ticket.0 != self.generation {
            log::debug!(
                "Dropping stale search result {} (latest is {})",
                ticket.0,
                self.generation
            );
            return false;
        }

        self.state = match result {
            Ok(schools) if schools.is_empty() => SearchState::Empty,
            Ok(schools) => SearchState::Loaded(schools),
            Err(e) => {
                log::error!("Search failed: {}", e);
                SearchState::Failed(e.to_string())
            }
        };
        true
    }

    /// Run `query` against `store` to completion
    pub fn run<S: SchoolStore + ?Sized>(&mut self, store: &S, query: &SchoolQuery) -> &SearchState {
        let ticket = self.begin();
        log::info!("Searching {}", store.describe());
        let result = store.fetch(query);
        self.complete(ticket, result);
        &self.state
    }
}
