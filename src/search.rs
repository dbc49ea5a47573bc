//! Place lookup for the search box.
//!
//! Every call to [`PlaceFinder::search`] takes a generation number before it
//! touches the network. Responses that come back after a newer search (or a
//! local clear) has started are reported as [`SearchOutcome::Stale`] and must
//! not be applied.

use std::cell::Cell;
use std::rc::Rc;

use leptos::logging::{log, warn};

use crate::api::RestaurantApi;
use crate::models::place::{GeoPoint, PlaceCandidate};

pub const MIN_QUERY_CHARS: usize = 3;
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Query too short; the list is emptied without a request.
    Cleared,
    Results(Vec<PlaceCandidate>),
    /// The request failed; the list is emptied and the message shown.
    Failed(String),
    /// A newer search superseded this one.
    Stale,
}

impl SearchOutcome {
    /// The candidate list the view should show, or `None` to leave it alone.
    pub fn candidates(&self) -> Option<Vec<PlaceCandidate>> {
        match self {
            SearchOutcome::Results(places) => Some(places.clone()),
            SearchOutcome::Cleared | SearchOutcome::Failed(_) => Some(Vec::new()),
            SearchOutcome::Stale => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SearchOutcome::Failed(message) => Some(message),
            _ => None,
        }
    }
}

pub fn should_search(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}

/// Shared by every clone, so all of them agree on which search is newest.
#[derive(Clone)]
pub struct PlaceFinder {
    api: Rc<dyn RestaurantApi>,
    generation: Rc<Cell<u64>>,
}

impl PlaceFinder {
    pub fn new(api: Rc<dyn RestaurantApi>) -> Self {
        Self {
            api,
            generation: Rc::new(Cell::new(0)),
        }
    }

    fn next_generation(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }

    pub async fn search(&self, query: &str, location: Option<GeoPoint>) -> SearchOutcome {
        let generation = self.next_generation();
        if !should_search(query) {
            return SearchOutcome::Cleared;
        }

        let query = query.trim();
        let result = self.api.search_places(query, location).await;

        if !self.is_current(generation) {
            log!("[SEARCH] Dropping stale response for '{}' (#{})", query, generation);
            return SearchOutcome::Stale;
        }

        match result {
            Ok(places) => {
                log!("[SEARCH] {} candidates for '{}'", places.len(), query);
                SearchOutcome::Results(places)
            }
            Err(err) => {
                warn!("[SEARCH] Search for '{}' failed: {}", query, err);
                SearchOutcome::Failed(SEARCH_FAILED_MESSAGE.to_string())
            }
        }
    }
}
