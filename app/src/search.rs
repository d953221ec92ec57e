//! # Search
//!
//! Remote query parameters, the last fetched page, and the fetch lifecycle.
//!
//! A fetch flips the status to loading before the request goes out, then applies
//! whatever resolves: success replaces the page, failure clears it so the display
//! never shows results inconsistent with the reported error.
//!
//! ## Overlapping Fetches
//! Fetches are never cancelled. When filters change while a request is in
//! flight, both requests run and whichever resolves last determines the final
//! state. Each fetch takes a ticket from a sequence counter; `newest_wins`
//! switches the store to dropping completions that resolve after a newer fetch
//! was issued.

use std::sync::{
    Mutex, MutexGuard,
    atomic::{AtomicU64, Ordering},
};

use catalog::{
    Client,
    error::CatalogError,
    models::{RecipeSummary, SearchPage},
};
use tracing::warn;

pub const DEFAULT_LIMIT: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Relevance,
    Title,
    Popularity,
}

impl SortOrder {
    /// The `sort` request parameter; relevance is the API default and sends
    /// nothing.
    pub fn as_query(self) -> Option<&'static str> {
        match self {
            SortOrder::Relevance => None,
            SortOrder::Title => Some("title"),
            SortOrder::Popularity => Some("popularity"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchState {
    pub query: String,
    pub ordering: SortOrder,
    pub offset: u32,
    pub limit: u32,
    pub results: Vec<RecipeSummary>,
    pub total_count: u32,
    pub status: FetchStatus,
    pub error: Option<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            ordering: SortOrder::default(),
            offset: 0,
            limit: DEFAULT_LIMIT,
            results: Vec::new(),
            total_count: 0,
            status: FetchStatus::default(),
            error: None,
        }
    }
}

pub struct SearchStore {
    catalog: Client,
    state: Mutex<SearchState>,
    fetch_seq: AtomicU64,
    newest_wins: bool,
}

impl SearchStore {
    pub fn new(catalog: Client) -> Self {
        Self {
            catalog,
            state: Mutex::new(SearchState::default()),
            fetch_seq: AtomicU64::new(0),
            newest_wins: false,
        }
    }

    /// Drop responses that resolve after a newer fetch was issued, instead of
    /// letting the last resolver win.
    pub fn newest_wins(mut self) -> Self {
        self.newest_wins = true;
        self
    }

    pub fn snapshot(&self) -> SearchState {
        self.lock().clone()
    }

    /// Changing the query restarts pagination.
    pub fn set_query(&self, query: impl Into<String>) {
        let mut state = self.lock();
        state.query = query.into();
        state.offset = 0;
    }

    /// Changing the ordering restarts pagination.
    pub fn set_ordering(&self, ordering: SortOrder) {
        let mut state = self.lock();
        state.ordering = ordering;
        state.offset = 0;
    }

    pub fn set_offset(&self, offset: u32) {
        self.lock().offset = offset;
    }

    pub fn set_limit(&self, limit: u32) {
        let mut state = self.lock();
        state.limit = limit.max(1);
        state.offset = 0;
    }

    pub fn reset_filters(&self) {
        let mut state = self.lock();
        state.query.clear();
        state.ordering = SortOrder::Relevance;
        state.offset = 0;
    }

    /// Fetch one page for the current parameters. The loading status is
    /// observable as soon as this is polled, before the request resolves.
    pub async fn fetch_page(&self) {
        let ticket = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let (query, ordering, offset, limit) = {
            let mut state = self.lock();
            state.status = FetchStatus::Loading;
            state.error = None;
            (state.query.clone(), state.ordering, state.offset, state.limit)
        };

        let outcome = self
            .catalog
            .search(&query, ordering.as_query(), offset, limit)
            .await;

        let mut state = self.lock();
        if self.newest_wins && ticket < self.fetch_seq.load(Ordering::SeqCst) {
            // A newer fetch owns the state now.
            return;
        }
        apply(&mut state, outcome);
    }

    // Guards are short-lived and never held across an await.
    fn lock(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap()
    }
}

fn apply(state: &mut SearchState, outcome: Result<SearchPage, CatalogError>) {
    match outcome {
        Ok(page) => {
            state.results = page.results;
            state.total_count = page.total_results;
            state.status = FetchStatus::Succeeded;
            state.error = None;
        }
        Err(err) => {
            warn!("Search fetch failed: {err}");
            state.status = FetchStatus::Failed;
            state.error = Some(err.to_string());
            state.results = Vec::new();
            state.total_count = 0;
        }
    }
}

pub fn total_pages(total_count: u32, limit: u32) -> u32 {
    total_count.div_ceil(limit.max(1)).max(1)
}

pub fn current_page(offset: u32, limit: u32) -> u32 {
    offset / limit.max(1) + 1
}

pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

pub fn offset_for_page(page: u32, limit: u32) -> u32 {
    (page.max(1) - 1) * limit
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::models::RecipeId;

    fn store() -> SearchStore {
        SearchStore::new(Client::new(None))
    }

    fn summary(id: u64, title: &str) -> RecipeSummary {
        RecipeSummary {
            id: RecipeId::Remote(id),
            title: title.to_string(),
            image: format!("https://img/{id}.jpg"),
            image_type: None,
        }
    }

    #[test]
    fn query_change_restarts_pagination() {
        let search = store();
        search.set_offset(60);

        search.set_query("pasta");

        assert_eq!(search.snapshot().offset, 0);
    }

    #[test]
    fn ordering_change_restarts_pagination() {
        let search = store();
        search.set_offset(60);

        search.set_ordering(SortOrder::Title);

        assert_eq!(search.snapshot().offset, 0);
    }

    #[test]
    fn limit_change_restarts_pagination_and_clamps() {
        let search = store();
        search.set_offset(60);

        search.set_limit(0);

        let state = search.snapshot();
        assert_eq!(state.limit, 1);
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn reset_filters_clears_query_ordering_and_offset() {
        let search = store();
        search.set_query("pasta");
        search.set_ordering(SortOrder::Popularity);
        search.set_offset(40);

        search.reset_filters();

        let state = search.snapshot();
        assert!(state.query.is_empty());
        assert_eq!(state.ordering, SortOrder::Relevance);
        assert_eq!(state.offset, 0);
    }

    #[test]
    fn success_replaces_the_page() {
        let mut state = SearchState::default();

        apply(
            &mut state,
            Ok(SearchPage {
                results: vec![summary(1, "Pasta"), summary(2, "Curry")],
                offset: Some(0),
                number: Some(20),
                total_results: 86,
            }),
        );

        assert_eq!(state.status, FetchStatus::Succeeded);
        assert_eq!(state.total_count, 86);
        assert_eq!(state.results.len(), 2);
        assert!(state.error.is_none());
    }

    #[test]
    fn quota_failure_clears_results_and_reports_billing() {
        let mut state = SearchState::default();
        state.results = vec![summary(1, "Pasta")];
        state.total_count = 86;

        apply(&mut state, Err(CatalogError::QuotaExhausted));

        assert_eq!(state.status, FetchStatus::Failed);
        assert!(state.results.is_empty());
        assert_eq!(state.total_count, 0);
        let message = state.error.unwrap();
        assert!(message.contains("quota") || message.contains("billing"));
    }

    #[tokio::test]
    async fn fetch_without_key_fails_with_the_fixed_message() {
        let search = store();

        search.fetch_page().await;

        let state = search.snapshot();
        assert_eq!(state.status, FetchStatus::Failed);
        assert_eq!(
            state.error.as_deref(),
            Some("Missing API key. Please set SPOONACULAR_API_KEY in .env")
        );
        assert!(state.results.is_empty());
        assert_eq!(state.total_count, 0);
    }

    #[test]
    fn page_math_clamps_into_range() {
        assert_eq!(total_pages(0, 20), 1);
        assert_eq!(total_pages(86, 20), 5);
        assert_eq!(total_pages(80, 20), 4);

        assert_eq!(current_page(0, 20), 1);
        assert_eq!(current_page(60, 20), 4);

        assert_eq!(clamp_page(0, 5), 1);
        assert_eq!(clamp_page(9, 5), 5);
        assert_eq!(clamp_page(3, 5), 3);

        assert_eq!(offset_for_page(1, 20), 0);
        assert_eq!(offset_for_page(4, 20), 60);
    }
}
