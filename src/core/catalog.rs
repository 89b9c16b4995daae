//! Catalog state core.
//!
//! Reconciles the trending feed, free-text search, attribute filters and the
//! favorites set into one displayed list, and mirrors the persisted fields
//! to the durable store.
//!
//! Remote fetches may complete out of order. Every fetch captures the
//! generation of the context that issued it (search, filter, trending or a
//! specific next page) and its result is committed only if that context is
//! still current when it completes. Superseded fetches run to completion and
//! are dropped.
//!
//! Intents never fail: errors land in [`CatalogCore::error`] and the core
//! stays usable.

use crate::core::persistence::Persistence;
use crate::core::state::{
    CatalogState, ErrorNotice, Favorites, PageContext, Paged, RemoteFilterState, RemoteStatus,
    ResultSource, SearchSession,
};
use crate::error::FetchOperation;
use crate::models::{
    FilterCriteria, Genre, MovieDetail, MoviePage, MovieSummary, RemoteFilter, Theme,
};
use crate::services::{extract_trailer_key, CatalogGateway};
use crate::{Error, Result};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

const TRENDING_FAILED: &str = "Failed to fetch trending movies. Please try again later.";
const SEARCH_FAILED: &str = "Failed to fetch movies. Please try again later.";
const FILTER_FAILED: &str = "Failed to apply filters. Please try again later.";

const EVENT_CAPACITY: usize = 64;

/// Notification that part of the read surface changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEvent {
    TrendingUpdated,
    SearchUpdated,
    FilterUpdated,
    FavoritesChanged,
    GenresLoaded,
    ThemeChanged,
    LoadingChanged,
    ErrorChanged,
}

/// Owned copy of everything the presentation layer may read.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSnapshot {
    pub trending: Vec<MovieSummary>,
    pub search_query: String,
    pub search_results: Vec<MovieSummary>,
    pub last_search_query: String,
    pub filter: FilterCriteria,
    pub source: ResultSource,
    pub displayed: Vec<MovieSummary>,
    pub favorites: Vec<MovieSummary>,
    pub genres: Vec<Genre>,
    pub theme: Theme,
    pub loading: bool,
    pub filter_loading: bool,
    pub error: Option<ErrorNotice>,
    pub current_page: u32,
    pub total_pages: u32,
}

/// A movie detail view. Fetched per view and never cached in the core.
#[derive(Debug, Clone)]
pub struct DetailView {
    pub movie: MovieDetail,
    /// YouTube key of the best trailer, if any.
    pub trailer_key: Option<String>,
    pub is_favorite: bool,
}

impl DetailView {
    pub fn trailer_url(&self) -> Option<String> {
        self.trailer_key
            .as_ref()
            .map(|key| format!("https://www.youtube.com/watch?v={}", key))
    }
}

/// Single source of truth for the browse, search, filter and favorites views.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct CatalogCore {
    gateway: Arc<dyn CatalogGateway>,
    persistence: Persistence,
    state: Arc<Mutex<CatalogState>>,
    events: broadcast::Sender<CatalogEvent>,
}

impl CatalogCore {
    /// Create a core with empty state. Call [`initialize`](Self::initialize)
    /// once before use.
    pub fn new(gateway: Arc<dyn CatalogGateway>, persistence: Persistence) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            gateway,
            persistence,
            state: Arc::new(Mutex::new(CatalogState::default())),
            events,
        }
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.events.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read<R>(&self, f: impl FnOnce(&CatalogState) -> R) -> R {
        f(&self.lock())
    }

    /// Mutate state under the lock, then publish the collected events.
    fn update<R>(&self, f: impl FnOnce(&mut CatalogState, &mut Vec<CatalogEvent>) -> R) -> R {
        let mut events = Vec::new();
        let result = {
            let mut state = self.lock();
            f(&mut state, &mut events)
        };
        for event in events {
            // No subscribers is fine.
            let _ = self.events.send(event);
        }
        result
    }

    // ========== LIFECYCLE ==========

    /// Load favorites, theme and last search from the durable store.
    pub fn restore(&self) {
        let favorites = self.persistence.load_favorites();
        let theme = self.persistence.load_theme();
        let last_search = self.persistence.load_last_search();

        self.update(|state, events| {
            tracing::debug!(
                "Restored {} favorites, {} theme, last search {:?}",
                favorites.len(),
                theme,
                last_search
            );
            state.favorites = Favorites::from_vec(favorites);
            state.theme = theme;
            state.last_search_query = last_search;
            events.push(CatalogEvent::FavoritesChanged);
            events.push(CatalogEvent::ThemeChanged);
        });
    }

    /// Restore persisted state, then fetch trending page 1 and the genre
    /// list. The two fetches are independent; neither failure blocks the other.
    pub async fn initialize(&self) {
        let first = self.update(|state, _| !std::mem::replace(&mut state.initialized, true));
        if !first {
            tracing::debug!("Catalog already initialized");
            return;
        }

        self.restore();
        futures::join!(self.refresh_trending(), self.load_genres());
    }

    /// Re-fetch trending page 1, replacing the accumulated trending feed.
    pub async fn refresh_trending(&self) {
        let generation = self.update(|state, events| {
            state.trending_generation += 1;
            begin_load(state, events);
            state.trending_generation
        });

        let outcome = self.gateway.get_trending(1).await;

        self.update(|state, events| {
            end_load(state, events);
            if state.trending_generation != generation {
                tracing::debug!("Discarding stale trending page");
                return;
            }
            match outcome {
                Ok(page) => {
                    tracing::info!("Loaded {} trending movies", page.items.len());
                    state.trending = Paged::first(page);
                    clear_error(state, events);
                    events.push(CatalogEvent::TrendingUpdated);
                }
                Err(e) => set_error(state, events, FetchOperation::Trending, TRENDING_FAILED, &e),
            }
        });
    }

    async fn load_genres(&self) {
        match self.gateway.list_genres().await {
            Ok(genres) => {
                tracing::debug!("Loaded {} genres", genres.len());
                self.update(|state, events| {
                    state.genres = genres;
                    events.push(CatalogEvent::GenresLoaded);
                });
            }
            // Best effort: genre chips are simply not shown.
            Err(e) => tracing::warn!("Genre list unavailable: {}", e),
        }
    }

    // ========== SEARCH ==========

    /// Start a new search session for `query`. Blank queries clear the search.
    pub async fn search_for(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.clear_search().await;
            return;
        }

        let generation = self.update(|state, events| {
            state.search_generation += 1;
            state.search = SearchSession::new(query);
            begin_load(state, events);
            events.push(CatalogEvent::SearchUpdated);
            state.search_generation
        });

        let outcome = self.gateway.search(query, 1).await;

        self.update(|state, events| {
            end_load(state, events);
            if state.search_generation != generation {
                tracing::debug!("Discarding stale search results for {:?}", query);
                return;
            }
            match outcome {
                Ok(page) => {
                    tracing::info!(
                        "Search {:?}: {} results, {} pages",
                        query,
                        page.items.len(),
                        page.total_pages
                    );
                    state.search.results = Paged::first(page);
                    state.last_search_query = query.to_string();
                    if let Err(e) = self.persistence.save_last_search(query) {
                        tracing::warn!("Failed to persist last search: {}", e);
                    }
                    clear_error(state, events);
                    events.push(CatalogEvent::SearchUpdated);
                }
                Err(e) => set_error(state, events, FetchOperation::Search, SEARCH_FAILED, &e),
            }
        });
    }

    /// End the search session and return to the trending/filtered view.
    ///
    /// A genre/year filter chosen while the search was active is fetched now.
    pub async fn clear_search(&self) {
        let deferred = self.update(|state, events| {
            let tracked = state.remote_filter.as_ref().map(|r| r.query);
            let wanted = state
                .filter
                .remote_query()
                .filter(|wanted| tracked != Some(*wanted));
            if !state.search.is_active() && wanted.is_none() {
                return None;
            }

            state.search_generation += 1;
            state.search = SearchSession::default();
            events.push(CatalogEvent::SearchUpdated);

            wanted.map(|wanted| start_remote_filter(state, events, wanted))
        });

        if let Some((generation, query)) = deferred {
            self.run_remote_filter(generation, query).await;
        }
    }

    // ========== PAGINATION ==========

    /// Fetch and append the next page of the displayed context.
    ///
    /// No-op when the context is on its last page or a page fetch for it is
    /// already in flight.
    pub async fn load_more(&self) {
        let context = self.update(|state, events| {
            let context = state.next_page_context()?;
            if let Some(in_flight) = state.page_fetches.in_flight(&context) {
                if state.is_current(&in_flight) {
                    tracing::debug!("Page {} already loading", in_flight.page());
                    return None;
                }
            }
            state.page_fetches.start(context.clone());
            if context.is_filter() {
                begin_filter_load(state, events);
            } else {
                begin_load(state, events);
            }
            Some(context)
        });
        let Some(context) = context else {
            return;
        };

        let outcome = self.fetch_page(&context).await;

        self.update(|state, events| {
            if context.is_filter() {
                end_filter_load(state, events);
            } else {
                end_load(state, events);
            }
            state.page_fetches.finish(&context);
            if !state.is_current(&context) {
                tracing::debug!("Discarding stale page {}", context.page());
                return;
            }
            match outcome {
                Ok(page) => {
                    let source = state.result_source();
                    if let Some(paged) = state.paged_for_mut(&context) {
                        paged.append(page, context.page());
                    }
                    clear_error(state, events);
                    events.push(match source {
                        ResultSource::Search => CatalogEvent::SearchUpdated,
                        ResultSource::RemoteFilter => CatalogEvent::FilterUpdated,
                        ResultSource::RatingFilter | ResultSource::Trending => {
                            CatalogEvent::TrendingUpdated
                        }
                    });
                }
                Err(e) => {
                    let message = if context.is_filter() {
                        FILTER_FAILED
                    } else if matches!(context, PageContext::Trending { .. }) {
                        TRENDING_FAILED
                    } else {
                        SEARCH_FAILED
                    };
                    set_error(state, events, context.operation(), message, &e);
                }
            }
        });
    }

    async fn fetch_page(&self, context: &PageContext) -> Result<MoviePage> {
        match context {
            PageContext::Search { query, page, .. } => self.gateway.search(query, *page).await,
            PageContext::Filter { query, page, .. } => self.discover(*query, *page).await,
            PageContext::Trending { page, .. } => self.gateway.get_trending(*page).await,
        }
    }

    async fn discover(&self, query: RemoteFilter, page: u32) -> Result<MoviePage> {
        match query {
            RemoteFilter::Genre(genre_id) => self.gateway.discover_by_genre(genre_id, page).await,
            RemoteFilter::Year(year) => self.gateway.discover_by_year(year, page).await,
        }
    }

    // ========== FILTERS ==========

    /// Replace the filter criteria.
    ///
    /// A genre or year issues one discovery query (genre wins when both are
    /// set) unless the same query is already loaded or in flight. A minimum
    /// rating is applied locally and never triggers a fetch. Empty criteria
    /// revert to the trending feed. While a search is active the criteria are
    /// recorded and the query waits for [`clear_search`](Self::clear_search).
    pub async fn apply_filter(&self, criteria: FilterCriteria) {
        let request = self.update(|state, events| {
            state.filter = criteria;
            events.push(CatalogEvent::FilterUpdated);

            let Some(wanted) = state.filter.remote_query() else {
                state.filter_generation += 1;
                state.remote_filter = None;
                return None;
            };

            let reusable = matches!(
                &state.remote_filter,
                Some(RemoteFilterState { query, status })
                    if *query == wanted && *status != RemoteStatus::Failed
            );
            if reusable {
                return None;
            }

            if state.search.is_active() {
                tracing::debug!("Search active, deferring {:?} filter", wanted);
                state.filter_generation += 1;
                state.remote_filter = None;
                return None;
            }

            Some(start_remote_filter(state, events, wanted))
        });

        if let Some((generation, query)) = request {
            self.run_remote_filter(generation, query).await;
        }
    }

    /// Drop all filter criteria. Same as applying empty criteria.
    pub async fn clear_filter(&self) {
        self.apply_filter(FilterCriteria::default()).await;
    }

    async fn run_remote_filter(&self, generation: u64, query: RemoteFilter) {
        let outcome = self.discover(query, 1).await;

        self.update(|state, events| {
            end_filter_load(state, events);
            if state.filter_generation != generation {
                tracing::debug!("Discarding stale {:?} filter results", query);
                return;
            }
            match outcome {
                Ok(page) => {
                    tracing::info!("Filter {:?}: {} results", query, page.items.len());
                    state.remote_filter = Some(RemoteFilterState {
                        query,
                        status: RemoteStatus::Loaded(Paged::first(page)),
                    });
                    clear_error(state, events);
                    events.push(CatalogEvent::FilterUpdated);
                }
                Err(e) => {
                    state.remote_filter = Some(RemoteFilterState {
                        query,
                        status: RemoteStatus::Failed,
                    });
                    set_error(state, events, FetchOperation::Discover, FILTER_FAILED, &e);
                }
            }
        });
    }

    // ========== FAVORITES ==========

    /// Add `movie` if absent, remove it if present. Returns whether it is
    /// now a favorite.
    pub fn toggle_favorite(&self, movie: &MovieSummary) -> bool {
        self.update(|state, events| {
            let now_favorite = state.favorites.toggle(movie);
            self.write_favorites(&state.favorites);
            events.push(CatalogEvent::FavoritesChanged);
            now_favorite
        })
    }

    /// Add `movie` unless already a favorite. Returns whether it was added.
    pub fn add_favorite(&self, movie: &MovieSummary) -> bool {
        self.update(|state, events| {
            let added = state.favorites.insert(movie.clone());
            if added {
                self.write_favorites(&state.favorites);
                events.push(CatalogEvent::FavoritesChanged);
            }
            added
        })
    }

    /// Remove the favorite with `movie_id`. Returns whether one was removed.
    pub fn remove_favorite(&self, movie_id: u64) -> bool {
        self.update(|state, events| {
            let removed = state.favorites.remove(movie_id);
            if removed {
                self.write_favorites(&state.favorites);
                events.push(CatalogEvent::FavoritesChanged);
            }
            removed
        })
    }

    /// Empty the favorites set with a single store write.
    pub fn clear_favorites(&self) {
        self.update(|state, events| {
            state.favorites.clear();
            self.write_favorites(&state.favorites);
            events.push(CatalogEvent::FavoritesChanged);
        });
    }

    pub fn is_favorite(&self, movie_id: u64) -> bool {
        self.read(|state| state.favorites.contains(movie_id))
    }

    /// Favorites in insertion order.
    pub fn favorites(&self) -> Vec<MovieSummary> {
        self.read(|state| state.favorites.as_slice().to_vec())
    }

    fn write_favorites(&self, favorites: &Favorites) {
        if let Err(e) = self.persistence.save_favorites(favorites.as_slice()) {
            tracing::warn!("Failed to persist favorites: {}", e);
        }
    }

    // ========== THEME ==========

    pub fn theme(&self) -> Theme {
        self.read(|state| state.theme)
    }

    pub fn set_theme(&self, theme: Theme) {
        self.update(|state, events| {
            state.theme = theme;
            if let Err(e) = self.persistence.save_theme(theme) {
                tracing::warn!("Failed to persist theme: {}", e);
            }
            events.push(CatalogEvent::ThemeChanged);
        });
    }

    /// Switch between light and dark. Returns the new theme.
    pub fn toggle_theme(&self) -> Theme {
        let theme = self.theme().toggled();
        self.set_theme(theme);
        theme
    }

    // ========== DETAIL ==========

    /// Fetch one movie's detail view. Failures are returned to the caller
    /// and leave the shared state untouched.
    pub async fn load_detail(&self, movie_id: u64) -> Result<DetailView> {
        let movie = self.gateway.get_detail(movie_id).await?;
        let trailer_key = extract_trailer_key(movie.video_list()).map(str::to_string);
        let is_favorite = self.is_favorite(movie.id);
        Ok(DetailView {
            movie,
            trailer_key,
            is_favorite,
        })
    }

    // ========== READ SURFACE ==========

    /// The list to display: search results, else remote-filtered results,
    /// else rating-filtered trending, else trending.
    pub fn displayed_results(&self) -> Vec<MovieSummary> {
        self.read(|state| state.displayed_results())
    }

    pub fn result_source(&self) -> ResultSource {
        self.read(|state| state.result_source())
    }

    pub fn trending(&self) -> Vec<MovieSummary> {
        self.read(|state| state.trending.items.clone())
    }

    pub fn search_query(&self) -> String {
        self.read(|state| state.search.query.clone())
    }

    pub fn search_results(&self) -> Vec<MovieSummary> {
        self.read(|state| state.search.results.items.clone())
    }

    /// Last query that returned results, persisted across restarts.
    pub fn last_search_query(&self) -> String {
        self.read(|state| state.last_search_query.clone())
    }

    pub fn filter(&self) -> FilterCriteria {
        self.read(|state| state.filter.clone())
    }

    pub fn genres(&self) -> Vec<Genre> {
        self.read(|state| state.genres.clone())
    }

    pub fn genre_name(&self, genre_id: u64) -> Option<String> {
        self.read(|state| {
            state
                .genres
                .iter()
                .find(|g| g.id == genre_id)
                .map(|g| g.name.clone())
        })
    }

    /// Names of the first `limit` known genres of `movie`.
    pub fn genre_names(&self, movie: &MovieSummary, limit: usize) -> Vec<String> {
        self.read(|state| {
            movie
                .genre_ids
                .iter()
                .filter_map(|id| state.genres.iter().find(|g| g.id == *id))
                .take(limit)
                .map(|g| g.name.clone())
                .collect()
        })
    }

    /// Whether a trending, search or page fetch is pending.
    pub fn is_loading(&self) -> bool {
        self.read(|state| state.pending_loads > 0)
    }

    /// Whether a filter discovery fetch is pending.
    pub fn is_filter_loading(&self) -> bool {
        self.read(|state| state.pending_filter_loads > 0)
    }

    pub fn error(&self) -> Option<ErrorNotice> {
        self.read(|state| state.error.clone())
    }

    /// (current page, total pages) of the displayed context.
    pub fn pagination(&self) -> (u32, u32) {
        self.read(|state| {
            state
                .active_paged()
                .map(|p| (p.current_page, p.total_pages))
                .unwrap_or((1, 0))
        })
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.read(|state| {
            let (current_page, total_pages) = state
                .active_paged()
                .map(|p| (p.current_page, p.total_pages))
                .unwrap_or((1, 0));
            CatalogSnapshot {
                trending: state.trending.items.clone(),
                search_query: state.search.query.clone(),
                search_results: state.search.results.items.clone(),
                last_search_query: state.last_search_query.clone(),
                filter: state.filter.clone(),
                source: state.result_source(),
                displayed: state.displayed_results(),
                favorites: state.favorites.as_slice().to_vec(),
                genres: state.genres.clone(),
                theme: state.theme,
                loading: state.pending_loads > 0,
                filter_loading: state.pending_filter_loads > 0,
                error: state.error.clone(),
                current_page,
                total_pages,
            }
        })
    }
}

fn begin_load(state: &mut CatalogState, events: &mut Vec<CatalogEvent>) {
    state.pending_loads += 1;
    if state.pending_loads == 1 {
        events.push(CatalogEvent::LoadingChanged);
    }
}

fn end_load(state: &mut CatalogState, events: &mut Vec<CatalogEvent>) {
    state.pending_loads = state.pending_loads.saturating_sub(1);
    if state.pending_loads == 0 {
        events.push(CatalogEvent::LoadingChanged);
    }
}

fn begin_filter_load(state: &mut CatalogState, events: &mut Vec<CatalogEvent>) {
    state.pending_filter_loads += 1;
    if state.pending_filter_loads == 1 {
        events.push(CatalogEvent::LoadingChanged);
    }
}

fn end_filter_load(state: &mut CatalogState, events: &mut Vec<CatalogEvent>) {
    state.pending_filter_loads = state.pending_filter_loads.saturating_sub(1);
    if state.pending_filter_loads == 0 {
        events.push(CatalogEvent::LoadingChanged);
    }
}

/// Mark a discovery query as pending under a fresh filter generation.
fn start_remote_filter(
    state: &mut CatalogState,
    events: &mut Vec<CatalogEvent>,
    query: RemoteFilter,
) -> (u64, RemoteFilter) {
    state.filter_generation += 1;
    state.remote_filter = Some(RemoteFilterState {
        query,
        status: RemoteStatus::Pending,
    });
    begin_filter_load(state, events);
    (state.filter_generation, query)
}

/// Only result-list fetches clear the notice. Genre list and detail fetches
/// never do.
fn clear_error(state: &mut CatalogState, events: &mut Vec<CatalogEvent>) {
    if state.error.take().is_some() {
        events.push(CatalogEvent::ErrorChanged);
    }
}

fn set_error(
    state: &mut CatalogState,
    events: &mut Vec<CatalogEvent>,
    operation: FetchOperation,
    message: &str,
    error: &Error,
) {
    tracing::warn!("{} fetch failed: {}", operation, error);
    state.error = Some(ErrorNotice {
        operation,
        message: message.to_string(),
        cause: error.to_string(),
    });
    events.push(CatalogEvent::ErrorChanged);
}
