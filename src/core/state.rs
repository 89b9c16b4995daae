//! State owned by the catalog core.

use crate::core::filter;
use crate::error::FetchOperation;
use crate::models::{FilterCriteria, Genre, MoviePage, MovieSummary, RemoteFilter, Theme};
use serde::Serialize;
use std::collections::HashSet;

/// Accumulated pages of one result context.
#[derive(Debug, Clone, PartialEq)]
pub struct Paged {
    /// Items in arrival order: page 1 first, later pages appended.
    pub items: Vec<MovieSummary>,
    pub current_page: u32,
    pub total_pages: u32,
}

impl Default for Paged {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 0,
        }
    }
}

impl Paged {
    /// Start a context from its first page.
    pub fn first(page: MoviePage) -> Self {
        Self {
            items: page.items,
            current_page: 1,
            total_pages: page.total_pages,
        }
    }

    /// Append page `number`. Previously accumulated items are never touched.
    pub fn append(&mut self, page: MoviePage, number: u32) {
        self.items.extend(page.items);
        self.current_page = number;
        self.total_pages = page.total_pages.max(number);
    }

    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Free-text search session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSession {
    /// Active query; empty when no search is active.
    pub query: String,
    pub results: Paged,
}

impl SearchSession {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            results: Paged::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }
}

/// Progress of the discovery query behind a genre/year filter.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteStatus {
    Pending,
    Loaded(Paged),
    Failed,
}

/// Discovery query for the active filter and where it stands.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteFilterState {
    pub query: RemoteFilter,
    pub status: RemoteStatus,
}

/// Favorite movies keyed by id, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    items: Vec<MovieSummary>,
    ids: HashSet<u64>,
}

impl Favorites {
    /// Build from a stored list, keeping the first of any duplicate ids.
    pub fn from_vec(movies: Vec<MovieSummary>) -> Self {
        let mut favorites = Self::default();
        for movie in movies {
            favorites.insert(movie);
        }
        favorites
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    /// Add if absent. Returns whether the set changed.
    pub fn insert(&mut self, movie: MovieSummary) -> bool {
        if !self.ids.insert(movie.id) {
            return false;
        }
        self.items.push(movie);
        true
    }

    /// Remove if present. Returns whether the set changed.
    pub fn remove(&mut self, id: u64) -> bool {
        if !self.ids.remove(&id) {
            return false;
        }
        self.items.retain(|m| m.id != id);
        true
    }

    /// Add if absent, remove if present. Returns whether `movie` is now a favorite.
    pub fn toggle(&mut self, movie: &MovieSummary) -> bool {
        if self.remove(movie.id) {
            false
        } else {
            self.insert(movie.clone())
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.ids.clear();
    }

    pub fn as_slice(&self) -> &[MovieSummary] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Failure surfaced to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorNotice {
    pub operation: FetchOperation,
    /// User-facing message.
    pub message: String,
    /// Underlying error text.
    pub cause: String,
}

/// Which result set the display currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    Search,
    RemoteFilter,
    RatingFilter,
    Trending,
}

/// Page fetch tagged with the context that issued it.
#[derive(Debug, Clone, PartialEq)]
pub enum PageContext {
    Search {
        generation: u64,
        query: String,
        page: u32,
    },
    Filter {
        generation: u64,
        query: RemoteFilter,
        page: u32,
    },
    Trending {
        generation: u64,
        page: u32,
    },
}

impl PageContext {
    pub(crate) fn page(&self) -> u32 {
        match self {
            PageContext::Search { page, .. }
            | PageContext::Filter { page, .. }
            | PageContext::Trending { page, .. } => *page,
        }
    }

    pub(crate) fn is_filter(&self) -> bool {
        matches!(self, PageContext::Filter { .. })
    }

    pub(crate) fn operation(&self) -> FetchOperation {
        match self {
            PageContext::Search { .. } => FetchOperation::Search,
            PageContext::Filter { .. } => FetchOperation::Discover,
            PageContext::Trending { .. } => FetchOperation::Trending,
        }
    }
}

/// Load-more fetches in flight, at most one per context.
#[derive(Debug, Default)]
pub(crate) struct PageFetches {
    trending: Option<PageContext>,
    search: Option<PageContext>,
    filter: Option<PageContext>,
}

impl PageFetches {
    fn slot(&mut self, context: &PageContext) -> &mut Option<PageContext> {
        match context {
            PageContext::Trending { .. } => &mut self.trending,
            PageContext::Search { .. } => &mut self.search,
            PageContext::Filter { .. } => &mut self.filter,
        }
    }

    /// The fetch in flight for the same context kind as `context`.
    pub fn in_flight(&mut self, context: &PageContext) -> Option<PageContext> {
        self.slot(context).clone()
    }

    pub fn start(&mut self, context: PageContext) {
        let slot = self.slot(&context);
        *slot = Some(context);
    }

    /// Release the slot if it still holds `context`.
    pub fn finish(&mut self, context: &PageContext) {
        let slot = self.slot(context);
        if slot.as_ref() == Some(context) {
            *slot = None;
        }
    }
}

/// Everything the core owns during the process lifetime.
///
/// Each result context carries a generation counter. A fetch captures the
/// generation when issued and its result is committed only if the counter
/// is unchanged on completion.
#[derive(Debug, Default)]
pub(crate) struct CatalogState {
    pub trending: Paged,
    pub trending_generation: u64,

    pub search: SearchSession,
    pub search_generation: u64,
    pub last_search_query: String,

    pub filter: FilterCriteria,
    pub remote_filter: Option<RemoteFilterState>,
    pub filter_generation: u64,

    pub page_fetches: PageFetches,

    pub favorites: Favorites,
    pub genres: Vec<Genre>,
    pub theme: Theme,

    pub pending_loads: u32,
    pub pending_filter_loads: u32,
    pub error: Option<ErrorNotice>,

    pub initialized: bool,
}

impl CatalogState {
    /// Source of the displayed list: search, then remote filter, then
    /// rating-filtered trending, then raw trending.
    pub fn result_source(&self) -> ResultSource {
        if self.search.is_active() {
            ResultSource::Search
        } else if self.filter.remote_query().is_some() {
            ResultSource::RemoteFilter
        } else if self.filter.minimum_rating.is_some() {
            ResultSource::RatingFilter
        } else {
            ResultSource::Trending
        }
    }

    /// Loaded pages of the remote filter matching the current criteria.
    fn loaded_remote(&self) -> Option<&Paged> {
        let wanted = self.filter.remote_query()?;
        match &self.remote_filter {
            Some(RemoteFilterState {
                query,
                status: RemoteStatus::Loaded(paged),
            }) if *query == wanted => Some(paged),
            _ => None,
        }
    }

    pub fn displayed_results(&self) -> Vec<MovieSummary> {
        match self.result_source() {
            ResultSource::Search => self.search.results.items.clone(),
            ResultSource::RemoteFilter => self
                .loaded_remote()
                .map(|paged| filter::evaluate(&paged.items, &self.filter))
                .unwrap_or_default(),
            ResultSource::RatingFilter => filter::evaluate(&self.trending.items, &self.filter),
            ResultSource::Trending => self.trending.items.clone(),
        }
    }

    /// Pagination of the displayed context.
    pub fn active_paged(&self) -> Option<&Paged> {
        match self.result_source() {
            ResultSource::Search => Some(&self.search.results),
            ResultSource::RemoteFilter => self.loaded_remote(),
            ResultSource::RatingFilter | ResultSource::Trending => Some(&self.trending),
        }
    }

    /// Context for the next page of the displayed list, if there is one.
    pub fn next_page_context(&self) -> Option<PageContext> {
        let paged = self.active_paged()?;
        if !paged.has_more() {
            return None;
        }
        let page = paged.current_page + 1;

        let context = match self.result_source() {
            ResultSource::Search => PageContext::Search {
                generation: self.search_generation,
                query: self.search.query.clone(),
                page,
            },
            ResultSource::RemoteFilter => PageContext::Filter {
                generation: self.filter_generation,
                query: self.filter.remote_query()?,
                page,
            },
            ResultSource::RatingFilter | ResultSource::Trending => PageContext::Trending {
                generation: self.trending_generation,
                page,
            },
        };
        Some(context)
    }

    /// Whether a page fetch still targets the next page of a live context.
    pub fn is_current(&self, context: &PageContext) -> bool {
        let live = match context {
            PageContext::Search {
                generation, query, ..
            } => *generation == self.search_generation && *query == self.search.query,
            PageContext::Filter {
                generation, query, ..
            } => {
                *generation == self.filter_generation
                    && self.remote_filter.as_ref().map(|r| r.query) == Some(*query)
            }
            PageContext::Trending { generation, .. } => *generation == self.trending_generation,
        };
        if !live {
            return false;
        }

        self.paged_for(context)
            .map(|paged| paged.current_page + 1 == context.page())
            .unwrap_or(false)
    }

    fn paged_for(&self, context: &PageContext) -> Option<&Paged> {
        match context {
            PageContext::Search { .. } => Some(&self.search.results),
            PageContext::Filter { .. } => match &self.remote_filter {
                Some(RemoteFilterState {
                    status: RemoteStatus::Loaded(paged),
                    ..
                }) => Some(paged),
                _ => None,
            },
            PageContext::Trending { .. } => Some(&self.trending),
        }
    }

    pub fn paged_for_mut(&mut self, context: &PageContext) -> Option<&mut Paged> {
        match context {
            PageContext::Search { .. } => Some(&mut self.search.results),
            PageContext::Filter { .. } => match &mut self.remote_filter {
                Some(RemoteFilterState {
                    status: RemoteStatus::Loaded(paged),
                    ..
                }) => Some(paged),
                _ => None,
            },
            PageContext::Trending { .. } => Some(&mut self.trending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, rating: f32) -> MovieSummary {
        MovieSummary {
            id,
            title: format!("Movie {}", id),
            poster_path: None,
            release_date: None,
            vote_average: rating,
            genre_ids: Vec::new(),
        }
    }

    fn page(ids: &[u64], total_pages: u32) -> MoviePage {
        MoviePage {
            page: 1,
            items: ids.iter().map(|&id| movie(id, 5.0)).collect(),
            total_pages,
        }
    }

    #[test]
    fn test_favorites_toggle_parity() {
        let mut favorites = Favorites::default();
        let m = movie(7, 8.0);
        assert!(favorites.toggle(&m));
        assert!(!favorites.toggle(&m));
        assert!(favorites.toggle(&m));
        assert!(favorites.contains(7));
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_favorites_keep_insertion_order() {
        let mut favorites = Favorites::from_vec(vec![movie(3, 1.0), movie(1, 1.0), movie(3, 2.0)]);
        favorites.insert(movie(2, 1.0));
        favorites.remove(1);
        let ids: Vec<u64> = favorites.as_slice().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(favorites.as_slice()[0].vote_average, 1.0);
    }

    #[test]
    fn test_paged_append_keeps_prefix() {
        let mut paged = Paged::first(page(&[1, 2], 3));
        paged.append(page(&[3], 3), 2);
        let ids: Vec<u64> = paged.items.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(paged.current_page, 2);
        assert!(paged.has_more());
    }

    #[test]
    fn test_result_source_precedence() {
        let mut state = CatalogState::default();
        assert_eq!(state.result_source(), ResultSource::Trending);

        state.filter = FilterCriteria::minimum_rating(7.0);
        assert_eq!(state.result_source(), ResultSource::RatingFilter);

        state.filter = FilterCriteria::genre(28).with_minimum_rating(7.0);
        assert_eq!(state.result_source(), ResultSource::RemoteFilter);

        state.search = SearchSession::new("alien");
        assert_eq!(state.result_source(), ResultSource::Search);
    }

    #[test]
    fn test_pending_remote_filter_displays_nothing() {
        let mut state = CatalogState::default();
        state.trending = Paged::first(page(&[1, 2], 1));
        state.filter = FilterCriteria::year(1999);
        state.remote_filter = Some(RemoteFilterState {
            query: RemoteFilter::Year(1999),
            status: RemoteStatus::Pending,
        });
        assert!(state.displayed_results().is_empty());
        assert!(state.next_page_context().is_none());
    }

    #[test]
    fn test_next_page_context_and_staleness() {
        let mut state = CatalogState::default();
        state.trending = Paged::first(page(&[1], 2));
        let context = state.next_page_context().unwrap();
        assert_eq!(context.page(), 2);
        assert!(state.is_current(&context));

        state.trending_generation += 1;
        assert!(!state.is_current(&context));
    }
}
