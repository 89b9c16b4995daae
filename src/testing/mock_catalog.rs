//! Mock catalog gateway for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{Notify, RwLock};

use crate::error::FetchOperation;
use crate::models::{Genre, MovieDetail, MoviePage, MovieSummary};
use crate::services::CatalogGateway;
use crate::{Error, Result};

/// A recorded gateway call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordedCall {
    Trending { page: u32 },
    Search { query: String, page: u32 },
    Detail { movie_id: u64 },
    DiscoverGenre { genre_id: u64, page: u32 },
    DiscoverYear { year: u16, page: u32 },
    Genres,
}

impl RecordedCall {
    fn operation(&self) -> FetchOperation {
        match self {
            RecordedCall::Trending { .. } => FetchOperation::Trending,
            RecordedCall::Search { .. } => FetchOperation::Search,
            RecordedCall::Detail { .. } => FetchOperation::Detail,
            RecordedCall::DiscoverGenre { .. } | RecordedCall::DiscoverYear { .. } => {
                FetchOperation::Discover
            }
            RecordedCall::Genres => FetchOperation::Genres,
        }
    }
}

type Pages = Vec<Vec<MovieSummary>>;

/// Mock implementation of the CatalogGateway trait.
///
/// Provides controllable behavior for testing:
/// - Serve configurable pages per trending feed, query, genre and year
/// - Track calls for assertions
/// - Simulate failures per operation
/// - Hold individual calls until released, to complete them out of order
///
/// # Example
///
/// ```rust,ignore
/// use movie_browser::testing::{fixtures, MockCatalog, RecordedCall};
///
/// let catalog = MockCatalog::new();
/// catalog.set_search_pages("batman", vec![fixtures::movies(1..=20)]).await;
///
/// let gate = catalog.hold(RecordedCall::Search { query: "batman".into(), page: 1 }).await;
/// // ... issue the search, then release it
/// gate.notify_one();
/// ```
#[derive(Debug, Default)]
pub struct MockCatalog {
    trending: Arc<RwLock<Pages>>,
    searches: Arc<RwLock<HashMap<String, Pages>>>,
    by_genre: Arc<RwLock<HashMap<u64, Pages>>>,
    by_year: Arc<RwLock<HashMap<u16, Pages>>>,
    details: Arc<RwLock<HashMap<u64, MovieDetail>>>,
    genres: Arc<RwLock<Vec<Genre>>>,
    calls: Arc<RwLock<Vec<RecordedCall>>>,
    failing: Arc<RwLock<HashSet<FetchOperation>>>,
    gates: Arc<RwLock<HashMap<RecordedCall, Arc<Notify>>>>,
}

impl MockCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Content Configuration
    // =========================================================================

    /// Set the trending feed, one vector per page.
    pub async fn set_trending_pages(&self, pages: Pages) {
        *self.trending.write().await = pages;
    }

    /// Set the pages returned for a search query.
    pub async fn set_search_pages(&self, query: &str, pages: Pages) {
        self.searches.write().await.insert(query.to_string(), pages);
    }

    /// Set the pages returned when discovering a genre.
    pub async fn set_genre_pages(&self, genre_id: u64, pages: Pages) {
        self.by_genre.write().await.insert(genre_id, pages);
    }

    /// Set the pages returned when discovering a release year.
    pub async fn set_year_pages(&self, year: u16, pages: Pages) {
        self.by_year.write().await.insert(year, pages);
    }

    /// Add a movie detail.
    pub async fn add_detail(&self, detail: MovieDetail) {
        self.details.write().await.insert(detail.id, detail);
    }

    /// Set the genre list.
    pub async fn set_genres(&self, genres: Vec<Genre>) {
        *self.genres.write().await = genres;
    }

    // =========================================================================
    // Call Recording
    // =========================================================================

    /// Get all recorded calls, in issue order.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Number of recorded calls matching a predicate.
    pub async fn count_calls(&self, predicate: impl Fn(&RecordedCall) -> bool) -> usize {
        self.calls.read().await.iter().filter(|c| predicate(c)).count()
    }

    /// Clear recorded calls.
    pub async fn clear_recorded(&self) {
        self.calls.write().await.clear();
    }

    // =========================================================================
    // Error Injection and Ordering
    // =========================================================================

    /// Make every call of `operation` fail until [`recover`](Self::recover).
    pub async fn fail(&self, operation: FetchOperation) {
        self.failing.write().await.insert(operation);
    }

    /// Stop failing `operation`.
    pub async fn recover(&self, operation: FetchOperation) {
        self.failing.write().await.remove(&operation);
    }

    /// Hold `call` until the returned gate is notified.
    ///
    /// The call is recorded when issued and completes after `notify_one`.
    /// Notifying before the call arrives lets it pass straight through.
    pub async fn hold(&self, call: RecordedCall) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.write().await.insert(call, gate.clone());
        gate
    }

    /// Record the call, wait on its gate if held, then apply failure injection.
    async fn enter(&self, call: RecordedCall) -> Result<()> {
        self.calls.write().await.push(call.clone());

        let gate = self.gates.read().await.get(&call).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let operation = call.operation();
        if self.failing.read().await.contains(&operation) {
            return Err(Error::fetch_message(operation, "HTTP 500 Internal Server Error"));
        }
        Ok(())
    }
}

fn page_of(pages: &Pages, page: u32) -> MoviePage {
    let items = page
        .checked_sub(1)
        .and_then(|index| pages.get(index as usize))
        .cloned()
        .unwrap_or_default();
    MoviePage {
        page,
        items,
        total_pages: pages.len() as u32,
    }
}

#[async_trait]
impl CatalogGateway for MockCatalog {
    async fn get_trending(&self, page: u32) -> Result<MoviePage> {
        self.enter(RecordedCall::Trending { page }).await?;
        Ok(page_of(&*self.trending.read().await, page))
    }

    async fn search(&self, query: &str, page: u32) -> Result<MoviePage> {
        self.enter(RecordedCall::Search {
            query: query.to_string(),
            page,
        })
        .await?;

        let searches = self.searches.read().await;
        Ok(searches
            .get(query)
            .map(|pages| page_of(pages, page))
            .unwrap_or_else(|| page_of(&Vec::new(), page)))
    }

    async fn get_detail(&self, movie_id: u64) -> Result<MovieDetail> {
        self.enter(RecordedCall::Detail { movie_id }).await?;

        self.details
            .read()
            .await
            .get(&movie_id)
            .cloned()
            .ok_or_else(|| Error::fetch_message(FetchOperation::Detail, "HTTP 404 Not Found"))
    }

    async fn discover_by_genre(&self, genre_id: u64, page: u32) -> Result<MoviePage> {
        self.enter(RecordedCall::DiscoverGenre { genre_id, page })
            .await?;

        let by_genre = self.by_genre.read().await;
        Ok(by_genre
            .get(&genre_id)
            .map(|pages| page_of(pages, page))
            .unwrap_or_else(|| page_of(&Vec::new(), page)))
    }

    async fn discover_by_year(&self, year: u16, page: u32) -> Result<MoviePage> {
        self.enter(RecordedCall::DiscoverYear { year, page }).await?;

        let by_year = self.by_year.read().await;
        Ok(by_year
            .get(&year)
            .map(|pages| page_of(pages, page))
            .unwrap_or_else(|| page_of(&Vec::new(), page)))
    }

    async fn list_genres(&self) -> Result<Vec<Genre>> {
        self.enter(RecordedCall::Genres).await?;
        Ok(self.genres.read().await.clone())
    }
}
