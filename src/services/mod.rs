//! External service clients.
//!
//! The catalog is reached through the [`CatalogGateway`] trait so the state
//! core can run against the live TMDB client or a test double.

pub mod tmdb;

pub use tmdb::{extract_trailer_key, poster_url, TmdbClient, TmdbConfig};

use crate::models::{Genre, MovieDetail, MoviePage};
use crate::Result;
use async_trait::async_trait;

/// Stateless facade over the movie catalog.
///
/// Every method is one round trip. Failures come back as
/// [`Error::FetchFailed`](crate::Error::FetchFailed) tagged with the
/// operation. Page numbers are 1-based.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Trending movies of the day.
    async fn get_trending(&self, page: u32) -> Result<MoviePage>;

    /// Free-text title search.
    async fn search(&self, query: &str, page: u32) -> Result<MoviePage>;

    /// Full details of one movie, with videos and credits.
    async fn get_detail(&self, movie_id: u64) -> Result<MovieDetail>;

    /// Popular movies of a genre.
    async fn discover_by_genre(&self, genre_id: u64, page: u32) -> Result<MoviePage>;

    /// Popular movies released in a year.
    async fn discover_by_year(&self, year: u16, page: u32) -> Result<MoviePage>;

    /// All movie genres.
    async fn list_genres(&self) -> Result<Vec<Genre>>;
}
