//! Testing utilities: a scriptable catalog gateway and fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use movie_browser::core::{CatalogCore, MemoryStore, Persistence};
//! use movie_browser::testing::{fixtures, MockCatalog};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(MockCatalog::new());
//! catalog.set_trending_pages(vec![fixtures::movies(1..=20)]).await;
//!
//! let core = CatalogCore::new(catalog.clone(), Persistence::new(Arc::new(MemoryStore::new())));
//! core.initialize().await;
//! ```

mod mock_catalog;

pub use mock_catalog::{MockCatalog, RecordedCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::models::{Credits, Genre, MovieDetail, MovieSummary, Video, VideoList};
    use std::ops::RangeInclusive;

    /// Create a test movie summary.
    pub fn movie(id: u64, title: &str, rating: f32) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            poster_path: Some(format!("/poster_{}.jpg", id)),
            release_date: Some(format!("{}-06-15", 1990 + (id % 30))),
            vote_average: rating,
            genre_ids: vec![28, 18],
        }
    }

    /// Movies with consecutive ids and ratings cycling through 1.0-10.0.
    pub fn movies(ids: RangeInclusive<u64>) -> Vec<MovieSummary> {
        ids.map(|id| movie(id, &format!("Movie {}", id), (id % 10 + 1) as f32))
            .collect()
    }

    /// Create a test movie detail with the given videos.
    pub fn detail(id: u64, title: &str, videos: Vec<Video>) -> MovieDetail {
        MovieDetail {
            id,
            title: title.to_string(),
            original_title: Some(title.to_string()),
            poster_path: Some(format!("/poster_{}.jpg", id)),
            backdrop_path: None,
            release_date: Some("2008-07-16".to_string()),
            vote_average: 8.5,
            vote_count: Some(30000),
            runtime: Some(152),
            overview: Some(format!("An overview of {}.", title)),
            tagline: None,
            genres: vec![
                Genre {
                    id: 28,
                    name: "Action".to_string(),
                },
                Genre {
                    id: 80,
                    name: "Crime".to_string(),
                },
            ],
            credits: Some(Credits::default()),
            videos: Some(VideoList { results: videos }),
        }
    }

    /// Create a test video.
    pub fn video(key: &str, name: &str, site: &str, video_type: &str) -> Video {
        Video {
            key: key.to_string(),
            name: name.to_string(),
            site: site.to_string(),
            video_type: video_type.to_string(),
        }
    }

    /// A small genre list.
    pub fn genres() -> Vec<Genre> {
        [(28, "Action"), (12, "Adventure"), (18, "Drama"), (80, "Crime")]
            .into_iter()
            .map(|(id, name)| Genre {
                id,
                name: name.to_string(),
            })
            .collect()
    }
}
