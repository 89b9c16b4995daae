//! TMDB API client.

use super::CatalogGateway;
use crate::error::FetchOperation;
use crate::models::config::{TmdbSettings, DEFAULT_TMDB_BASE_URL};
use crate::models::{Genre, GenreList, MovieDetail, MoviePage, Video};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/500x750?text=No+Image+Available";

/// TMDB client configuration.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// API key or Bearer token (JWT)
    pub api_key: String,
    pub language: String,
    pub base_url: String,
    /// Whether to use Bearer token authentication (API v4 style)
    pub use_bearer: bool,
    pub timeout: Option<Duration>,
}

impl TmdbConfig {
    /// Create config from a key with default settings.
    /// Supports both API key (v3) and Bearer token (v4) formats.
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        // Bearer tokens start with "eyJ" (base64 encoded JWT header)
        let use_bearer = api_key.starts_with("eyJ");

        Self {
            api_key,
            language: "en-US".to_string(),
            base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            use_bearer,
            timeout: None,
        }
    }

    /// Create config from the application settings.
    pub fn from_settings(settings: &TmdbSettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(Error::TmdbApiKeyMissing)?;

        Ok(Self {
            language: settings.language.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            timeout: settings.timeout_secs.map(Duration::from_secs),
            ..Self::new(api_key)
        })
    }

    /// Create config from environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("TMDB_API_KEY").map_err(|_| Error::TmdbApiKeyMissing)?;
        Ok(Self::new(api_key))
    }
}

/// TMDB API client.
pub struct TmdbClient {
    config: TmdbConfig,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { config, client })
    }

    /// Create a new TMDB client from environment.
    pub fn from_env() -> Result<Self> {
        Self::new(TmdbConfig::from_env()?)
    }

    /// Build a request with proper authentication.
    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        if self.config.use_bearer {
            request.header("Authorization", format!("Bearer {}", self.config.api_key))
        } else {
            request
        }
    }

    /// Build URL with optional api_key parameter (only for v3 style).
    fn build_url(&self, path: &str, params: &[(&str, String)]) -> String {
        let mut url = format!(
            "{}/{}?language={}",
            self.config.base_url,
            path,
            urlencoding::encode(&self.config.language)
        );
        if !self.config.use_bearer {
            url.push_str(&format!("&api_key={}", self.config.api_key));
        }
        for (name, value) in params {
            url.push_str(&format!("&{}={}", name, urlencoding::encode(value)));
        }
        url
    }

    /// Issue a GET and decode the JSON body, mapping every failure to
    /// `FetchFailed` for `operation`.
    async fn fetch<T: DeserializeOwned>(&self, operation: FetchOperation, url: &str) -> Result<T> {
        tracing::debug!("GET {} ({})", redact(url), operation);

        let resp = self
            .build_request(url)
            .send()
            .await
            .map_err(|e| Error::fetch(operation, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::fetch_message(
                operation,
                format!("HTTP {}", status),
            ));
        }

        resp.json().await.map_err(|e| Error::fetch(operation, e))
    }

    /// Verify API key is valid.
    pub async fn verify_api_key(&self) -> Result<bool> {
        let url = self.build_url("authentication", &[]);

        match self.build_request(&url).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn discover_url(&self, filter: (&str, String), page: u32) -> String {
        self.build_url(
            "discover/movie",
            &[
                filter,
                ("page", page.to_string()),
                ("sort_by", "popularity.desc".to_string()),
            ],
        )
    }
}

#[async_trait]
impl CatalogGateway for TmdbClient {
    async fn get_trending(&self, page: u32) -> Result<MoviePage> {
        let url = self.build_url("trending/movie/day", &[("page", page.to_string())]);
        self.fetch(FetchOperation::Trending, &url).await
    }

    async fn search(&self, query: &str, page: u32) -> Result<MoviePage> {
        let url = self.build_url(
            "search/movie",
            &[
                ("query", query.to_string()),
                ("page", page.to_string()),
                ("include_adult", "false".to_string()),
            ],
        );
        self.fetch(FetchOperation::Search, &url).await
    }

    async fn get_detail(&self, movie_id: u64) -> Result<MovieDetail> {
        let url = self.build_url(
            &format!("movie/{}", movie_id),
            &[("append_to_response", "videos,credits".to_string())],
        );
        self.fetch(FetchOperation::Detail, &url).await
    }

    async fn discover_by_genre(&self, genre_id: u64, page: u32) -> Result<MoviePage> {
        let url = self.discover_url(("with_genres", genre_id.to_string()), page);
        self.fetch(FetchOperation::Discover, &url).await
    }

    async fn discover_by_year(&self, year: u16, page: u32) -> Result<MoviePage> {
        let url = self.discover_url(("primary_release_year", year.to_string()), page);
        self.fetch(FetchOperation::Discover, &url).await
    }

    async fn list_genres(&self) -> Result<Vec<Genre>> {
        let url = self.build_url("genre/movie/list", &[]);
        let resp: GenreList = self.fetch(FetchOperation::Genres, &url).await?;
        Ok(resp.genres)
    }
}

/// Pick the YouTube key to play as a movie's trailer.
///
/// Precedence: an official YouTube trailer, then any YouTube trailer, then
/// any YouTube video. `None` when there is no YouTube entry at all.
pub fn extract_trailer_key(videos: &[Video]) -> Option<&str> {
    let youtube = || videos.iter().filter(|v| v.site == "YouTube");
    let is_trailer = |v: &&Video| v.video_type == "Trailer";

    youtube()
        .filter(is_trailer)
        .find(|v| v.name.contains("Official"))
        .or_else(|| youtube().find(is_trailer))
        .or_else(|| youtube().next())
        .map(|v| v.key.as_str())
}

/// Get poster image URL, or a placeholder when the movie has no poster.
pub fn poster_url(poster_path: Option<&str>, size: &str) -> String {
    match poster_path {
        Some(path) if !path.is_empty() => format!("{}/{}{}", IMAGE_BASE_URL, size, path),
        _ => PLACEHOLDER_POSTER_URL.to_string(),
    }
}

/// Strip the api_key parameter before a URL reaches the logs.
fn redact(url: &str) -> String {
    match url.find("api_key=") {
        Some(start) => {
            let end = url[start..].find('&').map(|i| start + i).unwrap_or(url.len());
            format!("{}api_key=***{}", &url[..start], &url[end..])
        }
        None => url.to_string(),
    }
}
