//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default catalog API root.
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB configuration.
    pub tmdb: TmdbSettings,
    /// Directory holding the persisted state slots.
    pub data_dir: PathBuf,
}

/// TMDB configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbSettings {
    /// API key (v3) or bearer token (v4).
    pub api_key: Option<String>,
    /// Language for responses.
    pub language: String,
    /// API root URL.
    pub base_url: String,
    /// Request timeout in seconds. No timeout when unset.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb: TmdbSettings::default(),
            data_dir: dirs_config_path().join("state"),
        }
    }
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            language: "en-US".to_string(),
            base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

/// Get the configuration directory path.
pub fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("movie_browser")
}

/// Load configuration from file.
///
/// Missing or unparsable files yield the defaults. `TMDB_API_KEY` fills in
/// the key when the file does not set one.
pub fn load_config() -> Config {
    let config_path = dirs_config_path().join("config.toml");

    let mut config = std::fs::read_to_string(&config_path)
        .ok()
        .and_then(|content| parse_config(&content))
        .unwrap_or_default();

    if config.tmdb.api_key.is_none() {
        config.tmdb.api_key = std::env::var("TMDB_API_KEY").ok();
    }

    config
}

/// Parse a TOML config document.
pub fn parse_config(content: &str) -> Option<Config> {
    match toml::from_str(content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Ignoring invalid config file: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config = parse_config(
            r#"
            [tmdb]
            language = "de-DE"
            timeout_secs = 15
            "#,
        )
        .unwrap();
        assert_eq!(config.tmdb.language, "de-DE");
        assert_eq!(config.tmdb.timeout_secs, Some(15));
        assert_eq!(config.tmdb.base_url, DEFAULT_TMDB_BASE_URL);
        assert!(config.data_dir.ends_with("state"));
    }

    #[test]
    fn test_parse_invalid_config() {
        assert!(parse_config("tmdb = [").is_none());
    }
}
