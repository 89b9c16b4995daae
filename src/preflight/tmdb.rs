//! TMDB API preflight check.

use super::CheckResult;
use crate::models::config::TmdbSettings;
use crate::services::tmdb::{TmdbClient, TmdbConfig};

/// Check if TMDB API is accessible with the configured key.
pub async fn check(settings: &TmdbSettings) -> CheckResult {
    let client = match TmdbConfig::from_settings(settings).and_then(TmdbClient::new) {
        Ok(client) => client,
        Err(_) => {
            return CheckResult::fail(
                "TMDB API",
                "API key not configured",
                "Set TMDB_API_KEY or [tmdb].api_key in config.toml",
            )
        }
    };

    match client.verify_api_key().await {
        Ok(true) => CheckResult::ok("TMDB API", "connected"),
        Ok(false) => CheckResult::fail(
            "TMDB API",
            "invalid API key or unreachable",
            "Check your TMDB_API_KEY and network connection",
        ),
        Err(_) => CheckResult::fail(
            "TMDB API",
            "connection failed",
            "Check your network connection",
        ),
    }
}
