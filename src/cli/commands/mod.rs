//! CLI command implementations.

pub mod account;
pub mod browse;
pub mod detail;
pub mod favorites;
pub mod search;

use crate::core::{CatalogCore, JsonFileStore, Persistence};
use crate::models::config::Config;
use crate::services::tmdb::{TmdbClient, TmdbConfig};
use crate::Result;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

/// Wiring shared by the commands: the state core over the file store.
pub struct App {
    pub core: CatalogCore,
    pub persistence: Persistence,
}

impl App {
    /// Open the app for commands that talk to the catalog.
    pub fn connect(config: &Config) -> Result<Self> {
        let tmdb = TmdbConfig::from_settings(&config.tmdb)?;
        Self::with_tmdb(config, tmdb)
    }

    /// Open the app for commands that only touch persisted state.
    ///
    /// A missing API key is tolerated; catalog calls would fail and land in
    /// the core's error notice.
    pub fn local(config: &Config) -> Result<Self> {
        let tmdb = TmdbConfig::from_settings(&config.tmdb)
            .unwrap_or_else(|_| TmdbConfig::new(String::new()));
        Self::with_tmdb(config, tmdb)
    }

    fn with_tmdb(config: &Config, tmdb: TmdbConfig) -> Result<Self> {
        let gateway = Arc::new(TmdbClient::new(tmdb)?);
        let persistence = Persistence::new(Arc::new(JsonFileStore::new(&config.data_dir)));
        let core = CatalogCore::new(gateway, persistence.clone());
        log_events(&core);
        Ok(Self { core, persistence })
    }
}

/// Trace core change notifications at debug level.
fn log_events(core: &CatalogCore) {
    let mut events = core.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => tracing::debug!("State changed: {:?}", event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!("Skipped {} state notifications", skipped)
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}
