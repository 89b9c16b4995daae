//! Search command implementation.

use super::browse::{load_pages, print_view};
use super::App;
use crate::cli::output::with_spinner;
use crate::models::config::Config;
use anyhow::Result;
use colored::Colorize;

/// Execute search command.
pub async fn execute_search(config: &Config, query: &str, pages: u32) -> Result<()> {
    let app = App::connect(config)?;
    app.core.restore();

    let previous = app.core.last_search_query();
    if !previous.is_empty() && previous != query.trim() {
        tracing::debug!("Previous search: {}", previous);
    }

    with_spinner("Searching...", app.core.search_for(query)).await;
    load_pages(&app.core, pages).await;

    if app.core.search_query().is_empty() {
        println!("{}", "Empty query, nothing to search.".yellow());
        return Ok(());
    }

    print_view(&app.core);
    Ok(())
}
