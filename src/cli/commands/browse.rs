//! Trending, filter and genre commands.

use super::App;
use crate::cli::output::{print_error_notice, print_movie_table, with_spinner};
use crate::core::{CatalogCore, ResultSource};
use crate::models::config::Config;
use crate::models::FilterCriteria;
use anyhow::{bail, Result};
use colored::Colorize;

/// Show the trending feed.
pub async fn trending(config: &Config, pages: u32) -> Result<()> {
    let app = App::connect(config)?;
    with_spinner("Loading movies...", app.core.initialize()).await;
    load_pages(&app.core, pages).await;
    print_view(&app.core);
    Ok(())
}

/// Apply a filter over the trending feed and show the result.
pub async fn filter(
    config: &Config,
    genre: Option<String>,
    year: Option<u16>,
    min_rating: Option<f32>,
    pages: u32,
) -> Result<()> {
    if let Some(rating) = min_rating {
        if !(0.0..=10.0).contains(&rating) {
            bail!("Minimum rating must be between 0 and 10, got {}", rating);
        }
    }

    let app = App::connect(config)?;
    with_spinner("Loading movies...", app.core.initialize()).await;

    let genre_id = match genre {
        Some(ref g) => Some(resolve_genre(&app.core, g)?),
        None => None,
    };

    let criteria = FilterCriteria {
        genre_id,
        year,
        minimum_rating: min_rating,
    };
    with_spinner("Applying filters...", app.core.apply_filter(criteria)).await;
    load_pages(&app.core, pages).await;
    print_view(&app.core);
    Ok(())
}

/// List all genres.
pub async fn genres(config: &Config) -> Result<()> {
    let app = App::connect(config)?;
    with_spinner("Loading genres...", app.core.initialize()).await;

    let genres = app.core.genres();
    if genres.is_empty() {
        println!("{}", "Genre list unavailable.".yellow());
        return Ok(());
    }

    println!("{}", format!("Genres ({}):", genres.len()).bold());
    for genre in genres {
        println!("  {:>6}  {}", genre.id, genre.name);
    }
    Ok(())
}

/// Resolve a genre given as an id or a (case-insensitive) name.
fn resolve_genre(core: &CatalogCore, genre: &str) -> Result<u64> {
    if let Ok(id) = genre.parse::<u64>() {
        return Ok(id);
    }
    core.genres()
        .iter()
        .find(|g| g.name.eq_ignore_ascii_case(genre))
        .map(|g| g.id)
        .ok_or_else(|| anyhow::anyhow!("Unknown genre: {}. Run `movie-browser genres` to list them.", genre))
}

/// Load up to `pages` pages of the displayed context.
pub(crate) async fn load_pages(core: &CatalogCore, pages: u32) {
    for _ in 1..pages {
        let (current, total) = core.pagination();
        if current >= total {
            break;
        }
        with_spinner("Loading more...", core.load_more()).await;
        if core.error().is_some() {
            break;
        }
    }
}

/// Heading for the displayed list.
pub(crate) fn view_title(core: &CatalogCore) -> String {
    match core.result_source() {
        ResultSource::Search => format!("Search Results for \"{}\"", core.search_query()),
        ResultSource::RemoteFilter => {
            let filter = core.filter();
            match (filter.genre_id, filter.year) {
                (Some(id), _) => core
                    .genre_name(id)
                    .map(|name| format!("{} Movies", name))
                    .unwrap_or_else(|| "Filtered Movies".to_string()),
                (None, Some(year)) => format!("Movies from {}", year),
                (None, None) => "Filtered Movies".to_string(),
            }
        }
        ResultSource::RatingFilter => "Filtered Movies".to_string(),
        ResultSource::Trending => "Trending Movies".to_string(),
    }
}

/// Print the displayed list with its heading, error and pagination.
pub(crate) fn print_view(core: &CatalogCore) {
    println!("{}", view_title(core).bold().cyan());
    println!();

    if let Some(notice) = core.error() {
        print_error_notice(&notice);
        println!();
    }

    print_movie_table(core, &core.displayed_results());

    let (current, total) = core.pagination();
    if total > 0 {
        println!();
        println!("Page {} of {}", current, total);
    }
}
