//! Favorites commands.

use super::App;
use crate::cli::args::FavoritesAction;
use crate::cli::output::{print_movie_table, with_spinner};
use crate::core::CatalogCore;
use crate::models::config::Config;
use crate::models::MovieSummary;
use anyhow::Result;
use colored::Colorize;

/// Execute favorites command.
pub async fn execute_favorites(config: &Config, action: FavoritesAction) -> Result<()> {
    match action {
        FavoritesAction::List => {
            let app = App::local(config)?;
            app.core.restore();
            list(&app.core);
        }
        FavoritesAction::Clear => {
            let app = App::local(config)?;
            app.core.restore();
            let count = app.core.favorites().len();
            app.core.clear_favorites();
            println!("{} Removed {} favorite(s)", "[OK]".green(), count);
        }
        FavoritesAction::Remove { movie_id } => {
            let app = App::local(config)?;
            app.core.restore();
            if app.core.remove_favorite(movie_id) {
                println!("{} Removed {} from favorites", "[OK]".green(), movie_id);
            } else {
                println!("{} {} is not a favorite", "[INFO]".cyan(), movie_id);
            }
        }
        FavoritesAction::Add { movie_id } => {
            let app = App::connect(config)?;
            app.core.restore();
            let movie = fetch_summary(&app.core, movie_id).await?;
            if app.core.add_favorite(&movie) {
                println!("{} Added \"{}\" to favorites", "[OK]".green(), movie.title);
            } else {
                println!("{} \"{}\" is already a favorite", "[INFO]".cyan(), movie.title);
            }
        }
        FavoritesAction::Toggle { movie_id } => {
            let app = App::local(config)?;
            app.core.restore();
            let stored = app
                .core
                .favorites()
                .into_iter()
                .find(|m| m.id == movie_id);
            let movie = match stored {
                Some(movie) => movie,
                None => {
                    let online = App::connect(config)?;
                    fetch_summary(&online.core, movie_id).await?
                }
            };
            if app.core.toggle_favorite(&movie) {
                println!("{} Added \"{}\" to favorites", "[OK]".green(), movie.title);
            } else {
                println!("{} Removed \"{}\" from favorites", "[OK]".green(), movie.title);
            }
        }
    }
    Ok(())
}

fn list(core: &CatalogCore) {
    let favorites = core.favorites();
    println!("{}", format!("Favorites ({})", favorites.len()).bold().cyan());
    println!();
    if favorites.is_empty() {
        println!("No favorites yet. Add one with `movie-browser favorites add <MOVIE_ID>`.");
        return;
    }
    print_movie_table(core, &favorites);
}

async fn fetch_summary(core: &CatalogCore, movie_id: u64) -> Result<MovieSummary> {
    let view = with_spinner("Loading details...", core.load_detail(movie_id)).await?;
    Ok(view.movie.summary())
}
