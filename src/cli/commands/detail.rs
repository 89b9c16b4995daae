//! Movie detail command.

use super::App;
use crate::cli::output::with_spinner;
use crate::core::DetailView;
use crate::models::config::Config;
use crate::services::poster_url;
use anyhow::Result;
use colored::Colorize;

const POSTER_SIZE: &str = "w500";
const CAST_LIMIT: usize = 5;

/// Execute detail command.
pub async fn execute_detail(config: &Config, movie_id: u64) -> Result<()> {
    let app = App::connect(config)?;
    app.core.restore();

    let view = with_spinner("Loading details...", app.core.load_detail(movie_id)).await?;
    print_detail(&view);
    Ok(())
}

fn print_detail(view: &DetailView) {
    let movie = &view.movie;

    let year = movie
        .release_year()
        .map(|y| format!(" ({})", y))
        .unwrap_or_default();
    let heart = if view.is_favorite {
        format!(" {}", "♥".red())
    } else {
        String::new()
    };
    println!("{}{}{}", movie.title.bold().cyan(), year, heart);

    if let Some(ref tagline) = movie.tagline {
        if !tagline.is_empty() {
            println!("{}", tagline.italic());
        }
    }
    println!();

    println!("  Rating:    {:.1}/10", movie.vote_average);
    if let Some(runtime) = movie.runtime.filter(|r| *r > 0) {
        println!("  Runtime:   {}h {}m", runtime / 60, runtime % 60);
    }
    if !movie.genres.is_empty() {
        let names: Vec<&str> = movie.genres.iter().map(|g| g.name.as_str()).collect();
        println!("  Genres:    {}", names.join(", "));
    }

    let directors = movie.directors();
    if !directors.is_empty() {
        println!("  Director:  {}", directors.join(", "));
    }

    let cast = movie.top_cast(CAST_LIMIT);
    if !cast.is_empty() {
        println!("  Cast:");
        for member in cast {
            match member.character.as_deref().filter(|c| !c.is_empty()) {
                Some(character) => println!("    - {} as {}", member.name, character),
                None => println!("    - {}", member.name),
            }
        }
    }

    println!(
        "  Poster:    {}",
        poster_url(movie.poster_path.as_deref(), POSTER_SIZE)
    );
    match view.trailer_url() {
        Some(url) => println!("  Trailer:   {}", url),
        None => println!("  Trailer:   {}", "No trailer available".dimmed()),
    }

    if let Some(ref overview) = movie.overview {
        if !overview.is_empty() {
            println!();
            println!("{}", overview);
        }
    }
}
