//! Terminal output helpers shared by the commands.

use crate::core::{CatalogCore, ErrorNotice};
use crate::models::MovieSummary;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

const TITLE_WIDTH: usize = 40;

/// Run `fut` behind a spinner showing `message`.
pub async fn with_spinner<F: Future>(message: &str, fut: F) -> F::Output {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let output = fut.await;
    pb.finish_and_clear();
    output
}

/// Truncate a title to fit the table column.
pub fn truncate_title(title: &str, width: usize) -> String {
    if title.chars().count() > width {
        format!("{}...", title.chars().take(width - 3).collect::<String>())
    } else {
        title.to_string()
    }
}

/// Print movies as a table with genre chips and favorite markers.
pub fn print_movie_table(core: &CatalogCore, movies: &[MovieSummary]) {
    if movies.is_empty() {
        println!("{}", "No movies found".yellow());
        println!("Try adjusting your search or filters");
        return;
    }

    println!(
        " {:>4} | {:>8} | {:<40} | {:>4} | {:<24} | {}",
        "#", "ID", "Title", "Year", "Genres", "Rating"
    );
    println!("{}", "-".repeat(100));

    for (i, movie) in movies.iter().enumerate() {
        let marker = if core.is_favorite(movie.id) {
            "♥".red().to_string()
        } else {
            " ".to_string()
        };
        println!(
            " {:>4} | {:>8} | {:<40} | {:>4} | {:<24} | {:.1} {}",
            i + 1,
            movie.id,
            truncate_title(&movie.title, TITLE_WIDTH - 2),
            movie
                .release_year()
                .map(|y| y.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            core.genre_names(movie, 2).join(", "),
            movie.vote_average,
            marker
        );
    }
}

/// Print an error notice from the core.
pub fn print_error_notice(notice: &ErrorNotice) {
    println!("{} {}", "[ERROR]".red().bold(), notice.message);
    tracing::debug!("{} failure cause: {}", notice.operation, notice.cause);
}
