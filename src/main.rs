//! Movie Browser CLI
//!
//! A command-line movie browser: trending feed, search, filters and favorites backed by TMDB.

use clap::Parser;
use movie_browser::cli::{
    args::{Cli, Commands},
    commands::{account, browse, detail, favorites, search},
};
use movie_browser::cli::args::FavoritesAction;
use movie_browser::models::config::{load_config, Config};
use movie_browser::preflight;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let mut config = load_config();
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }
    tracing::debug!("State directory: {}", config.data_dir.display());

    if needs_catalog(&cli.command) && !cli.skip_preflight {
        run_preflight_checks(&config).await?;
    }

    // Run the appropriate command
    match cli.command {
        Commands::Trending { pages } => {
            browse::trending(&config, pages).await?;
        }

        Commands::Search { query, pages } => {
            search::execute_search(&config, &query, pages).await?;
        }

        Commands::Filter {
            genre,
            year,
            min_rating,
            pages,
        } => {
            browse::filter(&config, genre, year, min_rating, pages).await?;
        }

        Commands::Detail { movie_id } => {
            detail::execute_detail(&config, movie_id).await?;
        }

        Commands::Genres => {
            browse::genres(&config).await?;
        }

        Commands::Favorites { action } => {
            favorites::execute_favorites(&config, action).await?;
        }

        Commands::Theme { action } => {
            account::execute_theme(&config, action)?;
        }

        Commands::Login { username, password } => {
            account::execute_login(&config, username, &password)?;
        }

        Commands::Logout => {
            account::execute_logout(&config)?;
        }

        Commands::Whoami => {
            account::execute_whoami(&config)?;
        }
    }

    Ok(())
}

/// Whether the command talks to the catalog.
fn needs_catalog(command: &Commands) -> bool {
    match command {
        Commands::Trending { .. }
        | Commands::Search { .. }
        | Commands::Filter { .. }
        | Commands::Detail { .. }
        | Commands::Genres => true,
        Commands::Favorites { action } => matches!(action, FavoritesAction::Add { .. }),
        Commands::Theme { .. } | Commands::Login { .. } | Commands::Logout | Commands::Whoami => {
            false
        }
    }
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("movie_browser=debug")
    } else {
        EnvFilter::new("movie_browser=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Run preflight checks and exit if any fail.
async fn run_preflight_checks(config: &Config) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(config).await?;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
