//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Movie Browser - Browse, search and bookmark movies from TMDB
#[derive(Parser, Debug)]
#[command(name = "movie-browser")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    /// Directory for persisted favorites, theme and session
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show trending movies
    Trending {
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },

    /// Search movies by title
    Search {
        /// Search text
        #[arg(value_name = "QUERY")]
        query: String,

        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },

    /// Filter movies by genre, release year or minimum rating
    Filter {
        /// Genre id or name (takes precedence over --year)
        #[arg(short = 'g', long)]
        genre: Option<String>,

        /// Release year
        #[arg(short = 'y', long)]
        year: Option<u16>,

        /// Minimum average rating (0-10, inclusive)
        #[arg(short = 'r', long)]
        min_rating: Option<f32>,

        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },

    /// Show movie details and trailer
    Detail {
        /// TMDB movie id
        #[arg(value_name = "MOVIE_ID")]
        movie_id: u64,
    },

    /// List movie genres
    Genres,

    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Show or change the display theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Sign in (local only, any password of 6+ characters)
    Login {
        /// Username (defaults to the current OS user)
        #[arg(short, long)]
        username: Option<String>,

        /// Password
        #[arg(short, long)]
        password: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesAction {
    /// List favorites
    List,

    /// Add a movie to favorites
    Add {
        #[arg(value_name = "MOVIE_ID")]
        movie_id: u64,
    },

    /// Remove a movie from favorites
    Remove {
        #[arg(value_name = "MOVIE_ID")]
        movie_id: u64,
    },

    /// Add the movie if absent, remove it if present
    Toggle {
        #[arg(value_name = "MOVIE_ID")]
        movie_id: u64,
    },

    /// Remove all favorites
    Clear,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ThemeAction {
    /// Show the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Use the dark theme
    Dark,
    /// Use the light theme
    Light,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_command() {
        let cli = Cli::parse_from([
            "movie-browser",
            "filter",
            "--genre",
            "Action",
            "--min-rating",
            "7",
        ]);
        match cli.command {
            Commands::Filter {
                genre,
                year,
                min_rating,
                pages,
            } => {
                assert_eq!(genre.as_deref(), Some("Action"));
                assert_eq!(year, None);
                assert_eq!(min_rating, Some(7.0));
                assert_eq!(pages, 1);
            }
            other => panic!("Expected Filter, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_data_dir() {
        let cli = Cli::parse_from(["movie-browser", "favorites", "list", "--data-dir", "/tmp/x"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(
            cli.command,
            Commands::Favorites {
                action: FavoritesAction::List
            }
        ));
    }

    #[test]
    fn test_parse_theme_without_action() {
        let cli = Cli::parse_from(["movie-browser", "theme"]);
        assert!(matches!(cli.command, Commands::Theme { action: None }));
    }
}
