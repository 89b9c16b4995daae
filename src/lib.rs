//! Movie Browser Library
//!
//! Client-side state for browsing, searching, filtering and bookmarking
//! movies from TMDB, with favorites and preferences persisted across runs.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;
pub mod testing;
pub mod utils;

pub use error::{Error, Result};
