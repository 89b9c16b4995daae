//! Core state and business logic.

pub mod catalog;
pub mod filter;
pub mod persistence;
pub mod session;
pub mod state;

pub use catalog::{CatalogCore, CatalogEvent, CatalogSnapshot, DetailView};
pub use persistence::{DurableStore, JsonFileStore, MemoryStore, Persistence};
pub use session::SessionManager;
pub use state::{ErrorNotice, ResultSource};
