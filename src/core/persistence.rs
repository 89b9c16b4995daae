//! Durable key/value store and the typed slots kept in it.
//!
//! Four independent slots survive restarts:
//! - `favorites`: JSON list of movie summaries, insertion order
//! - `darkMode`: JSON boolean theme flag
//! - `lastSearchQuery`: raw string
//! - `user`: JSON user profile, absent when signed out
//!
//! A missing or corrupt slot reads as its empty default.

use crate::models::{MovieSummary, Theme, UserProfile};
use crate::utils::fs;
use crate::Result;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const FAVORITES_KEY: &str = "favorites";
pub const THEME_KEY: &str = "darkMode";
pub const LAST_SEARCH_KEY: &str = "lastSearchQuery";
pub const USER_KEY: &str = "user";

/// Synchronous key/value persistence, atomic per key.
pub trait DurableStore: Send + Sync {
    /// Read a slot. `Ok(None)` when the slot was never written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a slot.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a slot. Deleting an absent slot is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Store keeping one file per slot under a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the slot files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl DurableStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.slot_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        fs::write_atomic(&self.slot_path(key), value.as_bytes())
    }

    fn remove(&self, key: &str) -> Result<()> {
        fs::remove_if_exists(&self.slot_path(key))
    }
}

#[derive(Debug, Default)]
struct MemorySlots {
    values: HashMap<String, String>,
    writes: HashMap<String, usize>,
}

/// In-memory store. Clones share the same slots, so a test can keep a
/// handle after giving one to the core.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Arc<Mutex<MemorySlots>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, MemorySlots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed a slot without counting it as a write.
    pub fn insert(&self, key: &str, value: &str) {
        self.slots()
            .values
            .insert(key.to_string(), value.to_string());
    }

    /// Raw value of a slot.
    pub fn get(&self, key: &str) -> Option<String> {
        self.slots().values.get(key).cloned()
    }

    /// Number of writes issued to a slot.
    pub fn write_count(&self, key: &str) -> usize {
        self.slots().writes.get(key).copied().unwrap_or(0)
    }
}

impl DurableStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots();
        slots.values.insert(key.to_string(), value.to_string());
        *slots.writes.entry(key.to_string()).or_insert(0) += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut slots = self.slots();
        slots.values.remove(key);
        *slots.writes.entry(key.to_string()).or_insert(0) += 1;
        Ok(())
    }
}

/// Typed access to the persisted slots.
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn DurableStore>,
}

impl Persistence {
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self { store }
    }

    /// Read a slot, downgrading read errors to "absent".
    fn read_slot(&self, key: &str) -> Option<String> {
        match self.store.read(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read stored {}: {}", key, e);
                None
            }
        }
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read_slot(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring corrupt stored {}: {}", key, e);
                None
            }
        }
    }

    /// Stored favorites in insertion order, duplicate ids dropped.
    pub fn load_favorites(&self) -> Vec<MovieSummary> {
        let stored: Vec<MovieSummary> = self.read_json(FAVORITES_KEY).unwrap_or_default();
        let mut seen = HashSet::new();
        stored.into_iter().filter(|m| seen.insert(m.id)).collect()
    }

    pub fn save_favorites(&self, favorites: &[MovieSummary]) -> Result<()> {
        let json = serde_json::to_string(favorites)?;
        self.store.write(FAVORITES_KEY, &json)
    }

    pub fn load_theme(&self) -> Theme {
        self.read_json::<bool>(THEME_KEY)
            .map(Theme::from_dark_mode)
            .unwrap_or_default()
    }

    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        let json = serde_json::to_string(&theme.is_dark())?;
        self.store.write(THEME_KEY, &json)
    }

    pub fn load_last_search(&self) -> String {
        self.read_slot(LAST_SEARCH_KEY).unwrap_or_default()
    }

    pub fn save_last_search(&self, query: &str) -> Result<()> {
        self.store.write(LAST_SEARCH_KEY, query)
    }

    pub fn load_user(&self) -> Option<UserProfile> {
        self.read_json(USER_KEY)
    }

    pub fn save_user(&self, user: &UserProfile) -> Result<()> {
        let json = serde_json::to_string(user)?;
        self.store.write(USER_KEY, &json)
    }

    pub fn clear_user(&self) -> Result<()> {
        self.store.remove(USER_KEY)
    }
}
