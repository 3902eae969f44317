//! Key-value persistence port backed by browser local storage.
//!
//! The core state stores never touch `window.localStorage` directly; they
//! go through [`KeyValueStore`] so the same code runs against an in-memory
//! store in native tests. All writes are whole-value overwrites under a
//! fixed key, matching the single-threaded last-writer-wins model of the
//! UI event loop.

use gloo_storage::{LocalStorage, Storage};
use log::warn;
use std::cell::RefCell;
use std::collections::HashMap;

/// String-keyed blob store. Durable in the browser, ephemeral in tests.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `localStorage`-backed store used by the running application.
///
/// Storage failures (quota, disabled storage) are logged and swallowed;
/// persistence is best-effort and never fatal.
#[derive(Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if LocalStorage::raw().set_item(key, value).is_err() {
            warn!("failed to persist '{}' to local storage", key);
        }
    }

    fn remove(&self, key: &str) {
        let _ = LocalStorage::raw().remove_item(key);
    }
}

/// In-memory store for native tests and headless use.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a key before a store under test hydrates from it.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.set(key, value);
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing"), None);

        store.set("filterQuery", "latte");
        assert_eq!(store.get("filterQuery").as_deref(), Some("latte"));

        store.set("filterQuery", "");
        assert_eq!(store.get("filterQuery").as_deref(), Some(""));

        store.remove("filterQuery");
        assert_eq!(store.get("filterQuery"), None);
    }

    #[test]
    fn seeded_store_exposes_entry() {
        let store = MemoryStore::with_entry("selectedSummary", "dessert");
        assert_eq!(store.get("selectedSummary").as_deref(), Some("dessert"));
    }
}
