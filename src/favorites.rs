//! Persisted set of favorited café IDs.
//!
//! The store is constructed once at startup and handed to every consumer
//! by `Rc`; views learn about mutations through the subscription contract
//! rather than an ambient context. Each toggle writes the whole set back
//! to durable storage before listeners run, so a read immediately after a
//! toggle always observes the new state.

use crate::config::FAVORITES_KEY;
use crate::storage::KeyValueStore;
use crate::{SubscriptionId, Subscribers};
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;

pub struct FavoriteStore {
    storage: Rc<dyn KeyValueStore>,
    ids: RefCell<Vec<String>>,
    subscribers: Subscribers,
}

impl FavoriteStore {
    /// Hydrates the set from the `favorites` key. Absent or malformed
    /// stored JSON yields the empty set; corruption is never surfaced.
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        let ids = match storage.get(FAVORITES_KEY) {
            Some(raw) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_else(|err| {
                warn!("discarding corrupt favorites entry: {}", err);
                Vec::new()
            }),
            None => Vec::new(),
        };
        Self {
            storage,
            ids: RefCell::new(ids),
            subscribers: Subscribers::default(),
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.borrow().iter().any(|entry| entry == id)
    }

    /// Snapshot of the set in insertion order.
    pub fn ids(&self) -> Vec<String> {
        self.ids.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.ids.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.borrow().is_empty()
    }

    /// Removes `id` when present, appends it otherwise. Persists the full
    /// set synchronously, then notifies subscribers.
    pub fn toggle(&self, id: &str) {
        {
            let mut ids = self.ids.borrow_mut();
            match ids.iter().position(|entry| entry == id) {
                Some(idx) => {
                    ids.remove(idx);
                }
                None => ids.push(id.to_string()),
            }
        }
        self.persist();
        self.subscribers.notify();
    }

    fn persist(&self) {
        match serde_json::to_string(&*self.ids.borrow()) {
            Ok(json) => self.storage.set(FAVORITES_KEY, &json),
            Err(err) => warn!("failed to serialize favorites: {}", err),
        }
    }

    pub fn subscribe(&self, listener: Rc<dyn Fn()>) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.unsubscribe(id);
    }
}

impl crate::Observable for FavoriteStore {
    fn subscribe(&self, listener: Rc<dyn Fn()>) -> SubscriptionId {
        FavoriteStore::subscribe(self, listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        FavoriteStore::unsubscribe(self, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::cell::Cell;

    fn store_with(storage: Rc<MemoryStore>) -> FavoriteStore {
        FavoriteStore::new(storage)
    }

    #[test]
    fn toggle_adds_and_persists() {
        let storage = Rc::new(MemoryStore::new());
        let favorites = store_with(storage.clone());

        favorites.toggle("42");
        assert!(favorites.is_favorite("42"));
        assert_eq!(storage.get(FAVORITES_KEY).as_deref(), Some(r#"["42"]"#));
    }

    #[test]
    fn double_toggle_restores_membership_and_persisted_value() {
        let storage = Rc::new(MemoryStore::new());
        let favorites = store_with(storage.clone());
        favorites.toggle("7");
        let baseline = storage.get(FAVORITES_KEY);

        favorites.toggle("42");
        favorites.toggle("42");

        assert!(!favorites.is_favorite("42"));
        assert_eq!(favorites.ids(), vec!["7".to_string()]);
        assert_eq!(storage.get(FAVORITES_KEY), baseline);
    }

    #[test]
    fn persistence_round_trip_matches_membership() {
        let storage = Rc::new(MemoryStore::new());
        let first = store_with(storage.clone());
        first.toggle("1");
        first.toggle("2");
        first.toggle("3");
        first.toggle("2");

        let rebuilt = store_with(storage);
        assert_eq!(rebuilt.ids(), vec!["1".to_string(), "3".to_string()]);
        assert!(rebuilt.is_favorite("1"));
        assert!(!rebuilt.is_favorite("2"));
    }

    #[test]
    fn corrupt_persisted_value_hydrates_empty() {
        let storage = Rc::new(MemoryStore::with_entry(FAVORITES_KEY, "{not json"));
        let favorites = store_with(storage);
        assert!(favorites.is_empty());
    }

    #[test]
    fn toggle_notifies_subscribers_until_unsubscribed() {
        let storage = Rc::new(MemoryStore::new());
        let favorites = store_with(storage);

        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let subscription = favorites.subscribe(Rc::new(move || counter.set(counter.get() + 1)));

        favorites.toggle("42");
        assert_eq!(calls.get(), 1);

        favorites.unsubscribe(subscription);
        favorites.toggle("42");
        assert_eq!(calls.get(), 1);
    }
}
