//! Cafe Spot: a browser-based café directory.
//!
//! The interesting part of this crate is client-side state
//! synchronization: the favorites set, the staged/applied filter
//! criteria, the detail memo cache, and the URL must stay mutually
//! consistent across navigation, reloads, and concurrent fetches with no
//! server-side session. Everything stateful goes through injected ports
//! ([`storage::KeyValueStore`], [`scheduler::Scheduler`],
//! [`navigation::Navigator`], [`api::CafeApi`]) so the whole subsystem
//! runs under native tests without a browser. The Yew view layer lives in
//! the binary.

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub mod api;
pub mod cache;
pub mod config;
pub mod favorites;
pub mod filter;
pub mod navigation;
pub mod scheduler;
pub mod storage;

/// A café listing as served by the backend. Fields other than `id` are
/// defaulted so a sparse record deserializes instead of failing the whole
/// response; completeness checks happen where they matter (the detail
/// cache rejects records without name/address).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cafe {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photos: Vec<String>,
}

impl Cafe {
    /// Card-sized address: the first two whitespace-separated tokens,
    /// comma joined ("서울 마포구 독막로 234" -> "서울, 마포구").
    pub fn short_address(&self) -> String {
        self.address
            .split_whitespace()
            .take(2)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Handle returned by a store subscription; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

/// Change-notification contract shared by the stores, so view-layer glue
/// can subscribe to any of them uniformly.
pub trait Observable {
    fn subscribe(&self, listener: Rc<dyn Fn()>) -> SubscriptionId;
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Listener registry shared by the stores. Notification clones the
/// listener list first so a listener may subscribe or unsubscribe
/// reentrantly without poisoning the borrow.
#[derive(Default)]
pub(crate) struct Subscribers {
    entries: RefCell<Vec<(usize, Rc<dyn Fn()>)>>,
    next_id: Cell<usize>,
}

impl Subscribers {
    pub fn subscribe(&self, listener: Rc<dyn Fn()>) -> SubscriptionId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, listener));
        SubscriptionId(id)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.entries.borrow_mut().retain(|(entry, _)| *entry != id.0);
    }

    pub fn notify(&self) {
        let listeners: Vec<Rc<dyn Fn()>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiFuture, CafeApi};
    use crate::cache::DetailCache;
    use crate::config::FAVORITES_KEY;
    use crate::favorites::FavoriteStore;
    use crate::filter::{FilterCriteria, FilterState};
    use crate::navigation::{RecordingNavigator, UrlSync};
    use crate::scheduler::ManualScheduler;
    use crate::storage::{KeyValueStore, MemoryStore};
    use futures::executor::block_on;
    use futures::future;
    use futures::FutureExt;
    use std::cell::Cell;

    #[test]
    fn short_address_takes_first_two_tokens() {
        let cafe = Cafe {
            id: "1".to_string(),
            name: "Cafe".to_string(),
            address: "서울 마포구 독막로 234".to_string(),
            description: String::new(),
            photos: Vec::new(),
        };
        assert_eq!(cafe.short_address(), "서울, 마포구");
    }

    struct OneCafeApi {
        cafe: Cafe,
        fetch_calls: Cell<usize>,
    }

    impl CafeApi for OneCafeApi {
        fn fetch_cafe_by_id(&self, _id: &str) -> ApiFuture<Cafe> {
            self.fetch_calls.set(self.fetch_calls.get() + 1);
            future::ready(Ok(self.cafe.clone())).boxed_local()
        }

        fn list_cafes(&self, _criteria: &FilterCriteria) -> ApiFuture<Vec<Cafe>> {
            future::ready(Ok(Vec::new())).boxed_local()
        }

        fn login(&self, _username: &str, _password: &str) -> ApiFuture<bool> {
            future::ready(Ok(false)).boxed_local()
        }

        fn check_auth(&self) -> ApiFuture<bool> {
            future::ready(Ok(false)).boxed_local()
        }

        fn delete_cafe(&self, _id: &str) -> ApiFuture<()> {
            future::ready(Ok(())).boxed_local()
        }
    }

    fn one_cafe_api(cafe: Cafe) -> Rc<OneCafeApi> {
        Rc::new(OneCafeApi {
            cafe,
            fetch_calls: Cell::new(0),
        })
    }

    // End-to-end pass over the whole subsystem: favorite, filter, URL,
    // and detail resolution observed through the injected ports.
    #[test]
    fn favorites_and_filters_stay_consistent_end_to_end() {
        let storage = Rc::new(MemoryStore::new());
        let scheduler = Rc::new(ManualScheduler::new());
        let navigator = Rc::new(RecordingNavigator::new());

        let favorites = FavoriteStore::new(storage.clone());
        let filters = FilterState::new(
            storage.clone(),
            scheduler,
            UrlSync::new(navigator.clone()),
        );

        favorites.toggle("42");
        assert_eq!(favorites.ids(), vec!["42".to_string()]);
        assert_eq!(storage.get(FAVORITES_KEY).as_deref(), Some(r#"["42"]"#));

        filters.stage_summary("dessert");
        filters.apply();
        assert_eq!(
            filters.applied(),
            FilterCriteria {
                query: String::new(),
                summary: "dessert".to_string(),
            }
        );
        assert_eq!(navigator.last().as_deref(), Some("/?summary=dessert"));

        let api = one_cafe_api(Cafe {
            id: "42".to_string(),
            name: "Cafe A".to_string(),
            address: "Seoul".to_string(),
            description: String::new(),
            photos: Vec::new(),
        });
        let cache = DetailCache::new(api.clone());

        let resolved = block_on(cache.resolve("42")).expect("resolve");
        assert_eq!(resolved.name, "Cafe A");
        assert!(cache.is_cached("42"));

        let again = block_on(cache.resolve("42")).expect("cached resolve");
        assert_eq!(again.address, "Seoul");
        assert_eq!(api.fetch_calls.get(), 1);
    }
}
