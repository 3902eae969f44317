//! Dependency wiring for the running application.
//!
//! Every store and port is constructed exactly once and handed down the
//! component tree by `Rc` handle; components never reach for an ambient
//! context or a global.

use cafe_spot::api::{CafeApi, HttpCafeApi};
use cafe_spot::cache::DetailCache;
use cafe_spot::config::API_BASE_URL;
use cafe_spot::favorites::FavoriteStore;
use cafe_spot::filter::FilterState;
use cafe_spot::navigation::{BrowserNavigator, UrlSync};
use cafe_spot::scheduler::TimeoutScheduler;
use cafe_spot::storage::{BrowserStorage, KeyValueStore};
use std::rc::Rc;
use yew::prelude::*;

pub struct Services {
    pub api: Rc<dyn CafeApi>,
    pub favorites: Rc<FavoriteStore>,
    pub cache: Rc<DetailCache>,
    pub filters: Rc<FilterState>,
}

impl Services {
    pub fn new() -> Rc<Self> {
        let storage: Rc<dyn KeyValueStore> = Rc::new(BrowserStorage);
        let api: Rc<dyn CafeApi> = Rc::new(HttpCafeApi::new(API_BASE_URL));
        let favorites = Rc::new(FavoriteStore::new(storage.clone()));
        let cache = Rc::new(DetailCache::new(api.clone()));
        let filters = Rc::new(FilterState::new(
            storage,
            Rc::new(TimeoutScheduler),
            UrlSync::new(Rc::new(BrowserNavigator)),
        ));
        Rc::new(Self {
            api,
            favorites,
            cache,
            filters,
        })
    }
}

// Props equality only needs to detect a different wiring, which never
// happens after startup; pointer identity is enough.
impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.favorites, &other.favorites)
    }
}

/// Props for components that only need the service handles.
#[derive(Properties, PartialEq)]
pub struct ServicesProps {
    pub services: Rc<Services>,
}
