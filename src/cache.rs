//! Memo cache for favorited café detail records.
//!
//! The favorites panel re-resolves every favorited ID on each set change;
//! without a cache that is a refetch per render cycle. Entries are keyed
//! by café ID and, once populated, are never invalidated here — a stale
//! record for a still-favorited café is accepted. Concurrent resolutions
//! of the same ID share one in-flight fetch instead of stacking requests.

use crate::api::{ApiError, ApiResult, CafeApi};
use crate::Cafe;
use futures::future::{self, LocalBoxFuture, Shared};
use futures::FutureExt;
use log::{debug, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

type SharedFetch = Shared<LocalBoxFuture<'static, ApiResult<Cafe>>>;

pub struct DetailCache {
    api: Rc<dyn CafeApi>,
    entries: Rc<RefCell<HashMap<String, Cafe>>>,
    in_flight: Rc<RefCell<HashMap<String, SharedFetch>>>,
}

impl DetailCache {
    pub fn new(api: Rc<dyn CafeApi>) -> Self {
        Self {
            api,
            entries: Rc::new(RefCell::new(HashMap::new())),
            in_flight: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn is_cached(&self, id: &str) -> bool {
        self.entries.borrow().contains_key(id)
    }

    /// Returns the cached record for `id`, or issues at most one fetch.
    /// A second `resolve` for the same ID while the first is still in
    /// flight subscribes to the pending fetch rather than starting a new
    /// one. Fetch failures and incomplete records surface as errors and
    /// leave the cache untouched.
    pub fn resolve(&self, id: &str) -> LocalBoxFuture<'static, ApiResult<Cafe>> {
        if let Some(hit) = self.entries.borrow().get(id) {
            debug!("detail cache hit for cafe {}", id);
            return future::ready(Ok(hit.clone())).boxed_local();
        }
        if let Some(pending) = self.in_flight.borrow().get(id) {
            debug!("joining in-flight fetch for cafe {}", id);
            return pending.clone().boxed_local();
        }
        self.start_fetch(id).boxed_local()
    }

    /// Resolves every ID in parallel, output order matching input order.
    /// Fail-fast: one failed resolution fails the whole batch. Callers
    /// that want to degrade per-entry use [`DetailCache::resolve_available`].
    pub fn resolve_all(&self, ids: &[String]) -> LocalBoxFuture<'static, ApiResult<Vec<Cafe>>> {
        let pending: Vec<_> = ids.iter().map(|id| self.resolve(id)).collect();
        future::try_join_all(pending).boxed_local()
    }

    /// Partial-success batch resolution: failed IDs are logged and dropped
    /// so one bad record cannot empty the whole favorites panel.
    pub fn resolve_available(&self, ids: &[String]) -> LocalBoxFuture<'static, Vec<Cafe>> {
        let pending: Vec<_> = ids.iter().map(|id| self.resolve(id)).collect();
        let ids: Vec<String> = ids.to_vec();
        async move {
            let results = future::join_all(pending).await;
            let mut resolved = Vec::with_capacity(results.len());
            for (id, result) in ids.iter().zip(results) {
                match result {
                    Ok(cafe) => resolved.push(cafe),
                    Err(err) => warn!("dropping cafe {} from favorites panel: {}", id, err),
                }
            }
            resolved
        }
        .boxed_local()
    }

    fn start_fetch(&self, id: &str) -> SharedFetch {
        let fetch = self.api.fetch_cafe_by_id(id);
        let entries = self.entries.clone();
        let in_flight = self.in_flight.clone();
        let id = id.to_string();
        let id_key = id.clone();
        let shared = async move {
            let result = match fetch.await {
                Ok(cafe) if cafe.name.is_empty() || cafe.address.is_empty() => {
                    warn!("cafe {} arrived without name or address", id);
                    Err(ApiError::InvalidRecord)
                }
                Ok(cafe) => {
                    entries.borrow_mut().insert(id.clone(), cafe.clone());
                    Ok(cafe)
                }
                Err(err) => Err(err),
            };
            in_flight.borrow_mut().remove(&id);
            result
        }
        .boxed_local()
        .shared();
        self.in_flight
            .borrow_mut()
            .insert(id_key, shared.clone());
        shared
    }
}
