//! Staged/applied filter state for the café list.
//!
//! Two copies of the criteria exist at all times: *staged* holds whatever
//! the user has typed or tapped but not committed, *applied* is the copy
//! that drives list fetches, persistence, and the URL. Staged input can
//! only reach `applied` through [`FilterState::apply`] or
//! [`FilterState::commit_query_only`]; closing the panel any other way
//! discards nothing and commits nothing.

use crate::config::{FILTER_QUERY_KEY, FILTER_TOGGLE_COOLDOWN_MS, SELECTED_SUMMARY_KEY};
use crate::navigation::{UrlSync, View};
use crate::scheduler::Scheduler;
use crate::storage::KeyValueStore;
use crate::{SubscriptionId, Subscribers};
use log::debug;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Search criteria: free-text query plus a single optional summary tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: String,
    pub summary: String,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty() && self.summary.is_empty()
    }
}

/// Filter panel interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    Staging,
}

pub struct FilterState {
    staged: RefCell<FilterCriteria>,
    applied: RefCell<FilterCriteria>,
    panel: Cell<PanelState>,
    toggle_guard: Rc<Cell<bool>>,
    view: Cell<View>,
    storage: Rc<dyn KeyValueStore>,
    scheduler: Rc<dyn Scheduler>,
    url_sync: UrlSync,
    subscribers: Subscribers,
}

impl FilterState {
    /// Seeds `applied` from the persisted keys so a returning user's last
    /// filter is restored before any request completes. `staged` starts
    /// empty regardless of what was persisted.
    pub fn new(
        storage: Rc<dyn KeyValueStore>,
        scheduler: Rc<dyn Scheduler>,
        url_sync: UrlSync,
    ) -> Self {
        let mut applied = FilterCriteria::default();
        if let Some(stored) = storage.get(FILTER_QUERY_KEY) {
            applied.query = stored;
        }
        if let Some(stored) = storage.get(SELECTED_SUMMARY_KEY) {
            applied.summary = stored;
        }
        Self {
            staged: RefCell::new(FilterCriteria::default()),
            applied: RefCell::new(applied),
            panel: Cell::new(PanelState::Idle),
            toggle_guard: Rc::new(Cell::new(false)),
            view: Cell::new(View::List),
            storage,
            scheduler,
            url_sync,
            subscribers: Subscribers::default(),
        }
    }

    pub fn staged(&self) -> FilterCriteria {
        self.staged.borrow().clone()
    }

    pub fn applied(&self) -> FilterCriteria {
        self.applied.borrow().clone()
    }

    pub fn panel(&self) -> PanelState {
        self.panel.get()
    }

    /// Records the active view. Entering the list view re-syncs the URL so
    /// the root path regains its query string after leaving login/admin;
    /// other views keep their own URLs untouched.
    pub fn set_view(&self, view: View) {
        self.view.set(view);
        if view == View::List {
            self.sync_url();
        }
    }

    pub fn sync_url(&self) {
        self.url_sync.sync(&self.applied.borrow(), self.view.get());
    }

    /// Flips the panel between `Idle` and `Staging` unless a previous
    /// toggle is still inside its cool-down window, in which case the
    /// request is ignored. Returns whether a transition happened.
    pub fn toggle_panel(&self) -> bool {
        if self.toggle_guard.get() {
            debug!("filter panel toggle ignored during cool-down");
            return false;
        }
        let next = match self.panel.get() {
            PanelState::Idle => PanelState::Staging,
            PanelState::Staging => PanelState::Idle,
        };
        self.panel.set(next);
        self.toggle_guard.set(true);
        let guard = self.toggle_guard.clone();
        self.scheduler
            .after(FILTER_TOGGLE_COOLDOWN_MS, Box::new(move || guard.set(false)));
        self.subscribers.notify();
        true
    }

    /// Mutates the staged text only; nothing is fetched or persisted.
    pub fn stage_query(&self, value: &str) {
        self.staged.borrow_mut().query = value.to_string();
        self.subscribers.notify();
    }

    /// Selects a summary tag in the staged copy. Re-selecting the active
    /// tag deselects it; the selection is a single optional value.
    pub fn stage_summary(&self, tag: &str) {
        {
            let mut staged = self.staged.borrow_mut();
            if staged.summary == tag {
                staged.summary.clear();
            } else {
                staged.summary = tag.to_string();
            }
        }
        self.subscribers.notify();
    }

    /// Commits staged criteria: staged becomes applied, the panel closes,
    /// the applied copy is persisted and mirrored into the URL.
    pub fn apply(&self) {
        let staged = self.staged.borrow().clone();
        *self.applied.borrow_mut() = staged;
        self.panel.set(PanelState::Idle);
        self.persist_applied();
        self.sync_url();
        self.subscribers.notify();
    }

    /// Search-icon path: commits only the staged text into applied,
    /// leaving the summary tag and the panel untouched.
    pub fn commit_query_only(&self) {
        let query = self.staged.borrow().query.clone();
        self.applied.borrow_mut().query = query;
        self.persist_applied();
        self.sync_url();
        self.subscribers.notify();
    }

    /// Clears both copies. The text key is persisted as the empty string
    /// while the summary key is removed outright.
    pub fn reset(&self) {
        *self.staged.borrow_mut() = FilterCriteria::default();
        *self.applied.borrow_mut() = FilterCriteria::default();
        self.persist_applied();
        self.sync_url();
        self.subscribers.notify();
    }

    /// Cancel semantics for any interaction outside the open panel:
    /// back to `Idle` without committing staged changes.
    pub fn dismiss(&self) {
        if self.panel.get() == PanelState::Staging {
            self.panel.set(PanelState::Idle);
            self.subscribers.notify();
        }
    }

    fn persist_applied(&self) {
        let applied = self.applied.borrow();
        self.storage.set(FILTER_QUERY_KEY, &applied.query);
        if applied.summary.is_empty() {
            self.storage.remove(SELECTED_SUMMARY_KEY);
        } else {
            self.storage.set(SELECTED_SUMMARY_KEY, &applied.summary);
        }
    }

    pub fn subscribe(&self, listener: Rc<dyn Fn()>) -> SubscriptionId {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.unsubscribe(id);
    }
}

impl crate::Observable for FilterState {
    fn subscribe(&self, listener: Rc<dyn Fn()>) -> SubscriptionId {
        FilterState::subscribe(self, listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        FilterState::unsubscribe(self, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RecordingNavigator;
    use crate::scheduler::ManualScheduler;
    use crate::storage::MemoryStore;

    struct Fixture {
        storage: Rc<MemoryStore>,
        scheduler: Rc<ManualScheduler>,
        navigator: Rc<RecordingNavigator>,
        filters: FilterState,
    }

    fn fixture_with_storage(storage: Rc<MemoryStore>) -> Fixture {
        let scheduler = Rc::new(ManualScheduler::new());
        let navigator = Rc::new(RecordingNavigator::new());
        let filters = FilterState::new(
            storage.clone(),
            scheduler.clone(),
            UrlSync::new(navigator.clone()),
        );
        Fixture {
            storage,
            scheduler,
            navigator,
            filters,
        }
    }

    fn fixture() -> Fixture {
        fixture_with_storage(Rc::new(MemoryStore::new()))
    }

    #[test]
    fn staging_never_leaks_into_applied_or_url() {
        let fx = fixture();
        fx.filters.stage_query("latte");
        fx.filters.stage_summary("dessert");

        assert_eq!(fx.filters.applied(), FilterCriteria::default());
        assert_eq!(fx.navigator.count(), 0);
        assert_eq!(fx.storage.get(FILTER_QUERY_KEY), None);
        assert_eq!(fx.storage.get(SELECTED_SUMMARY_KEY), None);
    }

    #[test]
    fn apply_commits_persists_and_navigates() {
        let fx = fixture();
        fx.filters.toggle_panel();
        fx.filters.stage_query("latte");
        fx.filters.stage_summary("dessert");
        fx.filters.apply();

        assert_eq!(
            fx.filters.applied(),
            FilterCriteria {
                query: "latte".to_string(),
                summary: "dessert".to_string(),
            }
        );
        assert_eq!(fx.filters.panel(), PanelState::Idle);
        assert_eq!(fx.storage.get(FILTER_QUERY_KEY).as_deref(), Some("latte"));
        assert_eq!(
            fx.storage.get(SELECTED_SUMMARY_KEY).as_deref(),
            Some("dessert")
        );
        assert_eq!(
            fx.navigator.last().as_deref(),
            Some("/?summary=dessert&query=latte")
        );
    }

    #[test]
    fn commit_query_only_leaves_summary_and_panel_alone() {
        let fx = fixture();
        fx.filters.stage_summary("rooftop");
        fx.filters.apply();

        fx.filters.toggle_panel();
        fx.filters.stage_query("hand drip");
        fx.filters.commit_query_only();

        let applied = fx.filters.applied();
        assert_eq!(applied.query, "hand drip");
        assert_eq!(applied.summary, "rooftop");
        assert_eq!(fx.filters.panel(), PanelState::Staging);
        assert_eq!(
            fx.navigator.last().as_deref(),
            Some("/?summary=rooftop&query=hand%20drip")
        );
    }

    #[test]
    fn reselecting_summary_tag_clears_it() {
        let fx = fixture();
        fx.filters.stage_summary("bookCafe");
        assert_eq!(fx.filters.staged().summary, "bookCafe");
        fx.filters.stage_summary("bookCafe");
        assert_eq!(fx.filters.staged().summary, "");
    }

    #[test]
    fn reset_clears_with_asymmetric_persistence() {
        let fx = fixture();
        fx.filters.stage_query("latte");
        fx.filters.stage_summary("dessert");
        fx.filters.apply();

        fx.filters.reset();

        assert_eq!(fx.filters.staged(), FilterCriteria::default());
        assert_eq!(fx.filters.applied(), FilterCriteria::default());
        // Text key is overwritten with the empty string; summary key is gone.
        assert_eq!(fx.storage.get(FILTER_QUERY_KEY).as_deref(), Some(""));
        assert_eq!(fx.storage.get(SELECTED_SUMMARY_KEY), None);
        assert_eq!(fx.navigator.last().as_deref(), Some("/"));
    }

    #[test]
    fn toggle_cool_down_swallows_the_second_flip() {
        let fx = fixture();
        assert!(fx.filters.toggle_panel());
        assert!(!fx.filters.toggle_panel());
        assert_eq!(fx.filters.panel(), PanelState::Staging);

        fx.scheduler.advance(u64::from(FILTER_TOGGLE_COOLDOWN_MS));
        assert!(fx.filters.toggle_panel());
        assert_eq!(fx.filters.panel(), PanelState::Idle);
    }

    #[test]
    fn dismiss_cancels_without_committing() {
        let fx = fixture();
        fx.filters.toggle_panel();
        fx.filters.stage_summary("suburban");
        fx.filters.dismiss();

        assert_eq!(fx.filters.panel(), PanelState::Idle);
        assert_eq!(fx.filters.applied().summary, "");
        // Staged input survives the dismissal for the next panel open.
        assert_eq!(fx.filters.staged().summary, "suburban");
        assert_eq!(fx.navigator.count(), 0);
    }

    #[test]
    fn construction_seeds_applied_from_storage_only() {
        let storage = Rc::new(MemoryStore::new());
        storage.set(FILTER_QUERY_KEY, "einspanner");
        storage.set(SELECTED_SUMMARY_KEY, "scenicView");

        let fx = fixture_with_storage(storage);
        assert_eq!(
            fx.filters.applied(),
            FilterCriteria {
                query: "einspanner".to_string(),
                summary: "scenicView".to_string(),
            }
        );
        assert_eq!(fx.filters.staged(), FilterCriteria::default());
        // Seeding alone does not navigate; the shell owns the first sync.
        assert_eq!(fx.navigator.count(), 0);
    }

    #[test]
    fn special_views_suppress_url_sync_until_left() {
        let fx = fixture();
        fx.filters.set_view(View::Login);
        fx.filters.stage_summary("large");
        fx.filters.apply();
        assert_eq!(fx.navigator.count(), 0);

        fx.filters.set_view(View::List);
        assert_eq!(fx.navigator.last().as_deref(), Some("/?summary=large"));
    }

    #[test]
    fn entering_detail_view_does_not_rewrite_the_url() {
        let fx = fixture();
        fx.filters.stage_query("latte");
        fx.filters.apply();
        let synced = fx.navigator.count();

        fx.filters.set_view(View::Detail);
        assert_eq!(fx.navigator.count(), synced);
    }
}
