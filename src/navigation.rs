//! URL synchronization for applied filter criteria.
//!
//! The applied filter state is mirrored into the address bar as
//! `/?summary=<tag>&query=<text>` with a *replacing* navigation, so filters
//! are shareable and bookmarkable without growing browser history. Staged
//! edits never reach the URL; only applied-criteria changes do.

use crate::filter::FilterCriteria;
use std::rc::Rc;
use wasm_bindgen::JsValue;

/// Coarse view classification used to gate URL writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Detail,
    Login,
    Admin,
}

impl View {
    /// Login and admin views never carry the filter query string.
    pub fn is_special(self) -> bool {
        matches!(self, View::Login | View::Admin)
    }
}

/// Replacing-navigation port. The browser impl rewrites the current history
/// entry; tests record the URLs they were asked to visit.
pub trait Navigator {
    fn replace(&self, url: &str);
}

/// `history.replaceState`-backed navigator.
#[derive(Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn replace(&self, url: &str) {
        if let Ok(history) = gloo_utils::window().history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(url));
        }
    }
}

/// Derives the canonical root URL for applied criteria and replaces the
/// current history entry with it, except on special views.
pub struct UrlSync {
    navigator: Rc<dyn Navigator>,
}

impl UrlSync {
    pub fn new(navigator: Rc<dyn Navigator>) -> Self {
        Self { navigator }
    }

    pub fn sync(&self, criteria: &FilterCriteria, view: View) {
        if view.is_special() {
            return;
        }
        let query = build_filter_query(criteria);
        let url = if query.is_empty() {
            "/".to_string()
        } else {
            format!("/?{}", query)
        };
        self.navigator.replace(&url);
    }
}

/// Builds the canonical filter query string: `summary` omitted when empty,
/// `query` omitted when blank after trimming. Also reused for REST list
/// requests, which accept the same two parameters.
pub fn build_filter_query(criteria: &FilterCriteria) -> String {
    let mut pairs: Vec<String> = Vec::with_capacity(2);
    if !criteria.summary.is_empty() {
        pairs.push(format!("summary={}", encode_component(&criteria.summary)));
    }
    if !criteria.query.trim().is_empty() {
        pairs.push(format!("query={}", encode_component(&criteria.query)));
    }
    pairs.join("&")
}

/// Percent-encodes a query component (UTF-8 bytes, unreserved set kept).
pub fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Test navigator capturing every replacing navigation.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingNavigator {
    pub replaced: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<String> {
        self.replaced.borrow().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.replaced.borrow().len()
    }
}

#[cfg(test)]
impl Navigator for RecordingNavigator {
    fn replace(&self, url: &str) {
        self.replaced.borrow_mut().push(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(query: &str, summary: &str) -> FilterCriteria {
        FilterCriteria {
            query: query.to_string(),
            summary: summary.to_string(),
        }
    }

    #[test]
    fn empty_criteria_produce_bare_root() {
        assert_eq!(build_filter_query(&criteria("", "")), "");

        let navigator = Rc::new(RecordingNavigator::new());
        let sync = UrlSync::new(navigator.clone());
        sync.sync(&criteria("", ""), View::List);
        assert_eq!(navigator.last().as_deref(), Some("/"));
    }

    #[test]
    fn summary_precedes_query() {
        assert_eq!(
            build_filter_query(&criteria("latte", "dessert")),
            "summary=dessert&query=latte"
        );
    }

    #[test]
    fn blank_query_is_omitted_but_summary_kept() {
        assert_eq!(
            build_filter_query(&criteria("   ", "rooftop")),
            "summary=rooftop"
        );
    }

    #[test]
    fn query_values_are_percent_encoded() {
        assert_eq!(
            build_filter_query(&criteria("flat white", "")),
            "query=flat%20white"
        );
        // Multibyte input encodes per UTF-8 byte.
        assert_eq!(encode_component("뷰"), "%EB%B7%B0");
    }

    #[test]
    fn special_views_suppress_navigation() {
        let navigator = Rc::new(RecordingNavigator::new());
        let sync = UrlSync::new(navigator.clone());

        sync.sync(&criteria("latte", "dessert"), View::Login);
        sync.sync(&criteria("latte", "dessert"), View::Admin);
        assert_eq!(navigator.count(), 0);

        sync.sync(&criteria("latte", "dessert"), View::List);
        assert_eq!(
            navigator.last().as_deref(),
            Some("/?summary=dessert&query=latte")
        );
    }
}
