//! Application-level configuration constants.

use once_cell::sync::Lazy;
use std::collections::HashMap;

// UI behavior
pub const FILTER_TOGGLE_COOLDOWN_MS: u32 = 300;

// Durable storage keys
pub const FAVORITES_KEY: &str = "favorites";
pub const FILTER_QUERY_KEY: &str = "filterQuery";
pub const SELECTED_SUMMARY_KEY: &str = "selectedSummary";

// REST endpoints are resolved against this base; empty means same-origin.
pub const API_BASE_URL: &str = "";

/// Summary tags offered by the filter panel, paired with display labels.
pub const SUMMARY_OPTIONS: &[(&str, &str)] = &[
    ("suburban", "근교"),
    ("large", "대형"),
    ("dessert", "디저트"),
    ("rooftop", "루프탑"),
    ("bookCafe", "북카페"),
    ("scenicView", "뷰맛집"),
    ("culturalComplex", "복합문화"),
    ("architectureTheme", "건축/테마"),
];

/// Tag -> display label lookup built once from [`SUMMARY_OPTIONS`].
pub static SUMMARY_LABELS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| SUMMARY_OPTIONS.iter().copied().collect());

/// Returns the display label for a summary tag, or the tag itself when unknown.
pub fn summary_label(tag: &str) -> &str {
    SUMMARY_LABELS.get(tag).copied().unwrap_or(tag)
}
