//! Human-readable descriptions of a [`FilterState`], used for page headings
//! and the listing preview image.

use crate::filters::{normalize, FilterState, SortOrder};

/// Uppercases the first character, leaving the rest untouched.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Listing heading: the capitalized category, or `"All Products"`.
#[must_use]
pub fn heading(state: &FilterState) -> String {
    if state.has_category() {
        capitalize(&state.category)
    } else {
        "All Products".to_owned()
    }
}

/// One label per active filter, in category, sort, price order.
#[must_use]
pub fn active_filter_labels(state: &FilterState) -> Vec<String> {
    let state = normalize(state.clone());
    let mut labels = Vec::new();

    if state.has_category() {
        labels.push(format!("Category: {}", capitalize(&state.category)));
    }

    match state.sort_order {
        SortOrder::Asc => labels.push("Sorted: Low to High".to_owned()),
        SortOrder::Desc => labels.push("Sorted: High to Low".to_owned()),
        SortOrder::Default => {}
    }

    if state.min_price.is_some() || state.max_price.is_some() {
        let min = state.min_price.map_or_else(|| "0".to_owned(), |v| v.to_string());
        let max = state.max_price.map_or_else(|| "∞".to_owned(), |v| v.to_string());
        labels.push(format!("Price: ${min} - ${max}"));
    }

    labels
}
