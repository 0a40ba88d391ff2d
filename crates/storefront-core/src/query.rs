//! Conversion between [`FilterState`] and its canonical URL query string.
//!
//! The canonical form omits every default-valued parameter and always lists
//! the remaining ones as `category`, `sort`, `minPrice`, `maxPrice`, so two
//! equal states always produce byte-identical URLs.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::filters::{normalize, FilterState, SortOrder};

/// Everything except RFC 3986 unreserved characters gets escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub const CATEGORY_PARAM: &str = "category";
pub const SORT_PARAM: &str = "sort";
pub const MIN_PRICE_PARAM: &str = "minPrice";
pub const MAX_PRICE_PARAM: &str = "maxPrice";

/// Renders `state` as a canonical query string without the leading `?`.
///
/// Returns an empty string for the default state.
#[must_use]
pub fn state_to_query(state: &FilterState) -> String {
    let state = normalize(state.clone());
    let mut pairs: Vec<(&str, String)> = Vec::with_capacity(4);

    if state.has_category() {
        pairs.push((CATEGORY_PARAM, encode_query_value(&state.category)));
    }
    if state.sort_order != SortOrder::Default {
        pairs.push((SORT_PARAM, state.sort_order.as_str().to_owned()));
    }
    if let Some(min) = state.min_price {
        pairs.push((MIN_PRICE_PARAM, min.to_string()));
    }
    if let Some(max) = state.max_price {
        pairs.push((MAX_PRICE_PARAM, max.to_string()));
    }

    pairs
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Parses a raw query string into a normalized [`FilterState`].
///
/// Never fails. A leading `?` is accepted, `+` decodes to a space, the first
/// occurrence of a repeated parameter wins, and unknown parameters are
/// ignored. Prices that are not non-negative finite numbers become unset and
/// unrecognized sort values become [`SortOrder::Default`].
#[must_use]
pub fn query_to_state(raw: &str) -> FilterState {
    let mut category: Option<String> = None;
    let mut sort: Option<String> = None;
    let mut min_price: Option<String> = None;
    let mut max_price: Option<String> = None;

    for (key, value) in query_pairs(raw) {
        let slot = match key.as_str() {
            CATEGORY_PARAM => &mut category,
            SORT_PARAM => &mut sort,
            MIN_PRICE_PARAM => &mut min_price,
            MAX_PRICE_PARAM => &mut max_price,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    normalize(FilterState {
        category: category.unwrap_or_default(),
        sort_order: sort.as_deref().map_or(SortOrder::Default, SortOrder::from_param),
        min_price: min_price.as_deref().and_then(parse_price),
        max_price: max_price.as_deref().and_then(parse_price),
    })
}

/// Splits a raw query string into decoded `(key, value)` pairs, in order.
///
/// A leading `?` is skipped, empty segments are dropped and a segment without
/// `=` yields an empty value.
pub fn query_pairs(raw: &str) -> impl Iterator<Item = (String, String)> + '_ {
    raw.strip_prefix('?')
        .unwrap_or(raw)
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
}

/// The decoded value of the first `key` parameter in `raw`, if present.
#[must_use]
pub fn first_query_value(raw: &str, key: &str) -> Option<String> {
    query_pairs(raw).find_map(|(k, value)| (k == key).then_some(value))
}

/// Percent-encodes one query value; spaces become `%20`, not `+`.
#[must_use]
pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Parses a price parameter. Range checks happen in [`normalize`].
#[must_use]
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
