//! Listing filters: the normalized [`FilterState`] and [`apply_filters`].
//!
//! The rendered collection is always `sort(filter(products, state))`.
//! Filtering never looks at the sort order, so the two steps commute with
//! respect to membership and re-applying the same state is a no-op.

use serde::{Deserialize, Serialize};

use crate::products::Product;

/// Category value meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "all";

/// Price ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Catalog order, untouched.
    #[default]
    Default,
    Asc,
    Desc,
}

impl SortOrder {
    /// Parses a `sort` query value. Anything unrecognized maps to
    /// [`SortOrder::Default`].
    #[must_use]
    pub fn from_param(raw: &str) -> Self {
        match raw {
            "asc" => Self::Asc,
            "desc" => Self::Desc,
            _ => Self::Default,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The active category, sort order and price bounds for a listing.
///
/// `None` bounds mean "unbounded": the effective minimum is 0 and the
/// effective maximum is +∞. There is no numeric sentinel for infinity, so the
/// state serializes cleanly to both JSON and URL query strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub category: String,
    pub sort_order: SortOrder,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: ALL_CATEGORIES.to_owned(),
            sort_order: SortOrder::Default,
            min_price: None,
            max_price: None,
        }
    }
}

impl FilterState {
    /// Returns `true` when every field equals its default, i.e. the canonical
    /// query string is empty.
    #[must_use]
    pub fn is_default(&self) -> bool {
        normalize(self.clone()) == Self::default()
    }

    /// Returns `true` if a category restriction is active.
    #[must_use]
    pub fn has_category(&self) -> bool {
        !self.category.is_empty() && self.category != ALL_CATEGORIES
    }

    /// Lower price bound used for filtering; invalid or unset bounds are 0.
    #[must_use]
    pub fn effective_min(&self) -> f64 {
        sanitize_min(self.min_price).unwrap_or(0.0)
    }

    /// Upper price bound used for filtering; invalid or unset bounds are +∞.
    #[must_use]
    pub fn effective_max(&self) -> f64 {
        sanitize_max(self.max_price).unwrap_or(f64::INFINITY)
    }

    /// Returns `true` if `product` survives the category and price filters.
    ///
    /// Category matching is exact and case-sensitive. Both price bounds are
    /// inclusive.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if self.has_category() && product.category != self.category {
            return false;
        }
        product.price >= self.effective_min() && product.price <= self.effective_max()
    }
}

/// Canonicalizes a state so that equal filters compare equal.
///
/// - an empty category becomes `"all"`
/// - a minimum of 0, or any negative or non-finite minimum, becomes unset
/// - a negative or non-finite maximum becomes unset
///
/// The result is a fixed point: `normalize(normalize(s)) == normalize(s)`.
#[must_use]
pub fn normalize(state: FilterState) -> FilterState {
    let category = if state.category.is_empty() {
        ALL_CATEGORIES.to_owned()
    } else {
        state.category
    };

    FilterState {
        category,
        sort_order: state.sort_order,
        min_price: sanitize_min(state.min_price),
        max_price: sanitize_max(state.max_price),
    }
}

/// Filters `products` by `filters` and orders the survivors by price.
///
/// The input slice is never modified. Sorting is stable, so products with
/// equal prices keep their catalog order under both `asc` and `desc`;
/// [`SortOrder::Default`] keeps catalog order entirely.
#[must_use]
pub fn apply_filters(products: &[Product], filters: &FilterState) -> Vec<Product> {
    let mut filtered: Vec<Product> = products
        .iter()
        .filter(|product| filters.matches(product))
        .cloned()
        .collect();

    match filters.sort_order {
        SortOrder::Default => {}
        SortOrder::Asc => filtered.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortOrder::Desc => filtered.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }

    filtered
}

fn sanitize_min(value: Option<f64>) -> Option<f64> {
    value.filter(|p| p.is_finite() && *p > 0.0)
}

fn sanitize_max(value: Option<f64>) -> Option<f64> {
    // `abs` folds -0.0 into 0.0 so it prints as "0".
    value.filter(|p| p.is_finite() && *p >= 0.0).map(f64::abs)
}

#[cfg(test)]
#[path = "filters_test.rs"]
mod tests;
