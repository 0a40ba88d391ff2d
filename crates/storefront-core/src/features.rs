use crate::filters::{normalize, FilterState, SortOrder, ALL_CATEGORIES};

/// Which listing filters the storefront exposes.
///
/// A disabled dimension is neither rendered nor honoured: [`restrict`]
/// resets it to its default before the state reaches the reconciler.
///
/// [`restrict`]: FilterFeatures::restrict
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterFeatures {
    pub category: bool,
    pub sort: bool,
    pub price: bool,
    /// Largest value the price inputs offer. Not a filter bound.
    pub price_ceiling: f64,
}

impl Default for FilterFeatures {
    fn default() -> Self {
        Self {
            category: true,
            sort: true,
            price: true,
            price_ceiling: 1000.0,
        }
    }
}

impl FilterFeatures {
    #[must_use]
    pub fn restrict(&self, state: FilterState) -> FilterState {
        let mut state = normalize(state);
        if !self.category {
            ALL_CATEGORIES.clone_into(&mut state.category);
        }
        if !self.sort {
            state.sort_order = SortOrder::Default;
        }
        if !self.price {
            state.min_price = None;
            state.max_price = None;
        }
        state
    }

    /// Returns `true` if at least one filter control should be rendered.
    #[must_use]
    pub fn any_enabled(&self) -> bool {
        self.category || self.sort || self.price
    }
}
