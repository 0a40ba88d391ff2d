use serde::Serialize;

use crate::filters::{normalize, FilterState};

/// A preset price window offered by the listing page's range selector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub label: &'static str,
    pub min: f64,
    /// `None` for the open-ended top bucket.
    pub max: Option<f64>,
}

/// Presets in display order.
pub static PRICE_RANGES: [PriceRange; 5] = [
    PriceRange {
        label: "Under $25",
        min: 0.0,
        max: Some(25.0),
    },
    PriceRange {
        label: "$25 to $50",
        min: 25.0,
        max: Some(50.0),
    },
    PriceRange {
        label: "$50 to $100",
        min: 50.0,
        max: Some(100.0),
    },
    PriceRange {
        label: "$100 to $500",
        min: 100.0,
        max: Some(500.0),
    },
    PriceRange {
        label: "$500 & above",
        min: 500.0,
        max: None,
    },
];

impl PriceRange {
    /// Returns `state` with both price bounds replaced by this preset.
    #[must_use]
    pub fn apply(&self, state: &FilterState) -> FilterState {
        normalize(FilterState {
            min_price: Some(self.min),
            max_price: self.max,
            ..state.clone()
        })
    }

    /// Returns `true` if `state`'s bounds are exactly this preset's.
    #[must_use]
    pub fn is_selected(&self, state: &FilterState) -> bool {
        let current = normalize(state.clone());
        let preset = self.apply(state);
        current.min_price == preset.min_price && current.max_price == preset.max_price
    }
}
