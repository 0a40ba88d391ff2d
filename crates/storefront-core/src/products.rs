use serde::{Deserialize, Serialize};

/// A catalog product exactly as the upstream catalog API returns it.
///
/// Products are read-only inside the storefront: they are deserialized from
/// the API, filtered, sorted and rendered, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    /// Unit price in US dollars.
    pub price: f64,
    pub description: String,
    /// Category name as the API spells it, e.g. `"men's clothing"`.
    pub category: String,
    /// Absolute URL of the product photo.
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average review score, 0.0 to 5.0.
    pub rate: f64,
    pub count: u64,
}

impl Product {
    /// Price formatted for display, e.g. `"$109.95"`.
    #[must_use]
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}
