//! Domain types and the filter reconciler shared by every storefront surface.
//!
//! Nothing in this crate performs I/O. The server, the CLI, and the preview
//! image renderer all call the same [`apply_filters`], [`state_to_query`] and
//! [`query_to_state`] so the listing logic exists in exactly one place.

pub mod app_config;
pub mod config;
pub mod features;
pub mod filters;
pub mod price_range;
pub mod products;
pub mod query;
pub mod summary;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config_from_env, DEFAULT_CATALOG_BASE_URL};
pub use features::FilterFeatures;
pub use filters::{apply_filters, normalize, FilterState, SortOrder, ALL_CATEGORIES};
pub use price_range::{PriceRange, PRICE_RANGES};
pub use products::{Product, Rating};
pub use query::{
    encode_query_value, first_query_value, query_pairs, query_to_state, state_to_query,
};
pub use summary::{active_filter_labels, capitalize, heading};

/// Every setting has a default, so the only failure is a value that is set
/// but cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
