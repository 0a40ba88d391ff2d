//! Read-only access to the upstream product catalog API.
//!
//! [`CatalogClient`] is a thin typed wrapper over the HTTP endpoints.
//! [`CatalogService`] adds a TTL cache and the degradation policy the
//! storefront relies on: a failed refresh serves the last-known-good data,
//! or an empty collection if there never was any.

pub mod cache;
pub mod client;
pub mod error;
mod retry;
pub mod service;

pub use cache::TtlCache;
pub use client::CatalogClient;
pub use error::CatalogError;
pub use service::{CatalogService, MAX_CACHED_PRODUCTS};
