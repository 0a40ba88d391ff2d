//! Cached, failure-tolerant view of the catalog.
//!
//! The storefront never shows an upstream error to shoppers. Every read goes
//! through the cache first; when the entry is expired and the refetch fails,
//! the previous value is served, and when there is no previous value the
//! result is empty (`None` for a single product).

use std::sync::Arc;
use std::time::{Duration, Instant};

use storefront_core::{AppConfig, Product};

use crate::cache::TtlCache;
use crate::client::CatalogClient;
use crate::error::CatalogError;

/// Upper bound on single-product lookups kept in memory, hits and misses alike.
pub const MAX_CACHED_PRODUCTS: usize = 512;

pub struct CatalogService {
    client: CatalogClient,
    products: TtlCache<(), Arc<Vec<Product>>>,
    categories: TtlCache<(), Arc<Vec<String>>>,
    product_by_id: TtlCache<u64, Option<Product>>,
}

impl CatalogService {
    #[must_use]
    pub fn new(client: CatalogClient, ttl: Duration) -> Self {
        Self {
            client,
            products: TtlCache::new(ttl),
            categories: TtlCache::new(ttl),
            product_by_id: TtlCache::bounded(ttl, MAX_CACHED_PRODUCTS),
        }
    }

    /// Builds the client and cache from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Ok(Self::new(
            CatalogClient::from_config(config)?,
            Duration::from_secs(config.cache_ttl_secs),
        ))
    }

    /// All products, in catalog order.
    pub async fn products(&self) -> Arc<Vec<Product>> {
        if let Some(hit) = self.products.get_fresh(&(), Instant::now()).await {
            return hit;
        }
        match self.client.get_products().await {
            Ok(products) => {
                let products = Arc::new(products);
                self.products
                    .insert((), Arc::clone(&products), Instant::now())
                    .await;
                products
            }
            Err(err) => {
                let stale = self.products.get_stale(&()).await;
                tracing::warn!(
                    error = %err,
                    has_fallback = stale.is_some(),
                    "catalog products fetch failed; serving last-known-good"
                );
                stale.unwrap_or_default()
            }
        }
    }

    /// Category names as the catalog spells them.
    pub async fn categories(&self) -> Arc<Vec<String>> {
        if let Some(hit) = self.categories.get_fresh(&(), Instant::now()).await {
            return hit;
        }
        match self.client.get_categories().await {
            Ok(categories) => {
                let categories = Arc::new(categories);
                self.categories
                    .insert((), Arc::clone(&categories), Instant::now())
                    .await;
                categories
            }
            Err(err) => {
                let stale = self.categories.get_stale(&()).await;
                tracing::warn!(
                    error = %err,
                    has_fallback = stale.is_some(),
                    "catalog categories fetch failed; serving last-known-good"
                );
                stale.unwrap_or_default()
            }
        }
    }

    /// One product by id, or `None` if the catalog does not know it or is
    /// unreachable with nothing cached.
    pub async fn product(&self, id: u64) -> Option<Product> {
        if let Some(hit) = self.product_by_id.get_fresh(&id, Instant::now()).await {
            return hit;
        }
        match self.client.get_product(id).await {
            Ok(product) => {
                self.product_by_id
                    .insert(id, product.clone(), Instant::now())
                    .await;
                product
            }
            Err(err) => {
                tracing::warn!(product_id = id, error = %err, "catalog product fetch failed");
                self.product_by_id.get_stale(&id).await.flatten()
            }
        }
    }

    /// Re-fetches the product list and categories, bypassing freshness.
    ///
    /// Cached values are only replaced on success, so a failed refresh leaves
    /// the last-known-good data in place.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] encountered.
    pub async fn refresh(&self) -> Result<usize, CatalogError> {
        let (products, categories) =
            tokio::join!(self.client.get_products(), self.client.get_categories());
        let now = Instant::now();

        if let Ok(categories) = &categories {
            self.categories
                .insert((), Arc::new(categories.clone()), now)
                .await;
        }
        let products = products?;
        let count = products.len();
        self.products.insert((), Arc::new(products), now).await;
        categories.map(|_| count)
    }
}
