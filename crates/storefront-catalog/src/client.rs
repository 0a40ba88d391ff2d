//! HTTP client for the catalog REST API.
//!
//! Three read-only endpoints are used: the product list, a single product by
//! id, and the category list. Transient failures are retried with back-off;
//! everything else is surfaced as a typed [`CatalogError`].

use std::time::Duration;

use reqwest::{header::RETRY_AFTER, Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use storefront_core::{AppConfig, Product};

use crate::error::CatalogError;
use crate::retry::retry_with_backoff;

/// Client for the catalog REST API.
///
/// Use [`CatalogClient::new`] with the production base URL or point it at a
/// mock server in tests.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    /// Additional attempts after the first failure for retriable errors.
    max_retries: u32,
    backoff_base_ms: u64,
}

impl CatalogClient {
    /// Creates a client with retries disabled.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute http(s) URL, or [`CatalogError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so path segments append instead of
        // replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| CatalogError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "expected an absolute http(s) URL".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Builds a client from the application configuration, retries included.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Ok(Self::new(
            &config.catalog_base_url,
            config.catalog_timeout_secs,
            &config.catalog_user_agent,
        )?
        .with_retries(
            config.catalog_max_retries,
            config.catalog_retry_backoff_base_ms,
        ))
    }

    /// Enables retries: up to `max_retries` extra attempts, sleeping roughly
    /// `backoff_base_ms * 2^(n-1)` before the n-th.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Fetches the full product list (`GET /products`).
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] on network failure.
    /// - [`CatalogError::NotFound`], [`CatalogError::RateLimited`] or
    ///   [`CatalogError::UnexpectedStatus`] on a non-2xx response.
    /// - [`CatalogError::Deserialize`] if the body is not a product array.
    pub async fn get_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.endpoint(&["products"]);
        self.fetch_required(&url, "products").await
    }

    /// Fetches a single product (`GET /products/{id}`).
    ///
    /// Returns `Ok(None)` for a 404 and for an empty body; the public catalog
    /// answers unknown ids with `200` and nothing in it.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::get_products`], except that 404 is not an error.
    pub async fn get_product(&self, id: u64) -> Result<Option<Product>, CatalogError> {
        let url = self.endpoint(&["products", &id.to_string()]);
        let Some(body) = self.fetch_body(&url).await? else {
            return Ok(None);
        };
        if body.trim().is_empty() {
            return Ok(None);
        }
        decode(&body, &format!("product {id}")).map(Some)
    }

    /// Fetches the category names (`GET /products/categories`).
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::get_products`].
    pub async fn get_categories(&self) -> Result<Vec<String>, CatalogError> {
        let url = self.endpoint(&["products", "categories"]);
        self.fetch_required(&url, "categories").await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Cannot fail: `new` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch_required<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, CatalogError> {
        let body = self
            .fetch_body(url)
            .await?
            .ok_or_else(|| CatalogError::NotFound {
                url: url.to_string(),
            })?;
        decode(&body, context)
    }

    /// GETs `url` with retries. `Ok(None)` means 404.
    async fn fetch_body(&self, url: &Url) -> Result<Option<String>, CatalogError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.fetch_once(url)
        })
        .await
    }

    async fn fetch_once(&self, url: &Url) -> Result<Option<String>, CatalogError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            return Err(CatalogError::RateLimited {
                url: url.to_string(),
                retry_after_secs,
            });
        }
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(Some(response.text().await?))
    }
}

fn decode<T: DeserializeOwned>(body: &str, context: &str) -> Result<T, CatalogError> {
    serde_json::from_str(body).map_err(|e| CatalogError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}
