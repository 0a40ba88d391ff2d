//! Router fixtures backed by a wiremock catalog.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use storefront_catalog::{CatalogClient, CatalogService};
use storefront_core::{AppConfig, Environment, FilterFeatures};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{build_app, AppState};

pub(crate) const SITE_URL: &str = "https://shop.example.com";

pub(crate) fn test_config(catalog_base_url: &str) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        log_level: "debug".to_owned(),
        site_url: SITE_URL.to_owned(),
        catalog_base_url: catalog_base_url.to_owned(),
        catalog_timeout_secs: 5,
        catalog_user_agent: "storefront-test".to_owned(),
        catalog_max_retries: 0,
        catalog_retry_backoff_base_ms: 1,
        cache_ttl_secs: 60,
        cache_refresh_cron: "0 0 * * * *".to_owned(),
        og_images_enabled: true,
        filters: FilterFeatures::default(),
    }
}

pub(crate) fn product_json(id: u64, title: &str, price: f64, category: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "price": price,
        "description": format!("Description of {title}"),
        "category": category,
        "image": format!("https://img.example.com/{id}.jpg"),
        "rating": { "rate": 4.1, "count": 120 }
    })
}

pub(crate) fn sample_products() -> Value {
    json!([
        product_json(1, "Fjallraven - Foldsack No. 1 Backpack", 109.95, "men's clothing"),
        product_json(2, "Mens Casual Premium Slim Fit T-Shirts", 22.3, "men's clothing"),
        product_json(5, "John Hardy Women's Chain Bracelet", 695.0, "jewelery"),
        product_json(9, "WD 2TB Elements Portable Hard Drive", 64.0, "electronics"),
        product_json(14, "Samsung 49-Inch Curved Gaming Monitor", 999.99, "electronics"),
    ])
}

/// Mounts the full catalog on a fresh mock server.
pub(crate) async fn mock_catalog() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_products()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "electronics",
            "jewelery",
            "men's clothing",
            "women's clothing"
        ])))
        .mount(&server)
        .await;

    if let Value::Array(products) = sample_products() {
        for product in products {
            let id = product["id"].as_u64().unwrap_or_default();
            Mock::given(method("GET"))
                .and(path(format!("/products/{id}")))
                .respond_with(ResponseTemplate::new(200).set_body_json(product))
                .mount(&server)
                .await;
        }
    }

    // The public catalog answers unknown ids with an empty 200.
    Mock::given(method("GET"))
        .and(path("/products/999"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    server
}

pub(crate) fn app_for(config: AppConfig) -> Router {
    let client = CatalogClient::new(
        &config.catalog_base_url,
        config.catalog_timeout_secs,
        &config.catalog_user_agent,
    )
    .expect("catalog client");
    let catalog = CatalogService::new(client, Duration::from_secs(config.cache_ttl_secs));
    build_app(AppState {
        catalog: Arc::new(catalog),
        config: Arc::new(config),
    })
}

pub(crate) async fn test_app() -> (MockServer, Router) {
    let server = mock_catalog().await;
    let app = app_for(test_config(&server.uri()));
    (server, app)
}

/// An app whose catalog refuses every connection.
pub(crate) fn unreachable_catalog_app() -> Router {
    let mut config = test_config("http://127.0.0.1:9");
    config.catalog_timeout_secs = 1;
    app_for(config)
}

pub(crate) struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub(crate) fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("json body")
    }

    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub(crate) async fn get(app: &Router, uri: &str) -> TestResponse {
    get_with_headers(app, uri, &[]).await
}

pub(crate) async fn get_with_headers(
    app: &Router,
    uri: &str,
    headers: &[(&str, &str)],
) -> TestResponse {
    let mut request = Request::builder().uri(uri);
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    let response = app
        .clone()
        .oneshot(request.body(Body::empty()).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}
