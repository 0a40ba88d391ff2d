use axum::{
    extract::{RawQuery, State},
    Extension, Json,
};
use serde::Serialize;
use storefront_core::{apply_filters, state_to_query, FilterState, Product};

use crate::middleware::RequestId;

use super::{ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct ProductListing {
    filters: FilterState,
    /// Canonical query string for `filters`, empty for the default state.
    query: String,
    total: usize,
    products: Vec<Product>,
}

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    RawQuery(raw): RawQuery,
) -> Json<ApiResponse<ProductListing>> {
    let filters = state.reconcile(raw.as_deref());
    let catalog = state.catalog.products().await;
    let products = apply_filters(&catalog, &filters);

    tracing::debug!(
        query = raw.as_deref().unwrap_or_default(),
        matched = products.len(),
        "api: listed products"
    );

    Json(ApiResponse::new(
        req_id.0,
        ProductListing {
            query: state_to_query(&filters),
            total: catalog.len(),
            filters,
            products,
        },
    ))
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<String>>> {
    let categories = state.catalog.categories().await;
    Json(ApiResponse::new(req_id.0, categories.as_ref().clone()))
}
