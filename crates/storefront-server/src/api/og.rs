use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};
use storefront_core::first_query_value;

use crate::middleware::RequestId;
use crate::og;

use super::{ApiError, AppState};

pub(super) async fn product_image(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Result<Response, ApiError> {
    ensure_enabled(&state, &req_id)?;
    let raw = raw.unwrap_or_default();
    let title = first_query_value(&raw, "title");
    let price = first_query_value(&raw, "price");
    let image = og::product::render(title.as_deref(), price.as_deref());
    Ok(svg_response(&headers, image))
}

pub(super) async fn listing_image(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Result<Response, ApiError> {
    ensure_enabled(&state, &req_id)?;
    let filters = state.reconcile(raw.as_deref());
    Ok(svg_response(&headers, og::listing::render(&filters)))
}

fn ensure_enabled(state: &AppState, req_id: &RequestId) -> Result<(), ApiError> {
    if state.config.og_images_enabled {
        Ok(())
    } else {
        Err(ApiError::new(
            req_id.0.clone(),
            "not_found",
            "preview images are disabled",
        ))
    }
}

fn svg_response(request_headers: &HeaderMap, image: String) -> Response {
    let etag = og::etag(&image);
    let cached = request_headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| og::matches_etag(v, &etag));

    let cache_headers = [
        (header::ETAG, etag),
        (header::CACHE_CONTROL, og::CACHE_CONTROL.to_owned()),
    ];

    if cached {
        return (StatusCode::NOT_MODIFIED, cache_headers).into_response();
    }
    (
        StatusCode::OK,
        cache_headers,
        [(header::CONTENT_TYPE, og::CONTENT_TYPE)],
        image,
    )
        .into_response()
}
