use std::fmt::Write as _;

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use storefront_core::{encode_query_value, Product};

use super::layout::{document, esc, excerpt, Head, PreviewImage, SITE_NAME};
use crate::api::AppState;

const DESCRIPTION_MAX: usize = 160;

pub async fn detail_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<u64>() else {
        return product_not_found().into_response();
    };
    let Some(product) = state.catalog.product(id).await else {
        tracing::debug!(id, "detail: product not found");
        return product_not_found().into_response();
    };

    let head = Head {
        title: format!("{} | {SITE_NAME}", product.title),
        description: excerpt(&product.description, DESCRIPTION_MAX),
        url: Some(format!("{}/products/{}", state.config.site_url, product.id)),
        og_type: "product",
        image: state.config.og_images_enabled.then(|| PreviewImage {
            url: product_image_url(&state.config.site_url, &product),
            alt: product.title.clone(),
        }),
    };

    Html(document(&head, &render(&product))).into_response()
}

fn product_not_found() -> impl IntoResponse {
    super::not_found(
        "Product Not Found",
        "This product is unavailable or no longer exists.",
    )
}

/// Absolute preview-image URL; the price always carries two decimals.
pub fn product_image_url(site_url: &str, product: &Product) -> String {
    format!(
        "{site_url}/api/og?title={}&price={:.2}",
        encode_query_value(&product.title),
        product.price
    )
}

fn render(product: &Product) -> String {
    let mut out = String::new();
    out.push_str("<p><a href=\"/\">&larr; Back to products</a></p>\n");
    let _ = write!(
        out,
        concat!(
            "<article class=\"detail\">\n",
            "<img src=\"{image}\" alt=\"{title}\">\n",
            "<div>\n",
            "<span class=\"badge\">{category}</span>\n",
            "<h1>{title}</h1>\n",
        ),
        image = esc(&product.image),
        title = esc(&product.title),
        category = esc(&product.category),
    );

    if product.rating.count > 0 {
        let _ = writeln!(
            out,
            "<p class=\"rating\">&#9733; {:.1} ({} reviews)</p>",
            product.rating.rate, product.rating.count
        );
    }

    let _ = write!(
        out,
        concat!(
            "<p class=\"description\">{description}</p>\n",
            "<p class=\"price\">{price}</p>\n",
            "</div>\n</article>\n",
        ),
        description = esc(&product.description),
        price = product.display_price(),
    );
    out
}
