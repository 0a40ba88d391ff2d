//! Server-rendered HTML pages.

pub mod detail;
pub mod layout;
pub mod listing;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
};

use self::layout::{document, Head, SITE_NAME};

/// A 404 page with a heading and a link back to the listing.
pub(crate) fn not_found(title: &str, message: &str) -> impl IntoResponse {
    let head = Head {
        title: format!("{title} | {SITE_NAME}"),
        description: message.to_owned(),
        ..Head::default()
    };
    let body = format!(
        "<section class=\"empty\"><h1>{}</h1><p>{}</p><p><a href=\"/\">Back to all products</a></p></section>",
        layout::esc(title),
        layout::esc(message),
    );
    (StatusCode::NOT_FOUND, Html(document(&head, &body)))
}

pub async fn not_found_page() -> impl IntoResponse {
    not_found("Page Not Found", "We couldn't find the page you were looking for.")
}
