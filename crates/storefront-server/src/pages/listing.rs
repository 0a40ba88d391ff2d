//! The product listing at `/`.
//!
//! Every request is reconciled first. A query that is not already canonical
//! (extra parameters, default values, a different parameter order, an empty
//! form field) is answered with `303 See Other` to its canonical URL, so each
//! distinct listing has exactly one address and one preview image.

use std::fmt::Write as _;

use axum::{
    extract::{RawQuery, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use storefront_core::{
    active_filter_labels, apply_filters, heading, state_to_query, FilterFeatures, FilterState,
    Product, SortOrder, ALL_CATEGORIES, PRICE_RANGES,
};

use super::layout::{document, esc, Head, PreviewImage, SITE_NAME};
use crate::api::AppState;

/// Relative URL of the listing for a canonical query string.
pub fn listing_href(canonical_query: &str) -> String {
    if canonical_query.is_empty() {
        "/".to_owned()
    } else {
        format!("/?{canonical_query}")
    }
}

pub async fn listing_page(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    let filters = state.reconcile(raw.as_deref());
    let canonical = state_to_query(&filters);
    let raw = raw.unwrap_or_default();

    if raw != canonical {
        tracing::debug!(from = %raw, to = %canonical, "listing: redirecting to canonical query");
        return Redirect::to(&listing_href(&canonical)).into_response();
    }

    let (products, categories) = tokio::join!(state.catalog.products(), state.catalog.categories());
    let matched = apply_filters(&products, &filters);

    let view = ListingView {
        filters: &filters,
        features: &state.config.filters,
        categories: &categories,
        matched: &matched,
        total: products.len(),
    };

    let title = heading(&filters);
    let labels = active_filter_labels(&filters);
    let description = if labels.is_empty() {
        format!("Browse {} products at {SITE_NAME}.", products.len())
    } else {
        format!("{title}: {}.", labels.join(", "))
    };
    let head = Head {
        title: format!("{title} | {SITE_NAME}"),
        description,
        url: Some(format!("{}{}", state.config.site_url, listing_href(&canonical))),
        og_type: "website",
        image: state.config.og_images_enabled.then(|| PreviewImage {
            url: listing_image_url(&state.config.site_url, &canonical),
            alt: format!("{title} at {SITE_NAME}"),
        }),
    };

    Html(document(&head, &view.render())).into_response()
}

fn listing_image_url(site_url: &str, canonical: &str) -> String {
    if canonical.is_empty() {
        format!("{site_url}/api/og/list")
    } else {
        format!("{site_url}/api/og/list?{canonical}")
    }
}

struct ListingView<'a> {
    filters: &'a FilterState,
    features: &'a FilterFeatures,
    categories: &'a [String],
    matched: &'a [Product],
    total: usize,
}

impl ListingView<'_> {
    fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "<h1>{}</h1>", esc(&heading(self.filters)));

        if self.features.any_enabled() {
            self.render_form(&mut out);
        }
        if self.features.price {
            self.render_price_ranges(&mut out);
        }
        self.render_active_filters(&mut out);

        let _ = writeln!(
            out,
            "<p class=\"count\">Showing {} of {} products</p>",
            self.matched.len(),
            self.total
        );

        if self.matched.is_empty() {
            out.push_str(if self.total == 0 {
                "<section class=\"empty\"><p>No products are available right now. Please check back soon.</p></section>\n"
            } else {
                "<section class=\"empty\"><p>No products match these filters.</p><p><a href=\"/\">Clear filters</a></p></section>\n"
            });
        } else {
            out.push_str("<section class=\"grid\">\n");
            for product in self.matched {
                render_card(&mut out, product);
            }
            out.push_str("</section>\n");
        }
        out
    }

    fn render_form(&self, out: &mut String) {
        out.push_str("<form class=\"filters\" method=\"get\" action=\"/\">\n");

        if self.features.category {
            out.push_str("<label>Category<select name=\"category\">");
            option(out, ALL_CATEGORIES, "All categories", !self.filters.has_category());
            for category in self.categories {
                option(
                    out,
                    category,
                    &storefront_core::capitalize(category),
                    self.filters.category == *category,
                );
            }
            out.push_str("</select></label>\n");
        }

        if self.features.sort {
            out.push_str("<label>Sort by<select name=\"sort\">");
            for (order, label) in [
                (SortOrder::Default, "Featured"),
                (SortOrder::Asc, "Price: Low to High"),
                (SortOrder::Desc, "Price: High to Low"),
            ] {
                option(out, order.as_str(), label, self.filters.sort_order == order);
            }
            out.push_str("</select></label>\n");
        }

        if self.features.price {
            let ceiling = self.features.price_ceiling;
            for (name, label, value) in [
                ("minPrice", "Min price", self.filters.min_price),
                ("maxPrice", "Max price", self.filters.max_price),
            ] {
                let value = value.map(|v| v.to_string()).unwrap_or_default();
                let _ = writeln!(
                    out,
                    "<label>{label}<input type=\"number\" name=\"{name}\" min=\"0\" max=\"{ceiling}\" step=\"0.01\" value=\"{value}\"></label>"
                );
            }
        }

        out.push_str("<button type=\"submit\">Apply</button>\n");
        if !self.filters.is_default() {
            out.push_str("<a href=\"/\">Clear all</a>\n");
        }
        out.push_str("</form>\n");
    }

    fn render_price_ranges(&self, out: &mut String) {
        out.push_str("<nav class=\"ranges\" aria-label=\"Price ranges\">\n");
        for range in &PRICE_RANGES {
            let href = listing_href(&state_to_query(&range.apply(self.filters)));
            let class = if range.is_selected(self.filters) {
                " class=\"selected\""
            } else {
                ""
            };
            let _ = writeln!(out, "<a href=\"{}\"{class}>{}</a>", esc(&href), esc(range.label));
        }
        out.push_str("</nav>\n");
    }

    fn render_active_filters(&self, out: &mut String) {
        let labels = active_filter_labels(self.filters);
        if labels.is_empty() {
            return;
        }
        out.push_str("<div class=\"chips\" aria-label=\"Active filters\">");
        for label in labels {
            let _ = write!(out, "<span class=\"chip\">{}</span>", esc(&label));
        }
        out.push_str("</div>\n");
    }
}

fn option(out: &mut String, value: &str, label: &str, selected: bool) {
    let selected = if selected { " selected" } else { "" };
    let _ = write!(
        out,
        "<option value=\"{}\"{selected}>{}</option>",
        esc(value),
        esc(label)
    );
}

fn render_card(out: &mut String, product: &Product) {
    let _ = writeln!(
        out,
        concat!(
            "<a class=\"card\" href=\"/products/{id}\">",
            "<img src=\"{image}\" alt=\"{title}\" loading=\"lazy\">",
            "<span class=\"badge\">{category}</span>",
            "<h2>{title}</h2>",
            "<span class=\"price\">{price}</span>",
            "</a>"
        ),
        id = product.id,
        image = esc(&product.image),
        title = esc(&product.title),
        category = esc(&product.category),
        price = product.display_price(),
    );
}
