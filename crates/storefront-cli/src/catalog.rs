//! Commands that read the live catalog.

use std::fmt::Write as _;

use anyhow::Context as _;
use serde::Serialize;
use storefront_catalog::CatalogClient;
use storefront_core::{
    apply_filters, normalize, state_to_query, AppConfig, FilterFeatures, FilterState, Product,
    SortOrder, ALL_CATEGORIES,
};

const TITLE_WIDTH: usize = 50;

#[derive(Debug, Serialize)]
struct ProductsOutput<'a> {
    filters: &'a FilterState,
    query: String,
    total: usize,
    products: Vec<Product>,
}

/// Builds the reconciled listing state from command-line flags.
pub(crate) fn filters_from_args(
    features: &FilterFeatures,
    category: Option<String>,
    sort: Option<&str>,
    min_price: Option<f64>,
    max_price: Option<f64>,
) -> FilterState {
    features.restrict(normalize(FilterState {
        category: category.unwrap_or_else(|| ALL_CATEGORIES.to_owned()),
        sort_order: sort.map_or(SortOrder::Default, SortOrder::from_param),
        min_price,
        max_price,
    }))
}

fn client(config: &AppConfig) -> anyhow::Result<CatalogClient> {
    CatalogClient::from_config(config).context("failed to build catalog client")
}

/// Fetch, filter and print the product listing.
///
/// # Errors
///
/// Returns an error if the catalog cannot be reached or answers with
/// malformed data. The CLI does not fall back to cached data.
pub(crate) async fn run_products(
    config: &AppConfig,
    filters: &FilterState,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = client(config)?
        .get_products()
        .await
        .with_context(|| format!("failed to fetch products from {}", config.catalog_base_url))?;
    let products = apply_filters(&catalog, filters);
    let query = state_to_query(filters);
    tracing::debug!(total = catalog.len(), matched = products.len(), %query, "products fetched");

    if json {
        let output = ProductsOutput {
            filters,
            query,
            total: catalog.len(),
            products,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if products.is_empty() {
        println!("no products match these filters");
    } else {
        print!("{}", format_table(&products));
    }
    println!();
    println!("{} of {} products", products.len(), catalog.len());
    println!("query: {}", if query.is_empty() { "(none)" } else { &query });
    Ok(())
}

/// Print one product, or a not-found notice.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
pub(crate) async fn run_product(config: &AppConfig, id: u64, json: bool) -> anyhow::Result<()> {
    let product = client(config)?
        .get_product(id)
        .await
        .with_context(|| format!("failed to fetch product {id}"))?;

    match (product, json) {
        (None, _) => println!("product {id} not found"),
        (Some(product), true) => println!("{}", serde_json::to_string_pretty(&product)?),
        (Some(product), false) => print!("{}", format_product(&product)),
    }
    Ok(())
}

/// Print every category, one per line.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
pub(crate) async fn run_categories(config: &AppConfig) -> anyhow::Result<()> {
    let categories = client(config)?
        .get_categories()
        .await
        .context("failed to fetch categories")?;
    for category in categories {
        println!("{category}");
    }
    Ok(())
}

pub(crate) fn format_table(products: &[Product]) -> String {
    let mut out = format!("{:<6}{:>10}  {:<18}TITLE\n", "ID", "PRICE", "CATEGORY");
    for product in products {
        let title = if product.title.chars().count() > TITLE_WIDTH {
            format!("{}...", product.title.chars().take(TITLE_WIDTH).collect::<String>())
        } else {
            product.title.clone()
        };
        let _ = writeln!(
            out,
            "{:<6}{:>10}  {:<18}{}",
            product.id,
            product.display_price(),
            product.category,
            title
        );
    }
    out
}

pub(crate) fn format_product(product: &Product) -> String {
    format!(
        "{title}\n{price}  |  {category}  |  rating {rate:.1} ({count} reviews)\n\n{description}\n",
        title = product.title,
        price = product.display_price(),
        category = product.category,
        rate = product.rating.rate,
        count = product.rating.count,
        description = product.description,
    )
}
