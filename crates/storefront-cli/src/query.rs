use serde::Serialize;
use storefront_core::{active_filter_labels, heading, query_to_state, state_to_query, AppConfig};

#[derive(Debug, Serialize, PartialEq)]
pub(crate) struct QueryReport {
    pub heading: String,
    pub filters: storefront_core::FilterState,
    pub canonical: String,
    pub labels: Vec<String>,
}

/// Reconciles `raw` with the configured filter toggles.
pub(crate) fn explain(config: &AppConfig, raw: &str) -> QueryReport {
    let filters = config.filters.restrict(query_to_state(raw));
    QueryReport {
        heading: heading(&filters),
        canonical: state_to_query(&filters),
        labels: active_filter_labels(&filters),
        filters,
    }
}

/// Print the normalized state for a raw query string. Never touches the
/// network.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub(crate) fn run_query(config: &AppConfig, raw: &str, json: bool) -> anyhow::Result<()> {
    let report = explain(config, raw);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let f = &report.filters;
    println!("heading:   {}", report.heading);
    println!("category:  {}", f.category);
    println!("sort:      {}", f.sort_order);
    println!(
        "price:     {} .. {}",
        f.min_price.map_or_else(|| "-".to_owned(), |v| v.to_string()),
        f.max_price.map_or_else(|| "-".to_owned(), |v| v.to_string())
    );
    if report.canonical.is_empty() {
        println!("canonical: /");
    } else {
        println!("canonical: /?{}", report.canonical);
    }
    for label in &report.labels {
        println!("  - {label}");
    }
    Ok(())
}
