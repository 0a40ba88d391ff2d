use super::*;
use crate::products::Rating;

fn product(id: u64, price: f64, category: &str) -> Product {
    Product {
        id,
        title: format!("Product {id}"),
        price,
        description: String::new(),
        category: category.to_owned(),
        image: format!("https://example.com/{id}.png"),
        rating: Rating::default(),
    }
}

fn prices(products: &[Product]) -> Vec<f64> {
    products.iter().map(|p| p.price).collect()
}

fn ids(products: &[Product]) -> Vec<u64> {
    products.iter().map(|p| p.id).collect()
}

fn sample() -> Vec<Product> {
    vec![
        product(1, 10.0, "electronics"),
        product(2, 200.0, "jewelery"),
        product(3, 50.0, "electronics"),
    ]
}

// -----------------------------------------------------------------------
// apply_filters
// -----------------------------------------------------------------------

#[test]
fn price_window_with_ascending_sort() {
    let filters = FilterState {
        min_price: Some(20.0),
        max_price: Some(150.0),
        sort_order: SortOrder::Asc,
        ..FilterState::default()
    };
    assert_eq!(prices(&apply_filters(&sample(), &filters)), vec![50.0]);
}

#[test]
fn descending_sort_without_bounds() {
    let filters = FilterState {
        sort_order: SortOrder::Desc,
        ..FilterState::default()
    };
    assert_eq!(
        prices(&apply_filters(&sample(), &filters)),
        vec![200.0, 50.0, 10.0]
    );
}

#[test]
fn default_sort_keeps_catalog_order() {
    let result = apply_filters(&sample(), &FilterState::default());
    assert_eq!(ids(&result), vec![1, 2, 3]);
}

#[test]
fn bounds_are_inclusive() {
    let filters = FilterState {
        min_price: Some(10.0),
        max_price: Some(50.0),
        ..FilterState::default()
    };
    assert_eq!(ids(&apply_filters(&sample(), &filters)), vec![1, 3]);
}

#[test]
fn category_is_exact_and_case_sensitive() {
    let filters = FilterState {
        category: "electronics".to_owned(),
        ..FilterState::default()
    };
    assert_eq!(ids(&apply_filters(&sample(), &filters)), vec![1, 3]);

    let shouting = FilterState {
        category: "Electronics".to_owned(),
        ..FilterState::default()
    };
    assert!(apply_filters(&sample(), &shouting).is_empty());
}

#[test]
fn category_runs_before_price_filter() {
    let filters = FilterState {
        category: "electronics".to_owned(),
        min_price: Some(20.0),
        ..FilterState::default()
    };
    assert_eq!(ids(&apply_filters(&sample(), &filters)), vec![3]);
}

#[test]
fn equal_prices_keep_input_order_in_both_directions() {
    let products = vec![
        product(1, 30.0, "a"),
        product(2, 10.0, "a"),
        product(3, 30.0, "a"),
        product(4, 10.0, "a"),
    ];

    let asc = FilterState {
        sort_order: SortOrder::Asc,
        ..FilterState::default()
    };
    assert_eq!(ids(&apply_filters(&products, &asc)), vec![2, 4, 1, 3]);

    let desc = FilterState {
        sort_order: SortOrder::Desc,
        ..FilterState::default()
    };
    assert_eq!(ids(&apply_filters(&products, &desc)), vec![1, 3, 2, 4]);
}

#[test]
fn inverted_bounds_yield_nothing() {
    let filters = FilterState {
        min_price: Some(100.0),
        max_price: Some(20.0),
        ..FilterState::default()
    };
    assert!(apply_filters(&sample(), &filters).is_empty());
}

#[test]
fn invalid_bounds_are_ignored() {
    let filters = FilterState {
        min_price: Some(f64::NAN),
        max_price: Some(-5.0),
        ..FilterState::default()
    };
    assert_eq!(ids(&apply_filters(&sample(), &filters)), vec![1, 2, 3]);
}

#[test]
fn zero_max_keeps_only_free_products() {
    let products = vec![product(1, 0.0, "a"), product(2, 0.01, "a")];
    let filters = FilterState {
        max_price: Some(0.0),
        ..FilterState::default()
    };
    assert_eq!(ids(&apply_filters(&products, &filters)), vec![1]);
}

#[test]
fn input_is_not_mutated() {
    let products = sample();
    let before = products.clone();
    let filters = FilterState {
        sort_order: SortOrder::Desc,
        min_price: Some(20.0),
        ..FilterState::default()
    };
    let _ = apply_filters(&products, &filters);
    assert_eq!(products, before);
}

#[test]
fn filtering_twice_is_the_same_as_once() {
    let filters = FilterState {
        sort_order: SortOrder::Asc,
        max_price: Some(100.0),
        ..FilterState::default()
    };
    let once = apply_filters(&sample(), &filters);
    let twice = apply_filters(&once, &filters);
    assert_eq!(once, twice);
}

// -----------------------------------------------------------------------
// normalize
// -----------------------------------------------------------------------

#[test]
fn normalize_folds_defaults() {
    let state = FilterState {
        category: String::new(),
        sort_order: SortOrder::Default,
        min_price: Some(0.0),
        max_price: None,
    };
    assert_eq!(normalize(state), FilterState::default());
}

#[test]
fn normalize_drops_invalid_bounds() {
    let state = FilterState {
        min_price: Some(-1.0),
        max_price: Some(f64::INFINITY),
        ..FilterState::default()
    };
    let normalized = normalize(state);
    assert_eq!(normalized.min_price, None);
    assert_eq!(normalized.max_price, None);
}

#[test]
fn normalize_keeps_zero_max_and_clears_negative_zero_sign() {
    let state = FilterState {
        max_price: Some(-0.0),
        ..FilterState::default()
    };
    let normalized = normalize(state);
    let max = normalized.max_price.expect("zero max is a real bound");
    assert!(max.is_sign_positive());
}

#[test]
fn is_default_ignores_zero_minimum() {
    let state = FilterState {
        min_price: Some(0.0),
        ..FilterState::default()
    };
    assert!(state.is_default());
}

#[test]
fn sort_order_parses_known_values_only() {
    assert_eq!(SortOrder::from_param("asc"), SortOrder::Asc);
    assert_eq!(SortOrder::from_param("desc"), SortOrder::Desc);
    assert_eq!(SortOrder::from_param("default"), SortOrder::Default);
    assert_eq!(SortOrder::from_param("ASC"), SortOrder::Default);
    assert_eq!(SortOrder::from_param("price"), SortOrder::Default);
}

#[test]
fn filter_state_serializes_without_infinity() {
    let json = serde_json::to_value(FilterState::default()).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "category": "all",
            "sortOrder": "default",
            "minPrice": null,
            "maxPrice": null
        })
    );
}
