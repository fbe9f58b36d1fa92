//! Canonical query strings for representative filter selections.

use chrono::NaiveDate;
use sauti_model::{Currency, DateRange, Dimension, FilterState};
use sauti_query::{ApiEndpoints, QueryVariant, query_string};

fn full_state() -> FilterState {
    let mut state = FilterState::new();
    state.set_currency(Currency::new("KES").unwrap());
    state.set_dimension(Dimension::Products, vec!["Dry Maize", "Beans"]);
    state.set_dimension(Dimension::Countries, vec!["KEN", "UGA"]);
    state.set_dimension(Dimension::ProductAggregators, "Maize");
    state.set_dimension(Dimension::Sources, "EAGC-RATIN");
    state.set_dimension(Dimension::Markets, "Busia");
    state.set_dimension(Dimension::ProductCategories, "Cereals");
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2020, 1, 31).unwrap();
    state
        .set_date_range(Some(DateRange::new(start, end).unwrap()))
        .unwrap();
    state
}

#[test]
fn test_default_state_query() {
    insta::assert_snapshot!(
        query_string(&FilterState::new(), QueryVariant::Count),
        @"?currency=USD"
    );
}

#[test]
fn test_fixed_field_order_regardless_of_edit_order() {
    insta::assert_snapshot!(
        query_string(&full_state(), QueryVariant::Paged { cursor: Some(12) }),
        @"?currency=KES&c=KEN&c=UGA&m=Busia&s=EAGC-RATIN&pcat=Cereals&pagg=Maize&p=Dry%20Maize&p=Beans&startDate=2020-01-01&endDate=2020-01-31&next=12"
    );
}

#[test]
fn test_export_query_omits_cursor() {
    insta::assert_snapshot!(
        query_string(&full_state(), QueryVariant::Export),
        @"?currency=KES&c=KEN&c=UGA&m=Busia&s=EAGC-RATIN&pcat=Cereals&pagg=Maize&p=Dry%20Maize&p=Beans&startDate=2020-01-01&endDate=2020-01-31"
    );
}

#[test]
fn test_request_urls_for_each_variant() {
    let endpoints = ApiEndpoints::new("http://localhost:8888/sauti/").unwrap();
    let mut state = FilterState::new();
    state.set_dimension(Dimension::Countries, "RWA");

    let count = endpoints.request_url(&state, QueryVariant::Count).unwrap();
    let paged = endpoints
        .request_url(&state, QueryVariant::Paged { cursor: Some(2) })
        .unwrap();
    let export = endpoints.request_url(&state, QueryVariant::Export).unwrap();

    assert_eq!(count.as_str(), "http://localhost:8888/sauti/client/?currency=USD&c=RWA");
    assert_eq!(
        paged.as_str(),
        "http://localhost:8888/sauti/client/?currency=USD&c=RWA&next=2"
    );
    assert_eq!(
        export.as_str(),
        "http://localhost:8888/sauti/client/export/?currency=USD&c=RWA"
    );
}
