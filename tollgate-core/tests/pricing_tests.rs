//! Integration tests for the pricing filter engine.

use pretty_assertions::assert_eq;
use serde_json::json;
use tollgate_core::{
    FilterState, FilterValue, ModelRecord, PassthroughTranslator, PricingCatalog, PricingFacets,
    PricingGroups, PricingViewState, QuotaType, VendorChoice, apply_filters, compute_facets,
};

fn record(name: &str, vendor: Option<&str>, quota_type: u8) -> ModelRecord {
    serde_json::from_value(json!({
        "model_name": name,
        "vendor_name": vendor,
        "quota_type": quota_type,
    }))
    .unwrap()
}

fn three_records() -> Vec<ModelRecord> {
    vec![
        record("a", Some("A"), 0),
        record("b", Some("B"), 1),
        record("c", None, 0),
    ]
}

fn facets(records: &[ModelRecord], filters: &FilterState) -> PricingFacets {
    compute_facets(records, filters, &PricingGroups::default(), &PassthroughTranslator)
}

fn summary<T>(options: &[tollgate_core::FacetOption<T>]) -> Vec<(String, usize)> {
    options.iter().map(|o| (o.label.clone(), o.count)).collect()
}

#[test]
fn test_vendor_and_quota_facets() {
    let records = three_records();
    let result = facets(&records, &FilterState::default());

    assert_eq!(
        summary(&result.vendor),
        vec![
            ("All vendors".to_string(), 3),
            ("A".to_string(), 1),
            ("B".to_string(), 1),
            ("Unknown vendor".to_string(), 1),
        ]
    );
    assert_eq!(
        result.vendor.last().map(|o| o.value.clone()),
        Some(FilterValue::Only(VendorChoice::Unknown))
    );
    assert_eq!(
        result.quota_type.iter().map(|o| o.count).collect::<Vec<_>>(),
        vec![3, 2, 1]
    );
}

#[test]
fn test_quota_filter_keeps_order() {
    let records = three_records();
    let filters = FilterState {
        quota_type: FilterValue::Only(QuotaType::ByQuantity),
        ..FilterState::default()
    };

    let names: Vec<_> = apply_filters(&records, &filters)
        .into_iter()
        .map(|r| r.model_name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "c"]);
}

#[test]
fn test_tag_delimiters_and_case() {
    let records: Vec<ModelRecord> = serde_json::from_value(json!([
        {"model_name": "x", "tags": "Fast,NEW"},
        {"model_name": "y", "tags": "fast;new"},
        {"model_name": "z", "tags": "slow | Old"},
    ]))
    .unwrap();

    let filters = FilterState {
        tag: FilterValue::Only("new".to_string()),
        ..FilterState::default()
    };
    assert_eq!(apply_filters(&records, &filters).len(), 2);

    let tags = facets(&records, &FilterState::default()).tag;
    assert_eq!(
        summary(&tags),
        vec![
            ("All tags".to_string(), 3),
            ("fast".to_string(), 2),
            ("new".to_string(), 2),
            ("old".to_string(), 1),
            ("slow".to_string(), 1),
        ]
    );
}

#[test]
fn test_reset_reproduces_default_facets() {
    let records = three_records();
    let mut filters = FilterState {
        vendor: FilterValue::Only(VendorChoice::Named("A".to_string())),
        quota_type: FilterValue::Only(QuotaType::ByCount),
        search: "b".to_string(),
        ..FilterState::default()
    };
    filters.reset();

    assert_eq!(
        facets(&records, &filters),
        facets(&records, &FilterState::default())
    );
}

#[test]
fn test_quota_counts_sum_to_all() {
    let records = three_records();
    for filters in [
        FilterState::default(),
        FilterState {
            vendor: FilterValue::Only(VendorChoice::Unknown),
            ..FilterState::default()
        },
        FilterState {
            search: "a".to_string(),
            ..FilterState::default()
        },
    ] {
        let quota = facets(&records, &filters).quota_type;
        let sum: usize = quota[1..].iter().map(|o| o.count).sum();
        assert_eq!(sum, quota[0].count);
    }
}

#[test]
fn test_facets_are_deterministic() {
    let mut records = three_records();
    records.push(record("d", Some("a-lower"), 1));
    let forward = facets(&records, &FilterState::default());
    records.reverse();
    let reversed = facets(&records, &FilterState::default());
    assert_eq!(forward, reversed);
}

#[test]
fn test_catalog_to_facets() {
    let catalog: PricingCatalog = serde_json::from_value(json!({
        "success": true,
        "data": [
            {
                "model_name": "gpt",
                "vendor_name": "OpenAI",
                "enable_groups": ["default"],
                "quota_type": 0
            },
            {"model_name": "mj", "enable_groups": ["default", "vip"], "quota_type": 1}
        ],
        "group_ratio": {"vip": 2},
        "usable_group": {"default": "Default", "vip": "VIP", "": "none"}
    }))
    .unwrap();

    let filters = FilterState {
        group: FilterValue::Only("vip".to_string()),
        ..FilterState::default()
    };
    let result = compute_facets(&catalog.models, &filters, &catalog.groups, &PassthroughTranslator);

    assert_eq!(
        summary(&result.group),
        vec![
            ("All groups".to_string(), 2),
            ("default (x1)".to_string(), 2),
            ("vip (x2)".to_string(), 1),
        ]
    );
    // the vendor facet sees the group filter
    assert_eq!(result.vendor[0].count, 1);
}

#[test]
fn test_view_state_filter_change_resets_page() {
    let mut view = PricingViewState {
        current_page: 4,
        ..PricingViewState::default()
    };
    view.select_group(FilterValue::Only("vip".to_string()));
    assert_eq!(view.current_page, 1);

    view.current_page = 3;
    view.show_ratio = true;
    view.reset();
    assert_eq!(view, PricingViewState::default());
}
