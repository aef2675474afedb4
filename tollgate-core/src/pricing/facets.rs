//! Facet options and per-option match counts.
//!
//! Each dimension is counted against its own baseline: the records that
//! pass every filter except that dimension. Selecting a vendor therefore
//! narrows the tag counts but leaves every vendor option countable.

use serde::Serialize;

use super::collate::sorted_unique;
use super::filter::{Dimension, filter_except, has_tag};
use crate::models::{
    FilterState, FilterValue, ModelRecord, PricingGroups, QuotaType, VendorChoice, normalize_tags,
};
use crate::traits::Translator;

/// One selectable option in a facet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetOption<T> {
    /// Value stored into the filter when the option is picked.
    pub value: FilterValue<T>,
    /// Display label.
    pub label: String,
    /// Matching records in the dimension's baseline.
    pub count: usize,
    /// The option matches nothing and cannot be picked.
    pub disabled: bool,
}

impl<T> FacetOption<T> {
    fn new(value: FilterValue<T>, label: String, count: usize) -> Self {
        Self {
            value,
            label,
            count,
            disabled: count == 0,
        }
    }

    fn all(label: String, count: usize) -> Self {
        // "all" stays pickable even when the baseline is empty
        Self {
            disabled: false,
            ..Self::new(FilterValue::All, label, count)
        }
    }
}

/// Option lists for every dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingFacets {
    /// Vendor options, with the unknown bucket last.
    pub vendor: Vec<FacetOption<VendorChoice>>,
    /// Normalized tag options.
    pub tag: Vec<FacetOption<String>>,
    /// Configured group options.
    pub group: Vec<FacetOption<String>>,
    /// Billing mode options.
    pub quota_type: Vec<FacetOption<QuotaType>>,
    /// Endpoint type options.
    pub endpoint_type: Vec<FacetOption<String>>,
}

/// Computes every facet for the current selections.
///
/// Option values come from `records` as a whole, so options never vanish
/// while other filters are active; only their counts change.
pub fn compute_facets<T>(
    records: &[ModelRecord],
    filters: &FilterState,
    groups: &PricingGroups,
    translator: &T,
) -> PricingFacets
where
    T: Translator + ?Sized,
{
    PricingFacets {
        vendor: vendor_facet(records, filters, translator),
        tag: tag_facet(records, filters, translator),
        group: group_facet(records, filters, groups, translator),
        quota_type: quota_type_facet(records, filters, translator),
        endpoint_type: endpoint_type_facet(records, filters, translator),
    }
}

fn vendor_facet<T>(
    records: &[ModelRecord],
    filters: &FilterState,
    translator: &T,
) -> Vec<FacetOption<VendorChoice>>
where
    T: Translator + ?Sized,
{
    let baseline = filter_except(records, filters, Some(Dimension::Vendor));
    let vendors = sorted_unique(records.iter().filter_map(|r| r.vendor().map(String::from)));

    let mut options = vec![FacetOption::all(
        translator.translate("All vendors"),
        baseline.len(),
    )];
    for vendor in vendors {
        let count = baseline
            .iter()
            .filter(|r| r.vendor() == Some(vendor.as_str()))
            .count();
        options.push(FacetOption::new(
            FilterValue::Only(VendorChoice::Named(vendor.clone())),
            vendor,
            count,
        ));
    }

    if records.iter().any(|r| r.vendor().is_none()) {
        let count = baseline.iter().filter(|r| r.vendor().is_none()).count();
        options.push(FacetOption::new(
            FilterValue::Only(VendorChoice::Unknown),
            translator.translate("Unknown vendor"),
            count,
        ));
    }
    options
}

fn tag_facet<T>(
    records: &[ModelRecord],
    filters: &FilterState,
    translator: &T,
) -> Vec<FacetOption<String>>
where
    T: Translator + ?Sized,
{
    let baseline = filter_except(records, filters, Some(Dimension::Tag));
    let tags = sorted_unique(
        records
            .iter()
            .filter_map(|r| r.tags.as_deref())
            .flat_map(normalize_tags),
    );

    let mut options = vec![FacetOption::all(
        translator.translate("All tags"),
        baseline.len(),
    )];
    options.extend(tags.into_iter().map(|tag| {
        let count = baseline.iter().filter(|r| has_tag(r, &tag)).count();
        FacetOption::new(FilterValue::Only(tag.clone()), tag, count)
    }));
    options
}

fn group_facet<T>(
    records: &[ModelRecord],
    filters: &FilterState,
    groups: &PricingGroups,
    translator: &T,
) -> Vec<FacetOption<String>>
where
    T: Translator + ?Sized,
{
    let baseline = filter_except(records, filters, Some(Dimension::Group));

    let mut options = vec![FacetOption::all(
        translator.translate("All groups"),
        baseline.len(),
    )];
    options.extend(groups.keys().map(|group| {
        let count = baseline
            .iter()
            .filter(|r| r.enable_groups.iter().any(|g| g == group))
            .count();
        let label = format!("{group} ({})", groups.ratio_text(group));
        FacetOption::new(FilterValue::Only(group.to_string()), label, count)
    }));
    options
}

fn quota_type_facet<T>(
    records: &[ModelRecord],
    filters: &FilterState,
    translator: &T,
) -> Vec<FacetOption<QuotaType>>
where
    T: Translator + ?Sized,
{
    let baseline = filter_except(records, filters, Some(Dimension::QuotaType));

    let mut options = vec![FacetOption::all(
        translator.translate("All types"),
        baseline.len(),
    )];
    options.extend(QuotaType::all().iter().map(|quota_type| {
        let count = baseline
            .iter()
            .filter(|r| r.quota_type == Some(*quota_type))
            .count();
        FacetOption::new(
            FilterValue::Only(*quota_type),
            translator.translate(quota_type.label_key()),
            count,
        )
    }));
    options
}

fn endpoint_type_facet<T>(
    records: &[ModelRecord],
    filters: &FilterState,
    translator: &T,
) -> Vec<FacetOption<String>>
where
    T: Translator + ?Sized,
{
    let baseline = filter_except(records, filters, Some(Dimension::EndpointType));
    let endpoints = sorted_unique(
        records
            .iter()
            .flat_map(|r| r.supported_endpoint_types.iter().cloned()),
    );

    let mut options = vec![FacetOption::all(
        translator.translate("All endpoints"),
        baseline.len(),
    )];
    options.extend(endpoints.into_iter().map(|endpoint| {
        let count = baseline
            .iter()
            .filter(|r| r.supported_endpoint_types.contains(&endpoint))
            .count();
        FacetOption::new(FilterValue::Only(endpoint.clone()), endpoint, count)
    }));
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::PassthroughTranslator;

    fn counts<T>(options: &[FacetOption<T>]) -> Vec<(String, usize)> {
        options.iter().map(|o| (o.label.clone(), o.count)).collect()
    }

    fn record(vendor: Option<&str>, groups: &[&str]) -> ModelRecord {
        ModelRecord {
            vendor_name: vendor.map(String::from),
            enable_groups: groups.iter().map(|g| (*g).to_string()).collect(),
            ..ModelRecord::new("m")
        }
    }

    #[test]
    fn test_selected_dimension_keeps_its_own_counts() {
        let records = vec![record(Some("A"), &[]), record(Some("B"), &[])];
        let filters = FilterState {
            vendor: FilterValue::Only(VendorChoice::Named("A".into())),
            ..FilterState::default()
        };
        let facets = compute_facets(
            &records,
            &filters,
            &PricingGroups::default(),
            &PassthroughTranslator,
        );
        assert_eq!(
            counts(&facets.vendor),
            vec![("All vendors".into(), 2), ("A".into(), 1), ("B".into(), 1)]
        );
        // other dimensions see the vendor filter
        assert_eq!(facets.tag[0].count, 1);
    }

    #[test]
    fn test_zero_count_option_disabled() {
        let records = vec![record(Some("A"), &[]), record(Some("B"), &[])];
        let filters = FilterState {
            search: "nothing-matches".into(),
            ..FilterState::default()
        };
        let facets = compute_facets(
            &records,
            &filters,
            &PricingGroups::default(),
            &PassthroughTranslator,
        );
        assert!(!facets.vendor[0].disabled);
        assert!(facets.vendor[1..].iter().all(|o| o.disabled));
    }

    #[test]
    fn test_group_universe_is_configured_keys() {
        let mut groups = PricingGroups::default();
        groups.usable.insert("default".into(), "Default".into());
        groups.usable.insert("vip".into(), "VIP".into());
        groups.usable.insert(String::new(), "hidden".into());
        groups.ratios.insert("vip".into(), 0.5);

        let records = vec![
            record(None, &["default", "ghost"]),
            record(None, &["default", "vip"]),
        ];
        let facets =
            compute_facets(&records, &FilterState::default(), &groups, &PassthroughTranslator);

        assert_eq!(
            counts(&facets.group),
            vec![
                ("All groups".into(), 2),
                ("default (x1)".into(), 2),
                ("vip (x0.5)".into(), 1),
            ]
        );
        assert_eq!(facets.group[2].value, FilterValue::Only("vip".to_string()));
    }

    #[test]
    fn test_unknown_vendor_only_when_present() {
        let records = vec![record(Some("A"), &[])];
        let facets = compute_facets(
            &records,
            &FilterState::default(),
            &PricingGroups::default(),
            &PassthroughTranslator,
        );
        assert_eq!(facets.vendor.len(), 2);
    }

    #[test]
    fn test_quota_domain_is_fixed() {
        let facets = compute_facets(
            &[],
            &FilterState::default(),
            &PricingGroups::default(),
            &PassthroughTranslator,
        );
        assert_eq!(
            counts(&facets.quota_type),
            vec![
                ("All types".into(), 0),
                ("Pay per token".into(), 0),
                ("Pay per request".into(), 0),
            ]
        );
    }
}
