//! Record predicates and result filtering.

use serde::{Deserialize, Serialize};

use crate::models::{FilterState, ModelRecord, normalize_tags};

/// A filterable dimension of the pricing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Vendor name.
    Vendor,
    /// Free-text tags.
    Tag,
    /// Token group membership.
    Group,
    /// Billing mode.
    QuotaType,
    /// Endpoint type.
    EndpointType,
}

impl Dimension {
    /// Returns all dimensions in sidebar order.
    pub fn all() -> &'static [Dimension] {
        &[
            Self::Vendor,
            Self::Tag,
            Self::Group,
            Self::QuotaType,
            Self::EndpointType,
        ]
    }
}

/// Returns the records matching every filter, in their original order.
pub fn apply_filters<'a>(
    records: &'a [ModelRecord],
    filters: &FilterState,
) -> Vec<&'a ModelRecord> {
    filter_except(records, filters, None)
}

/// Returns the records matching every filter except `skip`.
///
/// This is the baseline a facet counts against.
pub fn filter_except<'a>(
    records: &'a [ModelRecord],
    filters: &FilterState,
    skip: Option<Dimension>,
) -> Vec<&'a ModelRecord> {
    let search = filters.search.trim().to_lowercase();
    records
        .iter()
        .filter(|record| matches_search(record, &search))
        .filter(|record| {
            Dimension::all()
                .iter()
                .filter(|d| Some(**d) != skip)
                .all(|d| matches_dimension(record, filters, *d))
        })
        .collect()
}

/// Returns true if `record` satisfies the filter on one dimension.
pub fn matches_dimension(
    record: &ModelRecord,
    filters: &FilterState,
    dimension: Dimension,
) -> bool {
    match dimension {
        Dimension::Vendor => filters
            .vendor
            .as_only()
            .is_none_or(|choice| choice.matches(record.vendor())),
        Dimension::Tag => filters
            .tag
            .as_only()
            .is_none_or(|tag| has_tag(record, tag)),
        Dimension::Group => filters
            .group
            .as_only()
            .is_none_or(|group| record.enable_groups.iter().any(|g| g == group)),
        Dimension::QuotaType => filters
            .quota_type
            .as_only()
            .is_none_or(|quota_type| record.quota_type == Some(*quota_type)),
        Dimension::EndpointType => filters
            .endpoint_type
            .as_only()
            .is_none_or(|endpoint| record.supported_endpoint_types.iter().any(|e| e == endpoint)),
    }
}

/// Returns true if the record carries `tag`, compared after normalization.
pub fn has_tag(record: &ModelRecord, tag: &str) -> bool {
    let wanted = tag.trim().to_lowercase();
    record
        .tags
        .as_deref()
        .is_some_and(|raw| normalize_tags(raw).contains(&wanted))
}

/// Case-insensitive substring search over model name and vendor.
///
/// `keyword` must already be trimmed and lower-cased; empty matches all.
fn matches_search(record: &ModelRecord, keyword: &str) -> bool {
    if keyword.is_empty() {
        return true;
    }
    record.model_name.to_lowercase().contains(keyword)
        || record
            .vendor()
            .is_some_and(|vendor| vendor.to_lowercase().contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FilterValue, QuotaType, VendorChoice};

    fn record(name: &str, vendor: Option<&str>, tags: Option<&str>) -> ModelRecord {
        ModelRecord {
            vendor_name: vendor.map(String::from),
            tags: tags.map(String::from),
            ..ModelRecord::new(name)
        }
    }

    #[test]
    fn test_tag_match_is_delimiter_agnostic() {
        let a = record("a", None, Some("Fast,NEW"));
        let b = record("b", None, Some("fast;new"));
        assert!(has_tag(&a, "new"));
        assert!(has_tag(&b, "new"));
        assert!(has_tag(&a, " NEW "));
        assert!(!has_tag(&record("c", None, None), "new"));
    }

    #[test]
    fn test_search_name_or_vendor() {
        let records = vec![
            record("gpt-4o", Some("OpenAI"), None),
            record("claude-3", Some("Anthropic"), None),
            record("mystery", None, None),
        ];
        let mut filters = FilterState::default();

        filters.search = "  GPT ".into();
        assert_eq!(apply_filters(&records, &filters).len(), 1);

        filters.search = "anthro".into();
        assert_eq!(apply_filters(&records, &filters)[0].model_name, "claude-3");
    }

    #[test]
    fn test_unknown_vendor_filter() {
        let records = vec![
            record("a", Some("A"), None),
            record("b", Some(""), None),
            record("c", None, None),
        ];
        let filters = FilterState {
            vendor: FilterValue::Only(VendorChoice::Unknown),
            ..FilterState::default()
        };
        let names: Vec<_> = apply_filters(&records, &filters)
            .iter()
            .map(|r| r.model_name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "c"]);
    }

    #[test]
    fn test_missing_quota_type_never_matches() {
        let records = vec![record("a", None, None)];
        let filters = FilterState {
            quota_type: FilterValue::Only(QuotaType::ByQuantity),
            ..FilterState::default()
        };
        assert!(apply_filters(&records, &filters).is_empty());
    }

    #[test]
    fn test_filter_except_skips_dimension() {
        let mut a = record("a", Some("A"), None);
        a.quota_type = Some(QuotaType::ByCount);
        let records = vec![a];
        let filters = FilterState {
            quota_type: FilterValue::Only(QuotaType::ByQuantity),
            ..FilterState::default()
        };
        assert!(apply_filters(&records, &filters).is_empty());
        assert_eq!(filter_except(&records, &filters, Some(Dimension::QuotaType)).len(), 1);
    }
}
