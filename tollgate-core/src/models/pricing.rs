//! Priced model records as served by the pricing endpoint.
//!
//! Records come from a remote collection and are not trusted to be
//! well-formed. Every optional field deserializes leniently: a value of the
//! wrong type becomes "absent", and absent fields simply never match a
//! filter.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::CoreError;

// ============================================================================
// Quota Type
// ============================================================================

/// How a model is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum QuotaType {
    /// Billed by token quantity.
    ByQuantity,
    /// Billed per request.
    ByCount,
}

impl QuotaType {
    /// Returns both quota types in display order.
    pub fn all() -> &'static [QuotaType] {
        &[Self::ByQuantity, Self::ByCount]
    }

    /// Returns the wire code (0 or 1).
    pub fn code(self) -> u8 {
        match self {
            Self::ByQuantity => 0,
            Self::ByCount => 1,
        }
    }

    /// Returns the message key of the option label.
    pub fn label_key(self) -> &'static str {
        match self {
            Self::ByQuantity => "Pay per token",
            Self::ByCount => "Pay per request",
        }
    }
}

impl TryFrom<u8> for QuotaType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::ByQuantity),
            1 => Ok(Self::ByCount),
            other => Err(format!("unknown quota type {other}")),
        }
    }
}

impl From<QuotaType> for u8 {
    fn from(quota_type: QuotaType) -> Self {
        quota_type.code()
    }
}

impl std::fmt::Display for QuotaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for QuotaType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "0" | "quantity" | "token" => Ok(Self::ByQuantity),
            "1" | "count" | "request" => Ok(Self::ByCount),
            _ => Err(CoreError::InvalidFilter {
                dimension: "quota_type",
                value: s.to_string(),
            }),
        }
    }
}

// ============================================================================
// Model Record
// ============================================================================

/// A priced model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Model name as requested by API clients.
    #[serde(default, deserialize_with = "lenient_string")]
    pub model_name: String,

    /// Vendor name; `None` or empty means unknown vendor.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub vendor_name: Option<String>,

    /// Delimited free-text tags (`,` `;` `|`).
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<String>,

    /// Groups the model is enabled in.
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub enable_groups: Vec<String>,

    /// Billing mode; `None` when missing or unrecognized.
    #[serde(
        default,
        deserialize_with = "lenient_quota_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub quota_type: Option<QuotaType>,

    /// Endpoint types the model can be called through.
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub supported_endpoint_types: Vec<String>,

    /// Free-text description.
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Input price ratio (quantity billing).
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub model_ratio: Option<f64>,

    /// Output/input price ratio (quantity billing).
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub completion_ratio: Option<f64>,

    /// Fixed price per request (count billing).
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub model_price: Option<f64>,
}

impl ModelRecord {
    /// Creates a record with just a name.
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            ..Self::default()
        }
    }

    /// Returns the vendor, treating an empty name as unknown.
    pub fn vendor(&self) -> Option<&str> {
        self.vendor_name.as_deref().filter(|v| !v.is_empty())
    }

    /// Returns the normalized, deduplicated tag list.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags.as_deref().map(normalize_tags).unwrap_or_default()
    }
}

/// Splits a delimited tag string into trimmed, lower-cased, unique tags.
///
/// Order of first appearance is kept.
pub fn normalize_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split([',', ';', '|']) {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

// ============================================================================
// Pricing Catalog
// ============================================================================

/// Token groups configured on the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingGroups {
    /// Group key to description, for the groups the user may use.
    #[serde(rename = "usable_group", default)]
    pub usable: BTreeMap<String, String>,

    /// Group key to price multiplier.
    #[serde(rename = "group_ratio", default, deserialize_with = "lenient_ratio_map")]
    pub ratios: BTreeMap<String, f64>,
}

impl PricingGroups {
    /// Returns the non-empty usable group keys in key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.usable.keys().map(String::as_str).filter(|k| !k.is_empty())
    }

    /// Returns the ratio label for a group, `x1` when none is configured.
    pub fn ratio_text(&self, group: &str) -> String {
        match self.ratios.get(group) {
            Some(ratio) => format!("x{ratio}"),
            None => "x1".to_string(),
        }
    }
}

/// Everything the pricing page needs from the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingCatalog {
    /// All priced models.
    #[serde(rename = "data", default)]
    pub models: Vec<ModelRecord>,

    /// Group configuration.
    #[serde(flatten)]
    pub groups: PricingGroups,
}

// ============================================================================
// Lenient Deserializers
// ============================================================================

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_quota_type<'de, D>(deserializer: D) -> Result<Option<QuotaType>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(Value::as_u64)
        .and_then(|code| u8::try_from(code).ok())
        .and_then(|code| QuotaType::try_from(code).ok()))
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(Value::as_f64))
}

fn lenient_ratio_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(map)) => map
            .into_iter()
            .filter_map(|(group, ratio)| ratio.as_f64().map(|r| (group, r)))
            .collect(),
        _ => BTreeMap::new(),
    })
}
