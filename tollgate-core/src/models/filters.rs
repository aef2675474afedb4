//! Pricing filter selections and page view state.
//!
//! - [`FilterValue`] - A single selection with the `"all"` sentinel
//! - [`VendorChoice`] - Vendor selection, including the unknown vendor
//! - [`FilterState`] - The five filters plus free-text search
//! - [`PricingViewState`] - Everything the pricing page resets at once

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::str::FromStr;

use super::pricing::QuotaType;

/// Wire value of the "no restriction" sentinel.
pub const ALL: &str = "all";

/// Wire value of the unknown-vendor selection.
pub const UNKNOWN_VENDOR: &str = "unknown";

// ============================================================================
// Filter Value
// ============================================================================

/// A filter selection: either no restriction or one concrete value.
///
/// Serializes as the string `"all"` or as the bare value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterValue<T> {
    /// No restriction on this dimension.
    All,
    /// Restrict to one value.
    Only(T),
}

impl<T> Default for FilterValue<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T> FilterValue<T> {
    /// Returns true for the "all" sentinel.
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns the selected value, if restricted.
    pub fn as_only(&self) -> Option<&T> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for FilterValue<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::All, Self::Only)
    }
}

impl<T: FromStr> FromStr for FilterValue<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl<T: Serialize> Serialize for FilterValue<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::All => serializer.serialize_str(ALL),
            Self::Only(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for FilterValue<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Null => Ok(Self::All),
            Value::String(ref s) if s == ALL => Ok(Self::All),
            other => serde_json::from_value(other)
                .map(Self::Only)
                .map_err(serde::de::Error::custom),
        }
    }
}

// ============================================================================
// Vendor Choice
// ============================================================================

/// A selectable vendor option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VendorChoice {
    /// A named vendor.
    Named(String),
    /// Records without a vendor.
    Unknown,
}

impl VendorChoice {
    /// Returns true if a record vendor (already normalized) matches.
    pub fn matches(&self, vendor: Option<&str>) -> bool {
        match (self, vendor) {
            (Self::Named(name), Some(vendor)) => name == vendor,
            (Self::Unknown, None) => true,
            _ => false,
        }
    }
}

impl From<String> for VendorChoice {
    fn from(value: String) -> Self {
        if value == UNKNOWN_VENDOR {
            Self::Unknown
        } else {
            Self::Named(value)
        }
    }
}

impl From<VendorChoice> for String {
    fn from(value: VendorChoice) -> Self {
        match value {
            VendorChoice::Named(name) => name,
            VendorChoice::Unknown => UNKNOWN_VENDOR.to_string(),
        }
    }
}

impl FromStr for VendorChoice {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl std::fmt::Display for VendorChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Unknown => f.write_str(UNKNOWN_VENDOR),
        }
    }
}

// ============================================================================
// Filter State
// ============================================================================

/// The independent pricing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Vendor filter.
    pub vendor: FilterValue<VendorChoice>,
    /// Tag filter (matched case-insensitively).
    pub tag: FilterValue<String>,
    /// Token group filter.
    pub group: FilterValue<String>,
    /// Billing mode filter.
    pub quota_type: FilterValue<QuotaType>,
    /// Endpoint type filter.
    pub endpoint_type: FilterValue<String>,
    /// Free-text search over model name and vendor.
    pub search: String,
}

impl FilterState {
    /// Restores every field to its default in one assignment.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns true when nothing is filtered.
    pub fn is_unfiltered(&self) -> bool {
        *self == Self::default()
    }
}

// ============================================================================
// View Preferences
// ============================================================================

/// Currency prices are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollars.
    #[default]
    Usd,
    /// Chinese yuan.
    Cny,
    /// Site-defined currency.
    Custom,
}

/// Layout of the pricing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Card grid.
    #[default]
    Card,
    /// Table rows.
    Table,
}

/// Token unit prices are quoted per.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TokenUnit {
    /// Per million tokens.
    #[default]
    M,
    /// Per thousand tokens.
    K,
}

impl TokenUnit {
    /// Number of tokens in one unit.
    pub fn tokens(self) -> u64 {
        match self {
            Self::M => 1_000_000,
            Self::K => 1_000,
        }
    }
}

/// State of the pricing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingViewState {
    /// Filters.
    pub filters: FilterState,
    /// Show prices including the recharge conversion.
    pub show_with_recharge: bool,
    /// Display currency.
    pub currency: Currency,
    /// Show raw ratios instead of prices.
    pub show_ratio: bool,
    /// List layout.
    pub view_mode: ViewMode,
    /// Token unit.
    pub token_unit: TokenUnit,
    /// 1-based page of the result list.
    pub current_page: usize,
}

impl Default for PricingViewState {
    fn default() -> Self {
        Self {
            filters: FilterState::default(),
            show_with_recharge: false,
            currency: Currency::default(),
            show_ratio: false,
            view_mode: ViewMode::default(),
            token_unit: TokenUnit::default(),
            current_page: 1,
        }
    }
}

impl PricingViewState {
    /// Restores filters and every view preference at once.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Mutates the filters and jumps back to the first page.
    pub fn update_filters<F>(&mut self, f: F)
    where
        F: FnOnce(&mut FilterState),
    {
        f(&mut self.filters);
        self.current_page = 1;
    }

    /// Selects a token group.
    pub fn select_group(&mut self, group: FilterValue<String>) {
        self.update_filters(|filters| filters.group = group);
    }
}
