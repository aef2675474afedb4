//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use tollgate_core::{
    FilterState, HeaderNavModules, HomeContent, ModelRecord, NavModule, PageSelectionState,
    PricingFacets, ResolvedNavLink, TokenRecord, Translator,
};

// ============================================================================
// Output Types
// ============================================================================

/// Resolved header navigation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavOutput {
    pub authenticated: bool,
    pub pricing_require_auth: bool,
    pub links: Vec<ResolvedNavLink>,
}

/// One page of the pricing list with its facets.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingOutput<'a> {
    pub filters: &'a FilterState,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<&'a ModelRecord>>,
    pub facets: &'a PricingFacets,
}

/// A header module switch as shown on the settings screen.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleOutput {
    pub key: &'static str,
    pub title: String,
    pub description: String,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_auth: Option<bool>,
}

impl ModuleOutput {
    /// Lists every module in settings-screen order.
    pub fn list<T: Translator + ?Sized>(modules: &HeaderNavModules, translator: &T) -> Vec<Self> {
        NavModule::all()
            .iter()
            .map(|module| Self {
                key: module.key(),
                title: translator.translate(module.title_key()),
                description: translator.translate(module.description_key()),
                enabled: modules.is_enabled(*module),
                require_auth: module
                    .has_sub_config()
                    .then_some(modules.pricing.require_auth),
            })
            .collect()
    }
}

/// A token row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenOutput {
    pub id: i64,
    pub name: String,
    pub key: String,
    pub status: &'static str,
    pub quota: String,
    pub group: String,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_datetime_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_datetime_opt")]
    pub expires_at: Option<DateTime<Utc>>,
    pub selected: bool,
}

impl TokenOutput {
    /// Converts a token, masking its key.
    pub fn from_record(token: &TokenRecord, selected: bool) -> Self {
        Self {
            id: token.id,
            name: token.name.clone(),
            key: token.masked_key(),
            status: token.status.label(),
            quota: token.quota_usage(),
            group: token.group.clone(),
            created_at: timestamp(token.created_time),
            expires_at: timestamp(token.expired_time),
            selected,
        }
    }
}

/// A page of tokens with the selection preview.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokensOutput {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub page_state: PageSelectionState,
    pub selected_on_page: usize,
    pub selected: Vec<i64>,
    pub items: Vec<TokenOutput>,
}

/// Site notice.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeOutput {
    pub visible: bool,
    pub dismissed_today: bool,
    pub content: String,
}

/// Home page content.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeOutput {
    pub cached: bool,
    pub content: HomeContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

/// Unix seconds to UTC; zero and negative values mean unset.
fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    (secs > 0).then(|| DateTime::from_timestamp(secs, 0)).flatten()
}

// ============================================================================
// Serialization helpers
// ============================================================================

#[allow(clippy::ref_option)]
fn serialize_datetime_opt<S>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => s.serialize_str(&dt.to_rfc3339()),
        None => s.serialize_none(),
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }
}

// ============================================================================
// Tests
// ============================================================================
