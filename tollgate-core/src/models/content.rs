//! Operator-provided page content.

use serde::{Deserialize, Serialize};

/// Prefix that turns home page content into an embedded page.
const EMBED_PREFIX: &str = "https://";

/// Custom home page content as configured by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum HomeContent {
    /// Nothing configured; the default landing page is shown.
    Default,
    /// A URL rendered in an iframe.
    Embedded(String),
    /// Markdown or HTML rendered inline.
    Document(String),
}

impl HomeContent {
    /// Classifies the raw option value.
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::Default
        } else if trimmed.starts_with(EMBED_PREFIX) {
            Self::Embedded(trimmed.to_string())
        } else {
            Self::Document(raw.to_string())
        }
    }

    /// Returns true when the default landing page should be shown.
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}
