//! Gateway response shapes.

use serde::{Deserialize, Serialize};
use tollgate_core::TokenRecord;

use crate::error::FetchError;

/// The `{success, message, data}` envelope every endpoint returns.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the call succeeded.
    pub success: bool,
    /// Error or informational message.
    #[serde(default)]
    pub message: String,
    /// Payload.
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwraps the payload, turning `success: false` into an error.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Api`] when the gateway reports failure and
    /// [`FetchError::InvalidResponse`] when a successful reply has no data.
    pub fn into_data(self) -> Result<T, FetchError> {
        if !self.success {
            return Err(FetchError::Api {
                message: self.message,
            });
        }
        self.data
            .ok_or_else(|| FetchError::InvalidResponse("missing data".to_string()))
    }

    /// Checks for success and discards the payload.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Api`] when the gateway reports failure.
    pub fn into_unit(self) -> Result<(), FetchError> {
        if self.success {
            Ok(())
        } else {
            Err(FetchError::Api {
                message: self.message,
            })
        }
    }
}

impl<T: Default> ApiEnvelope<T> {
    /// Unwraps the payload, treating a missing one as empty.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Api`] when the gateway reports failure.
    pub fn into_data_or_default(self) -> Result<T, FetchError> {
        if self.success {
            Ok(self.data.unwrap_or_default())
        } else {
            Err(FetchError::Api {
                message: self.message,
            })
        }
    }
}

/// Public status of the gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusInfo {
    /// Site name.
    pub system_name: String,
    /// Gateway version.
    pub version: String,
    /// Address clients should use as their API base.
    pub server_address: String,
    /// External documentation link.
    pub docs_link: Option<String>,
    /// Custom footer HTML.
    pub footer_html: Option<String>,
    /// Raw header navigation switches.
    #[serde(rename = "HeaderNavModules")]
    pub header_nav_modules: Option<String>,
    /// Whether this is a demo deployment.
    pub demo_site_enabled: bool,
}

impl StatusInfo {
    /// Returns the docs link, or `None` when blank.
    pub fn docs_link(&self) -> Option<&str> {
        self.docs_link.as_deref().filter(|l| !l.trim().is_empty())
    }

    /// Returns the footer HTML, or `None` when blank.
    pub fn footer_html(&self) -> Option<&str> {
        self.footer_html.as_deref().filter(|f| !f.trim().is_empty())
    }
}

/// One row of the gateway option table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    /// Option key.
    pub key: String,
    /// Option value, always a string on the wire.
    #[serde(default)]
    pub value: String,
}

impl OptionEntry {
    /// Creates an option entry.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A page of tokens.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TokenPage {
    /// Tokens on this page.
    pub items: Vec<TokenRecord>,
    /// Total tokens across pages.
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub page_size: u32,
}
