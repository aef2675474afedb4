//! Header navigation module visibility.
//!
//! This module contains the runtime switches that decide which entries of
//! the top navigation bar are rendered:
//! - [`NavModule`] - Enum of the configurable modules
//! - [`PricingModule`] - Pricing switch with its login requirement
//! - [`HeaderNavModules`] - Fixed-shape visibility map
//!
//! The persisted form is loose JSON written by older and newer consoles
//! alike. Normalization happens once, in [`HeaderNavModules::from_value`],
//! so nothing downstream ever sees a partial map or a bare boolean pricing
//! flag.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::CoreError;

// ============================================================================
// Module Keys
// ============================================================================

/// A configurable header navigation module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavModule {
    /// Landing page.
    Home,
    /// Admin console.
    Console,
    /// API token management.
    Token,
    /// Wallet and top-up.
    Wallet,
    /// Personal account settings.
    Account,
    /// Usage, drawing and task logs.
    Logs,
    /// Model pricing marketplace.
    Pricing,
    /// External documentation.
    Docs,
    /// About page.
    About,
}

impl NavModule {
    /// Returns all modules in settings-screen order.
    pub fn all() -> &'static [NavModule] {
        &[
            Self::Home,
            Self::Console,
            Self::Token,
            Self::Wallet,
            Self::Account,
            Self::Logs,
            Self::Pricing,
            Self::Docs,
            Self::About,
        ]
    }

    /// Returns the persisted key for this module.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Console => "console",
            Self::Token => "token",
            Self::Wallet => "wallet",
            Self::Account => "account",
            Self::Logs => "logs",
            Self::Pricing => "pricing",
            Self::Docs => "docs",
            Self::About => "about",
        }
    }

    /// Looks a module up by its persisted key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.key() == key)
    }

    /// Returns the message key of the settings card title.
    pub fn title_key(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Console => "Console",
            Self::Token => "Token Management",
            Self::Wallet => "Wallet",
            Self::Account => "Account",
            Self::Logs => "Logs",
            Self::Pricing => "Model Marketplace",
            Self::Docs => "Docs",
            Self::About => "About",
        }
    }

    /// Returns the message key of the settings card description.
    pub fn description_key(&self) -> &'static str {
        match self {
            Self::Home => "Landing page with system information",
            Self::Console => "Control panel for managing the account",
            Self::Token => "Authentication tokens for API calls, keep them safe",
            Self::Wallet => "Wallet management",
            Self::Account => "Personal settings",
            Self::Logs => "Usage logs / Drawing logs / Task logs",
            Self::Pricing => "Model pricing, may require login",
            Self::Docs => "System documentation and help",
            Self::About => "Details about the system",
        }
    }

    /// Returns true if the module has a nested switch (pricing login gate).
    pub fn has_sub_config(&self) -> bool {
        matches!(self, Self::Pricing)
    }
}

impl std::fmt::Display for NavModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for NavModule {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(&s.trim().to_lowercase())
            .ok_or_else(|| CoreError::UnknownModule(s.to_string()))
    }
}

// ============================================================================
// Pricing Module
// ============================================================================

/// Canonical pricing switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingModule {
    /// Whether the pricing entry is rendered.
    pub enabled: bool,
    /// Whether anonymous visitors are redirected to login.
    pub require_auth: bool,
}

impl PricingModule {
    /// Normalizes a persisted pricing flag.
    ///
    /// A bare boolean means `{enabled: value, requireAuth: false}`. An object
    /// fills missing fields from defaults. Anything else is the default.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Bool(enabled)) => Self {
                enabled: *enabled,
                require_auth: false,
            },
            Some(Value::Object(map)) => {
                let defaults = Self::default();
                Self {
                    enabled: map
                        .get("enabled")
                        .and_then(Value::as_bool)
                        .unwrap_or(defaults.enabled),
                    require_auth: map
                        .get("requireAuth")
                        .and_then(Value::as_bool)
                        .unwrap_or(defaults.require_auth),
                }
            }
            _ => Self::default(),
        }
    }
}

impl Default for PricingModule {
    fn default() -> Self {
        Self {
            enabled: true,
            require_auth: false,
        }
    }
}

// ============================================================================
// Header Nav Modules
// ============================================================================

/// Visibility of every header navigation module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct HeaderNavModules {
    /// Landing page.
    pub home: bool,
    /// Admin console.
    pub console: bool,
    /// Token management.
    pub token: bool,
    /// Wallet.
    pub wallet: bool,
    /// Account settings.
    pub account: bool,
    /// Logs menu.
    pub logs: bool,
    /// Pricing marketplace.
    pub pricing: PricingModule,
    /// External docs.
    pub docs: bool,
    /// About page.
    pub about: bool,
}

impl Default for HeaderNavModules {
    fn default() -> Self {
        Self {
            home: true,
            console: true,
            token: true,
            wallet: true,
            account: true,
            logs: true,
            pricing: PricingModule::default(),
            docs: true,
            about: true,
        }
    }
}

impl HeaderNavModules {
    /// Builds the canonical shape from loose persisted JSON.
    ///
    /// Missing keys take their default (visible). A present key is visible
    /// only when it is exactly `true`, so `null` or a string hides the
    /// module. A non-object input yields the defaults.
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        let flag = |key: &str| match map.get(key) {
            None => true,
            Some(v) => v.as_bool() == Some(true),
        };

        Self {
            home: flag("home"),
            console: flag("console"),
            token: flag("token"),
            wallet: flag("wallet"),
            account: flag("account"),
            logs: flag("logs"),
            pricing: PricingModule::from_value(map.get("pricing")),
            docs: flag("docs"),
            about: flag("about"),
        }
    }

    /// Parses a persisted option string.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not valid JSON. Callers that want the
    /// silent fallback should map the error to [`HeaderNavModules::default`].
    pub fn from_json_str(raw: &str) -> Result<Self, CoreError> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(&value))
    }

    /// Serializes to the persisted option string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Returns whether a module is switched on.
    ///
    /// For pricing this is `pricing.enabled`.
    pub fn is_enabled(&self, module: NavModule) -> bool {
        match module {
            NavModule::Home => self.home,
            NavModule::Console => self.console,
            NavModule::Token => self.token,
            NavModule::Wallet => self.wallet,
            NavModule::Account => self.account,
            NavModule::Logs => self.logs,
            NavModule::Pricing => self.pricing.enabled,
            NavModule::Docs => self.docs,
            NavModule::About => self.about,
        }
    }

    /// Switches a module on or off. For pricing only `enabled` changes.
    pub fn set_enabled(&mut self, module: NavModule, enabled: bool) {
        let slot = match module {
            NavModule::Home => &mut self.home,
            NavModule::Console => &mut self.console,
            NavModule::Token => &mut self.token,
            NavModule::Wallet => &mut self.wallet,
            NavModule::Account => &mut self.account,
            NavModule::Logs => &mut self.logs,
            NavModule::Pricing => &mut self.pricing.enabled,
            NavModule::Docs => &mut self.docs,
            NavModule::About => &mut self.about,
        };
        *slot = enabled;
    }

    /// Sets whether the pricing page requires login.
    pub fn set_pricing_require_auth(&mut self, require_auth: bool) {
        self.pricing.require_auth = require_auth;
    }

    /// Restores every module to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl<'de> Deserialize<'de> for HeaderNavModules {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_keys_default_visible() {
        let modules = HeaderNavModules::from_value(&json!({"home": false}));
        assert!(!modules.home);
        assert!(modules.console);
        assert!(modules.docs);
        assert_eq!(modules.pricing, PricingModule::default());
    }

    #[test]
    fn test_boolean_pricing_is_normalized() {
        let modules = HeaderNavModules::from_value(&json!({"pricing": false}));
        assert_eq!(
            modules.pricing,
            PricingModule {
                enabled: false,
                require_auth: false
            }
        );
    }

    #[test]
    fn test_partial_pricing_object() {
        let modules = HeaderNavModules::from_value(&json!({"pricing": {"requireAuth": true}}));
        assert!(modules.pricing.enabled);
        assert!(modules.pricing.require_auth);
    }

    #[test]
    fn test_non_boolean_flag_hides_module() {
        let modules = HeaderNavModules::from_value(&json!({"wallet": null, "about": "yes"}));
        assert!(!modules.wallet);
        assert!(!modules.about);
    }

    #[test]
    fn test_non_object_yields_defaults() {
        assert_eq!(
            HeaderNavModules::from_value(&json!([1, 2, 3])),
            HeaderNavModules::default()
        );
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(HeaderNavModules::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let json = HeaderNavModules::default().to_json_string().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["home"], json!(true));
        assert_eq!(value["pricing"], json!({"enabled": true, "requireAuth": false}));
    }

    #[test]
    fn test_set_enabled_pricing_keeps_require_auth() {
        let mut modules = HeaderNavModules::default();
        modules.set_pricing_require_auth(true);
        modules.set_enabled(NavModule::Pricing, false);
        assert!(!modules.pricing.enabled);
        assert!(modules.pricing.require_auth);
    }

    #[test]
    fn test_module_from_str() {
        assert_eq!("Pricing".parse::<NavModule>().unwrap(), NavModule::Pricing);
        assert!("billing".parse::<NavModule>().is_err());
    }
}
