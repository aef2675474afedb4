//! The `HeaderNavModules` gateway option.
//!
//! The gateway stores the switches as a JSON string inside its option
//! table. Decoding never fails: an absent or broken value falls back to the
//! defaults so the header still renders.

use tollgate_core::HeaderNavModules;
use tracing::warn;

use crate::error::StoreError;

/// Option key on the gateway.
pub const OPTION_KEY: &str = "HeaderNavModules";

/// Decodes a stored option value, falling back to defaults.
pub fn decode_option(raw: Option<&str>) -> HeaderNavModules {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return HeaderNavModules::default();
    };
    HeaderNavModules::from_json_str(raw).unwrap_or_else(|e| {
        warn!(error = %e, option = OPTION_KEY, "Malformed option value, using defaults");
        HeaderNavModules::default()
    })
}

/// Encodes switches as the option value to store.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_option(modules: &HeaderNavModules) -> Result<String, StoreError> {
    Ok(modules.to_json_string()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tollgate_core::NavModule;

    #[test]
    fn test_absent_or_blank_is_default() {
        assert_eq!(decode_option(None), HeaderNavModules::default());
        assert_eq!(decode_option(Some("  ")), HeaderNavModules::default());
    }

    #[test]
    fn test_malformed_is_default() {
        assert_eq!(decode_option(Some("{not json")), HeaderNavModules::default());
        assert_eq!(decode_option(Some("[1, 2]")), HeaderNavModules::default());
    }

    #[test]
    fn test_legacy_boolean_pricing() {
        let modules = decode_option(Some(r#"{"pricing": false, "docs": true}"#));
        assert!(!modules.pricing.enabled);
        assert!(!modules.pricing.require_auth);
        assert!(modules.docs);
    }

    #[test]
    fn test_encode_canonical_shape() {
        let mut modules = HeaderNavModules::default();
        modules.set_enabled(NavModule::Logs, false);
        modules.set_pricing_require_auth(true);

        let encoded = encode_option(&modules).unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["logs"], serde_json::json!(false));
        assert_eq!(
            value["pricing"],
            serde_json::json!({"enabled": true, "requireAuth": true})
        );
        assert_eq!(decode_option(Some(&encoded)), modules);
    }
}
