//! Trait definitions for Tollgate.
//!
//! The console never owns localized text. Labels are looked up through a
//! [`Translator`] supplied by the embedding application.

use std::collections::{BTreeMap, HashMap};

/// Looks up the localized string for a message key.
///
/// Message keys are the English source strings (`"Home"`, `"All vendors"`),
/// so a translator that misses a key should return the key itself.
pub trait Translator {
    /// Returns the localized text for `key`.
    fn translate(&self, key: &str) -> String;
}

/// Translator that returns every key unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

impl Translator for PassthroughTranslator {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Adapts any `Fn(&str) -> String` into a [`Translator`].
#[derive(Debug, Clone, Copy)]
pub struct FnTranslator<F>(pub F);

impl<F> Translator for FnTranslator<F>
where
    F: Fn(&str) -> String,
{
    fn translate(&self, key: &str) -> String {
        (self.0)(key)
    }
}

impl Translator for HashMap<String, String> {
    fn translate(&self, key: &str) -> String {
        self.get(key).cloned().unwrap_or_else(|| key.to_string())
    }
}

impl Translator for BTreeMap<String, String> {
    fn translate(&self, key: &str) -> String {
        self.get(key).cloned().unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_returns_key() {
        assert_eq!(PassthroughTranslator.translate("Home"), "Home");
    }

    #[test]
    fn test_map_translator_falls_back_to_key() {
        let mut catalog = HashMap::new();
        catalog.insert("Home".to_string(), "首页".to_string());

        assert_eq!(catalog.translate("Home"), "首页");
        assert_eq!(catalog.translate("About"), "About");
    }

    #[test]
    fn test_fn_translator() {
        let upper = FnTranslator(|key: &str| key.to_uppercase());
        assert_eq!(upper.translate("docs"), "DOCS");
    }
}
