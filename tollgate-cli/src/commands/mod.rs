//! CLI command implementations.

pub mod config;
pub mod home;
pub mod modules;
pub mod nav;
pub mod notice;
pub mod pricing;
pub mod tokens;

use std::collections::HashMap;

use anyhow::{Context, Result};
use tollgate_core::HeaderNavModules;
use tollgate_fetch::{ConsoleApi, ConsoleClient};
use tollgate_store::{Settings, SettingsStore, decode_option};
use tracing::{debug, warn};

use crate::Cli;

/// Loads the settings store, honoring `--config`.
pub async fn load_store(cli: &Cli) -> SettingsStore {
    match &cli.config {
        Some(path) => SettingsStore::load(path.clone()).await,
        None => SettingsStore::load_default().await,
    }
}

/// Builds a client from saved settings plus command-line overrides.
pub fn build_client(settings: &Settings, cli: &Cli) -> Result<ConsoleClient> {
    let server = cli.server.as_deref().unwrap_or(&settings.server_url);
    debug!(server, "Connecting to gateway");

    let client = ConsoleClient::with_timeout(server, settings.request_timeout())
        .with_context(|| format!("invalid server URL: {server}"))?;

    let token = cli
        .token
        .clone()
        .or_else(|| settings.access_token.clone())
        .filter(|t| !t.is_empty());
    let user_id = cli.user_id.or(settings.user_id);

    Ok(match token {
        Some(token) => client.with_credentials(token, user_id),
        None => client,
    })
}

/// Loads the `--translations` map; an absent flag yields an empty map,
/// which renders every label untranslated.
pub async fn load_translations(cli: &Cli) -> Result<HashMap<String, String>> {
    let Some(path) = &cli.translations else {
        return Ok(HashMap::new());
    };
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("cannot read translations from {}", path.display()))?;
    let map: HashMap<String, String> = serde_json::from_str(&raw).with_context(|| {
        format!("translations in {} must be a JSON object of strings", path.display())
    })?;
    debug!(entries = map.len(), "Translations loaded");
    Ok(map)
}

/// Site-wide fields of the gateway status.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    /// Header module switches.
    pub modules: HeaderNavModules,
    /// Documentation link.
    pub docs_link: Option<String>,
    /// Custom footer HTML.
    pub footer_html: Option<String>,
    /// Read from the local cache rather than the gateway.
    pub cached: bool,
}

impl StatusSnapshot {
    /// Builds the snapshot from the cached settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            modules: settings.nav_modules(),
            docs_link: settings.docs_link.clone(),
            footer_html: settings.footer_html.clone(),
            cached: true,
        }
    }
}

/// Fetches the gateway status and caches its site-wide fields.
///
/// Falls back to the cached values when the gateway cannot be reached.
pub async fn refresh_status<A>(api: &A, store: &SettingsStore) -> StatusSnapshot
where
    A: ConsoleApi + ?Sized,
{
    match api.status().await {
        Ok(status) => {
            let docs_link = status.docs_link().map(str::to_string);
            let footer_html = status.footer_html().map(str::to_string);
            store
                .cache_status(status.header_nav_modules.clone(), docs_link.clone())
                .await;
            store.cache_footer_html(footer_html.clone()).await;
            if let Err(e) = store.save_if_changed().await {
                warn!(error = %e, "Failed to cache gateway status");
            }
            StatusSnapshot {
                modules: decode_option(status.header_nav_modules.as_deref()),
                docs_link,
                footer_html,
                cached: false,
            }
        }
        Err(e) => {
            warn!(error = %e, "Gateway status unavailable, using cached values");
            StatusSnapshot::from_settings(&store.get().await)
        }
    }
}

/// Prints a section header.
pub fn print_header(title: &str) {
    println!("{title}");
    println!("{}", "─".repeat(40));
}
