//! Console settings store.
//!
//! Holds connection details, saved pricing preferences, and the content the
//! console caches between runs. Changes are published over a watch channel.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, watch};
use tollgate_core::{HeaderNavModules, HomeContent, PricingViewState};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::nav_modules;
use crate::persistence::{default_settings_path, load_json_or_default, save_json};

/// Gateway address used until one is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

// ============================================================================
// Settings Types
// ============================================================================

/// Persisted console settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ========================================================================
    // Connection
    // ========================================================================
    /// Gateway base URL.
    pub server_url: String,

    /// Access token sent as a bearer credential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// User id sent alongside the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Logging level.
    pub log_level: LogLevel,

    // ========================================================================
    // Pricing Page
    // ========================================================================
    /// Saved filters and display preferences.
    pub pricing: PricingViewState,

    // ========================================================================
    // Cached Content
    // ========================================================================
    /// Day the notice was last dismissed.
    pub notice_close_date: Option<NaiveDate>,

    /// Last home page content fetched from the gateway.
    pub home_page_content: Option<String>,

    /// Last footer HTML fetched from the gateway.
    pub footer_html: Option<String>,

    /// Last raw `HeaderNavModules` option seen in the gateway status.
    pub header_nav_modules: Option<String>,

    /// Last documentation link seen in the gateway status.
    pub docs_link: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            access_token: None,
            user_id: None,
            request_timeout_secs: 30,
            log_level: LogLevel::default(),
            pricing: PricingViewState::default(),
            notice_close_date: None,
            home_page_content: None,
            footer_html: None,
            header_nav_modules: None,
            docs_link: None,
        }
    }
}

impl Settings {
    /// Returns the request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Returns true when an access token is stored.
    pub fn is_logged_in(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Decodes the cached header navigation switches.
    pub fn nav_modules(&self) -> HeaderNavModules {
        nav_modules::decode_option(self.header_nav_modules.as_deref())
    }

    /// Classifies the cached home page content.
    pub fn home_content(&self) -> HomeContent {
        HomeContent::classify(self.home_page_content.as_deref().unwrap_or_default())
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors.
    #[default]
    Warn,
    /// Informational messages.
    Info,
    /// Debug output.
    Debug,
    /// Everything.
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Persistent settings store with change notifications.
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
    notify: watch::Sender<u64>,
    saved_version: AtomicU64,
}

impl SettingsStore {
    /// Creates a store with default settings.
    pub fn new(path: PathBuf) -> Self {
        Self::with_settings(path, Settings::default())
    }

    /// Creates a store around existing settings.
    pub fn with_settings(path: PathBuf, settings: Settings) -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            settings: Arc::new(RwLock::new(settings)),
            path,
            notify,
            saved_version: AtomicU64::new(0),
        }
    }

    /// Loads settings from the default path.
    pub async fn load_default() -> Self {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from a path.
    ///
    /// A missing or unreadable file yields defaults; the next save
    /// overwrites it.
    pub async fn load(path: PathBuf) -> Self {
        info!(path = %path.display(), "Loading settings");
        let settings: Settings = load_json_or_default(&path).await;
        Self::with_settings(path, settings)
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Updates settings and notifies subscribers.
    ///
    /// The version only moves when `f` actually changed something.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        let changed = {
            let mut settings = self.settings.write().await;
            let before = settings.clone();
            f(&mut settings);
            *settings != before
        };
        if changed {
            self.notify.send_modify(|version| *version += 1);
        }
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be written to disk.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        let version = self.version();
        save_json(&self.path, &*settings).await?;
        self.saved_version.store(version, Ordering::Release);
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// Saves settings only if they changed since the last save or load.
    ///
    /// Returns true if the file was written.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be written to disk.
    pub async fn save_if_changed(&self) -> Result<bool, StoreError> {
        if self.version() == self.saved_version.load(Ordering::Acquire) {
            debug!(path = %self.path.display(), "Settings unchanged, skipping save");
            return Ok(false);
        }
        self.save().await?;
        Ok(true)
    }

    /// Subscribes to settings changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    /// Returns the number of updates applied so far.
    pub fn version(&self) -> u64 {
        *self.notify.borrow()
    }

    // ========================================================================
    // Connection
    // ========================================================================

    /// Sets the gateway URL, trimming any trailing slash.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] unless the URL is http(s).
    pub async fn set_server_url(&self, url: &str) -> Result<(), StoreError> {
        let url = url.trim().trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(StoreError::Config(format!(
                "server URL must start with http:// or https://: {url}"
            )));
        }
        let url = url.to_string();
        self.update(|s| s.server_url = url).await;
        Ok(())
    }

    /// Stores credentials.
    pub async fn set_credentials(&self, token: String, user_id: Option<i64>) {
        debug!(user_id = ?user_id, "Storing credentials");
        self.update(|s| {
            s.access_token = Some(token);
            s.user_id = user_id;
        })
        .await;
    }

    /// Forgets stored credentials.
    pub async fn clear_credentials(&self) {
        self.update(|s| {
            s.access_token = None;
            s.user_id = None;
        })
        .await;
    }

    // ========================================================================
    // Pricing Page
    // ========================================================================

    /// Gets the saved pricing view.
    pub async fn pricing_view(&self) -> PricingViewState {
        self.settings.read().await.pricing.clone()
    }

    /// Replaces the saved pricing view.
    pub async fn set_pricing_view(&self, view: PricingViewState) {
        self.update(|s| s.pricing = view).await;
    }

    /// Restores the pricing view defaults.
    pub async fn reset_pricing_view(&self) {
        self.update(|s| s.pricing.reset()).await;
    }

    // ========================================================================
    // Cached Content
    // ========================================================================

    /// Remembers the header-related fields of the gateway status.
    pub async fn cache_status(
        &self,
        header_nav_modules: Option<String>,
        docs_link: Option<String>,
    ) {
        self.update(|s| {
            s.header_nav_modules = header_nav_modules;
            s.docs_link = docs_link;
        })
        .await;
    }

    /// Remembers the latest home page content.
    pub async fn cache_home_content(&self, content: String) {
        self.update(|s| s.home_page_content = Some(content)).await;
    }

    /// Remembers the latest footer HTML.
    pub async fn cache_footer_html(&self, html: Option<String>) {
        self.update(|s| s.footer_html = html).await;
    }

    /// Gets the cached home page content.
    pub async fn cached_home_content(&self) -> HomeContent {
        self.settings.read().await.home_content()
    }
}
