// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Tollgate Store
//!
//! Local state for the Tollgate console.
//!
//! This crate provides:
//!
//! - **SettingsStore**: Connection details, saved pricing view, and cached
//!   gateway content, with change notification
//! - **Notice**: Once-a-day notice dismissal
//! - **Nav modules**: Lenient decoding of the `HeaderNavModules` option
//! - **Persistence**: Atomic, owner-only JSON files
//!
//! ## Usage
//!
//! ```ignore
//! use tollgate_store::SettingsStore;
//!
//! let store = SettingsStore::load_default().await;
//! store.set_server_url("https://gw.example.com").await?;
//! store.save().await?;
//!
//! let modules = store.get().await.nav_modules();
//! ```

pub mod error;
pub mod nav_modules;
pub mod notice;
pub mod persistence;
pub mod settings_store;

pub use error::StoreError;
pub use nav_modules::{OPTION_KEY, decode_option, encode_option};
pub use notice::{should_show_notice, today};
pub use persistence::{
    default_config_dir, default_settings_path, load_json, load_json_or_default, save_json,
};
pub use settings_store::{DEFAULT_SERVER_URL, LogLevel, Settings, SettingsStore};
