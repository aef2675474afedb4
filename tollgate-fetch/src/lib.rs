// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Tollgate Fetch
//!
//! HTTP access to the gateway's console API.
//!
//! - [`ConsoleApi`] - The operations the console needs
//! - [`ConsoleClient`] - reqwest implementation with bearer auth and retries
//! - [`RetryStrategy`] - Backoff for connect errors, timeouts, 429 and 5xx
//! - [`wire`] - Response envelope and payload shapes
//!
//! ## Example
//!
//! ```ignore
//! use tollgate_fetch::{ConsoleApi, ConsoleClient};
//!
//! let client = ConsoleClient::new("https://gw.example.com")?
//!     .with_credentials(token, Some(user_id));
//! let catalog = client.pricing().await?;
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod retry;
pub mod wire;

pub use api::ConsoleApi;
pub use client::{ConsoleClient, Credentials, USER_ID_HEADER};
pub use error::FetchError;
pub use retry::RetryStrategy;
pub use wire::{ApiEnvelope, OptionEntry, StatusInfo, TokenPage};
#[cfg(test)]
mod client_tests;
