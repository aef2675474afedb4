//! The console API seam.
//!
//! Commands talk to the gateway through [`ConsoleApi`] so that they can be
//! driven by [`ConsoleClient`](crate::ConsoleClient) or by a test double.

use async_trait::async_trait;
use tollgate_core::{PricingCatalog, SessionUser};

use crate::error::FetchError;
use crate::wire::{OptionEntry, StatusInfo, TokenPage};

/// Operations the console performs against the gateway.
#[async_trait]
pub trait ConsoleApi: Send + Sync {
    /// `GET /api/status`: public site status.
    async fn status(&self) -> Result<StatusInfo, FetchError>;

    /// `GET /api/option/`: every option (admin only).
    async fn options(&self) -> Result<Vec<OptionEntry>, FetchError>;

    /// `PUT /api/option/`: stores one option (admin only).
    async fn update_option(&self, key: &str, value: &str) -> Result<(), FetchError>;

    /// `GET /api/pricing`: priced models and group tables.
    async fn pricing(&self) -> Result<PricingCatalog, FetchError>;

    /// `GET /api/user/self`: the logged-in user.
    async fn user_self(&self) -> Result<SessionUser, FetchError>;

    /// `GET /api/notice`: notice text, empty when none is set.
    async fn notice(&self) -> Result<String, FetchError>;

    /// `GET /api/home_page_content`: operator home page content.
    async fn home_page_content(&self) -> Result<String, FetchError>;

    /// `GET /api/token/`: one page of the user's tokens.
    async fn tokens(&self, page: u32, page_size: u32) -> Result<TokenPage, FetchError>;

    /// Looks up a single option value.
    async fn option(&self, key: &str) -> Result<Option<String>, FetchError> {
        Ok(self
            .options()
            .await?
            .into_iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value))
    }
}
