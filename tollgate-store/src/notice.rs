//! Daily notice dismissal.
//!
//! Dismissing the notice hides it for the rest of the calendar day. A new
//! day shows it again, whether or not the text changed.

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::settings_store::SettingsStore;

/// Returns true if `notice` should be shown on `today`.
pub fn should_show_notice(notice: &str, closed_on: Option<NaiveDate>, today: NaiveDate) -> bool {
    !notice.trim().is_empty() && closed_on != Some(today)
}

/// Returns today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl SettingsStore {
    /// Returns true if the notice was dismissed on `today`.
    pub async fn notice_dismissed_on(&self, today: NaiveDate) -> bool {
        self.get().await.notice_close_date == Some(today)
    }

    /// Returns true if `notice` should be shown on `today`.
    pub async fn notice_visible(&self, notice: &str, today: NaiveDate) -> bool {
        should_show_notice(notice, self.get().await.notice_close_date, today)
    }

    /// Hides the notice until the next day.
    pub async fn dismiss_notice(&self, today: NaiveDate) {
        debug!(%today, "Dismissing notice");
        self.update(|s| s.notice_close_date = Some(today)).await;
    }
}
