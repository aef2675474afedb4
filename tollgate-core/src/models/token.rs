//! API token records.

use serde::{Deserialize, Serialize};

/// Token status codes as stored by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum TokenStatus {
    /// Usable.
    Enabled,
    /// Switched off by the owner.
    Disabled,
    /// Past its expiry time.
    Expired,
    /// Out of quota.
    Exhausted,
}

impl TokenStatus {
    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Enabled => "Enabled",
            Self::Disabled => "Disabled",
            Self::Expired => "Expired",
            Self::Exhausted => "Exhausted",
        }
    }
}

impl TryFrom<i64> for TokenStatus {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Enabled),
            2 => Ok(Self::Disabled),
            3 => Ok(Self::Expired),
            4 => Ok(Self::Exhausted),
            other => Err(format!("unknown token status {other}")),
        }
    }
}

impl From<TokenStatus> for i64 {
    fn from(status: TokenStatus) -> Self {
        match status {
            TokenStatus::Enabled => 1,
            TokenStatus::Disabled => 2,
            TokenStatus::Expired => 3,
            TokenStatus::Exhausted => 4,
        }
    }
}

/// An API token owned by the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Token id.
    pub id: i64,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Secret key (without the `sk-` prefix).
    #[serde(default)]
    pub key: String,
    /// Status.
    pub status: TokenStatus,
    /// Remaining quota.
    #[serde(default)]
    pub remain_quota: i64,
    /// Used quota.
    #[serde(default)]
    pub used_quota: i64,
    /// Whether the quota is unlimited.
    #[serde(default)]
    pub unlimited_quota: bool,
    /// Token group.
    #[serde(default)]
    pub group: String,
    /// Unix creation time.
    #[serde(default)]
    pub created_time: i64,
    /// Unix expiry time, `-1` for never.
    #[serde(default = "never_expires")]
    pub expired_time: i64,
}

fn never_expires() -> i64 {
    -1
}

impl TokenRecord {
    /// Creates an enabled, never-expiring token with no quota recorded.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            key: String::new(),
            status: TokenStatus::Enabled,
            remain_quota: 0,
            used_quota: 0,
            unlimited_quota: false,
            group: String::new(),
            created_time: 0,
            expired_time: never_expires(),
        }
    }

    /// Returns the key with the middle masked out.
    pub fn masked_key(&self) -> String {
        let chars: Vec<char> = self.key.chars().collect();
        if chars.len() <= 8 {
            return format!("sk-{}", "*".repeat(chars.len()));
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("sk-{head}{}{tail}", "*".repeat(chars.len() - 8))
    }

    /// Returns `remaining/total`, or `unlimited`.
    pub fn quota_usage(&self) -> String {
        if self.unlimited_quota {
            "unlimited".to_string()
        } else {
            format!("{}/{}", self.remain_quota, self.remain_quota + self.used_quota)
        }
    }
}
