//! Navigation entries and the session they are resolved against.

use serde::{Deserialize, Serialize};

// ============================================================================
// Nav Link
// ============================================================================

/// What activating a navigation entry does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavTarget {
    /// In-app route.
    Path(String),
    /// External URL opened in a new tab.
    External(String),
    /// Dropdown of child entries.
    Menu(Vec<NavLink>),
}

/// A single entry of the header navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Unique item key (`home`, `usage-log`, ...).
    pub key: String,
    /// Localized display text.
    pub text: String,
    /// Whether following the entry requires a logged-in user.
    #[serde(default)]
    pub requires_auth: bool,
    /// Primary action.
    pub target: NavTarget,
}

impl NavLink {
    /// Creates an in-app route entry.
    pub fn route(key: impl Into<String>, text: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            requires_auth: false,
            target: NavTarget::Path(path.into()),
        }
    }

    /// Creates an external link entry.
    pub fn external(
        key: impl Into<String>,
        text: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            requires_auth: false,
            target: NavTarget::External(url.into()),
        }
    }

    /// Creates a dropdown entry.
    pub fn menu(key: impl Into<String>, text: impl Into<String>, children: Vec<NavLink>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            requires_auth: false,
            target: NavTarget::Menu(children),
        }
    }

    /// Marks the entry as login-only.
    #[must_use]
    pub fn with_auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    /// Returns the in-app route, if the entry has one.
    pub fn path(&self) -> Option<&str> {
        match &self.target {
            NavTarget::Path(path) => Some(path),
            _ => None,
        }
    }

    /// Returns the external URL, if the entry is external.
    pub fn external_url(&self) -> Option<&str> {
        match &self.target {
            NavTarget::External(url) => Some(url),
            _ => None,
        }
    }

    /// Returns the child entries (empty unless this is a menu).
    pub fn children(&self) -> &[NavLink] {
        match &self.target {
            NavTarget::Menu(children) => children,
            _ => &[],
        }
    }

    /// Returns true for external links.
    pub fn is_external(&self) -> bool {
        matches!(self.target, NavTarget::External(_))
    }
}

// ============================================================================
// Session
// ============================================================================

/// The logged-in user as seen by the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// User id.
    pub id: i64,
    /// Login name.
    #[serde(default)]
    pub username: String,
    /// Display name.
    #[serde(default)]
    pub display_name: String,
    /// Numeric role (1 common, 10 admin, 100 root).
    #[serde(default)]
    pub role: i64,
}

/// Current authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The logged-in user, if any.
    pub user: Option<SessionUser>,
}

impl Session {
    /// An anonymous session.
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// A session for the given user.
    pub fn for_user(user: SessionUser) -> Self {
        Self { user: Some(user) }
    }

    /// Returns true if a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Returns the user's role, if logged in.
    pub fn role(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.role)
    }
}
