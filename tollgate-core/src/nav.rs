//! Header navigation resolver.
//!
//! [`build_nav_links`] turns the fixed template, the module switches, and
//! the viewer's role into the list of entries to render.
//! [`resolve_target_path`] decides where an entry actually leads, sending
//! anonymous visitors to the login page when the entry needs a session.
//!
//! Both are pure. Re-run them whenever the session or configuration
//! changes; nothing is cached here.

use serde::{Deserialize, Serialize};

use crate::models::{HeaderNavModules, NavLink, NavModule, NavTarget, Session};
use crate::traits::Translator;

/// Lowest role that sees the admin console.
pub const ADMIN_ROLE_THRESHOLD: i64 = 10;

/// Route anonymous visitors are redirected to.
pub const LOGIN_PATH: &str = "/login";

// ============================================================================
// Building
// ============================================================================

/// Builds the navigation entries visible to a viewer.
///
/// `role` is `None` for anonymous visitors. Template order is preserved.
pub fn build_nav_links<T>(
    translator: &T,
    docs_link: Option<&str>,
    modules: &HeaderNavModules,
    role: Option<i64>,
) -> Vec<NavLink>
where
    T: Translator + ?Sized,
{
    let t = |key: &str| translator.translate(key);
    let docs_link = docs_link.filter(|link| !link.is_empty());
    let is_admin = role.unwrap_or(0) >= ADMIN_ROLE_THRESHOLD;

    let mut template = vec![
        (NavModule::Home, NavLink::route("home", t("Home"), "/")),
        (
            NavModule::Console,
            NavLink::route("console", t("Console"), "/console").with_auth(),
        ),
        (
            NavModule::Token,
            NavLink::route("token", t("Tokens"), "/token").with_auth(),
        ),
        (
            NavModule::Wallet,
            NavLink::route("wallet", t("Wallet"), "/wallet").with_auth(),
        ),
        (
            NavModule::Account,
            NavLink::route("account", t("Account"), "/account").with_auth(),
        ),
        (
            NavModule::Logs,
            NavLink::menu(
                "logs",
                t("Logs"),
                vec![
                    NavLink::route("usage-log", t("Usage Logs"), "/log").with_auth(),
                    NavLink::route("drawing-log", t("Drawing Logs"), "/midjourney").with_auth(),
                    NavLink::route("task-log", t("Task Logs"), "/task").with_auth(),
                ],
            )
            .with_auth(),
        ),
        (
            NavModule::Pricing,
            NavLink::route("pricing", t("Models"), "/pricing"),
        ),
    ];
    if let Some(link) = docs_link {
        template.push((NavModule::Docs, NavLink::external("docs", t("Docs"), link)));
    }
    template.push((NavModule::About, NavLink::route("about", t("About"), "/about")));

    template
        .into_iter()
        .filter(|(module, _)| match module {
            NavModule::Console => modules.console && is_admin,
            other => modules.is_enabled(*other),
        })
        .map(|(_, link)| link)
        .collect()
}

// ============================================================================
// Resolving
// ============================================================================

/// Auth facts a destination depends on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavContext {
    /// A user is logged in.
    pub authenticated: bool,
    /// The pricing page is login-only.
    pub pricing_require_auth: bool,
}

impl NavContext {
    /// Derives the context from the session and module switches.
    pub fn new(session: &Session, modules: &HeaderNavModules) -> Self {
        Self {
            authenticated: session.is_authenticated(),
            pricing_require_auth: modules.pricing.require_auth,
        }
    }
}

/// Resolves where an entry leads.
///
/// Returns [`LOGIN_PATH`] when the entry or its parent needs a session (or
/// is the pricing entry while pricing is login-only) and nobody is logged
/// in. Otherwise returns the entry's own route, or `None` for entries
/// without one.
pub fn resolve_target_path<'a>(
    link: &'a NavLink,
    parent: Option<&NavLink>,
    ctx: &NavContext,
) -> Option<&'a str> {
    let requires_auth = link.requires_auth || parent.is_some_and(|p| p.requires_auth);
    let is_pricing = link.key == NavModule::Pricing.key()
        || parent.is_some_and(|p| p.key == NavModule::Pricing.key());
    let pricing_needs_auth = is_pricing && ctx.pricing_require_auth;

    if (requires_auth || pricing_needs_auth) && !ctx.authenticated {
        return Some(LOGIN_PATH);
    }
    link.path()
}

/// An entry with its destination worked out, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedNavLink {
    /// Item key.
    pub key: String,
    /// Display text.
    pub text: String,
    /// Where activating the entry goes; `None` for pure menus.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Opens in a new tab.
    pub external: bool,
    /// Resolved children.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ResolvedNavLink>,
}

/// Resolves every entry and child against the current context.
pub fn resolve_nav(links: &[NavLink], ctx: &NavContext) -> Vec<ResolvedNavLink> {
    links.iter().map(|link| resolve_one(link, None, ctx)).collect()
}

fn resolve_one(link: &NavLink, parent: Option<&NavLink>, ctx: &NavContext) -> ResolvedNavLink {
    let (href, external) = match &link.target {
        NavTarget::External(url) => (Some(url.clone()), true),
        _ => (resolve_target_path(link, parent, ctx).map(str::to_string), false),
    };

    ResolvedNavLink {
        key: link.key.clone(),
        text: link.text.clone(),
        href,
        external,
        children: link
            .children()
            .iter()
            .map(|child| resolve_one(child, Some(link), ctx))
            .collect(),
    }
}
