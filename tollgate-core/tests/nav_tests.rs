//! Integration tests for the navigation resolver.

use std::collections::HashMap;

use tollgate_core::{
    HeaderNavModules, LOGIN_PATH, NavContext, NavModule, PassthroughTranslator, Session,
    SessionUser, build_nav_links, resolve_nav,
};

fn keys(modules: &HeaderNavModules, role: Option<i64>) -> Vec<String> {
    build_nav_links(&PassthroughTranslator, Some("https://docs.example.com"), modules, role)
        .into_iter()
        .map(|l| l.key)
        .collect()
}

#[test]
fn test_full_template_for_admin() {
    assert_eq!(
        keys(&HeaderNavModules::default(), Some(100)),
        vec![
            "home", "console", "token", "wallet", "account", "logs", "pricing", "docs", "about"
        ]
    );
}

#[test]
fn test_disabled_modules_are_dropped() {
    let mut modules = HeaderNavModules::default();
    modules.set_enabled(NavModule::Wallet, false);
    modules.set_enabled(NavModule::Pricing, false);
    let links = keys(&modules, Some(1));
    assert!(!links.contains(&"wallet".to_string()));
    assert!(!links.contains(&"pricing".to_string()));
    assert!(links.contains(&"home".to_string()));
}

#[test]
fn test_option_value_drives_links() {
    let modules = HeaderNavModules::from_json_str(r#"{"home": false, "about": "yes"}"#).unwrap();
    let links = keys(&modules, None);
    assert!(!links.contains(&"home".to_string()));
    assert!(!links.contains(&"about".to_string()));
    assert!(links.contains(&"token".to_string()));
}

#[test]
fn test_translator_labels() {
    let mut catalog = HashMap::new();
    catalog.insert("Home".to_string(), "Accueil".to_string());
    let links = build_nav_links(&catalog, None, &HeaderNavModules::default(), None);
    assert_eq!(links[0].text, "Accueil");
    // missing keys fall back to the key itself
    assert_eq!(links[1].text, "Tokens");
}

#[test]
fn test_anonymous_visitor_redirected() {
    let mut modules = HeaderNavModules::default();
    modules.set_pricing_require_auth(true);
    let links = build_nav_links(&PassthroughTranslator, None, &modules, None);

    let ctx = NavContext::new(&Session::anonymous(), &modules);
    let resolved = resolve_nav(&links, &ctx);
    let href = |key: &str| {
        resolved
            .iter()
            .find(|l| l.key == key)
            .and_then(|l| l.href.clone())
    };

    assert_eq!(href("home").as_deref(), Some("/"));
    assert_eq!(href("token").as_deref(), Some(LOGIN_PATH));
    assert_eq!(href("pricing").as_deref(), Some(LOGIN_PATH));
    assert_eq!(href("logs").as_deref(), Some(LOGIN_PATH));

    let logs = resolved.iter().find(|l| l.key == "logs").unwrap();
    assert!(logs.children.iter().all(|c| c.href.as_deref() == Some(LOGIN_PATH)));
}

#[test]
fn test_signed_in_user_gets_routes() {
    let modules = HeaderNavModules::default();
    let session = Session::for_user(SessionUser {
        id: 1,
        username: "root".to_string(),
        display_name: "Root".to_string(),
        role: 100,
    });
    let links = build_nav_links(&PassthroughTranslator, None, &modules, session.role());
    let resolved = resolve_nav(&links, &NavContext::new(&session, &modules));

    let console = resolved.iter().find(|l| l.key == "console").unwrap();
    assert_eq!(console.href.as_deref(), Some("/console"));
    let logs = resolved.iter().find(|l| l.key == "logs").unwrap();
    assert_eq!(logs.href, None);
    assert_eq!(
        logs.children.iter().map(|c| c.href.clone().unwrap()).collect::<Vec<_>>(),
        vec!["/log", "/midjourney", "/task"]
    );
}
