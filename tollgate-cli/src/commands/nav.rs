//! Nav command - show the header navigation a viewer would see.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tollgate_core::{NavContext, Session, SessionUser, build_nav_links, resolve_nav};
use tollgate_fetch::{ConsoleApi, ConsoleClient};
use tollgate_store::decode_option;
use tracing::{debug, warn};

use super::{
    StatusSnapshot, build_client, load_store, load_translations, print_header, refresh_status,
};
use crate::output::{JsonFormatter, NavOutput, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the nav command.
#[derive(Args)]
pub struct NavArgs {
    /// Render for a user with this role (1 common, 10 admin, 100 root).
    #[arg(long, conflicts_with = "anonymous")]
    pub role: Option<i64>,

    /// Render for a logged-out visitor.
    #[arg(long)]
    pub anonymous: bool,

    /// Documentation link (overrides the gateway status).
    #[arg(long)]
    pub docs_link: Option<String>,

    /// File holding a `HeaderNavModules` JSON value.
    #[arg(long, value_name = "FILE")]
    pub modules: Option<PathBuf>,

    /// Use cached gateway status without contacting the server.
    #[arg(long)]
    pub offline: bool,
}

/// Runs the nav command.
pub async fn run(args: &NavArgs, cli: &Cli) -> Result<()> {
    let store = load_store(cli).await;
    let settings = store.get().await;
    let client = build_client(&settings, cli)?;
    let translator = load_translations(cli).await?;

    let status = if args.offline {
        StatusSnapshot::from_settings(&settings)
    } else {
        refresh_status(&client, &store).await
    };

    let modules = match &args.modules {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("cannot read modules from {}", path.display()))?;
            decode_option(Some(&raw))
        }
        None => status.modules,
    };
    let docs_link = args.docs_link.clone().or(status.docs_link);
    let session = viewer_session(args, &client).await;

    let links = build_nav_links(&translator, docs_link.as_deref(), &modules, session.role());
    let ctx = NavContext::new(&session, &modules);
    let output = NavOutput {
        authenticated: ctx.authenticated,
        pricing_require_auth: ctx.pricing_require_auth,
        links: resolve_nav(&links, &ctx),
    };

    match cli.format {
        OutputFormat::Text => {
            let viewer = match session.role() {
                Some(role) => format!("role {role}"),
                None => "anonymous".to_string(),
            };
            print_header(&format!("Header Navigation ({viewer})"));
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_nav(&output.links));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}

/// Works out who the header is rendered for.
async fn viewer_session(args: &NavArgs, client: &ConsoleClient) -> Session {
    if args.anonymous {
        return Session::anonymous();
    }
    if let Some(role) = args.role {
        return Session::for_user(SessionUser {
            id: 0,
            username: String::new(),
            display_name: String::new(),
            role,
        });
    }
    if !client.has_credentials() {
        return Session::anonymous();
    }
    match client.user_self().await {
        Ok(user) => {
            debug!(user_id = user.id, role = user.role, "Rendering for logged-in user");
            Session::for_user(user)
        }
        Err(e) => {
            warn!(error = %e, "Could not load the current user, rendering as anonymous");
            Session::anonymous()
        }
    }
}
