//! Home command - show the operator home page content.

use anyhow::Result;
use tollgate_core::HomeContent;
use tollgate_fetch::{ConsoleApi, FetchError};
use tracing::warn;

use super::{build_client, load_store, print_header, refresh_status};
use crate::output::{HomeOutput, JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the home command.
///
/// Fresh content and footer replace the cache; when the gateway is
/// unreachable the cached copies are shown instead.
pub async fn run(cli: &Cli) -> Result<()> {
    let store = load_store(cli).await;
    let client = build_client(&store.get().await, cli)?;
    let footer = refresh_status(&client, &store).await.footer_html;

    let output = match client.home_page_content().await {
        Ok(raw) => {
            let content = HomeContent::classify(&raw);
            store.cache_home_content(raw).await;
            if let Err(e) = store.save_if_changed().await {
                warn!(error = %e, "Failed to cache home page content");
            }
            HomeOutput {
                cached: false,
                content,
                footer,
            }
        }
        Err(e) if e.is_transient() || matches!(e, FetchError::Http(_)) => {
            warn!(error = %e, "Home page content unavailable, showing cached copy");
            HomeOutput {
                cached: true,
                content: store.cached_home_content().await,
                footer,
            }
        }
        Err(e) => return Err(e.into()),
    };

    match cli.format {
        OutputFormat::Text => {
            print_header("Home");
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_home(&output));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}
