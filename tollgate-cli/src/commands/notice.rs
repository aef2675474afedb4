//! Notice command - show or dismiss the site notice.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use tollgate_fetch::{ConsoleApi, FetchError};
use tollgate_store::{SettingsStore, today};
use tracing::debug;

use super::{build_client, load_store, print_header};
use crate::output::{JsonFormatter, NoticeOutput, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the notice command.
#[derive(Args)]
pub struct NoticeArgs {
    /// Hide the notice for the rest of today.
    #[arg(long)]
    pub dismiss: bool,

    /// Show the notice even if it was dismissed today.
    #[arg(long, conflicts_with = "dismiss")]
    pub force: bool,
}

/// Runs the notice command.
pub async fn run(args: &NoticeArgs, cli: &Cli) -> Result<()> {
    let store = load_store(cli).await;
    let today = today();

    if args.dismiss {
        store.dismiss_notice(today).await;
        store.save().await?;
    }

    let client = build_client(&store.get().await, cli)?;
    let output = notice_output(&client, &store, args.force, today).await?;

    match cli.format {
        OutputFormat::Text => {
            print_header("Notice");
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_notice(&output));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}

/// Resolves the notice for `today`.
///
/// A notice dismissed today is not fetched unless `force` is set.
async fn notice_output<A>(
    api: &A,
    store: &SettingsStore,
    force: bool,
    today: NaiveDate,
) -> Result<NoticeOutput, FetchError>
where
    A: ConsoleApi + ?Sized,
{
    let dismissed_today = store.notice_dismissed_on(today).await;
    if dismissed_today && !force {
        debug!(%today, "Notice dismissed today, skipping fetch");
        return Ok(NoticeOutput {
            visible: false,
            dismissed_today,
            content: String::new(),
        });
    }

    let content = api.notice().await?;
    let visible = if force {
        !content.trim().is_empty()
    } else {
        store.notice_visible(&content, today).await
    };
    Ok(NoticeOutput {
        visible,
        dismissed_today,
        content,
    })
}
