//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use tollgate_fetch::{ConsoleApi, ConsoleClient};
use tollgate_store::{Settings, default_config_dir};
use tracing::info;

use super::{load_store, print_header};
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Placeholder printed instead of the access token.
const REDACTED: &str = "********";

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Set the gateway URL.
    SetServer {
        /// Base URL, e.g. `https://gw.example.com`.
        url: String,
    },

    /// Verify and store an access token.
    Login {
        /// Access token from the gateway's personal settings page.
        ///
        /// Pass `--user-id` as well when the gateway requires it.
        #[arg(value_name = "TOKEN")]
        access_token: String,
    },

    /// Forget the stored access token.
    Logout,

    /// Reset to defaults.
    Reset,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli).await,
        ConfigAction::Path => show_paths(cli).await,
        ConfigAction::SetServer { url } => set_server(url, cli).await,
        ConfigAction::Login { access_token } => login(access_token, cli).await,
        ConfigAction::Logout => logout(cli).await,
        ConfigAction::Reset => reset_config(cli).await,
    }
}

/// Copy of the settings that is safe to print.
fn redacted(mut settings: Settings) -> Settings {
    if settings.access_token.is_some() {
        settings.access_token = Some(REDACTED.to_string());
    }
    settings
}

async fn show_config(cli: &Cli) -> Result<()> {
    let store = load_store(cli).await;
    let settings = redacted(store.get().await);

    match cli.format {
        OutputFormat::Text => {
            print_header("Tollgate Configuration");
            println!();
            println!("Server:          {}", settings.server_url);
            println!("Logged in:       {}", settings.is_logged_in());
            if let Some(user_id) = settings.user_id {
                println!("User id:         {user_id}");
            }
            println!("Request timeout: {}s", settings.request_timeout().as_secs());
            println!("Log level:       {}", settings.log_level);
            println!();
            let filters = &settings.pricing.filters;
            if filters.is_unfiltered() {
                println!("Pricing filters: none saved");
            } else {
                println!("Pricing filters:");
                println!("  vendor:   {}", serde_json::to_string(&filters.vendor)?);
                println!("  tag:      {}", serde_json::to_string(&filters.tag)?);
                println!("  group:    {}", serde_json::to_string(&filters.group)?);
                println!("  billing:  {}", serde_json::to_string(&filters.quota_type)?);
                println!("  endpoint: {}", serde_json::to_string(&filters.endpoint_type)?);
                if !filters.search.is_empty() {
                    println!("  search:   {}", filters.search);
                }
            }
            match settings.notice_close_date {
                Some(date) => println!("Notice dismissed: {date}"),
                None => println!("Notice dismissed: never"),
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&settings)?);
        }
    }

    Ok(())
}

async fn show_paths(cli: &Cli) -> Result<()> {
    let config_dir = default_config_dir();
    let store = load_store(cli).await;
    let settings_path = store.path();

    match cli.format {
        OutputFormat::Text => {
            print_header("Configuration Paths");
            println!();
            println!("Config dir:    {}", config_dir.display());
            println!("Settings file: {}", settings_path.display());
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_dir": config_dir.display().to_string(),
                "settings_file": settings_path.display().to_string(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn set_server(url: &str, cli: &Cli) -> Result<()> {
    let store = load_store(cli).await;
    store.set_server_url(url).await?;
    store.save().await?;

    let server_url = store.get().await.server_url;
    info!(server = %server_url, "Server updated");
    println!("Server set to: {server_url}");

    Ok(())
}

async fn login(token: &str, cli: &Cli) -> Result<()> {
    let store = load_store(cli).await;
    let settings = store.get().await;
    let server = cli.server.as_deref().unwrap_or(&settings.server_url);

    let client = ConsoleClient::with_timeout(server, settings.request_timeout())?
        .with_credentials(token, cli.user_id);
    let user = client.user_self().await?;

    store
        .set_credentials(token.to_string(), Some(cli.user_id.unwrap_or(user.id)))
        .await;
    store.save().await?;

    info!(user_id = user.id, role = user.role, "Logged in");
    let name = if user.display_name.is_empty() {
        &user.username
    } else {
        &user.display_name
    };
    println!("Logged in as {name} (role {})", user.role);

    Ok(())
}

async fn logout(cli: &Cli) -> Result<()> {
    let store = load_store(cli).await;
    store.clear_credentials().await;
    store.save().await?;

    info!("Credentials cleared");
    println!("Logged out");

    Ok(())
}

async fn reset_config(cli: &Cli) -> Result<()> {
    let store = load_store(cli).await;
    let path = store.path().to_path_buf();

    if path.exists() {
        tokio::fs::remove_file(&path).await?;
        info!(path = %path.display(), "Settings reset");
        println!("Configuration reset to defaults");
    } else {
        println!("No configuration file to reset");
    }

    Ok(())
}
