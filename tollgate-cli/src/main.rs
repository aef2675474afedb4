// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Tollgate CLI - the gateway console from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Point at a gateway and log in
//! tollgate config set-server https://gw.example.com
//! tollgate config login <access-token> --user-id 1
//!
//! # Header navigation as an anonymous visitor
//! tollgate nav --anonymous
//!
//! # Pricing list filtered by vendor, with facet counts
//! tollgate pricing --vendor OpenAI --quota-type 0
//!
//! # Admin: hide the wallet entry
//! tollgate modules disable wallet
//!
//! # JSON output
//! tollgate pricing --format json --pretty
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tollgate_fetch::FetchError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config, home, modules, nav, notice, pricing, tokens};

// ============================================================================
// CLI Definition
// ============================================================================

/// Tollgate CLI - console for an API gateway billing deployment.
#[derive(Parser)]
#[command(name = "tollgate")]
#[command(about = "Console for an API gateway billing deployment")]
#[command(long_about = r"
Tollgate renders the gateway console from the command line: the header
navigation a visitor would see, the pricing list with its filter counts,
the header module switches, and the operator's notice and home page.

Examples:
  tollgate nav --anonymous             # Header as a logged-out visitor
  tollgate pricing --tag new           # Models tagged 'new'
  tollgate pricing --facets-only       # Filter options and counts only
  tollgate modules show                # Header module switches (admin)
  tollgate notice --dismiss            # Hide the notice until tomorrow
")]
#[command(version)]
#[command(author = "Tollgate Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Gateway URL (overrides the saved one).
    #[arg(long, global = true, env = "TOLLGATE_SERVER")]
    pub server: Option<String>,

    /// Access token (overrides the saved one).
    #[arg(long, global = true, env = "TOLLGATE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// User id sent with the token (overrides the saved one).
    #[arg(long, global = true, env = "TOLLGATE_USER_ID")]
    pub user_id: Option<i64>,

    /// Settings file (defaults to the platform config dir).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON file mapping message keys to translated labels.
    #[arg(long, global = true)]
    pub translations: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the header navigation for a viewer.
    #[command(visible_alias = "n")]
    Nav(nav::NavArgs),

    /// List priced models with filter options and counts.
    #[command(visible_alias = "p")]
    Pricing(pricing::PricingArgs),

    /// Show or change the header module switches (admin).
    #[command(visible_alias = "m")]
    Modules(modules::ModulesArgs),

    /// Show or dismiss the site notice.
    Notice(notice::NoticeArgs),

    /// Show the operator home page content.
    Home,

    /// List API tokens with a selection preview.
    #[command(visible_alias = "t")]
    Tokens(tokens::TokensArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Missing or rejected credentials.
    NotAuthenticated = 2,
    /// The gateway refused the request.
    ApiRejected = 3,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<FetchError>() {
            Some(e) if e.is_auth() => ExitCode::NotAuthenticated,
            Some(FetchError::Api { .. }) => ExitCode::ApiRejected,
            _ => ExitCode::Error,
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new(
            "tollgate=debug,tollgate_core=debug,tollgate_store=debug,tollgate_fetch=debug,info",
        )
    } else {
        EnvFilter::new("tollgate=warn,tollgate_store=warn,tollgate_fetch=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result: Result<()> = match &cli.command {
        Commands::Nav(args) => nav::run(args, &cli).await,
        Commands::Pricing(args) => pricing::run(args, &cli).await,
        Commands::Modules(args) => modules::run(args, &cli).await,
        Commands::Notice(args) => notice::run(args, &cli).await,
        Commands::Home => home::run(&cli).await,
        Commands::Tokens(args) => tokens::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli).await,
    };

    let code = match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            ExitCode::for_error(&e)
        }
    };
    std::process::exit(code as i32);
}
