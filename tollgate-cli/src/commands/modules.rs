//! Modules command - header navigation switches (admin).

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use tollgate_core::{HeaderNavModules, NavModule};
use tollgate_fetch::{ConsoleApi, ConsoleClient};
use tollgate_store::{OPTION_KEY, SettingsStore, decode_option, encode_option};
use tracing::{info, warn};

use super::{build_client, load_store, load_translations, print_header};
use crate::output::{JsonFormatter, ModuleOutput, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the modules command.
#[derive(Args)]
pub struct ModulesArgs {
    #[command(subcommand)]
    pub action: ModulesAction,
}

/// Modules subcommands.
#[derive(Subcommand)]
pub enum ModulesAction {
    /// Show every switch.
    Show,

    /// Show a module in the header.
    Enable {
        /// Module key (home, console, token, wallet, account, logs, pricing, docs, about).
        module: NavModule,
    },

    /// Hide a module from the header.
    Disable {
        /// Module key.
        module: NavModule,
    },

    /// Make the pricing page login-only, or public again.
    RequireAuth {
        /// on or off.
        state: Toggle,
    },

    /// Restore every switch to its default.
    Reset,
}

/// An on/off argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    /// Enabled.
    On,
    /// Disabled.
    Off,
}

impl From<Toggle> for bool {
    fn from(value: Toggle) -> Self {
        value == Toggle::On
    }
}

/// Runs the modules command.
pub async fn run(args: &ModulesArgs, cli: &Cli) -> Result<()> {
    let store = load_store(cli).await;
    let client = build_client(&store.get().await, cli)?;

    let current = decode_option(client.option(OPTION_KEY).await?.as_deref());
    let updated = match &args.action {
        ModulesAction::Show => None,
        ModulesAction::Enable { module } => Some(edit(current, |m| m.set_enabled(*module, true))),
        ModulesAction::Disable { module } => Some(edit(current, |m| m.set_enabled(*module, false))),
        ModulesAction::RequireAuth { state } => {
            Some(edit(current, |m| m.set_pricing_require_auth((*state).into())))
        }
        ModulesAction::Reset => Some(edit(current, HeaderNavModules::reset)),
    };

    let modules = match updated {
        Some(modules) => {
            save_modules(&client, &store, &modules).await?;
            modules
        }
        None => current,
    };

    let translator = load_translations(cli).await?;
    let output = ModuleOutput::list(&modules, &translator);

    match cli.format {
        OutputFormat::Text => {
            print_header("Header Modules");
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_modules(&output));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}

fn edit<F>(mut modules: HeaderNavModules, f: F) -> HeaderNavModules
where
    F: FnOnce(&mut HeaderNavModules),
{
    f(&mut modules);
    modules
}

/// Stores the switches on the gateway and refreshes the local cache.
async fn save_modules(
    client: &ConsoleClient,
    store: &SettingsStore,
    modules: &HeaderNavModules,
) -> Result<()> {
    let value = encode_option(modules)?;
    client.update_option(OPTION_KEY, &value).await?;
    info!(option = OPTION_KEY, "Header modules updated");

    let docs_link = store.get().await.docs_link;
    store.cache_status(Some(value), docs_link).await;
    if let Err(e) = store.save_if_changed().await {
        warn!(error = %e, "Failed to cache header modules");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_pricing_keeps_login_gate() {
        let mut start = HeaderNavModules::default();
        start.set_pricing_require_auth(true);

        let modules = edit(start, |m| m.set_enabled(NavModule::Pricing, false));
        assert!(!modules.pricing.enabled);
        assert!(modules.pricing.require_auth);
    }

    #[test]
    fn test_edit_reset() {
        let mut start = HeaderNavModules::default();
        start.docs = false;
        assert_eq!(edit(start, HeaderNavModules::reset), HeaderNavModules::default());
    }

    #[test]
    fn test_toggle_into_bool() {
        assert!(bool::from(Toggle::On));
        assert!(!bool::from(Toggle::Off));
    }
}
