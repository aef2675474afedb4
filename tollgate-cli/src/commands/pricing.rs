//! Pricing command - list priced models with facet counts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tollgate_core::{
    FilterState, FilterValue, PricingCatalog, PricingViewState, QuotaType, VendorChoice,
    apply_filters, compute_facets,
};
use tollgate_fetch::ConsoleApi;
use tracing::debug;

use super::{build_client, load_store, load_translations, print_header};
use crate::output::{JsonFormatter, PricingOutput, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the pricing command.
#[derive(Args)]
pub struct PricingArgs {
    /// Vendor name, `unknown` for models without one, or `all`.
    #[arg(long)]
    pub vendor: Option<FilterValue<VendorChoice>>,

    /// Tag (case-insensitive) or `all`.
    #[arg(long)]
    pub tag: Option<FilterValue<String>>,

    /// Token group or `all`.
    #[arg(long)]
    pub group: Option<FilterValue<String>>,

    /// Billing type: 0 per token, 1 per request, or `all`.
    #[arg(long)]
    pub quota_type: Option<FilterValue<QuotaType>>,

    /// Endpoint type or `all`.
    #[arg(long)]
    pub endpoint: Option<FilterValue<String>>,

    /// Search model and vendor names.
    #[arg(long)]
    pub search: Option<String>,

    /// Read the catalog from a file instead of the gateway.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Only print the filter options and counts.
    #[arg(long)]
    pub facets_only: bool,

    /// Page of the result list (1-based).
    #[arg(long)]
    pub page: Option<usize>,

    /// Models per page.
    #[arg(long, default_value = "20")]
    pub page_size: usize,

    /// Start from default filters and preferences.
    #[arg(long)]
    pub reset: bool,

    /// Remember the resulting filters for the next run.
    #[arg(long)]
    pub save: bool,
}

impl PricingArgs {
    fn has_filter_args(&self) -> bool {
        self.vendor.is_some()
            || self.tag.is_some()
            || self.group.is_some()
            || self.quota_type.is_some()
            || self.endpoint.is_some()
            || self.search.is_some()
    }

    /// Writes the given flags over the saved filters.
    fn apply_to(&self, filters: &mut FilterState) {
        if let Some(vendor) = &self.vendor {
            filters.vendor = vendor.clone();
        }
        if let Some(tag) = &self.tag {
            filters.tag = tag.clone();
        }
        if let Some(group) = &self.group {
            filters.group = group.clone();
        }
        if let Some(quota_type) = &self.quota_type {
            filters.quota_type = quota_type.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            filters.endpoint_type = endpoint.clone();
        }
        if let Some(search) = &self.search {
            filters.search.clone_from(search);
        }
    }

    /// Combines the saved view with the command-line flags.
    fn view_state(&self, saved: PricingViewState) -> PricingViewState {
        let mut view = if self.reset {
            PricingViewState::default()
        } else {
            saved
        };
        if self.has_filter_args() {
            view.update_filters(|filters| self.apply_to(filters));
        }
        if let Some(page) = self.page {
            view.current_page = page.max(1);
        }
        view
    }
}

/// Runs the pricing command.
pub async fn run(args: &PricingArgs, cli: &Cli) -> Result<()> {
    let store = load_store(cli).await;
    let settings = store.get().await;
    let translator = load_translations(cli).await?;

    let mut view = args.view_state(settings.pricing.clone());

    let catalog = match &args.input {
        Some(path) => read_catalog(path).await?,
        None => build_client(&settings, cli)?.pricing().await?,
    };
    debug!(models = catalog.models.len(), "Catalog loaded");

    let filtered = apply_filters(&catalog.models, &view.filters);
    let facets = compute_facets(&catalog.models, &view.filters, &catalog.groups, &translator);
    let (page, visible) = paginate(&filtered, view.current_page, args.page_size);
    view.current_page = page;

    if args.save || args.reset {
        store.set_pricing_view(view.clone()).await;
        store.save().await?;
    }

    let output = PricingOutput {
        filters: &view.filters,
        total: filtered.len(),
        page,
        page_size: args.page_size.max(1),
        models: (!args.facets_only).then(|| visible.to_vec()),
        facets: &facets,
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            if let Some(models) = &output.models {
                print_header(&format!(
                    "Models ({} matching, page {})",
                    output.total, output.page
                ));
                println!("{}", formatter.format_models(models, &translator));
                println!();
            }
            print_header("Filters");
            println!("{}", formatter.format_facets(&facets, &view.filters, &translator));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}

/// Reads a catalog saved from `GET /api/pricing`.
async fn read_catalog(path: &Path) -> Result<PricingCatalog> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("cannot read catalog from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid catalog in {}", path.display()))
}

/// Returns the page actually shown (clamped to the last page) and its items.
fn paginate<T>(items: &[T], page: usize, page_size: usize) -> (usize, &[T]) {
    let page_size = page_size.max(1);
    let last_page = items.len().div_ceil(page_size).max(1);
    let page = page.clamp(1, last_page);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    (page, &items[start..end])
}
