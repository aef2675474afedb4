//! Text output formatting with colors.

use tollgate_core::{
    FacetOption, FilterState, FilterValue, HomeContent, ModelRecord, PageSelectionState,
    PricingFacets, QuotaType, ResolvedNavLink, Translator,
};

use super::json::{HomeOutput, ModuleOutput, NoticeOutput, TokenOutput, TokensOutput};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";

// Option markers
const SELECTED: char = '●';
const UNSELECTED: char = '○';

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    indent: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            indent: 2,
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Formats resolved header entries, children indented under their menu.
    pub fn format_nav(&self, links: &[ResolvedNavLink]) -> String {
        let mut lines = Vec::new();
        self.push_nav(&mut lines, links, 1);
        lines.join("\n")
    }

    fn push_nav(&self, lines: &mut Vec<String>, links: &[ResolvedNavLink], depth: usize) {
        let pad = " ".repeat(self.indent * depth);
        for link in links {
            let target = match &link.href {
                Some(href) if link.external => {
                    format!("{} {}", self.blue(href), self.dim("(external)"))
                }
                Some(href) => self.cyan(href),
                None => self.dim("menu"),
            };
            lines.push(format!("{pad}{} → {target}", self.bold(&link.text)));
            self.push_nav(lines, &link.children, depth + 1);
        }
    }

    // ========================================================================
    // Pricing
    // ========================================================================

    /// Formats every facet, marking the current selections.
    pub fn format_facets<T>(
        &self,
        facets: &PricingFacets,
        filters: &FilterState,
        translator: &T,
    ) -> String
    where
        T: Translator + ?Sized,
    {
        let sections = [
            self.format_facet(&translator.translate("Vendor"), &facets.vendor, &filters.vendor),
            self.format_facet(&translator.translate("Tag"), &facets.tag, &filters.tag),
            self.format_facet(&translator.translate("Group"), &facets.group, &filters.group),
            self.format_facet(
                &translator.translate("Billing type"),
                &facets.quota_type,
                &filters.quota_type,
            ),
            self.format_facet(
                &translator.translate("Endpoint type"),
                &facets.endpoint_type,
                &filters.endpoint_type,
            ),
        ];
        sections.join("\n\n")
    }

    /// Formats one facet's options with their counts.
    pub fn format_facet<V: PartialEq>(
        &self,
        title: &str,
        options: &[FacetOption<V>],
        selected: &FilterValue<V>,
    ) -> String {
        let pad = " ".repeat(self.indent);
        let mut lines = vec![self.bold(title)];
        for option in options {
            let marker = if option.value == *selected { SELECTED } else { UNSELECTED };
            let line = format!("{pad}{marker} {} ({})", option.label, option.count);
            lines.push(if option.disabled { self.dim(&line) } else { line });
        }
        lines.join("\n")
    }

    /// Formats the visible models, one per line.
    pub fn format_models<T>(&self, models: &[&ModelRecord], translator: &T) -> String
    where
        T: Translator + ?Sized,
    {
        if models.is_empty() {
            return self.dim(&translator.translate("No matching models"));
        }

        let pad = " ".repeat(self.indent);
        models
            .iter()
            .map(|model| {
                let vendor = model
                    .vendor()
                    .map_or_else(|| translator.translate("Unknown vendor"), str::to_string);
                let mut line = format!(
                    "{pad}{}  {}  {}",
                    self.bold(&model.model_name),
                    self.dim(&vendor),
                    self.billing(model, translator)
                );
                let tags = model.tag_list();
                if !tags.is_empty() {
                    line.push_str(&format!("  {}", self.cyan(&tags.join(", "))));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn billing<T: Translator + ?Sized>(&self, model: &ModelRecord, translator: &T) -> String {
        match model.quota_type {
            Some(QuotaType::ByQuantity) => {
                let mut text = translator.translate(QuotaType::ByQuantity.label_key());
                if let Some(ratio) = model.model_ratio {
                    text.push_str(&format!(" x{ratio}"));
                }
                if let Some(completion) = model.completion_ratio {
                    text.push_str(&format!(" / out x{completion}"));
                }
                text
            }
            Some(QuotaType::ByCount) => {
                let mut text = translator.translate(QuotaType::ByCount.label_key());
                if let Some(price) = model.model_price {
                    text.push_str(&format!(" ${price}"));
                }
                text
            }
            None => self.dim("-"),
        }
    }

    // ========================================================================
    // Header Modules
    // ========================================================================

    /// Formats the module switches as the settings screen lists them.
    pub fn format_modules(&self, modules: &[ModuleOutput]) -> String {
        let pad = " ".repeat(self.indent);
        let mut lines = Vec::new();
        for module in modules {
            let state = if module.enabled {
                self.green("on ")
            } else {
                self.red("off")
            };
            lines.push(format!(
                "{pad}[{state}] {}  {}",
                self.bold(&module.title),
                self.dim(&module.description)
            ));
            if let Some(require_auth) = module.require_auth {
                let value = if require_auth { "yes" } else { "no" };
                lines.push(format!("{pad}{pad}{pad}login required: {value}"));
            }
        }
        lines.join("\n")
    }

    // ========================================================================
    // Tokens
    // ========================================================================

    /// Formats a token page with its selection summary.
    pub fn format_tokens(&self, output: &TokensOutput) -> String {
        let state = match output.page_state {
            PageSelectionState::None => self.dim("none"),
            PageSelectionState::Partial => self.yellow("partial"),
            PageSelectionState::All => self.green("all"),
        };
        let mut lines = vec![format!(
            "Page {} · {} of {} tokens · selected {} ({state} on this page)",
            output.page,
            output.items.len(),
            output.total,
            output.selected.len(),
        )];
        lines.extend(output.items.iter().map(|token| self.format_token(token)));
        lines.join("\n")
    }

    fn format_token(&self, token: &TokenOutput) -> String {
        let pad = " ".repeat(self.indent);
        let check = if token.selected { "[x]" } else { "[ ]" };
        let status = match token.status {
            "Enabled" => self.green(token.status),
            "Disabled" => self.dim(token.status),
            other => self.red(other),
        };
        let expires = token
            .expires_at
            .map_or_else(|| "never".to_string(), |at| at.format("%Y-%m-%d").to_string());
        format!(
            "{pad}{check} #{} {}  {}  {status}  {}  {}  {}",
            token.id,
            self.bold(&token.name),
            self.dim(&token.key),
            token.quota,
            token.group,
            self.dim(&format!("expires {expires}")),
        )
    }

    // ========================================================================
    // Notice & Home
    // ========================================================================

    /// Formats the site notice.
    pub fn format_notice(&self, output: &NoticeOutput) -> String {
        if output.visible {
            output.content.clone()
        } else if output.dismissed_today {
            self.dim("Notice dismissed for today")
        } else {
            self.dim("No notice")
        }
    }

    /// Formats the home page content.
    pub fn format_home(&self, output: &HomeOutput) -> String {
        let body = match &output.content {
            HomeContent::Default => self.dim("Default landing page"),
            HomeContent::Embedded(url) => format!("Embedded page: {}", self.blue(url)),
            HomeContent::Document(text) => text.clone(),
        };
        let mut out = body;
        if let Some(footer) = &output.footer {
            out.push_str(&format!("\n\n{}", self.dim(footer)));
        }
        if output.cached {
            out.push_str(&format!("\n{}", self.yellow("(cached, gateway unreachable)")));
        }
        out
    }

    // ========================================================================
    // Color Helpers
    // ========================================================================

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn blue(&self, text: &str) -> String {
        self.paint(BLUE, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}
