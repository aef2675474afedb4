//! CLI output formatting tests.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::json::{HomeOutput, ModuleOutput, NoticeOutput, TokenOutput, TokensOutput};
    use super::super::text::TextFormatter;
    use pretty_assertions::assert_eq;
    use tollgate_core::{
        FacetOption, FilterState, FilterValue, HeaderNavModules, HomeContent, ModelRecord,
        PageSelectionState, PassthroughTranslator, PricingGroups, QuotaType, ResolvedNavLink,
        TokenRecord, compute_facets,
    };

    fn link(key: &str, text: &str, href: Option<&str>) -> ResolvedNavLink {
        ResolvedNavLink {
            key: key.into(),
            text: text.into(),
            href: href.map(str::to_string),
            external: false,
            children: Vec::new(),
        }
    }

    fn record(name: &str, vendor: Option<&str>, quota: QuotaType) -> ModelRecord {
        ModelRecord {
            vendor_name: vendor.map(str::to_string),
            quota_type: Some(quota),
            ..ModelRecord::new(name)
        }
    }

    #[test]
    fn test_nav_children_indented() {
        let formatter = TextFormatter::new(false);
        let mut logs = link("logs", "Logs", None);
        logs.children.push(link("usage-log", "Usage Logs", Some("/login")));
        let mut docs = link("docs", "Docs", Some("https://docs.example.com"));
        docs.external = true;

        let output = formatter.format_nav(&[link("home", "Home", Some("/")), logs, docs]);
        let expected = [
            "  Home → /",
            "  Logs → menu",
            "    Usage Logs → /login",
            "  Docs → https://docs.example.com (external)",
        ];
        assert_eq!(output, expected.join("\n"));
    }

    #[test]
    fn test_vendor_facet_marks_selection() {
        let formatter = TextFormatter::new(false);
        let records = vec![
            record("a", Some("A"), QuotaType::ByQuantity),
            record("b", Some("B"), QuotaType::ByCount),
            record("c", None, QuotaType::ByQuantity),
        ];
        let filters = FilterState::default();
        let facets = compute_facets(
            &records,
            &filters,
            &PricingGroups::default(),
            &PassthroughTranslator,
        );

        let output = formatter.format_facet("Vendor", &facets.vendor, &filters.vendor);
        assert_eq!(
            output,
            "Vendor\n  ● All vendors (3)\n  ○ A (1)\n  ○ B (1)\n  ○ Unknown vendor (1)"
        );
    }

    #[test]
    fn test_disabled_option_dimmed() {
        let formatter = TextFormatter::new(true);
        let options = vec![FacetOption {
            value: FilterValue::Only("embeddings".to_string()),
            label: "embeddings".into(),
            count: 0,
            disabled: true,
        }];

        let output = formatter.format_facet("Endpoint type", &options, &FilterValue::All);
        assert!(output.contains("\x1b[2m  ○ embeddings (0)\x1b[0m"));
    }

    #[test]
    fn test_models_unknown_vendor_and_tags() {
        let formatter = TextFormatter::new(false);
        let mut model = record("mj-imagine", None, QuotaType::ByCount);
        model.model_price = Some(0.05);
        model.tags = Some("Image; new".into());

        let output = formatter.format_models(&[&model], &PassthroughTranslator);
        assert_eq!(
            output,
            "  mj-imagine  Unknown vendor  Pay per request $0.05  image, new"
        );
        assert_eq!(
            formatter.format_models(&[], &PassthroughTranslator),
            "No matching models"
        );
    }

    #[test]
    fn test_modules_show_switches() {
        let formatter = TextFormatter::new(false);
        let mut modules = HeaderNavModules::default();
        modules.wallet = false;

        let output =
            formatter.format_modules(&ModuleOutput::list(&modules, &PassthroughTranslator));
        assert!(output.contains("[off] Wallet  Wallet management"));
        assert!(output.contains("[on ] Home"));
        assert!(output.contains("login required: no"));
    }

    #[test]
    fn test_tokens_selection_summary() {
        let formatter = TextFormatter::new(false);
        let tokens = [TokenRecord::new(1, "ci"), TokenRecord::new(2, "dev")];
        let output = TokensOutput {
            page: 1,
            page_size: 10,
            total: 5,
            page_state: PageSelectionState::Partial,
            selected_on_page: 1,
            selected: vec![1],
            items: vec![
                TokenOutput::from_record(&tokens[0], true),
                TokenOutput::from_record(&tokens[1], false),
            ],
        };

        let text = formatter.format_tokens(&output);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Page 1 · 2 of 5 tokens · selected 1 (partial on this page)"
        );
        assert!(lines[1].starts_with("  [x] #1 ci"));
        assert!(lines[2].starts_with("  [ ] #2 dev"));
        assert!(lines[2].ends_with("expires never"));
    }

    #[test]
    fn test_notice_states() {
        let formatter = TextFormatter::new(false);
        let mut notice = NoticeOutput {
            visible: true,
            dismissed_today: false,
            content: "Maintenance at 02:00".into(),
        };
        assert_eq!(formatter.format_notice(&notice), "Maintenance at 02:00");

        notice.visible = false;
        notice.dismissed_today = true;
        assert_eq!(formatter.format_notice(&notice), "Notice dismissed for today");

        notice.content = String::new();
        assert_eq!(formatter.format_notice(&notice), "Notice dismissed for today");

        notice.dismissed_today = false;
        notice.content = "   ".into();
        assert_eq!(formatter.format_notice(&notice), "No notice");
    }

    #[test]
    fn test_home_cached_marker() {
        let formatter = TextFormatter::new(false);
        let output = HomeOutput {
            cached: true,
            content: HomeContent::Embedded("https://status.example.com".into()),
            footer: None,
        };
        assert_eq!(
            formatter.format_home(&output),
            "Embedded page: https://status.example.com\n(cached, gateway unreachable)"
        );
    }

    #[test]
    fn test_home_footer() {
        let formatter = TextFormatter::new(false);
        let mut output = HomeOutput {
            cached: false,
            content: HomeContent::Document("Welcome".into()),
            footer: Some("<p>Run by Example Corp</p>".into()),
        };
        assert_eq!(
            formatter.format_home(&output),
            "Welcome\n\n<p>Run by Example Corp</p>"
        );

        output.cached = true;
        assert_eq!(
            formatter.format_home(&output),
            "Welcome\n\n<p>Run by Example Corp</p>\n(cached, gateway unreachable)"
        );
    }
}
